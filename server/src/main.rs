use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use taskdesk_server::{configure, TaskRepository};

#[derive(Parser, Debug)]
#[command(name = "taskdesk-server", version, about = "In-memory task API for local development")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: String,

    /// Start with a handful of demo tasks
    #[arg(long)]
    seed: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let repo = web::Data::new(TaskRepository::new());
    if args.seed {
        repo.seed_demo();
        log::info!("seeded {} demo tasks", repo.len());
    }

    log::info!("listening on http://{}", args.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .configure(configure)
    })
    .bind(&args.bind)?
    .run()
    .await
}
