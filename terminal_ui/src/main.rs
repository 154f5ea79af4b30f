use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use taskdesk::{config::Config, ui, App, Dispatcher, HttpTaskApi, Message, TaskStore};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Owns raw mode and the alternate screen. Dropping it puts the terminal back,
/// so every exit from `main` restores it, including a failed setup.
struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    fn enter() -> Result<(Self, Terminal<CrosstermBackend<Stdout>>)> {
        enable_raw_mode().context("enable raw mode")?;
        let mut guard = Self {
            alternate_screen: false,
        };
        execute!(io::stdout(), EnterAlternateScreen).context("enter alternate screen")?;
        guard.alternate_screen = true;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.alternate_screen {
            if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
                log::error!("leave alternate screen: {err}");
            }
        }
        if let Err(err) = disable_raw_mode() {
            log::error!("disable raw mode: {err}");
        }
    }
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut messages: UnboundedReceiver<Message>,
) -> Result<()> {
    let mut events = EventStream::new();
    app.start();

    loop {
        terminal.draw(|f| ui::draw(f, &app.view()))?;
        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            Some(message) = messages.recv() => app.handle_message(message),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err).context("read terminal event"),
                None => return Ok(()),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_file)?;

    let api = HttpTaskApi::new(config.api_url.clone(), config.timeout())
        .context("build HTTP client")?;
    log::info!("using task API at {}", api.base());

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        TaskStore::new(config.ordering()),
        Dispatcher::new(Arc::new(api), tx),
    );

    let (guard, mut terminal) = TerminalGuard::enter()?;
    let result = run(&mut terminal, &mut app, rx).await;
    drop(guard);

    if let Err(err) = &result {
        log::error!("{err:?}");
    }
    result
}
