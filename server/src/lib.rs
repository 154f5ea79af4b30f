//! Development server for the task REST API.
//!
//! Everything lives in memory; restarting the process starts from an empty
//! (or freshly seeded) list.

pub mod repository;

use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use taskdesk_shared::{validate_title, TaskId, TitleError, UpdateTaskRequest, PAGE_SIZE};
use url::Url;

pub use repository::{Ordering, TaskPatch, TaskRepository};

const MAX_PAGE_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    page_size: Option<String>,
    is_completed: Option<String>,
    ordering: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_completed: Option<bool>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(task_list)
        .service(task_detail)
        .service(task_create)
        .service(task_update)
        .service(task_delete);
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "detail": "Not found." }))
}

fn invalid_title(err: TitleError) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "title": [err.to_string()] }))
}

fn parse_completion(raw: Option<&str>) -> Option<bool> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

fn parse_page_size(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(PAGE_SIZE as usize, |n| n.min(MAX_PAGE_SIZE))
}

/// Absolute link to another page of the same listing, keeping every other
/// query parameter. Page 1 is expressed by dropping `page` altogether.
fn page_link(req: &HttpRequest, page: usize) -> Option<String> {
    let info = req.connection_info();
    let mut url = Url::parse(&format!("{}://{}{}", info.scheme(), info.host(), req.path())).ok()?;
    let kept: Vec<(String, String)> = url::form_urlencoded::parse(req.query_string().as_bytes())
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.extend_pairs(kept);
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Some(url.into())
}

#[get("/api/tasks/all/")]
async fn task_list(
    req: HttpRequest,
    repo: web::Data<TaskRepository>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let ordering = match query.ordering.as_deref() {
        None => Ordering::default(),
        Some(raw) => match raw.parse::<Ordering>() {
            Ok(ordering) => ordering,
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(json!({ "error": "Invalid ordering field." }))
            }
        },
    };

    let tasks = repo.list(parse_completion(query.is_completed.as_deref()), ordering);
    let size = parse_page_size(query.page_size.as_deref());
    let last = tasks.len().div_ceil(size).max(1);
    let page = match query.page.as_deref().unwrap_or("1").parse::<usize>() {
        Ok(p) if (1..=last).contains(&p) => p,
        _ => return HttpResponse::NotFound().json(json!({ "detail": "Invalid page." })),
    };

    let count = tasks.len();
    let results: Vec<_> = tasks.into_iter().skip((page - 1) * size).take(size).collect();
    let next = (page < last).then(|| page_link(&req, page + 1)).flatten();
    let previous = (page > 1).then(|| page_link(&req, page - 1)).flatten();

    HttpResponse::Ok().json(json!({
        "count": count,
        "next": next,
        "previous": previous,
        "results": results,
    }))
}

#[get("/api/tasks/{id:\\d+}/")]
async fn task_detail(repo: web::Data<TaskRepository>, path: web::Path<u64>) -> HttpResponse {
    match repo.get(TaskId(path.into_inner())) {
        Some(task) => HttpResponse::Ok().json(task),
        None => not_found(),
    }
}

#[post("/api/tasks/create/")]
async fn task_create(repo: web::Data<TaskRepository>, body: web::Json<NewTask>) -> HttpResponse {
    let body = body.into_inner();
    let Some(raw_title) = body.title else {
        return HttpResponse::BadRequest().json(json!({ "title": ["This field is required."] }));
    };
    let title = match validate_title(&raw_title) {
        Ok(title) => title,
        Err(err) => return invalid_title(err),
    };

    let task = repo.create(
        title,
        body.description.unwrap_or_default(),
        body.is_completed.unwrap_or(false),
    );
    log::info!("created task {} ({:?})", task.id, task.title);
    HttpResponse::Created().json(task)
}

#[patch("/api/tasks/{id:\\d+}/update/")]
async fn task_update(
    repo: web::Data<TaskRepository>,
    path: web::Path<u64>,
    body: web::Json<UpdateTaskRequest>,
) -> HttpResponse {
    let id = TaskId(path.into_inner());
    if repo.get(id).is_none() {
        return not_found();
    }

    let body = body.into_inner();
    let title = match body.title.as_deref().map(validate_title).transpose() {
        Ok(title) => title,
        Err(err) => return invalid_title(err),
    };
    let patch = TaskPatch {
        title,
        description: body.description,
        is_completed: body.is_completed,
    };

    match repo.update(id, patch) {
        Some(task) => {
            log::info!("updated task {}", task.id);
            HttpResponse::Ok().json(task)
        }
        None => not_found(),
    }
}

#[delete("/api/tasks/{id:\\d+}/delete/")]
async fn task_delete(repo: web::Data<TaskRepository>, path: web::Path<u64>) -> HttpResponse {
    let id = TaskId(path.into_inner());
    if repo.delete(id) {
        log::info!("deleted task {id}");
        HttpResponse::NoContent().finish()
    } else {
        not_found()
    }
}
