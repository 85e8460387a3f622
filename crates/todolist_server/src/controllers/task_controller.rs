use actix_web::{delete, get, post, put, web, HttpResponse};
use log::debug;
use serde::Deserialize;
use todolist_core::{log_field, TaskId};

use crate::controllers::parse_body;
use crate::error::{ApiError, Result};
use crate::server::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_task)
        .service(get_task_by_id)
        .service(get_task)
        .service(update_task)
        .service(delete_task);
}

#[derive(Deserialize)]
struct CreateTaskRequest {
    #[serde(rename = "Title", alias = "title", default)]
    title: String,
}

/// A blank `Title` keeps the current title.
#[derive(Deserialize)]
struct UpdateTaskRequest {
    #[serde(rename = "Title", alias = "title", default)]
    title: String,
    #[serde(rename = "Done", alias = "done", default)]
    done: bool,
}

/// `POST /lists/{list}/tasks {"Title": "milk"}`
#[post("/lists/{list}/tasks")]
async fn create_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let list = path.into_inner();
    let request: CreateTaskRequest =
        parse_body(&body).map_err(|err| ApiError::task_bad_request("CreateTask", err))?;

    let task = state
        .service
        .add_task(&list, &request.title)
        .map_err(|err| ApiError::task_operation("CreateTask", &request.title, &list, err))?;

    debug!(
        "event=http_ok module=http caller=CreateTask list={} id={}",
        log_field(&list),
        task.id
    );
    Ok(HttpResponse::Ok().json(task))
}

#[get("/lists/{list}/tasks/id/{id}")]
async fn get_task_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (list, raw_id) = path.into_inner();
    let id: TaskId = raw_id.parse().map_err(|err| {
        ApiError::task_bad_request("GetTaskById", format!("invalid task id `{raw_id}`: {err}"))
    })?;

    let task = state
        .service
        .get_task_by_id(&list, id)
        .map_err(|err| ApiError::task_operation("GetTaskById", &raw_id, &list, err))?;

    debug!(
        "event=http_ok module=http caller=GetTaskById list={} id={}",
        log_field(&list),
        task.id
    );
    Ok(HttpResponse::Ok().json(task))
}

#[get("/lists/{list}/tasks/{task}")]
async fn get_task(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (list, title) = path.into_inner();
    let task = state
        .service
        .get_task(&list, &title)
        .map_err(|err| ApiError::task_operation("GetTask", &title, &list, err))?;

    debug!(
        "event=http_ok module=http caller=GetTask list={} id={}",
        log_field(&list),
        task.id
    );
    Ok(HttpResponse::Ok().json(task))
}

/// `PUT /lists/{list}/tasks/{task} {"Title": "new title", "Done": true}`
#[put("/lists/{list}/tasks/{task}")]
async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let (list, title) = path.into_inner();
    let request: UpdateTaskRequest =
        parse_body(&body).map_err(|err| ApiError::task_bad_request("UpdateTask", err))?;

    let task = state
        .service
        .update_task(&list, &title, &request.title, request.done)
        .map_err(|err| ApiError::task_operation("UpdateTask", &title, &list, err))?;

    debug!(
        "event=http_ok module=http caller=UpdateTask list={} id={} done={}",
        log_field(&list),
        task.id,
        task.done
    );
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/lists/{list}/tasks/{task}")]
async fn delete_task(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (list, title) = path.into_inner();
    let task = state
        .service
        .remove_task(&list, &title)
        .map_err(|err| ApiError::task_operation("DeleteTask", &title, &list, err))?;

    debug!(
        "event=http_ok module=http caller=DeleteTask list={} id={}",
        log_field(&list),
        task.id
    );
    Ok(HttpResponse::Ok().json(task))
}
