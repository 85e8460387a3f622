use actix_web::{delete, get, post, put, web, HttpResponse};
use log::debug;
use serde::Deserialize;
use todolist_core::log_field;

use crate::controllers::parse_body;
use crate::error::{ApiError, Result};
use crate::server::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_list)
        .service(get_all_lists)
        .service(get_list)
        .service(update_list)
        .service(delete_list);
}

#[derive(Deserialize)]
struct ListNameRequest {
    #[serde(rename = "Name", alias = "name", default)]
    name: String,
}

/// `POST /lists {"Name": "groceries"}`
#[post("/lists")]
async fn create_list(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse> {
    let request: ListNameRequest =
        parse_body(&body).map_err(|err| ApiError::list_bad_request("CreateToDoList", err))?;

    let list = state
        .service
        .create_list(&request.name)
        .map_err(|err| ApiError::list_operation("CreateToDoList", &request.name, err))?;

    debug!(
        "event=http_ok module=http caller=CreateToDoList list={}",
        log_field(list.name())
    );
    Ok(HttpResponse::Ok().json(list))
}

#[get("/lists")]
async fn get_all_lists(state: web::Data<AppState>) -> Result<HttpResponse> {
    let lists = state
        .service
        .get_all_lists()
        .map_err(|err| ApiError::list_operation("GetAllToDoList", "all", err))?;

    debug!("event=http_ok module=http caller=GetAllToDoList count={}", lists.len());
    Ok(HttpResponse::Ok().json(lists))
}

#[get("/lists/{list}")]
async fn get_list(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let name = path.into_inner();
    let list = state
        .service
        .get_list(&name)
        .map_err(|err| ApiError::list_operation("GetToDoList", &name, err))?;

    debug!(
        "event=http_ok module=http caller=GetToDoList list={} tasks={}",
        log_field(&name),
        list.task_number()
    );
    Ok(HttpResponse::Ok().json(list))
}

/// `PUT /lists/{list} {"Name": "new name"}`
#[put("/lists/{list}")]
async fn update_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let name = path.into_inner();
    let request: ListNameRequest =
        parse_body(&body).map_err(|err| ApiError::list_bad_request("UpdateToDoList", err))?;

    let list = state
        .service
        .update_list(&name, &request.name)
        .map_err(|err| ApiError::list_operation("UpdateToDoList", &name, err))?;

    debug!(
        "event=http_ok module=http caller=UpdateToDoList list={} new_name={}",
        log_field(&name),
        log_field(list.name())
    );
    Ok(HttpResponse::Ok().json(list))
}

#[delete("/lists/{list}")]
async fn delete_list(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let name = path.into_inner();
    let list = state
        .service
        .delete_list(&name)
        .map_err(|err| ApiError::list_operation("DeleteToDoList", &name, err))?;

    debug!(
        "event=http_ok module=http caller=DeleteToDoList list={} tasks={}",
        log_field(list.name()),
        list.task_number()
    );
    Ok(HttpResponse::Ok().json(list))
}
