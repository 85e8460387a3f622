use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use todolist_core::{MemoryTodoStore, SqliteTodoStore, TodoStore};
use todolist_server::{app_config, AppState};

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .wrap(NormalizePath::trim())
                .configure(app_config),
        )
        .await
    };
}

fn states() -> Vec<(&'static str, web::Data<AppState>)> {
    vec![
        (
            "memory",
            web::Data::new(AppState::new(
                Box::new(MemoryTodoStore::new()) as Box<dyn TodoStore>
            )),
        ),
        (
            "sqlite",
            web::Data::new(AppState::new(
                Box::new(SqliteTodoStore::open_in_memory().unwrap()) as Box<dyn TodoStore>,
            )),
        ),
    ]
}

fn first_error(body: &Value) -> &Value {
    &body["Errors"][0]
}

#[actix_web::test]
async fn groceries_round_trip() {
    for (backend, state) in states() {
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/lists")
            .set_json(json!({"Name": "groceries"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"Name": "groceries", "TaskNumber": 0, "Tasks": []}), "{backend}");

        for title in ["milk", "eggs"] {
            let req = test::TestRequest::post()
                .uri("/lists/groceries/tasks")
                .set_json(json!({"Title": title}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{backend}");
        }

        let req = test::TestRequest::put()
            .uri("/lists/groceries/tasks/milk")
            .set_json(json!({"Title": "", "Done": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"ToDoList": "groceries", "ID": 1, "Title": "milk", "Done": true}),
            "{backend}"
        );

        let req = test::TestRequest::get().uri("/lists/groceries").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["TaskNumber"], 2, "{backend}");
        assert_eq!(body["Tasks"][0]["Title"], "milk", "{backend}");
        assert_eq!(body["Tasks"][0]["Done"], true, "{backend}");
        assert_eq!(body["Tasks"][1]["Title"], "eggs", "{backend}");
        assert_eq!(body["Tasks"][1]["ID"], 2, "{backend}");

        let req = test::TestRequest::get()
            .uri("/lists/groceries/tasks/id/2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["Title"], "eggs", "{backend}");

        let req = test::TestRequest::delete()
            .uri("/lists/groceries/tasks/eggs")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ID"], 2, "{backend}");

        let req = test::TestRequest::delete().uri("/lists/groceries").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["TaskNumber"], 1, "{backend}");

        let req = test::TestRequest::get().uri("/lists").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!([]), "{backend}");
    }
}

#[actix_web::test]
async fn rename_list_moves_tasks() {
    for (backend, state) in states() {
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/lists")
            .set_json(json!({"Name": "chores"}))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::post()
            .uri("/lists/chores/tasks")
            .set_json(json!({"Title": "laundry"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/lists/chores")
            .set_json(json!({"Name": "weekend"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["Name"], "weekend", "{backend}");
        assert_eq!(body["Tasks"][0]["ToDoList"], "weekend", "{backend}");

        let req = test::TestRequest::get().uri("/lists/chores").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{backend}");
    }
}

#[actix_web::test]
async fn missing_list_reports_not_found_with_error_body() {
    for (backend, state) in states() {
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/lists/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        let error = first_error(&body);
        assert_eq!(error["Code"], 11, "{backend}");
        assert_eq!(
            error["ErrorMessage"],
            "Error while performing operation on ToDo list = {nowhere}",
            "{backend}"
        );
        assert!(error["TechnicalReason"].as_str().unwrap().contains("nowhere"));

        let req = test::TestRequest::post()
            .uri("/lists/nowhere/tasks")
            .set_json(json!({"Title": "milk"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(first_error(&body)["Code"], 21, "{backend}");
    }
}

#[actix_web::test]
async fn duplicates_report_conflict() {
    for (backend, state) in states() {
        let app = test_app!(state);

        for expected in [StatusCode::OK, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/lists")
                .set_json(json!({"Name": "groceries"}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "{backend}");
        }

        for expected in [StatusCode::OK, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/lists/groceries/tasks")
                .set_json(json!({"Title": "milk"}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "{backend}");
        }

        let req = test::TestRequest::post()
            .uri("/lists")
            .set_json(json!({"Name": "hardware"}))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::put()
            .uri("/lists/hardware")
            .set_json(json!({"Name": "groceries"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(first_error(&body)["Code"], 11, "{backend}");
    }
}

#[actix_web::test]
async fn blank_and_malformed_input_is_bad_request() {
    for (backend, state) in states() {
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/lists")
            .set_json(json!({"Name": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(first_error(&body)["Code"], 10, "{backend}");

        let req = test::TestRequest::post()
            .uri("/lists")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(first_error(&body)["Code"], 10, "{backend}");

        let req = test::TestRequest::get().uri("/lists/%20").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{backend}");

        let req = test::TestRequest::post()
            .uri("/lists")
            .set_json(json!({"Name": "groceries"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/lists/groceries/tasks")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(first_error(&body)["Code"], 20, "{backend}");

        let req = test::TestRequest::get()
            .uri("/lists/groceries/tasks/id/first")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{backend}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(first_error(&body)["Code"], 20, "{backend}");
    }
}

#[actix_web::test]
async fn trailing_slash_routes_like_bare_path() {
    for (backend, state) in states() {
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/lists/")
            .set_json(json!({"Name": "groceries"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{backend}");

        let req = test::TestRequest::get().uri("/lists/groceries/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{backend}");
    }
}

#[actix_web::test]
async fn health_reports_version() {
    let (_, state) = states().remove(0);
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], todolist_core::core_version());
}
