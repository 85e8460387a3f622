use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{error, warn};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use todolist_core::{log_field, StoreError, StoreErrorKind};

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

pub const TODOLIST_BAD_REQUEST: i32 = 10;
pub const TODOLIST_OPERATION_ERROR: i32 = 11;
pub const TASK_BAD_REQUEST: i32 = 20;
pub const TASK_OPERATION_ERROR: i32 = 21;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input.
    #[error("{message}")]
    BadRequest {
        code: i32,
        caller: &'static str,
        message: String,
        reason: String,
    },

    /// The store rejected or failed the operation.
    #[error("{message}")]
    Operation {
        code: i32,
        caller: &'static str,
        message: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn list_bad_request(caller: &'static str, reason: impl Display) -> Self {
        Self::BadRequest {
            code: TODOLIST_BAD_REQUEST,
            caller,
            message: "Missing ToDo list name".to_string(),
            reason: format!("Bad request received: missing mandatory parameter list name. {reason}"),
        }
    }

    pub fn task_bad_request(caller: &'static str, reason: impl Display) -> Self {
        Self::BadRequest {
            code: TASK_BAD_REQUEST,
            caller,
            message: "Missing ToDo list name or task title".to_string(),
            reason: format!(
                "Bad request received: missing mandatory parameters list or title. {reason}"
            ),
        }
    }

    /// Maps a store failure on a list; empty input still reports as a bad
    /// request.
    pub fn list_operation(caller: &'static str, list: &str, source: StoreError) -> Self {
        if source.kind() == StoreErrorKind::EmptyField {
            return Self::list_bad_request(caller, source);
        }
        Self::Operation {
            code: TODOLIST_OPERATION_ERROR,
            caller,
            message: format!("Error while performing operation on ToDo list = {{{list}}}"),
            source,
        }
    }

    pub fn task_operation(caller: &'static str, task: &str, list: &str, source: StoreError) -> Self {
        if source.kind() == StoreErrorKind::EmptyField {
            return Self::task_bad_request(caller, source);
        }
        Self::Operation {
            code: TASK_OPERATION_ERROR,
            caller,
            message: format!(
                "Error while performing operation on task = {{{task}}}, ToDo list = {{{list}}}"
            ),
            source,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest { code, .. } | Self::Operation { code, .. } => *code,
        }
    }

    fn caller(&self) -> &'static str {
        match self {
            Self::BadRequest { caller, .. } | Self::Operation { caller, .. } => *caller,
        }
    }

    /// One-line `http_error` event; message and reason carry client input.
    fn log_record(&self, status_code: StatusCode, technical_reason: &str) -> String {
        format!(
            "event=http_error module=http status={} caller={} message={} reason={}",
            status_code.as_u16(),
            self.caller(),
            log_field(&self.to_string()),
            log_field(technical_reason)
        )
    }

    fn technical_reason(&self) -> String {
        match self {
            Self::BadRequest { reason, .. } => reason.clone(),
            Self::Operation { source, .. } => source.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CustomError {
    #[serde(rename = "Code")]
    code: i32,
    #[serde(rename = "ErrorMessage")]
    error_message: String,
    #[serde(rename = "TechnicalReason")]
    technical_reason: String,
}

#[derive(Serialize)]
struct ListError {
    #[serde(rename = "Errors")]
    errors: Vec<CustomError>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Operation { source, .. } => match source.kind() {
                StoreErrorKind::EmptyField => StatusCode::BAD_REQUEST,
                StoreErrorKind::NotFound => StatusCode::NOT_FOUND,
                StoreErrorKind::AlreadyExists => StatusCode::CONFLICT,
                StoreErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let technical_reason = self.technical_reason();
        let record = self.log_record(status_code, &technical_reason);
        if status_code.is_server_error() {
            error!("{record}");
        } else {
            warn!("{record}");
        }

        let body = ListError {
            errors: vec![CustomError {
                code: self.code(),
                error_message: self.to_string(),
                technical_reason,
            }],
        };
        HttpResponse::build(status_code).json(body)
    }
}
