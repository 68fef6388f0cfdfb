//! Application error type and its translation to HTTP problem responses

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Debug, Error)]
pub enum AppError {
    /// The client sent contradictory input, e.g. an id on create.
    #[error("{message}")]
    InvalidRequest {
        message: String,
        entity_name: String,
        error_key: String,
    },
    #[error("Not found")]
    NotFound,
    /// Duplicate unique value or missing required column.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Db(DbErr),
}

impl AppError {
    pub fn invalid_request(
        message: impl Into<String>,
        entity_name: impl Into<String>,
        error_key: impl Into<String>,
    ) -> Self {
        AppError::InvalidRequest {
            message: message.into(),
            entity_name: entity_name.into(),
            error_key: error_key.into(),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::ConstraintViolation(detail)
            }
            _ => AppError::Db(err),
        }
    }
}

/// Problem details body (RFC 7807) with the alert fields clients read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl Problem {
    fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            entity_name: None,
            error_key: None,
            message: None,
            params: None,
        }
    }
}

/// Marker left on failed responses so the alert layer can add
/// `X-{app}-error` / `X-{app}-params` headers.
#[derive(Debug, Clone)]
pub struct FailureAlert {
    pub entity_name: String,
    pub error_key: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidRequest {
                message,
                entity_name,
                error_key,
            } => {
                let mut problem = Problem::new(StatusCode::BAD_REQUEST, message);
                problem.entity_name = Some(entity_name.clone());
                problem.error_key = Some(error_key.clone());
                problem.message = Some(format!("error.{}", error_key));
                problem.params = Some(entity_name.clone());

                let mut response = problem_response(problem);
                response.extensions_mut().insert(FailureAlert {
                    entity_name,
                    error_key,
                });
                response
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::ConstraintViolation(detail) => {
                let mut problem = Problem::new(StatusCode::BAD_REQUEST, "Constraint violation");
                problem.detail = Some(detail);
                problem.message = Some("error.constraintviolation".to_string());
                problem_response(problem)
            }
            AppError::Validation(detail) => {
                let mut problem = Problem::new(StatusCode::BAD_REQUEST, "Bad Request");
                problem.detail = Some(detail);
                problem_response(problem)
            }
            AppError::Db(err) => {
                tracing::error!(error = %err, "Unhandled database error");
                problem_response(Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                ))
            }
        }
    }
}

fn problem_response(problem: Problem) -> Response {
    let status = StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(problem)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
    );
    response
}
