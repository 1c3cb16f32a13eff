use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use std::convert::From;

/// postgres SQLSTATE for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// postgres SQLSTATE for a not null violation
const NOT_NULL_VIOLATION: &str = "23502";

#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "ValidationError: {}", _0)]
    ValidationError(String),

    #[display(fmt = "Bad Gateway")]
    BadGateway,

    #[display(fmt = "Not Found")]
    NotFound,
}

impl std::error::Error for ServiceError {}

// impl ResponseError trait allows to convert our errors into http responses with appropriate data
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::BadGateway => StatusCode::BAD_GATEWAY,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InternalServerError => {
                HttpResponse::InternalServerError().json("Internal Server Error, Please try later")
            }
            ServiceError::ValidationError(ref message) => {
                HttpResponse::UnprocessableEntity().json(message)
            }
            ServiceError::BadGateway => HttpResponse::BadGateway().json("Bad Gateway"),
            ServiceError::NotFound => HttpResponse::NotFound().json("Not Found"),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> ServiceError {
        match error {
            sqlx::Error::RowNotFound => ServiceError::NotFound,
            sqlx::Error::Database(ref err) => match err.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) | Some(NOT_NULL_VIOLATION) => {
                    debug!("constraint violation: {}", err);
                    ServiceError::ValidationError(err.message().to_string())
                }
                _ => {
                    error!("db error: {}", error);
                    ServiceError::InternalServerError
                }
            },
            _ => {
                error!("db error: {}", error);
                ServiceError::InternalServerError
            }
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> ServiceError {
        error!("unable to reach the api: {}", error);
        ServiceError::BadGateway
    }
}
