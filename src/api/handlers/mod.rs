use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::settings::AppConfig;
use crate::errors::StoreError;

pub mod export;
pub mod players;
pub mod roster;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

pub fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::Validation(message) => {
            (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
        }
        StoreError::NotFound(id) => {
            (StatusCode::NOT_FOUND, format!("Player {} not found", id)).into_response()
        }
        StoreError::Database(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response()
        }
    }
}
