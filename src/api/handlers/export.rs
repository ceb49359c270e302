use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use urlencoding::encode;

use crate::config::settings::ExportSettings;
use crate::database;
use crate::export;

use super::{store_error_response, AppState};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn export_roster(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let players = match database::players::list_all(&mut conn) {
        Ok(players) => players,
        Err(e) => return store_error_response(e),
    };

    let buffer = match export::build_workbook(&players) {
        Ok(buffer) => buffer,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Export Error: {}", e))
                .into_response()
        }
    };

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            content_disposition(&state.config.export),
        ),
    ];

    (headers, buffer).into_response()
}

/// `filename` carries an ASCII fallback, `filename*` the UTF-8 display
/// name per RFC 5987.
fn content_disposition(settings: &ExportSettings) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        settings.ascii_filename,
        encode(settings.display_filename)
    )
}
