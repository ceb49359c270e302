use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::models::{
    BatchAddRequest, BatchAddResponse, BulkAssignmentRequest, BulkAssignmentResponse,
    DashboardResponse, JobGroupView, JobStatsView, PlayerView,
};
use crate::database;
use crate::domain::{batch, jobs, roster};

use super::{store_error_response, AppState};

pub async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let stats = match roster::job_stats(&mut conn) {
        Ok(stats) => stats,
        Err(e) => return store_error_response(e),
    };
    let grouped = match roster::grouped_by_job(&mut conn) {
        Ok(grouped) => grouped,
        Err(e) => return store_error_response(e),
    };

    Json(DashboardResponse {
        stats: stats.into_iter().map(JobStatsView::from).collect(),
        grouped: grouped.into_iter().map(JobGroupView::from).collect(),
    })
    .into_response()
}

pub async fn list_job(
    State(state): State<Arc<AppState>>,
    Path(job): Path<String>,
) -> impl IntoResponse {
    if !jobs::is_valid(&job) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown job: {}", job),
        )
            .into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::list_by_job(&mut conn, &job) {
        Ok(players) => {
            let views: Vec<PlayerView> = players.into_iter().map(PlayerView::from).collect();
            Json(views).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn bulk_assign(
    State(state): State<Arc<AppState>>,
    Path(job): Path<String>,
    Json(request): Json<BulkAssignmentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let assignments: HashMap<i64, database::AssignmentFields> = request
        .assignments
        .into_iter()
        .map(|(id, fields)| (id, fields.into_fields()))
        .collect();

    match database::players::set_assignments_for_job(&mut conn, &job, &assignments) {
        Ok(updated) => Json(BulkAssignmentResponse {
            status: "success",
            updated,
        })
        .into_response(),
        Err(e) => store_error_response(e),
    }
}

/// Batch ingest: parse the whole text block first, then persist the
/// valid lines in one write. Line errors come back in the response
/// body, they never fail the request.
pub async fn batch_add(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchAddRequest>,
) -> impl IntoResponse {
    let outcome = batch::parse_batch(&request.players);

    let added = if outcome.players.is_empty() {
        0
    } else {
        let mut conn = match state.pool.get() {
            Ok(conn) => conn,
            Err(_) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response()
            }
        };

        match database::players::insert_batch(&mut conn, &outcome.players) {
            Ok(added) => added,
            Err(e) => return store_error_response(e),
        }
    };

    log::info!("Batch add: {} added, {} rejected lines", added, outcome.errors.len());

    Json(BatchAddResponse {
        added,
        errors: outcome.errors,
    })
    .into_response()
}
