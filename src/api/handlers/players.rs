use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    AssignmentRequest, CreatePlayerRequest, EditPlayerRequest, PlayerView, StatusResponse,
    ToggleResponse,
};
use crate::database;

use super::{store_error_response, AppState};

pub async fn list_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::list_all(&mut conn) {
        Ok(players) => {
            let views: Vec<PlayerView> = players.into_iter().map(PlayerView::from).collect();
            Json(views).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePlayerRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::insert_player(&mut conn, &request.into_new_player()) {
        Ok(player) => (StatusCode::CREATED, Json(PlayerView::from(player))).into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::find_by_id(&mut conn, id) {
        Ok(player) => Json(PlayerView::from(player)).into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn edit_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<EditPlayerRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::update_player(&mut conn, id, &request.into_patch()) {
        Ok(player) => Json(PlayerView::from(player)).into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn set_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::update_assignment(&mut conn, id, &request.into_fields()) {
        Ok(_) => Json(StatusResponse { status: "success" }).into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn toggle_fight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::toggle_can_fight(&mut conn, id) {
        Ok(can_fight) => Json(ToggleResponse {
            status: "success",
            can_fight,
        })
        .into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::delete_player(&mut conn, id) {
        Ok(()) => Json(StatusResponse { status: "success" }).into_response(),
        Err(e) => store_error_response(e),
    }
}
