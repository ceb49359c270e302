use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    export::export_roster,
    players::{
        create_player, delete_player, edit_player, get_player, list_players, set_assignment,
        toggle_fight,
    },
    roster::{batch_add, bulk_assign, dashboard, list_job},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/players", get(list_players).post(create_player))
        .route("/api/players/batch", post(batch_add))
        .route(
            "/api/players/:id",
            get(get_player).post(edit_player).delete(delete_player),
        )
        .route("/api/players/:id/assignment", post(set_assignment))
        .route("/api/players/:id/toggle", post(toggle_fight))
        .route("/api/jobs/:job", get(list_job))
        .route("/api/jobs/:job/assignments", post(bulk_assign))
        .route("/api/export", get(export_roster))
        .with_state(state)
}
