use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::database::models::{AssignmentFields, NewPlayer, Player, PlayerPatch};
use crate::domain::roster::{JobGroup, JobStats};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: i64,
    pub name: String,
    pub job: String,
    pub can_fight: bool,
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<Player> for PlayerView {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            job: player.job,
            can_fight: player.can_fight,
            group_name: player.group_name,
            team_name: player.team_name,
            role_note: player.role_note,
            created_at: player.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatsView {
    pub job: &'static str,
    pub total: i64,
    pub on_leave: i64,
    pub available: i64,
}

impl From<JobStats> for JobStatsView {
    fn from(stats: JobStats) -> Self {
        Self {
            job: stats.job,
            total: stats.total,
            on_leave: stats.on_leave,
            available: stats.available,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobGroupView {
    pub job: &'static str,
    pub players: Vec<PlayerView>,
}

impl From<JobGroup> for JobGroupView {
    fn from(group: JobGroup) -> Self {
        Self {
            job: group.job,
            players: group.players.into_iter().map(PlayerView::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: Vec<JobStatsView>,
    pub grouped: Vec<JobGroupView>,
}

/// Single-player creation. `leave` mirrors the add form's checkbox and
/// inverts into `can_fight`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub name: String,
    pub job: String,
    #[serde(default)]
    pub leave: bool,
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
}

impl CreatePlayerRequest {
    pub fn into_new_player(self) -> NewPlayer {
        NewPlayer {
            name: self.name,
            job: self.job,
            can_fight: !self.leave,
            group_name: self.group_name,
            team_name: self.team_name,
            role_note: self.role_note,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditPlayerRequest {
    pub name: Option<String>,
    pub job: Option<String>,
    pub can_fight: Option<bool>,
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
}

impl EditPlayerRequest {
    pub fn into_patch(self) -> PlayerPatch {
        PlayerPatch {
            name: self.name,
            job: self.job,
            can_fight: self.can_fight,
            group_name: self.group_name,
            team_name: self.team_name,
            role_note: self.role_note,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
}

impl AssignmentRequest {
    pub fn into_fields(self) -> AssignmentFields {
        AssignmentFields {
            group_name: self.group_name,
            team_name: self.team_name,
            role_note: self.role_note,
        }
    }
}

#[derive(Deserialize)]
pub struct BulkAssignmentRequest {
    pub assignments: HashMap<i64, AssignmentRequest>,
}

#[derive(Deserialize)]
pub struct BatchAddRequest {
    pub players: String,
}

#[derive(Serialize)]
pub struct BatchAddResponse {
    pub added: usize,
    pub errors: Vec<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub status: &'static str,
    pub can_fight: bool,
}

#[derive(Serialize)]
pub struct BulkAssignmentResponse {
    pub status: &'static str,
    pub updated: usize,
}
