use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub job: String,
    pub can_fight: bool,
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Player {
    /// A player with no team assignment is a candidate (bench).
    pub fn is_candidate(&self) -> bool {
        normalize_label(&self.team_name).is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub job: String,
    pub can_fight: bool,
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
}

/// Partial update of a player's mutable fields. `None` leaves a field
/// unchanged; for the three assignment labels an empty string clears
/// the field to "unassigned".
#[derive(Debug, Clone, Default)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub job: Option<String>,
    pub can_fight: Option<bool>,
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
}

/// The group/team/note triple set by the assignment editor. Writes
/// overwrite all three fields; empty or absent values clear them.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFields {
    pub group_name: Option<String>,
    pub team_name: Option<String>,
    pub role_note: Option<String>,
}

/// Empty string and absent both mean "unset" for group/team/note; all
/// write paths normalize through here.
pub fn normalize_label(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
