use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{normalize_label, AssignmentFields, NewPlayer, Player, PlayerPatch};
use crate::domain::jobs;
use crate::errors::{StoreError, StoreResult};

const PLAYER_COLUMNS: &str = "id, name, job, can_fight, group_name, team_name, role_note, created_at";

pub fn insert_player(conn: &mut DbConn, player: &NewPlayer) -> StoreResult<Player> {
    let name = validate_name(&player.name)?;
    validate_job(&player.job)?;

    let sql = format!(
        "INSERT INTO players (name, job, can_fight, group_name, team_name, role_note) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {PLAYER_COLUMNS}"
    );

    let row = conn.query_row(
        &sql,
        params![
            name,
            player.job,
            player.can_fight,
            normalize_label(&player.group_name),
            normalize_label(&player.team_name),
            normalize_label(&player.role_note),
        ],
        parse_player_row,
    )?;

    Ok(row)
}

/// Insert a pre-validated batch in one transaction. Used by the batch
/// ingest after the whole text block has been parsed.
pub fn insert_batch(conn: &mut DbConn, players: &[NewPlayer]) -> StoreResult<usize> {
    for player in players {
        validate_name(&player.name)?;
        validate_job(&player.job)?;
    }

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO players (name, job, can_fight, group_name, team_name, role_note) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for player in players {
            stmt.execute(params![
                player.name.trim(),
                player.job,
                player.can_fight,
                normalize_label(&player.group_name),
                normalize_label(&player.team_name),
                normalize_label(&player.role_note),
            ])?;
        }
    }
    tx.commit()?;

    Ok(players.len())
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> StoreResult<Player> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()?
        .ok_or(StoreError::NotFound(id))
}

pub fn list_all(conn: &mut DbConn) -> StoreResult<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_job(conn: &mut DbConn, job: &str) -> StoreResult<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE job = ?1 ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![job], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_by_job(conn: &mut DbConn, job: &str) -> StoreResult<i64> {
    let sql = "SELECT COUNT(*) FROM players WHERE job = ?1";

    let count = conn.query_row(sql, params![job], |row| row.get(0))?;
    Ok(count)
}

pub fn count_by_job_and_fight(conn: &mut DbConn, job: &str, can_fight: bool) -> StoreResult<i64> {
    let sql = "SELECT COUNT(*) FROM players WHERE job = ?1 AND can_fight = ?2";

    let count = conn.query_row(sql, params![job, can_fight], |row| row.get(0))?;
    Ok(count)
}

pub fn update_player(conn: &mut DbConn, id: i64, patch: &PlayerPatch) -> StoreResult<Player> {
    let current = find_by_id(conn, id)?;

    let name = match &patch.name {
        Some(name) => validate_name(name)?.to_string(),
        None => current.name,
    };
    let job = match &patch.job {
        Some(job) => {
            validate_job(job)?;
            job.clone()
        }
        None => current.job,
    };
    let can_fight = patch.can_fight.unwrap_or(current.can_fight);
    let group_name = merge_label(&patch.group_name, current.group_name);
    let team_name = merge_label(&patch.team_name, current.team_name);
    let role_note = merge_label(&patch.role_note, current.role_note);

    let sql = format!(
        "UPDATE players SET name = ?1, job = ?2, can_fight = ?3, group_name = ?4, \
         team_name = ?5, role_note = ?6 WHERE id = ?7 RETURNING {PLAYER_COLUMNS}"
    );

    let row = conn.query_row(
        &sql,
        params![name, job, can_fight, group_name, team_name, role_note, id],
        parse_player_row,
    )?;

    Ok(row)
}

/// Overwrite the group/team/note triple. Empty or absent values clear
/// the field, so a single edit and a bulk edit behave identically.
pub fn update_assignment(
    conn: &mut DbConn,
    id: i64,
    fields: &AssignmentFields,
) -> StoreResult<Player> {
    let sql = format!(
        "UPDATE players SET group_name = ?1, team_name = ?2, role_note = ?3 \
         WHERE id = ?4 RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            normalize_label(&fields.group_name),
            normalize_label(&fields.team_name),
            normalize_label(&fields.role_note),
            id,
        ],
        parse_player_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound(id))
}

/// Apply per-player assignment fields to every mapped player currently
/// in `job`, as one transaction. Ids missing from the map, or mapped to
/// a player of another job, are left untouched. Returns the number of
/// players updated.
pub fn set_assignments_for_job(
    conn: &mut DbConn,
    job: &str,
    assignments: &HashMap<i64, AssignmentFields>,
) -> StoreResult<usize> {
    validate_job(job)?;

    let tx = conn.transaction()?;
    let mut updated = 0;
    {
        let mut stmt = tx.prepare(
            "UPDATE players SET group_name = ?1, team_name = ?2, role_note = ?3 \
             WHERE id = ?4 AND job = ?5",
        )?;
        for (id, fields) in assignments {
            updated += stmt.execute(params![
                normalize_label(&fields.group_name),
                normalize_label(&fields.team_name),
                normalize_label(&fields.role_note),
                id,
                job,
            ])?;
        }
    }
    tx.commit()?;

    Ok(updated)
}

pub fn toggle_can_fight(conn: &mut DbConn, id: i64) -> StoreResult<bool> {
    let sql = "UPDATE players SET can_fight = NOT can_fight WHERE id = ?1 RETURNING can_fight";

    conn.query_row(sql, params![id], |row| row.get(0))
        .optional()?
        .ok_or(StoreError::NotFound(id))
}

pub fn delete_player(conn: &mut DbConn, id: i64) -> StoreResult<()> {
    let affected = conn.execute("DELETE FROM players WHERE id = ?1", params![id])?;

    if affected == 0 {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

fn validate_name(name: &str) -> StoreResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(
            "player name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

fn validate_job(job: &str) -> StoreResult<()> {
    if !jobs::is_valid(job) {
        return Err(StoreError::Validation(format!("unknown job: {}", job)));
    }
    Ok(())
}

fn merge_label(patch_field: &Option<String>, current: Option<String>) -> Option<String> {
    match patch_field {
        Some(_) => normalize_label(patch_field).map(str::to_string),
        None => current,
    }
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        job: row.get(2)?,
        can_fight: row.get(3)?,
        group_name: row.get(4)?,
        team_name: row.get(5)?,
        role_note: row.get(6)?,
        created_at: row.get(7)?,
    })
}
