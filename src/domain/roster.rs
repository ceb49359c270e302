use crate::database::models::Player;
use crate::database::{players, DbConn};
use crate::domain::jobs::JOBS;
use crate::errors::StoreResult;

/// Per-job headcount. `available` is always `total - on_leave`.
#[derive(Debug, Clone)]
pub struct JobStats {
    pub job: &'static str,
    pub total: i64,
    pub on_leave: i64,
    pub available: i64,
}

/// All players of one job, in store order.
#[derive(Debug)]
pub struct JobGroup {
    pub job: &'static str,
    pub players: Vec<Player>,
}

/// Aggregate counts for every job in the fixed display order. Jobs with
/// no players are included with zero counts.
pub fn job_stats(conn: &mut DbConn) -> StoreResult<Vec<JobStats>> {
    JOBS.iter()
        .map(|&job| {
            let total = players::count_by_job(conn, job)?;
            let on_leave = players::count_by_job_and_fight(conn, job, false)?;
            Ok(JobStats {
                job,
                total,
                on_leave,
                available: total - on_leave,
            })
        })
        .collect()
}

/// The full roster bucketed by job, in the fixed display order. Jobs
/// with no players still appear with an empty list.
pub fn grouped_by_job(conn: &mut DbConn) -> StoreResult<Vec<JobGroup>> {
    JOBS.iter()
        .map(|&job| {
            let players = players::list_by_job(conn, job)?;
            Ok(JobGroup { job, players })
        })
        .collect()
}
