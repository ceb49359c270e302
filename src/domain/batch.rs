use crate::database::models::NewPlayer;
use crate::domain::jobs;

/// Result of parsing a batch-add text block: the players that parsed
/// cleanly plus one message per failed line. A bad line never aborts
/// the batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub players: Vec<NewPlayer>,
    pub errors: Vec<String>,
}

/// Parse a multi-line text block, one player per line, fields
/// comma-separated: `名字,職業[,備註]`. Lines are 1-indexed in error
/// messages; all-whitespace lines are skipped.
pub fn parse_batch(text: &str) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line_no, line) {
            Ok(player) => outcome.players.push(player),
            Err(message) => outcome.errors.push(message),
        }
    }

    outcome
}

fn parse_line(line_no: usize, line: &str) -> Result<NewPlayer, String> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();

    if parts.len() < 2 {
        return Err(format!("第 {} 行格式錯誤：至少需要 名字,職業", line_no));
    }

    let name = parts[0];
    let job = parts[1];
    let note = parts.get(2).filter(|s| !s.is_empty());

    if !jobs::is_valid(job) {
        return Err(format!("第 {} 行職業錯誤：{}", line_no, job));
    }

    Ok(NewPlayer {
        name: name.to_string(),
        job: job.to_string(),
        can_fight: true,
        group_name: None,
        team_name: None,
        role_note: note.map(|s| s.to_string()),
    })
}
