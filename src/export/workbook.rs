use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::database::models::{normalize_label, Player};

pub const MAIN_SHEET: &str = "大表";
pub const CANDIDATES_SHEET: &str = "候補";
pub const COLUMNS: [&str; 6] = ["分組", "隊伍", "名字", "職業", "備註", "狀態"];

const STATUS_CAN_FIGHT: &str = "能打";
const STATUS_ON_LEAVE: &str = "請假";

/// One flat spreadsheet row. Unset labels become empty strings so the
/// sheet filters only have one representation to deal with.
#[derive(Debug, Clone)]
pub struct RosterRow {
    pub group: String,
    pub team: String,
    pub name: String,
    pub job: String,
    pub note: String,
    pub status: &'static str,
}

pub fn project_rows(players: &[Player]) -> Vec<RosterRow> {
    players
        .iter()
        .map(|player| RosterRow {
            group: label_text(&player.group_name),
            team: label_text(&player.team_name),
            name: player.name.clone(),
            job: player.job.clone(),
            note: label_text(&player.role_note),
            status: if player.can_fight {
                STATUS_CAN_FIGHT
            } else {
                STATUS_ON_LEAVE
            },
        })
        .collect()
}

/// Distinct non-empty group names, ordered by first appearance across
/// the projected rows. This is the sheet order of the workbook.
pub fn group_order(rows: &[RosterRow]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for row in rows {
        if !row.group.is_empty() && !order.iter().any(|g| g == &row.group) {
            order.push(row.group.clone());
        }
    }
    order
}

/// Rows without a team assignment: the bench.
pub fn candidates(rows: &[RosterRow]) -> Vec<&RosterRow> {
    rows.iter().filter(|row| row.team.is_empty()).collect()
}

/// Build the full workbook: the main sheet, one sheet per non-empty
/// group, and the candidates sheet when any player is team-less.
pub fn build_workbook(players: &[Player]) -> Result<Vec<u8>, XlsxError> {
    let rows = project_rows(players);
    let mut workbook = Workbook::new();
    add_roster_sheets(&mut workbook, &rows)?;
    workbook.save_to_buffer()
}

pub fn add_roster_sheets(workbook: &mut Workbook, rows: &[RosterRow]) -> Result<(), XlsxError> {
    let main = workbook.add_worksheet();
    main.set_name(MAIN_SHEET)?;
    write_sheet(main, rows.iter())?;

    for group in group_order(rows) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(&group)?;
        write_sheet(sheet, rows.iter().filter(|row| row.group == group))?;
    }

    let bench = candidates(rows);
    if !bench.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(CANDIDATES_SHEET)?;
        write_sheet(sheet, bench.into_iter())?;
    }

    Ok(())
}

fn write_sheet<'a, I>(sheet: &mut Worksheet, rows: I) -> Result<(), XlsxError>
where
    I: Iterator<Item = &'a RosterRow>,
{
    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (idx, row) in rows.enumerate() {
        let r = (idx + 1) as u32;
        sheet.write_string(r, 0, &row.group)?;
        sheet.write_string(r, 1, &row.team)?;
        sheet.write_string(r, 2, &row.name)?;
        sheet.write_string(r, 3, &row.job)?;
        sheet.write_string(r, 4, &row.note)?;
        sheet.write_string(r, 5, row.status)?;
    }

    Ok(())
}

fn label_text(value: &Option<String>) -> String {
    normalize_label(value).unwrap_or("").to_string()
}
