//! Roster loading: a CSV with a header row followed by `id,name` rows.

use crate::models::{DrawError, Team, TeamId, EXPECTED_ROSTER_SIZE};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Parse a roster from CSV text.
///
/// Fields are trimmed. Rows with a missing, non-numeric or zero id, or an empty name,
/// are dropped. Later rows repeating an id are dropped with a warning. A row count
/// other than [`EXPECTED_ROSTER_SIZE`] is only logged. Only a failing reader is an error.
pub fn parse_roster<R: Read>(rdr: R) -> Result<Vec<Team>, DrawError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let mut seen: HashSet<TeamId> = HashSet::new();
    let mut teams = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(DrawError::RosterLoad(e.to_string())),
            Err(e) => {
                log::warn!("skipping unreadable roster row {}: {}", line + 2, e);
                continue;
            }
        };
        let id = record
            .get(0)
            .and_then(|raw| raw.parse::<TeamId>().ok())
            .filter(|&id| id > 0);
        let name = record.get(1).filter(|name| !name.is_empty());
        let (id, name) = match (id, name) {
            (Some(id), Some(name)) => (id, name),
            _ => {
                log::debug!("dropping roster row {}: {:?}", line + 2, record);
                continue;
            }
        };
        if !seen.insert(id) {
            log::warn!("dropping roster row {}: duplicate team id {}", line + 2, id);
            continue;
        }
        teams.push(Team::new(id, name));
    }

    if teams.len() != EXPECTED_ROSTER_SIZE {
        log::warn!(
            "roster has {} teams, expected {}",
            teams.len(),
            EXPECTED_ROSTER_SIZE
        );
    }
    Ok(teams)
}

/// Read and parse the roster file at `path`.
pub async fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Team>, DrawError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DrawError::RosterLoad(format!("{}: {}", path.display(), e)))?;
    let teams = parse_roster(bytes.as_slice())?;
    log::info!("Loaded {} teams from {}", teams.len(), path.display());
    Ok(teams)
}
