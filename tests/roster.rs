//! Integration tests for roster parsing/loading and server configuration.

use group_draw_web::{
    load_roster, parse_roster, DrawEngine, DrawErrorKind, DrawTiming, RosterStatus, ServerConfig,
};
use std::path::PathBuf;

#[test]
fn parses_rows_and_trims_fields() {
    let csv = "id,name\n 1 ,  Northside  \n2,Harbour City\n";
    let teams = parse_roster(csv.as_bytes()).unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, 1);
    assert_eq!(teams[0].name, "Northside");
    assert_eq!(teams[1].name, "Harbour City");
}

#[test]
fn drops_rows_with_bad_id_or_empty_name() {
    let csv = "id,name\nabc,Letters\n,No Id\n0,Zero\n-3,Negative\n7,\n8\n9,Valid\n";
    let teams = parse_roster(csv.as_bytes()).unwrap();
    let ids: Vec<u32> = teams.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![9]);
}

#[test]
fn keeps_first_of_duplicate_ids() {
    let csv = "id,name\n4,First\n4,Second\n5,Other\n";
    let teams = parse_roster(csv.as_bytes()).unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].name, "First");
}

#[test]
fn header_only_yields_empty_roster() {
    let teams = parse_roster("id,name\n".as_bytes()).unwrap();
    assert!(teams.is_empty());
}

#[tokio::test]
async fn loads_bundled_roster() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/teams.csv");
    let teams = load_roster(&path).await.unwrap();
    assert_eq!(teams.len(), 12);
    let ids: Vec<u32> = teams.iter().map(|t| t.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u32>>());
}

#[tokio::test]
async fn missing_file_is_a_roster_load_error() {
    let err = load_roster("does/not/exist.csv").await.unwrap_err();
    assert_eq!(err.kind(), DrawErrorKind::RosterLoad);

    let engine = DrawEngine::new(DrawTiming::default());
    engine.roster_failed(err.to_string());
    let s = engine.snapshot();
    assert!(matches!(s.roster_status, RosterStatus::Failed(_)));
    assert!(s.teams.is_empty());

    // Retry succeeds once the file is there.
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/teams.csv");
    assert!(engine.load_roster(load_roster(&path).await.unwrap()));
    assert_eq!(engine.snapshot().roster_status, RosterStatus::Loaded);
}

#[test]
fn server_config_defaults_and_overrides() {
    let config = ServerConfig::from_lookup(|_| None);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, 8080);

    let config = ServerConfig::from_lookup(|key| match key {
        "HOST" => Some("127.0.0.1".to_string()),
        "PORT" => Some("9000".to_string()),
        "ROSTER_PATH" => Some("/tmp/roster.csv".to_string()),
        _ => None,
    });
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.roster_path, PathBuf::from("/tmp/roster.csv"));

    let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "not-a-port".to_string()));
    assert_eq!(config.port, 8080);
}
