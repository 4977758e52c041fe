//! Server settings from the environment and the fixed ceremony timings.

use std::path::PathBuf;
use std::time::Duration;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("data/teams.csv")
}

/// Where to listen and where to read the roster from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub roster_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            roster_path: default_roster_path(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `ROSTER_PATH`, falling back to defaults.
    /// An unparsable `PORT` falls back to the default too.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or_else(default_port);
        let roster_path = lookup("ROSTER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_roster_path);
        Self {
            host,
            port,
            roster_path,
        }
    }
}

/// Timings of one reveal (the spotlight "spin" before a pick is committed).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RevealTiming {
    /// Interval between spotlight changes.
    pub tick: Duration,
    /// Lower bound (inclusive) of the random spin duration.
    pub spin_min: Duration,
    /// Upper bound (exclusive) of the random spin duration.
    pub spin_max: Duration,
    /// Hold on the final pick before it is committed.
    pub settle: Duration,
    /// Hold when the pool has a single team.
    pub solo_hold: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(90),
            spin_min: Duration::from_millis(2200),
            spin_max: Duration::from_millis(3400),
            settle: Duration::from_millis(500),
            solo_hold: Duration::from_millis(600),
        }
    }
}

/// Timings of the draw cycle around each reveal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrawTiming {
    pub reveal: RevealTiming,
    /// Pause after each assignment before the next group is drawn.
    pub between_groups: Duration,
    /// Delay before the spotlight is cleared once a cycle ends.
    pub spotlight_clear: Duration,
    /// How long the celebration flag stays raised after a complete draw.
    pub celebration: Duration,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            reveal: RevealTiming::default(),
            between_groups: Duration::from_millis(350),
            spotlight_clear: Duration::from_millis(1000),
            celebration: Duration::from_millis(2000),
        }
    }
}
