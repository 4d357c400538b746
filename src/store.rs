// Record store: the immutable, insertion-ordered dataset behind the listing.
//
// Populated once at startup, either from the built-in roster of career lines
// or from a batter CSV named in config, and never mutated afterwards.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::loader::parse_records;
use crate::record::{RecordKind, StatRecord};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{path} produced zero records")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Arc<StatRecord>>,
}

impl RecordStore {
    /// Build a store, keeping the first record for any repeated name.
    pub fn from_records(records: impl IntoIterator<Item = StatRecord>) -> Self {
        let mut kept: Vec<Arc<StatRecord>> = Vec::new();
        for record in records {
            if kept.iter().any(|r| r.name() == record.name()) {
                warn!("duplicate record for '{}', keeping the first", record.name());
                continue;
            }
            kept.push(Arc::new(record));
        }
        RecordStore { records: kept }
    }

    /// The built-in roster of career batting lines.
    pub fn builtin() -> Self {
        Self::from_records(BUILTIN_ROSTER.iter().map(BatterLine::to_record))
    }

    /// Load a batter CSV from disk. Rows that do not read as batter lines
    /// are skipped.
    pub fn from_csv_file(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let batters = parse_records(&text).into_iter().filter(|r| {
            let keep = r.kind() == RecordKind::Batter;
            if !keep {
                warn!(
                    "Skipping {} record {:?} in {}: not a batter line",
                    r.kind().display_str(),
                    r.name(),
                    path.display()
                );
            }
            keep
        });
        let store = Self::from_records(batters);
        if store.is_empty() {
            return Err(StoreError::Empty {
                path: path.display().to_string(),
            });
        }
        info!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn records(&self) -> &[Arc<StatRecord>] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&Arc<StatRecord>> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Case-insensitive substring match on record names. An empty query
    /// matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Arc<StatRecord>> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| query.is_empty() || r.name().to_lowercase().contains(&query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Built-in roster
// ---------------------------------------------------------------------------

/// A typed career batting line; converted to a `StatRecord` with the same
/// keys a batter CSV would use.
struct BatterLine {
    name: &'static str,
    position: &'static str,
    games: u32,
    at_bat: u32,
    runs: u32,
    hits: u32,
    doubles: u32,
    triples: u32,
    home_runs: u32,
    rbi: u32,
    walks: u32,
    strikeouts: u32,
    stolen_bases: u32,
    caught_stealing: u32,
    avg: f64,
    obp: f64,
    slg: f64,
    ops: f64,
}

impl BatterLine {
    fn to_record(&self) -> StatRecord {
        let rest = [
            ("position", self.position.to_string()),
            ("games", self.games.to_string()),
            ("atBat", self.at_bat.to_string()),
            ("runs", self.runs.to_string()),
            ("hits", self.hits.to_string()),
            ("doubles", self.doubles.to_string()),
            ("triples", self.triples.to_string()),
            ("homeRuns", self.home_runs.to_string()),
            ("rbi", self.rbi.to_string()),
            ("walks", self.walks.to_string()),
            ("strikeouts", self.strikeouts.to_string()),
            ("stolenBases", self.stolen_bases.to_string()),
            ("caughtStealing", self.caught_stealing.to_string()),
            ("avg", format!("{:.3}", self.avg)),
            ("obp", format!("{:.3}", self.obp)),
            ("slg", format!("{:.3}", self.slg)),
            ("ops", format!("{:.3}", self.ops)),
        ];
        StatRecord::named(self.name, rest)
    }
}

const BUILTIN_ROSTER: &[BatterLine] = &[
    BatterLine {
        name: "B Bonds",
        position: "LF",
        games: 2986,
        at_bat: 9847,
        runs: 2227,
        hits: 2935,
        doubles: 601,
        triples: 77,
        home_runs: 762,
        rbi: 1996,
        walks: 2558,
        strikeouts: 1539,
        stolen_bases: 514,
        caught_stealing: 141,
        avg: 0.298,
        obp: 0.444,
        slg: 0.607,
        ops: 1.051,
    },
    BatterLine {
        name: "H Aaron",
        position: "RF",
        games: 3298,
        at_bat: 12364,
        runs: 2174,
        hits: 3771,
        doubles: 624,
        triples: 98,
        home_runs: 755,
        rbi: 2297,
        walks: 1402,
        strikeouts: 1383,
        stolen_bases: 240,
        caught_stealing: 73,
        avg: 0.305,
        obp: 0.374,
        slg: 0.555,
        ops: 0.929,
    },
    BatterLine {
        name: "B Ruth",
        position: "RF",
        games: 2503,
        at_bat: 8399,
        runs: 2174,
        hits: 2873,
        doubles: 506,
        triples: 136,
        home_runs: 714,
        rbi: 2214,
        walks: 2062,
        strikeouts: 1330,
        stolen_bases: 123,
        caught_stealing: 117,
        avg: 0.342,
        obp: 0.474,
        slg: 0.690,
        ops: 1.164,
    },
    BatterLine {
        name: "W Mays",
        position: "CF",
        games: 2992,
        at_bat: 10881,
        runs: 2068,
        hits: 3283,
        doubles: 523,
        triples: 140,
        home_runs: 660,
        rbi: 1909,
        walks: 1464,
        strikeouts: 1526,
        stolen_bases: 338,
        caught_stealing: 103,
        avg: 0.301,
        obp: 0.384,
        slg: 0.557,
        ops: 0.941,
    },
    BatterLine {
        name: "A Pujols",
        position: "1B",
        games: 3080,
        at_bat: 11421,
        runs: 1914,
        hits: 3384,
        doubles: 686,
        triples: 16,
        home_runs: 703,
        rbi: 2218,
        walks: 1373,
        strikeouts: 1405,
        stolen_bases: 117,
        caught_stealing: 43,
        avg: 0.296,
        obp: 0.374,
        slg: 0.544,
        ops: 0.918,
    },
    BatterLine {
        name: "A Rodriguez",
        position: "3B",
        games: 2784,
        at_bat: 10566,
        runs: 2021,
        hits: 3115,
        doubles: 548,
        triples: 31,
        home_runs: 696,
        rbi: 2086,
        walks: 1338,
        strikeouts: 2287,
        stolen_bases: 329,
        caught_stealing: 76,
        avg: 0.295,
        obp: 0.380,
        slg: 0.550,
        ops: 0.930,
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
