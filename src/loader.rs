// CSV loading with a demo-record fallback.
//
// The pitcher visualizer must always have something to show, so
// `load_pitchers` never returns an error: any fetch or parse failure is
// logged and replaced with the fixed demo record.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::record::{RecordKind, StatRecord};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {source_id} failed: {reason}")]
    Network { source_id: String, reason: String },

    #[error("{source_id} answered with HTTP {status}")]
    Status { source_id: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("no response from {source_id} within {timeout:?}")]
    Timeout {
        source_id: String,
        timeout: Duration,
    },

    #[error("{source_id} returned an empty body")]
    EmptyBody { source_id: String },

    #[error("{source_id} produced zero records")]
    NoRecords { source_id: String },

    #[error("{source_id} has no pitcher records (rows read as {found})")]
    NoPitchers {
        source_id: String,
        found: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse CSV text into records.
///
/// The first line is the header; every following line is zipped positionally
/// with it. Blank lines are skipped and every field is trimmed. Short rows
/// simply lack their trailing fields, extra values are dropped, and rows with
/// no `name` are skipped. Values are kept as text.
pub fn parse_records(text: &str) -> Vec<StatRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            warn!("unreadable CSV header: {}", e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        match result {
            Ok(row) => match StatRecord::from_pairs(headers.iter().zip(row.iter())) {
                Some(record) => records.push(record),
                None => warn!("skipping CSV row {}: no name", line + 2),
            },
            Err(e) => {
                warn!("skipping malformed CSV row: {}", e);
            }
        }
    }
    records
}

// ---------------------------------------------------------------------------
// Fetchers
// ---------------------------------------------------------------------------

/// Source of raw text for the loader.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, source: &str) -> Result<String, LoadError>;
}

/// Fetches over HTTP(S). Any non-success status is an error.
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, source: &str) -> Result<String, LoadError> {
        let response = self
            .http
            .get(source)
            .send()
            .await
            .map_err(|e| LoadError::Network {
                source_id: source.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                source_id: source.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| LoadError::Network {
            source_id: source.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Reads a local file.
pub struct FileFetcher;

#[async_trait]
impl TextFetcher for FileFetcher {
    async fn fetch_text(&self, source: &str) -> Result<String, LoadError> {
        tokio::fs::read_to_string(Path::new(source))
            .await
            .map_err(|e| LoadError::Io {
                path: source.to_string(),
                source: e,
            })
    }
}

/// HTTP for `http://` and `https://` sources, the filesystem otherwise.
pub fn fetcher_for(source: &str) -> Box<dyn TextFetcher> {
    if is_remote(source) {
        Box::new(HttpFetcher::new())
    } else {
        Box::new(FileFetcher)
    }
}

pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// ---------------------------------------------------------------------------
// Load with fallback
// ---------------------------------------------------------------------------

/// Where loaded records came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataOrigin {
    Fetched { source: String },
    Fallback { reason: String },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

/// Result of a load. `records` is never empty.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    records: Vec<StatRecord>,
    origin: DataOrigin,
}

impl LoadOutcome {
    fn fallback(reason: String) -> Self {
        LoadOutcome {
            records: vec![demo_pitcher()],
            origin: DataOrigin::Fallback { reason },
        }
    }

    /// The record the visualizer shows (the first one loaded).
    pub fn primary(&self) -> &StatRecord {
        &self.records[0]
    }

    pub fn records(&self) -> &[StatRecord] {
        &self.records
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }

    pub fn into_parts(self) -> (Vec<StatRecord>, DataOrigin) {
        (self.records, self.origin)
    }
}

/// Fetch and parse pitcher records, falling back to `demo_pitcher()` on a
/// network error, bad status, timeout, empty body, zero parsed records or a
/// file with no pitcher-schema rows. Rows of another schema are dropped.
pub async fn load_pitchers(
    fetcher: &dyn TextFetcher,
    source: &str,
    timeout: Duration,
) -> LoadOutcome {
    match try_load(fetcher, source, timeout).await {
        Ok(records) => {
            info!("Loaded {} pitcher records from {}", records.len(), source);
            LoadOutcome {
                records,
                origin: DataOrigin::Fetched {
                    source: source.to_string(),
                },
            }
        }
        Err(e) => {
            warn!("Error loading pitcher data, using demo record: {}", e);
            LoadOutcome::fallback(e.to_string())
        }
    }
}

async fn try_load(
    fetcher: &dyn TextFetcher,
    source: &str,
    timeout: Duration,
) -> Result<Vec<StatRecord>, LoadError> {
    debug!(source, ?timeout, "fetching CSV");
    let text = tokio::time::timeout(timeout, fetcher.fetch_text(source))
        .await
        .map_err(|_| LoadError::Timeout {
            source_id: source.to_string(),
            timeout,
        })??;

    if text.trim().is_empty() {
        return Err(LoadError::EmptyBody {
            source_id: source.to_string(),
        });
    }

    let records = parse_records(&text);
    let Some(first) = records.first() else {
        return Err(LoadError::NoRecords {
            source_id: source.to_string(),
        });
    };
    let found = first.kind().display_str();

    let total = records.len();
    let pitchers: Vec<StatRecord> = records
        .into_iter()
        .filter(|r| r.kind() == RecordKind::Pitcher)
        .collect();
    if pitchers.is_empty() {
        return Err(LoadError::NoPitchers {
            source_id: source.to_string(),
            found,
        });
    }
    if pitchers.len() < total {
        warn!(
            "Skipped {} non-pitcher rows from {}",
            total - pitchers.len(),
            source
        );
    }
    Ok(pitchers)
}

/// The fixed record shown when pitcher data cannot be loaded.
pub fn demo_pitcher() -> StatRecord {
    let rest = [
        ("team", "TEX"),
        ("age", "35"),
        ("wins", "84"),
        ("losses", "57"),
        ("era", "2.53"),
        ("games", "209"),
        ("games_started", "209"),
        ("complete_games", "8"),
        ("shutouts", "4"),
        ("saves", "0"),
        ("innings_pitched", "1356.1"),
        ("hits", "1066"),
        ("runs", "444"),
        ("earned_runs", "381"),
        ("home_runs", "117"),
        ("walks", "286"),
        ("strikeouts", "1607"),
        ("whip", "1.00"),
        ("fastball_percent", "52.3"),
        ("slider_percent", "32.1"),
        ("curveball_percent", "10.5"),
        ("changeup_percent", "5.1"),
    ];
    StatRecord::named("Jacob deGrom", rest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    /// Fetcher that replays a canned response.
    enum Scripted {
        Body(&'static str),
        Fail,
        Hang,
    }

    #[async_trait]
    impl TextFetcher for Scripted {
        async fn fetch_text(&self, source: &str) -> Result<String, LoadError> {
            match self {
                Scripted::Body(text) => Ok(text.to_string()),
                Scripted::Fail => Err(LoadError::Status {
                    source_id: source.to_string(),
                    status: 404,
                }),
                Scripted::Hang => std::future::pending().await,
            }
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    // -- parse_records --

    #[test]
    fn parses_single_row() {
        let records = parse_records("name,era\nJake,2.50\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Jake");
        assert_eq!(records[0].field("era"), Field::Text("2.50"));
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn trims_fields_and_skips_blank_lines() {
        let records = parse_records(" name , era \n  Jake  ,  2.50 \n\n\nMax, 3.10\n\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "Jake");
        assert_eq!(records[1].field("era"), Field::Text("3.10"));
    }

    #[test]
    fn short_rows_lack_trailing_fields() {
        let records = parse_records("name,team,era\nJake,NYM\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("team"), Field::Text("NYM"));
        assert!(records[0].field("era").is_missing());
        assert_eq!(records[0].numeric("era"), 0.0);
    }

    #[test]
    fn extra_values_are_dropped() {
        let records = parse_records("name,era\nJake,2.50,surplus\n");
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn rows_without_name_are_skipped() {
        let records = parse_records("name,era\n,2.50\nJake,3.00\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Jake");
    }

    #[test]
    fn header_without_name_column_yields_nothing() {
        assert!(parse_records("player,era\nJake,2.50\n").is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("name,era\n").is_empty());
    }

    #[test]
    fn values_stay_text() {
        let records = parse_records("name,era\nJake,2.5O\n");
        assert_eq!(records[0].field("era"), Field::Text("2.5O"));
        assert_eq!(records[0].numeric("era"), 0.0);
    }

    #[test]
    fn pitcher_schema_detected() {
        let records = parse_records("name,team,era,whip\nJake,NYM,2.50,1.01\n");
        assert_eq!(records[0].kind(), RecordKind::Pitcher);
    }

    // -- demo record --

    #[test]
    fn demo_pitcher_fields() {
        let demo = demo_pitcher();
        assert_eq!(demo.name(), "Jacob deGrom");
        assert_eq!(demo.kind(), RecordKind::Pitcher);
        assert_eq!(demo.display("team"), "TEX");
        assert!((demo.numeric("era") - 2.53).abs() < 1e-9);
        assert_eq!(demo.numeric("strikeouts"), 1607.0);
        assert!((demo.numeric("fastball_percent") - 52.3).abs() < 1e-9);
    }

    // -- load_pitchers --

    #[tokio::test]
    async fn load_success_keeps_rows_in_order() {
        let fetcher = Scripted::Body("name,era\nJake,2.50\nMax,3.10\n");
        let outcome = load_pitchers(&fetcher, "pitchers.csv", TIMEOUT).await;
        assert_eq!(
            outcome.origin(),
            &DataOrigin::Fetched {
                source: "pitchers.csv".into()
            }
        );
        assert_eq!(outcome.records().len(), 2);
        assert_eq!(outcome.primary().name(), "Jake");
    }

    #[tokio::test]
    async fn load_failure_falls_back_to_demo() {
        let outcome = load_pitchers(&Scripted::Fail, "pitchers.csv", TIMEOUT).await;
        assert!(outcome.origin().is_fallback());
        assert_eq!(outcome.records().len(), 1);
        assert_eq!(outcome.primary().name(), "Jacob deGrom");
    }

    #[tokio::test]
    async fn empty_body_falls_back_to_demo() {
        let outcome = load_pitchers(&Scripted::Body("  \n"), "pitchers.csv", TIMEOUT).await;
        assert!(outcome.origin().is_fallback());
        assert_eq!(outcome.primary().name(), "Jacob deGrom");
    }

    #[tokio::test]
    async fn zero_records_falls_back_to_demo() {
        let outcome = load_pitchers(&Scripted::Body("name,era\n"), "pitchers.csv", TIMEOUT).await;
        match outcome.origin() {
            DataOrigin::Fallback { reason } => assert!(reason.contains("zero records")),
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn batter_csv_is_not_pitcher_data() {
        let fetcher = Scripted::Body("name,position,homeRuns,avg\nB Bonds,LF,762,0.298\n");
        let outcome = load_pitchers(&fetcher, "batters.csv", TIMEOUT).await;
        match outcome.origin() {
            DataOrigin::Fallback { reason } => {
                assert!(reason.contains("no pitcher records"), "{reason}");
                assert!(reason.contains("Batter"), "{reason}");
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(outcome.primary().name(), "Jacob deGrom");
    }

    #[tokio::test]
    async fn rows_without_pitcher_columns_are_dropped() {
        // The short second row only carries a name.
        let fetcher = Scripted::Body("name,era\nJake,2.50\nMax\n");
        let outcome = load_pitchers(&fetcher, "pitchers.csv", TIMEOUT).await;
        assert!(!outcome.origin().is_fallback());
        assert_eq!(outcome.records().len(), 1);
        assert!(outcome
            .records()
            .iter()
            .all(|r| r.kind() == RecordKind::Pitcher));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_fetch_times_out_to_demo() {
        let outcome =
            load_pitchers(&Scripted::Hang, "pitchers.csv", Duration::from_millis(250)).await;
        match outcome.origin() {
            DataOrigin::Fallback { reason } => assert!(reason.contains("no response")),
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(outcome.primary().name(), "Jacob deGrom");
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_demo() {
        let outcome = load_pitchers(&FileFetcher, "/nonexistent/pitchers.csv", TIMEOUT).await;
        assert!(outcome.origin().is_fallback());
    }

    #[tokio::test]
    async fn unreachable_host_falls_back_to_demo() {
        let fetcher = HttpFetcher::new();
        let outcome =
            load_pitchers(&fetcher, "http://127.0.0.1:1/pitchers.csv", Duration::from_secs(2)).await;
        assert!(outcome.origin().is_fallback());
    }

    #[test]
    fn fetcher_selection_by_scheme() {
        assert!(is_remote("http://localhost:8000/components/baseball_pitcher.csv"));
        assert!(is_remote("HTTPS://example.com/p.csv"));
        assert!(!is_remote("components/baseball_pitcher.csv"));
        assert!(!is_remote("/tmp/p.csv"));
    }
}
