// Chart projection: selection snapshot (or one record) -> chart descriptor.
//
// Every function here is pure except `era_timeline`, which takes the RNG
// explicitly and is meant to be re-run on each redraw.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chart::{
    solid, translucent, ChartDescriptor, ChartKind, ChartOptions, Dataset, Paint, Rgba, PALETTE,
};
use crate::record::StatRecord;

// ---------------------------------------------------------------------------
// Stat selector
// ---------------------------------------------------------------------------

/// Stats offered by the comparison bar selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    #[serde(rename = "AVG")]
    Avg,
    #[default]
    #[serde(rename = "HR")]
    HomeRuns,
    #[serde(rename = "RBI")]
    Rbi,
    #[serde(rename = "R")]
    Runs,
    #[serde(rename = "H")]
    Hits,
    #[serde(rename = "2B")]
    Doubles,
    #[serde(rename = "3B")]
    Triples,
    #[serde(rename = "SB")]
    StolenBases,
    #[serde(rename = "OBP")]
    Obp,
    #[serde(rename = "SLG")]
    Slg,
    #[serde(rename = "OPS")]
    Ops,
}

impl StatKey {
    /// Selector order.
    pub const ALL: [StatKey; 11] = [
        StatKey::Avg,
        StatKey::HomeRuns,
        StatKey::Rbi,
        StatKey::Runs,
        StatKey::Hits,
        StatKey::Doubles,
        StatKey::Triples,
        StatKey::StolenBases,
        StatKey::Obp,
        StatKey::Slg,
        StatKey::Ops,
    ];

    /// Short code shown in the selector, e.g. "HR".
    pub fn code(&self) -> &'static str {
        match self {
            StatKey::Avg => "AVG",
            StatKey::HomeRuns => "HR",
            StatKey::Rbi => "RBI",
            StatKey::Runs => "R",
            StatKey::Hits => "H",
            StatKey::Doubles => "2B",
            StatKey::Triples => "3B",
            StatKey::StolenBases => "SB",
            StatKey::Obp => "OBP",
            StatKey::Slg => "SLG",
            StatKey::Ops => "OPS",
        }
    }

    /// Long label used as the dataset name.
    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Avg => "Batting Average",
            StatKey::HomeRuns => "Home Runs",
            StatKey::Rbi => "Runs Batted In",
            StatKey::Runs => "Runs",
            StatKey::Hits => "Hits",
            StatKey::Doubles => "Doubles",
            StatKey::Triples => "Triples",
            StatKey::StolenBases => "Stolen Bases",
            StatKey::Obp => "On-Base Percentage",
            StatKey::Slg => "Slugging Percentage",
            StatKey::Ops => "On-Base Plus Slugging",
        }
    }

    /// Record field this stat reads.
    pub fn field(&self) -> &'static str {
        match self {
            StatKey::Avg => "avg",
            StatKey::HomeRuns => "homeRuns",
            StatKey::Rbi => "rbi",
            StatKey::Runs => "runs",
            StatKey::Hits => "hits",
            StatKey::Doubles => "doubles",
            StatKey::Triples => "triples",
            StatKey::StolenBases => "stolenBases",
            StatKey::Obp => "obp",
            StatKey::Slg => "slg",
            StatKey::Ops => "ops",
        }
    }

    /// Next stat in selector order, wrapping around.
    pub fn next(&self) -> StatKey {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous stat in selector order, wrapping around.
    pub fn prev(&self) -> StatKey {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StatKey {
    type Err = String;

    /// Accepts the selector code ("HR") case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StatKey::ALL
            .iter()
            .copied()
            .find(|k| k.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown stat `{s}`"))
    }
}

// ---------------------------------------------------------------------------
// Batter comparison projections
// ---------------------------------------------------------------------------

pub const RADAR_LABELS: [&str; 6] = ["HR", "RBI", "AVG", "OBP", "SLG", "OPS"];

/// Ratio stats live in [0, 1]; multiplying by this puts them on the same
/// visual scale as counting stats on the radar. Not a unit conversion.
pub const RADAR_RATIO_SCALE: f64 = 1000.0;

pub const TIMELINE_LABELS: [&str; 3] = ["First 5 Years", "Peak 5 Years", "Last 5 Years"];

/// Share of career home runs drawn in each timeline bucket.
pub const TIMELINE_FACTORS: [f64; 3] = [0.3, 1.0, 0.5];

/// One bar per selected record for `stat`, colored by selection order.
pub fn comparison_bar(selection: &[Arc<StatRecord>], stat: StatKey) -> ChartDescriptor {
    let labels = selection.iter().map(|r| r.name().to_string()).collect();
    let values = selection.iter().map(|r| r.numeric(stat.field())).collect();
    let indices = 0..selection.len();

    ChartDescriptor {
        kind: ChartKind::Bar,
        labels,
        datasets: vec![Dataset {
            label: stat.label().to_string(),
            values,
            background_color: Paint::PerPoint(indices.clone().map(translucent).collect()),
            border_color: Paint::PerPoint(indices.map(solid).collect()),
            border_width: 1,
            fill: false,
            tension: None,
        }],
        options: ChartOptions::titled("Stat Comparison"),
    }
}

/// One six-axis dataset per selected record.
pub fn skill_radar(selection: &[Arc<StatRecord>]) -> ChartDescriptor {
    let datasets = selection
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let values = vec![
                r.numeric("homeRuns"),
                r.numeric("rbi"),
                r.numeric("avg") * RADAR_RATIO_SCALE,
                r.numeric("obp") * RADAR_RATIO_SCALE,
                r.numeric("slg") * RADAR_RATIO_SCALE,
                r.numeric("ops") * RADAR_RATIO_SCALE,
            ];
            Dataset::series(r.name(), values, i)
        })
        .collect();

    ChartDescriptor {
        kind: ChartKind::Radar,
        labels: RADAR_LABELS.iter().map(|s| s.to_string()).collect(),
        datasets,
        options: ChartOptions::titled("Skill Radar"),
    }
}

/// Three synthetic career buckets per record, derived from career home runs.
pub fn career_timeline(selection: &[Arc<StatRecord>]) -> ChartDescriptor {
    let datasets = selection
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let hr = r.numeric("homeRuns");
            let values = TIMELINE_FACTORS.iter().map(|f| hr * f).collect();
            Dataset::series(r.name(), values, i)
        })
        .collect();

    ChartDescriptor {
        kind: ChartKind::Line,
        labels: TIMELINE_LABELS.iter().map(|s| s.to_string()).collect(),
        datasets,
        options: ChartOptions::titled("Career Timeline"),
    }
}

// ---------------------------------------------------------------------------
// Pitcher projections
// ---------------------------------------------------------------------------

pub const PITCH_TYPES: [(&str, &str); 4] = [
    ("Fastball", "fastball_percent"),
    ("Slider", "slider_percent"),
    ("Curveball", "curveball_percent"),
    ("Changeup", "changeup_percent"),
];

pub const ERA_YEARS: [&str; 10] = [
    "2014", "2015", "2016", "2017", "2018", "2019", "2020", "2021", "2022", "2023",
];

/// Maximum distance of a simulated season ERA from the career ERA.
pub const ERA_JITTER: f64 = 0.25;

/// Career ERA used when the record has none.
pub const DEFAULT_ERA: f64 = 3.00;

/// Pitch usage percentages as a doughnut; absent pitch types are 0.
pub fn pitch_mix(record: &StatRecord) -> ChartDescriptor {
    let labels = PITCH_TYPES.iter().map(|(label, _)| label.to_string()).collect();
    let values = PITCH_TYPES.iter().map(|(_, key)| record.numeric(key)).collect();
    let colors: Vec<Rgba> = PALETTE.iter().take(PITCH_TYPES.len()).copied().collect();

    ChartDescriptor {
        kind: ChartKind::Doughnut,
        labels,
        datasets: vec![Dataset {
            label: "Pitch Types (%)".to_string(),
            values,
            background_color: Paint::PerPoint(colors.clone()),
            border_color: Paint::PerPoint(colors),
            border_width: 1,
            fill: false,
            tension: None,
        }],
        options: ChartOptions {
            begin_at_zero: false,
            ..ChartOptions::titled("Pitch Types (%)")
        },
    }
}

/// Ten simulated seasons scattered within `ERA_JITTER` of the career ERA,
/// rounded to two decimals. Randomized on every call.
pub fn era_timeline<R: Rng + ?Sized>(record: &StatRecord, rng: &mut R) -> ChartDescriptor {
    let base = match record.numeric("era") {
        era if era > 0.0 => era,
        _ => DEFAULT_ERA,
    };
    let values = ERA_YEARS
        .iter()
        .map(|_| {
            let jitter = rng.random_range(-ERA_JITTER..=ERA_JITTER);
            round2(base + jitter)
        })
        .collect();

    let mut dataset = Dataset::series("ERA", values, 0);
    dataset.background_color = Paint::Uniform(solid(0).with_alpha(0.1));
    dataset.fill = true;
    dataset.tension = Some(0.3);

    ChartDescriptor {
        kind: ChartKind::Line,
        labels: ERA_YEARS.iter().map(|s| s.to_string()).collect(),
        datasets: vec![dataset],
        options: ChartOptions {
            title: "ERA Over Time".to_string(),
            begin_at_zero: false,
            reverse: true,
            axis_title: Some("ERA".to_string()),
        },
    }
}

/// Headline stat cards for the pitcher panel as (label, value) pairs.
pub fn key_stats(record: &StatRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Name", record.name().to_string()),
        ("Team", record.display("team")),
        ("W-L Record", win_loss(record)),
        ("ERA", record.display("era")),
        ("Strikeouts", record.display("strikeouts")),
        ("WHIP", record.display("whip")),
    ]
}

fn win_loss(record: &StatRecord) -> String {
    match (record.field("wins").as_str(), record.field("losses").as_str()) {
        (Some(w), Some(l)) if !w.is_empty() && !l.is_empty() => format!("{w}-{l}"),
        _ => "--".to_string(),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
