// Statistic records: one player's or pitcher's flat stat mapping.
//
// Values are stored exactly as they were read (no coercion). Consumers that
// need numbers go through `StatRecord::numeric`, which maps anything missing
// or unparsable to 0.0 so a chart never sees NaN.

use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Record kind
// ---------------------------------------------------------------------------

/// Which schema a record follows, resolved once when the record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    Batter,
    Pitcher,
    Unknown,
}

/// Field keys that only appear on pitcher lines.
const PITCHER_MARKERS: &[&str] = &["era", "whip", "inningspitched", "gamesstarted", "saves"];

/// Field keys that only appear on batter lines.
const BATTER_MARKERS: &[&str] = &["homeruns", "avg", "atbat", "obp", "slg", "ops", "rbi"];

impl RecordKind {
    /// Classify a set of column names. Pitcher markers win: pitcher files
    /// also carry batter-looking columns such as `home_runs`.
    pub fn detect<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut batter = false;
        for key in keys {
            let key = normalize_key(key);
            if PITCHER_MARKERS.contains(&key.as_str()) {
                return RecordKind::Pitcher;
            }
            if BATTER_MARKERS.contains(&key.as_str()) {
                batter = true;
            }
        }
        if batter {
            RecordKind::Batter
        } else {
            RecordKind::Unknown
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            RecordKind::Batter => "Batter",
            RecordKind::Pitcher => "Pitcher",
            RecordKind::Unknown => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Field lookup result
// ---------------------------------------------------------------------------

/// Result of looking a stat up on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Text(&'a str),
    Missing,
}

impl<'a> Field<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Field::Text(s) => Some(s),
            Field::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }
}

/// Canonical form used for key comparison: lowercase with `_`, `-` and
/// spaces removed, so `homeRuns`, `home_runs` and `Home Runs` collide.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Safe numeric parse: missing, empty, unparsable or non-finite values are 0.
pub fn parse_numeric(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Trim keys and values, dropping blank keys and repeats of an earlier key.
fn collect_fields<K, V, I>(pairs: I) -> Vec<(String, String)>
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut fields: Vec<(String, String)> = Vec::new();
    for (k, v) in pairs {
        let key = k.as_ref().trim();
        if key.is_empty() {
            continue;
        }
        let norm = normalize_key(key);
        if fields.iter().any(|(existing, _)| normalize_key(existing) == norm) {
            continue;
        }
        fields.push((key.to_string(), v.as_ref().trim().to_string()));
    }
    fields
}

// ---------------------------------------------------------------------------
// StatRecord
// ---------------------------------------------------------------------------

/// One player's statistics. The `name` field is always present and is the
/// identity used by the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    name: String,
    kind: RecordKind,
    /// Column-ordered (key, value) pairs, `name` included.
    fields: Vec<(String, String)>,
}

impl StatRecord {
    /// Build a record from ordered key/value pairs. Returns `None` when there
    /// is no non-empty `name` field. Keys and values are trimmed; a repeated
    /// key keeps its first value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Option<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let fields = collect_fields(pairs);
        let name = fields
            .iter()
            .find(|(k, _)| normalize_key(k) == "name")
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())?;
        Some(Self::assemble(name, fields))
    }

    /// Build a record whose name is known up front. `name` becomes the first
    /// field; any `name` key in `rest` is ignored.
    pub fn named<K, V, I>(name: &str, rest: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let name = name.trim().to_string();
        let mut fields = vec![("name".to_string(), name.clone())];
        fields.extend(
            collect_fields(rest)
                .into_iter()
                .filter(|(k, _)| normalize_key(k) != "name"),
        );
        Self::assemble(name, fields)
    }

    fn assemble(name: String, fields: Vec<(String, String)>) -> Self {
        let kind = RecordKind::detect(fields.iter().map(|(k, _)| k.as_str()));
        StatRecord { name, kind, fields }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Look up a field by key (normalized comparison).
    pub fn field(&self, key: &str) -> Field<'_> {
        let norm = normalize_key(key);
        self.fields
            .iter()
            .find(|(k, _)| normalize_key(k) == norm)
            .map(|(_, v)| Field::Text(v.as_str()))
            .unwrap_or(Field::Missing)
    }

    /// Numeric view of a field; see `parse_numeric`.
    pub fn numeric(&self, key: &str) -> f64 {
        parse_numeric(self.field(key).as_str())
    }

    /// Field text, or `--` when absent or empty.
    pub fn display(&self, key: &str) -> String {
        match self.field(key) {
            Field::Text(s) if !s.is_empty() => s.to_string(),
            _ => "--".to_string(),
        }
    }

    /// Fielding position for batters, team otherwise; used as the list
    /// subtitle next to the name.
    pub fn subtitle(&self) -> Option<&str> {
        ["position", "team"]
            .iter()
            .filter_map(|k| self.field(k).as_str())
            .find(|s| !s.is_empty())
    }

    /// Row label used in the player listing, e.g. "B Bonds (LF)".
    pub fn list_label(&self) -> String {
        match self.subtitle() {
            Some(sub) => format!("{} ({})", self.name, sub),
            None => self.name.clone(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for StatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.list_label())
    }
}

/// Serializes as a flat JSON object in column order.
impl Serialize for StatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn bonds() -> StatRecord {
        StatRecord::from_pairs([
            ("name", "B Bonds"),
            ("position", "LF"),
            ("homeRuns", "762"),
            ("avg", "0.298"),
        ])
        .unwrap()
    }

    #[test]
    fn requires_name() {
        assert!(StatRecord::from_pairs([("era", "2.50")]).is_none());
        assert!(StatRecord::from_pairs([("name", "  "), ("era", "2.50")]).is_none());
    }

    #[test]
    fn name_and_fields_are_trimmed() {
        let r = StatRecord::from_pairs([(" name ", "  Jake "), ("era", " 2.50 ")]).unwrap();
        assert_eq!(r.name(), "Jake");
        assert_eq!(r.field("era"), Field::Text("2.50"));
    }

    #[test]
    fn key_lookup_is_normalized() {
        let r = bonds();
        assert_eq!(r.field("homeRuns"), Field::Text("762"));
        assert_eq!(r.field("home_runs"), Field::Text("762"));
        assert_eq!(r.field("HOMERUNS"), Field::Text("762"));
        assert_eq!(r.field("rbi"), Field::Missing);
    }

    #[test]
    fn numeric_defaults_to_zero() {
        let r = StatRecord::from_pairs([
            ("name", "X"),
            ("blank", ""),
            ("junk", "abc"),
            ("nan", "NaN"),
            ("inf", "inf"),
            ("ok", "1.5"),
        ])
        .unwrap();
        assert_eq!(r.numeric("missing"), 0.0);
        assert_eq!(r.numeric("blank"), 0.0);
        assert_eq!(r.numeric("junk"), 0.0);
        assert_eq!(r.numeric("nan"), 0.0);
        assert_eq!(r.numeric("inf"), 0.0);
        assert!((r.numeric("ok") - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn kind_detection() {
        assert_eq!(bonds().kind(), RecordKind::Batter);
        let p = StatRecord::from_pairs([("name", "Jake"), ("era", "2.50"), ("home_runs", "9")])
            .unwrap();
        assert_eq!(p.kind(), RecordKind::Pitcher);
        let u = StatRecord::from_pairs([("name", "Jake"), ("team", "NYM")]).unwrap();
        assert_eq!(u.kind(), RecordKind::Unknown);
    }

    #[test]
    fn named_puts_name_first() {
        let r = StatRecord::named("Jake", [("era", "2.50"), ("name", "Other")]);
        assert_eq!(r.name(), "Jake");
        assert_eq!(r.fields().next(), Some(("name", "Jake")));
        assert_eq!(r.len(), 2);
        assert_eq!(r.kind(), RecordKind::Pitcher);
    }

    #[test]
    fn duplicate_key_keeps_first() {
        let r = StatRecord::from_pairs([("name", "A"), ("hr", "1"), ("HR", "2")]).unwrap();
        assert_eq!(r.field("hr"), Field::Text("1"));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn list_label_uses_position_then_team() {
        assert_eq!(bonds().list_label(), "B Bonds (LF)");
        let p = StatRecord::from_pairs([("name", "Jacob deGrom"), ("team", "TEX")]).unwrap();
        assert_eq!(p.list_label(), "Jacob deGrom (TEX)");
        let bare = StatRecord::from_pairs([("name", "Solo")]).unwrap();
        assert_eq!(bare.list_label(), "Solo");
    }

    #[test]
    fn display_placeholder_for_missing() {
        let r = bonds();
        assert_eq!(r.display("avg"), "0.298");
        assert_eq!(r.display("whip"), "--");
    }

    #[test]
    fn serializes_in_column_order() {
        let json = serde_json::to_string(&bonds()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"B Bonds","position":"LF","homeRuns":"762","avg":"0.298"}"#
        );
    }
}
