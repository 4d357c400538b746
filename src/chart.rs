// Chart descriptors: the declarative data handed to a rendering surface.
//
// The shape mirrors what a Chart.js-style renderer consumes
// (`{labels, datasets, options}`), so descriptors can also be exported as
// JSON for a browser host.

use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// An sRGB color with alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn solid(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }

    /// CSS form: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// Series colors, in assignment order.
pub const PALETTE: [Rgba; 5] = [
    Rgba::solid(0x3b, 0x82, 0xf6), // blue
    Rgba::solid(0x10, 0xb9, 0x81), // green
    Rgba::solid(0xf5, 0x9e, 0x0b), // amber
    Rgba::solid(0xef, 0x44, 0x44), // red
    Rgba::solid(0x8b, 0x5c, 0xf6), // violet
];

/// Alpha of the translucent fill variants.
pub const FILL_ALPHA: f32 = 0.2;

/// Border color for series `index`, cycling through the palette.
pub fn solid(index: usize) -> Rgba {
    PALETTE[index % PALETTE.len()]
}

/// Fill color for series `index`: the matching solid at `FILL_ALPHA`.
pub fn translucent(index: usize) -> Rgba {
    solid(index).with_alpha(FILL_ALPHA)
}

// ---------------------------------------------------------------------------
// Descriptor types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Radar,
    Line,
    Doughnut,
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Uniform(Rgba),
    PerPoint(Vec<Rgba>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(rename = "data")]
    pub values: Vec<f64>,
    pub background_color: Paint,
    pub border_color: Paint,
    pub border_width: u8,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl Dataset {
    /// Dataset colored with palette entry `index` (translucent fill, solid
    /// border).
    pub fn series(label: impl Into<String>, values: Vec<f64>, index: usize) -> Self {
        Dataset {
            label: label.into(),
            values,
            background_color: Paint::Uniform(translucent(index)),
            border_color: Paint::Uniform(solid(index)),
            border_width: 2,
            fill: false,
            tension: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: String,
    pub begin_at_zero: bool,
    /// Draw the value axis upside down (lower is better, e.g. ERA).
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_title: Option<String>,
}

impl ChartOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        ChartOptions {
            title: title.into(),
            begin_at_zero: true,
            reverse: false,
            axis_title: None,
        }
    }
}

/// Everything a surface needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
}

impl ChartDescriptor {
    /// A chart with labels but no data yet.
    pub fn empty(kind: ChartKind, options: ChartOptions) -> Self {
        ChartDescriptor {
            kind,
            labels: Vec::new(),
            datasets: Vec::new(),
            options,
        }
    }

    /// Largest value across all datasets, 0 when there is no data.
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.iter().all(|d| d.values.is_empty())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_forms() {
        assert_eq!(solid(0).to_css(), "#3b82f6");
        assert_eq!(translucent(0).to_css(), "rgba(59, 130, 246, 0.2)");
        assert_eq!(translucent(4).to_css(), "rgba(139, 92, 246, 0.2)");
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(solid(5), solid(0));
        assert_eq!(translucent(7), translucent(2));
        assert_ne!(solid(1), solid(0));
    }

    #[test]
    fn descriptor_json_shape() {
        let mut d = ChartDescriptor::empty(ChartKind::Bar, ChartOptions::titled("Stat Comparison"));
        d.labels.push("B Bonds".into());
        d.datasets.push(Dataset::series("Home Runs", vec![762.0], 0));
        let json: serde_json::Value = serde_json::from_str(&d.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["labels"][0], "B Bonds");
        assert_eq!(json["datasets"][0]["data"][0], 762.0);
        assert_eq!(json["datasets"][0]["borderColor"], "#3b82f6");
        assert_eq!(json["options"]["title"], "Stat Comparison");
        assert!(json["datasets"][0].get("tension").is_none());
    }

    #[test]
    fn per_point_paint_serializes_as_array() {
        let p = Paint::PerPoint(vec![solid(0), solid(1)]);
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r##"["#3b82f6","#10b981"]"##
        );
    }

    #[test]
    fn max_value_and_empty() {
        let mut d = ChartDescriptor::empty(ChartKind::Line, ChartOptions::titled("t"));
        assert!(d.is_empty());
        assert_eq!(d.max_value(), 0.0);
        d.datasets.push(Dataset::series("a", vec![1.0, 4.0], 0));
        d.datasets.push(Dataset::series("b", vec![3.0], 1));
        assert!(!d.is_empty());
        assert_eq!(d.max_value(), 4.0);
    }
}
