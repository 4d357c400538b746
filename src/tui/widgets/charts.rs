// Chart widgets: draw a ChartHandle's descriptor with ratatui primitives.
//
// bar      -> BarChart, one bar per label
// radar    -> grouped BarChart, one group per axis, one bar per dataset
// line     -> Chart with one line per dataset (honors `reverse`)
// doughnut -> one Gauge per slice, sized by share of the total

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as Series, Gauge, GraphType,
    Paragraph,
};
use ratatui::Frame;

use super::term_color;
use crate::chart::{ChartDescriptor, Paint, Rgba};
use crate::surface::ChartHandle;

/// Bar heights are drawn on this fixed scale so fractional stats show up.
const BAR_SCALE: f64 = 1000.0;

pub fn render_bar(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    let d = handle.data();
    let label = d.datasets.first().map(|ds| ds.label.as_str()).unwrap_or("");
    let block = chart_block(format!("{}: {}", d.options.title, label));

    let Some(dataset) = d.datasets.first().filter(|ds| !ds.values.is_empty()) else {
        frame.render_widget(placeholder("Select players to compare").block(block), area);
        return;
    };

    let max = d.max_value();
    let bars: Vec<Bar> = d
        .labels
        .iter()
        .zip(&dataset.values)
        .enumerate()
        .map(|(i, (name, &v))| {
            let c = term_color(paint_at(&dataset.border_color, i));
            Bar::default()
                .value(scaled(v, max))
                .label(Line::from(name.clone()))
                .text_value(format_value(v))
                .style(Style::default().fg(c))
                .value_style(Style::default().fg(Color::Black).bg(c))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(inner_width, bars.len()))
        .bar_gap(1)
        .max(BAR_SCALE as u64);
    frame.render_widget(chart, area);
}

pub fn render_radar(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    let d = handle.data();
    let block = chart_block(d.options.title.clone());

    if d.is_empty() {
        frame.render_widget(placeholder("Select players to compare").block(block), area);
        return;
    }

    let max = d.max_value();
    let groups: Vec<Vec<Bar>> = d
        .labels
        .iter()
        .enumerate()
        .map(|(axis, _)| {
            d.datasets
                .iter()
                .map(|ds| {
                    let v = ds.values.get(axis).copied().unwrap_or(0.0);
                    Bar::default()
                        .value(scaled(v, max))
                        .text_value(String::new())
                        .style(Style::default().fg(term_color(paint_at(&ds.border_color, 0))))
                })
                .collect()
        })
        .collect();

    let per_group = saturating_u16(d.datasets.len().max(1));
    let inner_width = area.width.saturating_sub(2);
    let slots = saturating_u16(d.labels.len()).saturating_mul(per_group);
    let width = (inner_width / slots.max(1)).saturating_sub(1).clamp(1, 4);

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(width)
        .bar_gap(0)
        .group_gap(1)
        .max(BAR_SCALE as u64);
    for (label, bars) in d.labels.iter().zip(&groups) {
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(label.clone()))
                .bars(bars),
        );
    }
    frame.render_widget(chart, area);
}

pub fn render_line(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    let d = handle.data();
    let block = chart_block(d.options.title.clone());

    if d.is_empty() {
        frame.render_widget(placeholder("No data yet").block(block), area);
        return;
    }

    let (lo, hi) = value_bounds(d);
    let reverse = d.options.reverse;
    let y = |v: f64| if reverse { hi + lo - v } else { v };

    let points: Vec<Vec<(f64, f64)>> = d
        .datasets
        .iter()
        .map(|ds| {
            ds.values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, y(v)))
                .collect()
        })
        .collect();

    let series: Vec<Series> = d
        .datasets
        .iter()
        .zip(&points)
        .map(|(ds, pts)| {
            Series::default()
                .name(ds.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(term_color(paint_at(&ds.border_color, 0))))
                .data(pts)
        })
        .collect();

    let last = d.labels.len().saturating_sub(1).max(1) as f64;
    let x_labels: Vec<Span> = axis_labels(&d.labels)
        .into_iter()
        .map(|l| Span::styled(l, Style::default().fg(Color::Gray)))
        .collect();

    // Labels run bottom to top; a reversed axis shows the high value at the
    // bottom.
    let mid = (lo + hi) / 2.0;
    let y_values = if reverse { [hi, mid, lo] } else { [lo, mid, hi] };
    let y_labels: Vec<Span> = y_values
        .iter()
        .map(|v| Span::styled(format_value(*v), Style::default().fg(Color::Gray)))
        .collect();

    let mut y_axis = Axis::default().bounds([lo, hi]).labels(y_labels);
    if let Some(title) = &d.options.axis_title {
        y_axis = y_axis.title(title.clone());
    }

    let chart = Chart::new(series)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, last]).labels(x_labels))
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

pub fn render_timeline(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    render_line(frame, area, handle);
}

pub fn render_doughnut(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    let d = handle.data();
    let block = chart_block(d.options.title.clone());

    let Some(dataset) = d.datasets.first() else {
        frame.render_widget(placeholder("No data yet").block(block), area);
        return;
    };
    let total: f64 = dataset.values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        frame.render_widget(placeholder("No pitch data").block(block), area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical(vec![Constraint::Length(1); d.labels.len()]).split(inner);
    for (i, (label, &v)) in d.labels.iter().zip(&dataset.values).enumerate() {
        let Some(row) = rows.get(i) else { break };
        let ratio = (v.max(0.0) / total).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(term_color(paint_at(&dataset.background_color, i))))
            .ratio(ratio)
            .label(format!("{label} {v:.1}%"));
        frame.render_widget(gauge, *row);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn chart_block(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {title} "),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn placeholder(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
}

/// Color of point `i`: the per-point entry, or the single color.
pub fn paint_at(paint: &Paint, i: usize) -> Rgba {
    match paint {
        Paint::Uniform(c) => *c,
        Paint::PerPoint(colors) if !colors.is_empty() => colors[i % colors.len()],
        Paint::PerPoint(_) => Rgba::solid(0x80, 0x80, 0x80),
    }
}

/// Height of `v` on `BAR_SCALE` relative to `max`.
fn scaled(v: f64, max: f64) -> u64 {
    if max <= 0.0 || v <= 0.0 {
        return 0;
    }
    (v / max * BAR_SCALE).round() as u64
}

/// Counts past `u16::MAX` pin to the max rather than wrapping.
fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn bar_width(inner_width: u16, bars: usize) -> u16 {
    let n = saturating_u16(bars.max(1));
    (inner_width / n).saturating_sub(1).clamp(3, 14)
}

/// Value bounds for a line chart, padded so lines don't sit on the border.
fn value_bounds(d: &ChartDescriptor) -> (f64, f64) {
    let values = d.datasets.iter().flat_map(|ds| ds.values.iter().copied());
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if d.options.begin_at_zero {
        lo = lo.min(0.0);
    }
    let pad = ((hi - lo) * 0.1).max(0.05);
    if !d.options.begin_at_zero {
        lo -= pad;
    }
    hi += pad;
    (lo, hi)
}

/// Up to four labels are all shown; longer axes show first and last.
fn axis_labels(labels: &[String]) -> Vec<String> {
    match labels {
        [] => Vec::new(),
        l if l.len() <= 4 => l.to_vec(),
        [first, .., last] => vec![first.clone(), last.clone()],
        _ => Vec::new(),
    }
}

/// Counting stats print as integers, rates to three places (".298"), other
/// fractions to two.
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else if v.abs() < 1.0 {
        let s = format!("{v:.3}");
        s.replacen("0.", ".", 1)
    } else {
        format!("{v:.2}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
