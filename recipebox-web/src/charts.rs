//! Chart rendering for search results
//!
//! Charts are drawn with plotters into an in-memory SVG document and
//! embedded in the results page as a base64 data URI.

use base64::Engine;
use plotters::prelude::*;
use recipebox_common::Recipe;
use std::collections::HashMap;
use thiserror::Error;

use crate::search::ChartKind;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 480;
const TITLE_FONT: (&str, u32) = ("sans-serif", 22);
/// Room below the plot for vertical recipe names
const X_LABEL_AREA: u32 = 140;

/// Axis labels shared by the bar and line charts
pub const X_AXIS_LABEL: &str = "Recipe";
pub const Y_AXIS_LABEL: &str = "Cooking time (min)";

/// Label used for recipes without a stored difficulty
pub const UNKNOWN_DIFFICULTY: &str = "Unknown";

const SLICE_COLORS: [RGBColor; 6] = [
    RGBColor(66, 133, 244),
    RGBColor(234, 67, 53),
    RGBColor(251, 188, 5),
    RGBColor(52, 168, 83),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
];

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

/// The slice of a recipe a chart needs
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub name: String,
    pub cooking_time: u32,
    pub difficulty: String,
}

impl From<&Recipe> for ChartRow {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            cooking_time: recipe.cooking_time,
            difficulty: recipe.difficulty.clone(),
        }
    }
}

/// Render the requested chart as an SVG document
///
/// Returns `Ok(None)` when there is nothing to draw.
pub fn render_chart(kind: ChartKind, rows: &[ChartRow]) -> Result<Option<String>, ChartError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let svg = match kind {
        ChartKind::Bar => render_bar(rows)?,
        ChartKind::Pie => render_pie(rows)?,
        ChartKind::Line => render_line(rows)?,
    };
    Ok(Some(svg))
}

/// Embed an SVG document as a `data:` URI for an `<img>` tag
pub fn chart_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg.as_bytes())
    )
}

/// Count recipes per difficulty, largest group first
///
/// Ties are broken by label so the slice order is stable.
pub fn difficulty_counts(rows: &[ChartRow]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let label = match row.difficulty.trim() {
            "" => UNKNOWN_DIFFICULTY.to_string(),
            other => other.to_string(),
        };
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Percentage label with no decimals, e.g. "33%"
pub fn percent_label(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", count as f64 * 100.0 / total as f64)
}

fn max_cooking_time(rows: &[ChartRow]) -> u32 {
    let max = rows.iter().map(|r| r.cooking_time).max().unwrap_or(0);
    // headroom above the tallest value
    max.saturating_add(max / 10).saturating_add(1)
}

fn render_bar(rows: &[ChartRow]) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let last = (rows.len() - 1) as u32;
        let mut chart = ChartBuilder::on(&root)
            .caption("Cooking time per recipe", TITLE_FONT)
            .margin(16)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..last).into_segmented(), 0u32..max_cooking_time(rows))
            .map_err(render_error)?;

        let label = |value: &SegmentValue<u32>| segment_label(rows, value);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len())
            .x_label_formatter(&label)
            .x_label_style(x_label_style())
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                let i = i as u32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0),
                        (SegmentValue::Exact(i + 1), row.cooking_time),
                    ],
                    SLICE_COLORS[0].filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            }))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn render_line(rows: &[ChartRow]) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let last = (rows.len() - 1) as u32;
        let mut chart = ChartBuilder::on(&root)
            .caption("Cooking time trend", TITLE_FONT)
            .margin(16)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..last).into_segmented(), 0u32..max_cooking_time(rows))
            .map_err(render_error)?;

        let label = |value: &SegmentValue<u32>| segment_label(rows, value);
        chart
            .configure_mesh()
            .x_labels(rows.len())
            .x_label_formatter(&label)
            .x_label_style(x_label_style())
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .draw()
            .map_err(render_error)?;

        let points: Vec<(SegmentValue<u32>, u32)> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (SegmentValue::CenterOf(i as u32), row.cooking_time))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), SLICE_COLORS[1].stroke_width(2)))
            .map_err(render_error)?;
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 4, SLICE_COLORS[1].filled())),
            )
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn render_pie(rows: &[ChartRow]) -> Result<String, ChartError> {
    let counts = difficulty_counts(rows);
    let total = rows.len();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        let root = root
            .titled("Difficulty distribution", TITLE_FONT)
            .map_err(render_error)?;

        let (width, height) = root.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = (width.min(height) as f64 / 2.0) * 0.8;

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (i, (label, count)) in counts.iter().enumerate() {
            let sweep = *count as f64 / total as f64 * std::f64::consts::TAU;
            let color = SLICE_COLORS[i % SLICE_COLORS.len()];

            root.draw(&Polygon::new(
                slice_points(center, radius, start, sweep),
                color.filled(),
            ))
            .map_err(render_error)?;

            let mid = start + sweep / 2.0;
            let text_at = (
                center.0 + (radius * 0.6 * mid.cos()) as i32,
                center.1 + (radius * 0.6 * mid.sin()) as i32,
            );
            root.draw(&Text::new(
                format!("{} {}", label, percent_label(*count, total)),
                text_at,
                ("sans-serif", 16),
            ))
            .map_err(render_error)?;

            start += sweep;
        }

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

/// Polygon approximating one pie slice, starting and ending at the center
fn slice_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / std::f64::consts::TAU) * 120.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()) as i32,
            center.1 + (radius * angle.sin()) as i32,
        ));
    }
    points
}

/// Recipe names run top to bottom so long lists do not overlap
fn x_label_style() -> TextStyle<'static> {
    ("sans-serif", 12)
        .into_font()
        .transform(FontTransform::Rotate90)
        .into()
}

fn segment_label(rows: &[ChartRow], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => rows
            .get(*i as usize)
            .map(|row| row.name.clone())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, cooking_time: u32, difficulty: &str) -> ChartRow {
        ChartRow {
            name: name.to_string(),
            cooking_time,
            difficulty: difficulty.to_string(),
        }
    }

    fn sample_rows() -> Vec<ChartRow> {
        vec![
            row("Scrambled Eggs", 5, "Easy"),
            row("Fruit Salad", 8, "Medium"),
            row("Tomato Soup", 30, "Intermediate"),
            row("Omelette", 7, "Easy"),
            row("Mystery Stew", 90, ""),
        ]
    }

    #[test]
    fn test_no_chart_for_empty_results() {
        for kind in [ChartKind::Bar, ChartKind::Pie, ChartKind::Line] {
            assert_eq!(render_chart(kind, &[]).unwrap(), None);
        }
    }

    #[test]
    fn test_bar_chart_has_title_and_axis_labels() {
        let svg = render_chart(ChartKind::Bar, &sample_rows()).unwrap().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Cooking time per recipe"));
        assert!(svg.contains(X_AXIS_LABEL));
        assert!(svg.contains(Y_AXIS_LABEL));
        assert!(svg.contains("Tomato Soup"));
        assert!(svg.contains("rotate(90,"), "recipe names should be vertical");
    }

    #[test]
    fn test_line_chart_renders_single_row() {
        let svg = render_chart(ChartKind::Line, &[row("Toast", 3, "Easy")])
            .unwrap()
            .unwrap();
        assert!(svg.contains("Cooking time trend"));
    }

    #[test]
    fn test_pie_chart_labels_carry_percentages() {
        let svg = render_chart(ChartKind::Pie, &sample_rows()).unwrap().unwrap();
        assert!(svg.contains("Difficulty distribution"));
        assert!(svg.contains("Easy 40%"));
        assert!(svg.contains("Unknown 20%"));
    }

    #[test]
    fn test_difficulty_counts_order_and_unknown_bucket() {
        let counts = difficulty_counts(&sample_rows());
        assert_eq!(
            counts,
            vec![
                ("Easy".to_string(), 2),
                ("Intermediate".to_string(), 1),
                ("Medium".to_string(), 1),
                ("Unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_percent_label_rounds_to_whole_numbers() {
        assert_eq!(percent_label(1, 3), "33%");
        assert_eq!(percent_label(2, 3), "67%");
        assert_eq!(percent_label(0, 0), "0%");
    }

    #[test]
    fn test_largest_cooking_time_still_renders() {
        let rows = [row("Forever", u32::MAX, "Hard"), row("Toast", 3, "Easy")];
        assert_eq!(max_cooking_time(&rows), u32::MAX);
        for kind in [ChartKind::Bar, ChartKind::Line] {
            let svg = render_chart(kind, &rows).unwrap().unwrap();
            assert!(svg.contains("Forever"));
        }
    }

    #[test]
    fn test_data_uri_prefix() {
        let uri = chart_data_uri("<svg></svg>");
        assert_eq!(uri, "data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=");
    }
}
