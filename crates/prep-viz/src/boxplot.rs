//! Box plots

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use polars::prelude::DataFrame;
use prep_core::utils::{median, present_values};
use prep_core::IqrFence;
use prep_polars::numeric_values;
use tracing::{debug, info};

use crate::{output_path, palette, PlotConfig, Result};

struct BoxStats {
    fence: IqrFence,
    median: f64,
    whisker_low: f64,
    whisker_high: f64,
    outliers: Vec<f64>,
    min: f64,
    max: f64,
}

impl BoxStats {
    fn of(values: &[Option<f64>]) -> Result<Option<Self>> {
        let Some(fence) = IqrFence::from_values(values)? else {
            return Ok(None);
        };
        let present = present_values(values);
        let Some(median) = median(values) else {
            return Ok(None);
        };

        let inside = present.iter().copied().filter(|&v| fence.contains(v));
        let whisker_low = inside.clone().fold(f64::INFINITY, f64::min).min(fence.q1);
        let whisker_high = inside.fold(f64::NEG_INFINITY, f64::max).max(fence.q3);
        let outliers = present.iter().copied().filter(|&v| !fence.contains(v)).collect();
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Some(Self {
            fence,
            median,
            whisker_low,
            whisker_high,
            outliers,
            min,
            max,
        }))
    }
}

fn draw_boxplot(path: &Path, name: &str, stats: &BoxStats, config: &PlotConfig) -> Result<()> {
    let root = SVGBackend::new(path, config.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let pad = ((stats.max - stats.min) * 0.05).max(0.5);
    let font = config.font_family.as_str();

    let mut chart = ChartBuilder::on(&root)
        .caption(name, (font, config.caption_size))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, (stats.min - pad)..(stats.max + pad))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc(name)
        .label_style((font, config.label_size))
        .draw()?;

    let (left, right, centre) = (0.3, 0.7, 0.5);
    let q = &stats.fence;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, q.q1), (right, q.q3)],
        palette::BAR.mix(0.4).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, q.q1), (right, q.q3)],
        BLACK.stroke_width(1),
    )))?;

    let segments = vec![
        vec![(left, stats.median), (right, stats.median)],
        vec![(centre, q.q3), (centre, stats.whisker_high)],
        vec![(centre, q.q1), (centre, stats.whisker_low)],
        vec![(0.4, stats.whisker_high), (0.6, stats.whisker_high)],
        vec![(0.4, stats.whisker_low), (0.6, stats.whisker_low)],
    ];
    chart.draw_series(
        segments
            .into_iter()
            .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
    )?;

    chart.draw_series(
        stats
            .outliers
            .iter()
            .map(|&v| Circle::new((centre, v), 3, BLACK.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Write one box plot per numeric column
///
/// Empty `columns` means every column; non-numeric and empty columns are
/// passed over.
pub fn plot_boxplots(
    df: &DataFrame,
    columns: &[&str],
    out_dir: impl AsRef<Path>,
    config: &PlotConfig,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir.as_ref())?;

    let names: Vec<String> = if columns.is_empty() {
        df.get_column_names().iter().map(|n| n.to_string()).collect()
    } else {
        columns.iter().map(|n| n.to_string()).collect()
    };

    let mut written = Vec::new();
    for name in &names {
        let column = df
            .column(name)
            .map_err(|_| crate::Error::InvalidColumn(name.clone()))?;
        let Some(values) = numeric_values(column)? else {
            debug!("Column '{}' is not numeric, no box plot", name);
            continue;
        };
        let Some(stats) = BoxStats::of(&values)? else {
            debug!("Column '{}' has no values, no box plot", name);
            continue;
        };

        let path = output_path(out_dir.as_ref(), "boxplot", name);
        draw_boxplot(&path, name, &stats, config)?;
        info!("Wrote box plot for '{}' to '{}'", name, path.display());
        written.push(path);
    }
    Ok(written)
}
