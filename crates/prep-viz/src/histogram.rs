//! Histograms for numeric columns and count plots for everything else

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use polars::prelude::{Column, DataFrame, DataType};
use prep_core::density::gaussian_kde;
use prep_core::utils::present_values;
use prep_polars::numeric_values;
use tracing::info;

use crate::{output_path, palette, Error, PlotConfig, Result};

/// Sturges' rule: `ceil(log2(n)) + 1`, at least one bin
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

struct Bins {
    lo: f64,
    width: f64,
    counts: Vec<u32>,
}

fn bin(values: &[f64], bins: usize) -> Bins {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };

    let bins = bins.max(1);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0u32; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Bins { lo, width, counts }
}

/// Points of the density curve scaled to bar heights, `None` without spread
fn kde_curve(values: &[f64], bins: &Bins) -> Option<Vec<(f64, f64)>> {
    const POINTS: usize = 200;
    let hi = bins.lo + bins.width * bins.counts.len() as f64;
    let step = (hi - bins.lo) / (POINTS - 1) as f64;
    let grid: Vec<f64> = (0..POINTS).map(|i| bins.lo + step * i as f64).collect();

    let scale = values.len() as f64 * bins.width;
    let density = gaussian_kde(values, &grid)?;
    Some(grid.into_iter().zip(density).map(|(x, d)| (x, d * scale)).collect())
}

/// Category frequencies, most frequent first, ties by first appearance
fn value_counts(column: &Column) -> Result<Vec<(String, u32)>> {
    let as_text = column.cast(&DataType::String)?;
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for value in as_text.str()?.into_iter().flatten() {
        let entry = counts.entry(value.to_string()).or_insert_with(|| {
            order.push(value.to_string());
            0
        });
        *entry += 1;
    }

    let mut ranked: Vec<(String, u32)> = order
        .into_iter()
        .map(|v| {
            let c = counts[&v];
            (v, c)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(ranked)
}

fn draw_histogram(path: &Path, name: &str, values: &[f64], config: &PlotConfig) -> Result<()> {
    let bins = bin(values, config.bins.unwrap_or_else(|| sturges_bins(values.len())));
    let curve = if config.kde {
        kde_curve(values, &bins)
    } else {
        None
    };
    let tallest_bar = bins.counts.iter().copied().max().unwrap_or(0) as f64;
    let tallest = curve
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(tallest_bar, f64::max);
    let hi = bins.lo + bins.width * bins.counts.len() as f64;
    let font = config.font_family.as_str();

    let root = SVGBackend::new(path, config.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Distribution of {name}"), (font, config.caption_size))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(bins.lo..hi, 0f64..(tallest * 1.1).max(1.0))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(name)
        .y_desc("Frequency")
        .label_style((font, config.label_size))
        .draw()?;

    chart.draw_series(bins.counts.iter().enumerate().map(|(i, &count)| {
        let x0 = bins.lo + bins.width * i as f64;
        Rectangle::new(
            [(x0, 0.0), (x0 + bins.width, f64::from(count))],
            palette::BAR.filled(),
        )
    }))?;

    if let Some(curve) = curve {
        chart.draw_series(LineSeries::new(curve, palette::KDE_LINE.stroke_width(2)))?;
    }

    root.present()?;
    Ok(())
}

fn draw_countplot(
    path: &Path,
    name: &str,
    counts: &[(String, u32)],
    config: &PlotConfig,
) -> Result<()> {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let font = config.font_family.as_str();

    let root = SVGBackend::new(path, config.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Counts of {name}"), (font, config.caption_size))
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d((0..counts.len()).into_segmented(), 0u32..(max + max / 10 + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => counts.get(*i).map(|(c, _)| c.clone()).unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(name)
        .y_desc("Count")
        .label_style((font, config.label_size))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(palette::CATEGORY_BAR.filled())
            .margin(5)
            .data(counts.iter().enumerate().map(|(i, (_, c))| (i, *c))),
    )?;

    root.present()?;
    Ok(())
}

/// Write a histogram per numeric column and a count plot per other column
///
/// Empty `columns` means every column. Columns without any present value
/// produce no file.
pub fn plot_histograms(
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
            .map_err(|_| Error::InvalidColumn(name.clone()))?;

        let path = match numeric_values(column)? {
            Some(values) => {
                let present = present_values(&values);
                if present.is_empty() {
                    continue;
                }
                let path = output_path(out_dir.as_ref(), "hist", name);
                draw_histogram(&path, name, &present, config)?;
                path
            }
            None => {
                let counts = value_counts(column)?;
                if counts.is_empty() {
                    continue;
                }
                let path = output_path(out_dir.as_ref(), "count", name);
                draw_countplot(&path, name, &counts, config)?;
                path
            }
        };

        info!("Wrote distribution plot for '{}' to '{}'", name, path.display());
        written.push(path);
    }
    Ok(written)
}
