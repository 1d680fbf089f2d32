//! Correlation heatmap

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;
use prep_polars::{column_kind, ColumnKind, PrepStatsExt};
use tracing::info;

use crate::{palette, PlotConfig, Result};

/// Row-major coefficients out of the frame returned by `correlation_matrix`
fn matrix_values(matrix: &DataFrame, names: &[String]) -> Result<Vec<Vec<Option<f64>>>> {
    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let values: Vec<Option<f64>> = matrix.column(name)?.f64()?.into_iter().collect();
        columns.push(values);
    }
    // columns[j][i] is corr(names[i], names[j]), which is symmetric anyway
    Ok((0..names.len())
        .map(|i| columns.iter().map(|col| col[i]).collect())
        .collect())
}

fn label(names: &[String], value: &SegmentValue<usize>, flip: bool) -> String {
    match value {
        SegmentValue::CenterOf(i) => {
            let idx = if flip {
                names.len().checked_sub(i + 1)
            } else {
                Some(*i)
            };
            idx.and_then(|k| names.get(k)).cloned().unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// Render the Pearson correlation matrix of `columns` as an annotated heatmap
///
/// Empty `columns` means every numeric column. Cells without a defined
/// coefficient are greyed out and left blank.
pub fn plot_correlation_heatmap(
    df: &DataFrame,
    columns: &[&str],
    name: &str,
    out_path: impl AsRef<Path>,
    config: &PlotConfig,
) -> Result<PathBuf> {
    let out_path = out_path.as_ref().to_path_buf();
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let numeric: Vec<String>;
    let columns: Vec<&str> = if columns.is_empty() {
        numeric = df
            .get_columns()
            .iter()
            .filter(|c| column_kind(c) == ColumnKind::Numeric)
            .map(|c| c.name().to_string())
            .collect();
        numeric.iter().map(String::as_str).collect()
    } else {
        columns.to_vec()
    };

    let matrix = df.correlation_matrix(&columns)?;
    let names: Vec<String> = matrix
        .get_column_names()
        .iter()
        .skip(1)
        .map(|n| n.to_string())
        .collect();
    let values = matrix_values(&matrix, &names)?;
    let n = names.len();
    let font = config.font_family.as_str();

    let root = SVGBackend::new(&out_path, config.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Correlation Matrix for {name}"),
            (font, config.caption_size),
        )
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(120)
        .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| label(&names, v, false))
        .y_label_formatter(&|v| label(&names, v, true))
        .label_style((font, config.label_size))
        .draw()?;

    // Row 0 sits at the top
    let cells: Vec<(usize, usize, Option<f64>)> = values
        .iter()
        .enumerate()
        .flat_map(|(row, coefficients)| {
            coefficients
                .iter()
                .enumerate()
                .map(move |(col, &r)| (col, n - 1 - row, r))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, r)| {
        let color = r.map(palette::coolwarm).unwrap_or(palette::MISSING);
        Rectangle::new(
            [
                (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
            ],
            color.filled(),
        )
    }))?;

    let annotation = TextStyle::from((font, config.label_size).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().filter_map(|&(x, y, r)| {
        r.map(|r| {
            Text::new(
                format!("{r:.2}"),
                (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                annotation.clone(),
            )
        })
    }))?;

    root.present()?;
    info!(
        "Wrote correlation heatmap of {} columns to '{}'",
        n,
        out_path.display()
    );
    drop(chart);
    drop(root);
    Ok(out_path)
}
