//! Exploratory plots for DataFrames
//!
//! Every plot is written as an SVG file and the written paths are returned.
//!
//! - [`plot_boxplots`]: one box plot per numeric column
//! - [`plot_histograms`]: histogram for numeric columns, count plot otherwise
//! - [`plot_correlation_heatmap`]: annotated Pearson correlation heatmap

mod boxplot;
mod config;
mod error;
mod heatmap;
mod histogram;
mod palette;

pub use boxplot::plot_boxplots;
pub use config::PlotConfig;
pub use error::{Error, Result};
pub use heatmap::plot_correlation_heatmap;
pub use histogram::{plot_histograms, sturges_bins};

use std::path::{Path, PathBuf};

/// Output path `<dir>/<prefix>_<column>.svg` with the column name made file-safe
pub(crate) fn output_path(dir: &Path, prefix: &str, column: &str) -> PathBuf {
    let safe: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    dir.join(format!("{prefix}_{safe}.svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_is_file_safe() {
        let path = output_path(Path::new("/tmp/plots"), "hist", "Adj Close/USD");
        assert_eq!(path, PathBuf::from("/tmp/plots/hist_Adj_Close_USD.svg"));
    }
}
