//! Chart rendering
//!
//! Scatter plots with least-squares trend lines and bar charts, written as
//! standalone SVG files.

pub mod bar;
pub mod scatter;
pub mod svg;
pub mod trend;

pub use bar::BarChart;
pub use scatter::{ScatterChart, ScatterSeries};
pub use trend::LinearFit;

use crate::{ChartConfig, Result};
use std::path::{Path, PathBuf};

/// Anything that can be drawn to an SVG document
pub trait Chart {
    fn title(&self) -> &str;

    fn render_svg(&self, config: &ChartConfig) -> Result<String>;
}

/// Render `chart` to `{dir}/{file_stem}.svg`, creating `dir` if needed
pub fn save_chart(
    chart: &dyn Chart,
    dir: &Path,
    file_stem: &str,
    config: &ChartConfig,
) -> Result<PathBuf> {
    let svg = chart.render_svg(config)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.svg", file_stem));
    std::fs::write(&path, svg)?;
    log::info!("Wrote \"{}\" to {}", chart.title(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_chart_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("charts");
        let chart = BarChart::new("Wins", "Age", "Win %", "mediumseagreen")
            .with_bar("24.0 - 25.1", 36.4)
            .with_bar("25.2 - 26.0", 45.0);

        let path = save_chart(&chart, &out, "wins", &ChartConfig::default()).unwrap();
        assert_eq!(path, out.join("wins.svg"));
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.starts_with("<svg"));
    }
}
