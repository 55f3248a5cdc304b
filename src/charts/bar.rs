//! Bar charts

use crate::charts::svg::{Axis, Frame, SvgDocument};
use crate::charts::Chart;
use crate::features::age_brackets::BracketSummary;
use crate::features::rounding::format_float;
use crate::{ChartConfig, HoopsError, Result};

/// One bar per category, drawn left to right in insertion order
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub color: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    pub fn new(title: &str, x_title: &str, y_title: &str, color: &str) -> Self {
        BarChart {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            color: color.to_string(),
            bars: Vec::new(),
        }
    }

    pub fn with_bar(mut self, category: &str, height: f64) -> Self {
        self.bars.push((category.to_string(), height));
        self
    }

    /// One bar per age bracket, labelled with its age range
    pub fn from_summary(
        summary: &BracketSummary,
        title: &str,
        x_title: &str,
        y_title: &str,
        color: &str,
    ) -> Self {
        summary
            .iter()
            .fold(Self::new(title, x_title, y_title, color), |chart, (label, avg)| {
                chart.with_bar(label, avg)
            })
    }
}

impl Chart for BarChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn render_svg(&self, config: &ChartConfig) -> Result<String> {
        if self.bars.is_empty() {
            return Err(HoopsError::InvalidInput(format!(
                "bar chart \"{}\" has no bars",
                self.title
            )));
        }

        let lo = self.bars.iter().map(|b| b.1).fold(0.0, f64::min);
        let hi = self.bars.iter().map(|b| b.1).fold(0.0, f64::max);
        let y_axis = Axis::covering(lo, hi);

        let frame = Frame::new(config.width, config.height);
        let mut doc = SvgDocument::new(config.width, config.height);
        doc.axes(&frame, &self.title, &self.x_title, &self.y_title, None, &y_axis);

        let slot = (frame.right() - frame.left()) / self.bars.len() as f64;
        let bar_width = slot * 0.7;
        let baseline = frame.y(&y_axis, 0.0);

        for (i, (category, height)) in self.bars.iter().enumerate() {
            let center = frame.left() + slot * (i as f64 + 0.5);
            let top = frame.y(&y_axis, *height);
            doc.rect(
                center - bar_width / 2.0,
                top.min(baseline),
                bar_width,
                (baseline - top).abs(),
                &self.color,
            );
            doc.text(center, top.min(baseline) - 6.0, 11, "middle", &format_float(*height));
            doc.text(center, frame.bottom() + 18.0, 11, "middle", category);
        }

        Ok(doc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_summary_keeps_bracket_order() {
        let summary = BracketSummary {
            labels: vec!["24.0 - 25.1".into(), "25.2 - 26.1".into()],
            averages: vec![36.4, 51.22],
        };
        let chart = BarChart::from_summary(&summary, "t", "Average Age", "Win %", "#ff6362");
        assert_eq!(
            chart.bars,
            [("24.0 - 25.1".to_string(), 36.4), ("25.2 - 26.1".to_string(), 51.22)]
        );
    }

    #[test]
    fn test_render() {
        let chart = BarChart::new("Average Age and Winning Percentage", "Average Age", "Win %", "#ff6362")
            .with_bar("24.0 - 25.1", 36.4)
            .with_bar("25.2 - 26.1", 51.22)
            .with_bar("26.1 - 29.2", 60.0);
        let svg = chart.render_svg(&ChartConfig::default()).unwrap();

        assert_eq!(svg.matches("fill=\"#ff6362\"").count(), 3);
        assert!(svg.contains(">25.2 - 26.1</text>"));
        assert!(svg.contains(">51.22</text>"));
        assert!(svg.contains(">60.0</text>"));
    }

    #[test]
    fn test_empty_rejected() {
        let chart = BarChart::new("t", "x", "y", "gold");
        assert!(chart.render_svg(&ChartConfig::default()).is_err());
    }
}
