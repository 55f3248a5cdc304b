//! Scatter plots with trend lines

use crate::charts::svg::{Axis, Frame, SvgDocument, Swatch};
use crate::charts::trend::LinearFit;
use crate::charts::Chart;
use crate::features::team_index::TeamFeatureMap;
use crate::{ChartConfig, HoopsError, Result};

/// One colored set of points with its own fitted line
#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub label: Option<String>,
    pub color: String,
    pub points: Vec<(f64, f64)>,
    pub fit: LinearFit,
}

impl ScatterSeries {
    pub fn new(points: Vec<(f64, f64)>, color: &str, label: Option<&str>) -> Result<Self> {
        let fit = LinearFit::fit(&points)?;
        Ok(ScatterSeries {
            label: label.map(String::from),
            color: color.to_string(),
            points,
            fit,
        })
    }

    /// Plot feature position `x` against position `y` for every team
    pub fn from_features(
        map: &TeamFeatureMap,
        x: usize,
        y: usize,
        color: &str,
        label: Option<&str>,
    ) -> Result<Self> {
        Self::new(map.pairs(x, y)?, color, label)
    }

    fn x_extent(&self) -> (f64, f64) {
        extent(self.points.iter().map(|p| p.0))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn new(title: &str, x_title: &str, y_title: &str) -> Self {
        ScatterChart {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: ScatterSeries) -> Self {
        self.series.push(series);
        self
    }

    fn axes(&self) -> (Axis, Axis) {
        let xs = extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let ys = extent(
            self.series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.1))
                .chain(self.series.iter().flat_map(|s| {
                    let (lo, hi) = s.x_extent();
                    [s.fit.at(lo), s.fit.at(hi)]
                })),
        );
        (Axis::covering(xs.0, xs.1), Axis::covering(ys.0, ys.1))
    }
}

impl Chart for ScatterChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn render_svg(&self, config: &ChartConfig) -> Result<String> {
        if self.series.is_empty() {
            return Err(HoopsError::InvalidInput(format!(
                "scatter chart \"{}\" has no series",
                self.title
            )));
        }

        let frame = Frame::new(config.width, config.height);
        let (x_axis, y_axis) = self.axes();
        let mut doc = SvgDocument::new(config.width, config.height);
        doc.axes(
            &frame,
            &self.title,
            &self.x_title,
            &self.y_title,
            Some(&x_axis),
            &y_axis,
        );

        let mut legend = Vec::new();
        for series in &self.series {
            for &(x, y) in &series.points {
                doc.circle(frame.x(&x_axis, x), frame.y(&y_axis, y), 4.0, &series.color);
            }

            let (lo, hi) = series.x_extent();
            doc.line(
                frame.x(&x_axis, lo),
                frame.y(&y_axis, series.fit.at(lo)),
                frame.x(&x_axis, hi),
                frame.y(&y_axis, series.fit.at(hi)),
                &series.color,
                2.0,
            );

            if let Some(label) = &series.label {
                legend.push((Swatch::Marker, series.color.clone(), label.clone()));
            }
            legend.push((Swatch::Line, series.color.clone(), series.fit.label()));
        }
        doc.legend(&frame, &legend);

        Ok(doc.finish())
    }
}
