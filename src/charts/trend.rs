//! Least-squares trend lines

use crate::features::rounding::{format_float, round_to};
use crate::{HoopsError, Result};
use serde::Serialize;

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Degree-1 least-squares fit. Needs two points with distinct x.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(HoopsError::InvalidInput(format!(
                "trend line needs at least 2 points, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), &(x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

        if sxx == 0.0 {
            return Err(HoopsError::InvalidInput(
                "trend line undefined when every x is equal".to_string(),
            ));
        }

        let slope = sxy / sxx;
        Ok(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Legend text, e.g. `2.15 * x + -30.4`
    pub fn label(&self) -> String {
        format!(
            "{} * x + {}",
            format_float(round_to(self.slope, 2)),
            format_float(round_to(self.intercept, 2))
        )
    }
}
