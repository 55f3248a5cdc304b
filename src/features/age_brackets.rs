//! Age brackets
//!
//! Teams sorted by average age and cut into equal contiguous groups, then
//! averaged per group.

use crate::features::rounding::{format_float, round_to};
use crate::features::team_index::TeamFeatureMap;
use crate::{HoopsError, Result};
use serde::{Deserialize, Serialize};

/// Bracket layout. The product must equal the number of teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketConfig {
    pub group_count: usize,
    pub group_size: usize,
}

impl Default for BracketConfig {
    fn default() -> Self {
        // 30-team league
        BracketConfig {
            group_count: 5,
            group_size: 6,
        }
    }
}

impl BracketConfig {
    pub fn validate(&self) -> Result<()> {
        if self.group_count == 0 || self.group_size == 0 {
            return Err(HoopsError::Config(format!(
                "brackets need a positive group count and size, got {} x {}",
                self.group_count, self.group_size
            )));
        }
        self.team_count().map(|_| ())
    }

    /// Teams the layout covers, or a config error if the product overflows
    pub fn team_count(&self) -> Result<usize> {
        self.group_count
            .checked_mul(self.group_size)
            .ok_or_else(|| {
                HoopsError::Config(format!(
                    "bracket layout {} x {} is too large",
                    self.group_count, self.group_size
                ))
            })
    }
}

/// One team's (age, value) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgePoint {
    pub age: f64,
    pub value: f64,
}

/// Which half of the pair to average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketField {
    Age,
    #[default]
    Value,
}

/// Contiguous run of teams in ascending age order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBracket {
    pub members: Vec<AgePoint>,
}

impl AgeBracket {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Youngest and oldest age in the group
    pub fn age_range(&self) -> Option<(f64, f64)> {
        let mut ages = self.members.iter().map(|p| p.age);
        let first = ages.next()?;
        Some(ages.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a))))
    }

    /// `"{min} - {max}"`
    pub fn label(&self) -> Option<String> {
        self.age_range()
            .map(|(lo, hi)| format!("{} - {}", format_float(lo), format_float(hi)))
    }

    pub fn mean(&self, field: BracketField) -> Option<f64> {
        if self.members.is_empty() {
            return None;
        }
        let sum: f64 = self
            .members
            .iter()
            .map(|p| match field {
                BracketField::Age => p.age,
                BracketField::Value => p.value,
            })
            .sum();
        Some(sum / self.members.len() as f64)
    }
}

/// Collect `(features[age_column], features[value_column])` for every team,
/// sort by age then value, and split into `config.group_count` groups of
/// `config.group_size`.
pub fn group_by_age(
    map: &TeamFeatureMap,
    value_column: usize,
    age_column: usize,
    config: &BracketConfig,
) -> Result<Vec<AgeBracket>> {
    config.validate()?;
    if map.len() != config.team_count()? {
        return Err(HoopsError::Precondition(format!(
            "{} teams cannot be split into {} brackets of {}",
            map.len(),
            config.group_count,
            config.group_size
        )));
    }

    let mut points: Vec<AgePoint> = map
        .pairs(age_column, value_column)?
        .into_iter()
        .map(|(age, value)| AgePoint { age, value })
        .collect();
    points.sort_by(|a, b| a.age.total_cmp(&b.age).then(a.value.total_cmp(&b.value)));

    Ok(points
        .chunks(config.group_size)
        .map(|chunk| AgeBracket {
            members: chunk.to_vec(),
        })
        .collect())
}

/// Per-bracket age label and average, index-aligned with the brackets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketSummary {
    pub labels: Vec<String>,
    pub averages: Vec<f64>,
}

impl BracketSummary {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.averages.iter().copied())
    }
}

/// Age range label and mean of `field` (rounded to 2 places) per bracket
pub fn summarize_groups(groups: &[AgeBracket], field: BracketField) -> Result<BracketSummary> {
    let mut labels = Vec::with_capacity(groups.len());
    let mut averages = Vec::with_capacity(groups.len());

    for (i, group) in groups.iter().enumerate() {
        let (Some(label), Some(mean)) = (group.label(), group.mean(field)) else {
            return Err(HoopsError::Precondition(format!("bracket {} is empty", i)));
        };
        labels.push(label);
        averages.push(round_to(mean, 2));
    }

    Ok(BracketSummary { labels, averages })
}
