//! Team feature vectors
//!
//! [`TeamIndex`] is seeded with the teams of one table and accumulates one
//! value per team for every joined column. [`TeamIndex::build`] freezes it
//! into a [`TeamFeatureMap`], whose vectors are read by position.

use crate::data::table::SeasonTable;
use crate::features::win_rate::win_rate;
use crate::{HoopsError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Where a feature position's values came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSource {
    /// Derived from the wins and losses columns
    WinRate { wins: usize, losses: usize },
    /// Copied from a table column
    Column { index: usize },
}

/// Description of one position in every team's feature vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureColumn {
    /// Header label, or `Win %` for the derived rate
    pub label: String,
    /// File the values were read from
    pub table: String,
    pub source: FeatureSource,
}

/// One team's row of the finished map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamFeatures {
    pub team: String,
    pub features: Vec<f64>,
}

/// Builder accumulating features per team
#[derive(Debug, Clone, Default)]
pub struct TeamIndex {
    order: Vec<String>,
    features: HashMap<String, Vec<f64>>,
    columns: Vec<FeatureColumn>,
}

impl TeamIndex {
    /// One empty entry per distinct team name in `table`, in row order.
    /// Names must already be normalized.
    pub fn seed(table: &SeasonTable) -> Result<Self> {
        let mut index = TeamIndex::default();
        for row in table.rows() {
            let name = table.team_name(row)?;
            if index.features.contains_key(name) {
                log::warn!(
                    "{}:{}: duplicate team {}, keeping one entry",
                    table.path().display(),
                    row.line,
                    name
                );
                continue;
            }
            index.order.push(name.to_string());
            index.features.insert(name.to_string(), Vec::new());
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, team: &str) -> bool {
        self.features.contains_key(team)
    }

    /// Number of columns joined so far
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Append `table[column]` to every listed team
    pub fn join_column(&mut self, table: &SeasonTable, column: usize) -> Result<()> {
        let mut values = Vec::with_capacity(table.len());
        for row in table.rows() {
            values.push((table.team_name(row)?, table.number(row, column)?));
        }
        self.append_all(values)?;

        self.columns.push(FeatureColumn {
            label: table
                .header(column)
                .map(String::from)
                .unwrap_or_else(|| format!("Column {}", column)),
            table: table_name(table),
            source: FeatureSource::Column { index: column },
        });
        Ok(())
    }

    /// Append the win percentage computed from the `wins` and `losses` columns
    pub fn join_win_rate(&mut self, table: &SeasonTable, wins: usize, losses: usize) -> Result<()> {
        let mut values = Vec::with_capacity(table.len());
        for row in table.rows() {
            let rate = win_rate(table.number(row, wins)?, table.number(row, losses)?)?;
            values.push((table.team_name(row)?, rate));
        }
        self.append_all(values)?;

        self.columns.push(FeatureColumn {
            label: "Win %".to_string(),
            table: table_name(table),
            source: FeatureSource::WinRate { wins, losses },
        });
        Ok(())
    }

    fn append_all(&mut self, values: Vec<(&str, f64)>) -> Result<()> {
        if let Some((team, _)) = values.iter().find(|(team, _)| !self.contains(team)) {
            return Err(HoopsError::UnknownTeam(team.to_string()));
        }
        for (team, value) in values {
            if let Some(features) = self.features.get_mut(team) {
                features.push(value);
            }
        }
        Ok(())
    }

    /// Freeze into a map. Every team must have exactly one value per joined
    /// column.
    pub fn build(mut self) -> Result<TeamFeatureMap> {
        let expected = self.columns.len();
        let mut teams = Vec::with_capacity(self.order.len());
        for team in self.order {
            let features = self.features.remove(&team).unwrap_or_default();
            if features.len() != expected {
                return Err(HoopsError::MissingFeatures {
                    team,
                    expected,
                    actual: features.len(),
                });
            }
            teams.push(TeamFeatures { team, features });
        }
        Ok(TeamFeatureMap::new(self.columns, teams))
    }
}

fn table_name(table: &SeasonTable) -> String {
    table
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Team name to ordered feature vector, immutable once built.
///
/// Team order follows the seeding table. Position `i` of every vector holds
/// the statistic described by `columns()[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct TeamFeatureMap {
    columns: Vec<FeatureColumn>,
    teams: Vec<TeamFeatures>,
    #[serde(skip)]
    lookup: HashMap<String, usize>,
}

impl TeamFeatureMap {
    fn new(columns: Vec<FeatureColumn>, teams: Vec<TeamFeatures>) -> Self {
        let lookup = teams
            .iter()
            .enumerate()
            .map(|(i, t)| (t.team.clone(), i))
            .collect();
        TeamFeatureMap {
            columns,
            teams,
            lookup,
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Length of every team's vector
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Position of the first column with the given label
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }

    pub fn get(&self, team: &str) -> Option<&[f64]> {
        self.lookup
            .get(team)
            .map(|&i| self.teams[i].features.as_slice())
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.team.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamFeatures> {
        self.teams.iter()
    }

    /// `(features[x], features[y])` for every team, in map order
    pub fn pairs(&self, x: usize, y: usize) -> Result<Vec<(f64, f64)>> {
        self.check_position(x)?;
        self.check_position(y)?;
        Ok(self
            .teams
            .iter()
            .map(|t| (t.features[x], t.features[y]))
            .collect())
    }

    pub fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.width() {
            return Err(HoopsError::InvalidInput(format!(
                "feature position {} out of range, vectors have {} features",
                position,
                self.width()
            )));
        }
        Ok(())
    }
}
