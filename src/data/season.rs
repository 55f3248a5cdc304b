//! Season labels and the export file naming convention

use crate::data::schema::TableKind;
use crate::{HoopsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

static SEASON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("season pattern compiles"));

/// A season such as `2018-19`: start year and the two-digit year it ends in
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeasonLabel(String);

impl SeasonLabel {
    pub fn parse(label: &str) -> Result<Self> {
        let invalid = || {
            HoopsError::InvalidInput(format!(
                "season label {:?} should look like 2018-19",
                label
            ))
        };

        let caps = SEASON_PATTERN.captures(label.trim()).ok_or_else(invalid)?;
        let start: u32 = caps[1].parse().map_err(|_| invalid())?;
        let end: u32 = caps[2].parse().map_err(|_| invalid())?;
        if (start + 1) % 100 != end {
            return Err(invalid());
        }

        Ok(SeasonLabel(caps[0].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn start_year(&self) -> u32 {
        self.0[..4].parse().unwrap_or_default()
    }

    /// `"{season} Advanced Data.txt"` / `"{season} Per Game Data.txt"`
    pub fn file_name(&self, kind: TableKind) -> String {
        format!("{} {}", self.0, kind.file_suffix())
    }

    pub fn path_in(&self, dir: &Path, kind: TableKind) -> PathBuf {
        dir.join(self.file_name(kind))
    }
}

impl fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SeasonLabel {
    type Err = HoopsError;

    fn from_str(s: &str) -> Result<Self> {
        SeasonLabel::parse(s)
    }
}

impl TryFrom<String> for SeasonLabel {
    type Error = HoopsError;

    fn try_from(value: String) -> Result<Self> {
        SeasonLabel::parse(&value)
    }
}

impl From<SeasonLabel> for String {
    fn from(label: SeasonLabel) -> Self {
        label.0
    }
}
