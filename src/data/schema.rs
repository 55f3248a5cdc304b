//! Column layout of the two export kinds
//!
//! Positions are fixed by the data provider's table layout. Each schema names
//! the positions the program reads and checks them against the header row
//! when a file is loaded, so a reordered export fails instead of feeding the
//! wrong statistic downstream.

use crate::data::table::SeasonTable;
use crate::{HoopsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column the program depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColumn {
    pub index: usize,
    /// Header text expected at `index`
    pub label: &'static str,
}

/// Advanced team table (`Rk,Team,Age,W,L,PW,PL,MOV,SOS,SRS,ORtg,DRtg,NRtg,Pace,...`)
pub mod advanced {
    use super::NamedColumn;

    pub const TEAM: usize = 1;
    pub const AGE: usize = 2;
    pub const WINS: usize = 3;
    pub const LOSSES: usize = 4;
    pub const PACE: usize = 13;

    pub const COLUMNS: &[NamedColumn] = &[
        NamedColumn { index: TEAM, label: "Team" },
        NamedColumn { index: AGE, label: "Age" },
        NamedColumn { index: WINS, label: "W" },
        NamedColumn { index: LOSSES, label: "L" },
        NamedColumn { index: PACE, label: "Pace" },
    ];
}

/// Per-game team table (`Rk,Team,G,MP,FG,FGA,FG%,3P,3PA,...`)
pub mod per_game {
    use super::NamedColumn;

    pub const TEAM: usize = 1;
    pub const THREE_POINT_ATTEMPTS: usize = 8;

    pub const COLUMNS: &[NamedColumn] = &[
        NamedColumn { index: TEAM, label: "Team" },
        NamedColumn {
            index: THREE_POINT_ATTEMPTS,
            label: "3PA",
        },
    ];
}

/// Which export a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    PerGame,
    Advanced,
}

impl TableKind {
    /// File name suffix following the season label
    pub fn file_suffix(&self) -> &'static str {
        match self {
            TableKind::PerGame => "Per Game Data.txt",
            TableKind::Advanced => "Advanced Data.txt",
        }
    }

    pub fn schema(&self) -> TableSchema {
        match self {
            TableKind::PerGame => TableSchema {
                kind: *self,
                columns: per_game::COLUMNS,
            },
            TableKind::Advanced => TableSchema {
                kind: *self,
                columns: advanced::COLUMNS,
            },
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::PerGame => write!(f, "per-game"),
            TableKind::Advanced => write!(f, "advanced"),
        }
    }
}

/// Named columns of one export kind
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub kind: TableKind,
    pub columns: &'static [NamedColumn],
}

impl TableSchema {
    /// Check header labels for the named columns, then that every row is wide
    /// enough for the named columns and for `requested`.
    pub fn validate(&self, table: &SeasonTable, requested: &[usize]) -> Result<()> {
        for column in self.columns {
            let found = table.header(column.index).unwrap_or("");
            if !found.eq_ignore_ascii_case(column.label) {
                return Err(HoopsError::Schema {
                    path: table.path().to_path_buf(),
                    column: column.index,
                    expected: column.label.to_string(),
                    found: found.to_string(),
                });
            }
        }

        let Some(last) = self
            .columns
            .iter()
            .map(|c| c.index)
            .chain(requested.iter().copied())
            .max()
        else {
            return Ok(());
        };

        if let Some(row) = table.rows().iter().find(|row| row.len() <= last) {
            return Err(HoopsError::Format {
                path: table.path().to_path_buf(),
                line: row.line,
                column: last,
                width: row.len(),
            });
        }

        Ok(())
    }

    pub fn label(&self, index: usize) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|c| c.index == index)
            .map(|c| c.label)
    }
}
