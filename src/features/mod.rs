//! Feature extraction
//!
//! Turns the raw season tables into per-team feature vectors and age
//! bracket summaries.

pub mod age_brackets;
pub mod rounding;
pub mod season;
pub mod team_index;
pub mod win_rate;

pub use age_brackets::{group_by_age, summarize_groups, AgeBracket, BracketConfig, BracketSummary};
pub use season::{SeasonLoader, SeasonRequest};
pub use team_index::{FeatureColumn, TeamFeatureMap, TeamIndex};
pub use win_rate::win_rate;
