//! Data ingestion
//!
//! Reading season exports, naming them, and checking their column layout.

pub mod schema;
pub mod season;
pub mod table;

pub use schema::{TableKind, TableSchema};
pub use season::SeasonLabel;
pub use table::{read_table, RawRow, SeasonTable};
