//! Season assembly
//!
//! Loads one season's per-game and advanced exports and joins the requested
//! columns into a [`TeamFeatureMap`].
//!
//! Feature vector order is `[win %?] ++ advanced_columns ++ per_game_columns`,
//! each list in the order given. Charts and brackets index vectors by
//! position, so this order is part of the interface.

use crate::data::schema::{advanced, TableKind};
use crate::data::season::SeasonLabel;
use crate::data::table::{read_table, SeasonTable};
use crate::features::team_index::{TeamFeatureMap, TeamIndex};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which statistics to collect for a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRequest {
    pub season: SeasonLabel,
    /// Advanced table columns, appended after the win rate
    pub advanced_columns: Vec<usize>,
    /// Per-game table columns, appended last
    pub per_game_columns: Vec<usize>,
    pub include_win_rate: bool,
}

impl SeasonRequest {
    pub fn new(season: SeasonLabel) -> Self {
        SeasonRequest {
            season,
            advanced_columns: Vec::new(),
            per_game_columns: Vec::new(),
            include_win_rate: false,
        }
    }

    pub fn with_advanced(mut self, columns: &[usize]) -> Self {
        self.advanced_columns = columns.to_vec();
        self
    }

    pub fn with_per_game(mut self, columns: &[usize]) -> Self {
        self.per_game_columns = columns.to_vec();
        self
    }

    pub fn with_win_rate(mut self, include: bool) -> Self {
        self.include_win_rate = include;
        self
    }

    /// Length of the vectors this request produces
    pub fn width(&self) -> usize {
        usize::from(self.include_win_rate) + self.advanced_columns.len() + self.per_game_columns.len()
    }
}

/// Reads season exports from a data directory
#[derive(Debug, Clone)]
pub struct SeasonLoader {
    data_dir: PathBuf,
}

impl SeasonLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        SeasonLoader {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data.data_dir.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read, validate against the kind's schema, and normalize team names
    pub fn load_table(
        &self,
        season: &SeasonLabel,
        kind: TableKind,
        requested: &[usize],
    ) -> Result<SeasonTable> {
        let path = season.path_in(&self.data_dir, kind);
        let mut table = read_table(&path)?;
        kind.schema().validate(&table, requested)?;
        table.normalize_names();
        log::debug!("Loaded {} {} rows for {}", table.len(), kind, season);
        Ok(table)
    }

    /// Build the feature map for one season. Each call reads its own files
    /// and shares nothing with earlier calls.
    pub fn assemble_season(&self, request: &SeasonRequest) -> Result<TeamFeatureMap> {
        let season = &request.season;
        log::info!("Assembling {} ({} features per team)", season, request.width());

        let advanced_table =
            self.load_table(season, TableKind::Advanced, &request.advanced_columns)?;
        let per_game_table =
            self.load_table(season, TableKind::PerGame, &request.per_game_columns)?;

        let mut index = TeamIndex::seed(&per_game_table)?;

        if request.include_win_rate {
            index.join_win_rate(&advanced_table, advanced::WINS, advanced::LOSSES)?;
        }
        for &column in &request.advanced_columns {
            index.join_column(&advanced_table, column)?;
        }
        for &column in &request.per_game_columns {
            index.join_column(&per_game_table, column)?;
        }

        let map = index.build()?;
        log::info!("{}: {} teams", season, map.len());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::per_game;
    use crate::HoopsError;
    use std::fs;

    const ADVANCED: &str = "\
Rk,Team,Age,W,L,PW,PL,MOV,SOS,SRS,ORtg,DRtg,NRtg,Pace,FTr
1,Milwaukee Bucks*,26.9,60,22,61,21,8.87,-0.82,8.04,114.5,104.9,9.6,103.3,0.255
2,Golden State Warriors*,28.4,57,25,56,26,6.46,-0.04,6.42,115.9,109.5,6.4,100.9,0.227
3,Chicago Bulls,24.4,22,60,19,63,-8.41,0.41,-8.00,104.8,113.2,-8.4,100.5,0.230
";

    const PER_GAME: &str = "\
Rk,Team,G,MP,FG,FGA,FG%,3P,3PA,3P%
1,Milwaukee Bucks*,82,241.2,43.4,91.1,0.476,13.5,38.2,0.353
2,Chicago Bulls,82,242.7,39.8,87.9,0.453,9.1,25.9,0.351
3,Golden State Warriors*,82,241.5,44.0,89.8,0.491,13.3,34.4,0.385
";

    fn write_season(dir: &Path, label: &str, advanced: &str, per_game: &str) {
        fs::write(dir.join(format!("{} Advanced Data.txt", label)), advanced).unwrap();
        fs::write(dir.join(format!("{} Per Game Data.txt", label)), per_game).unwrap();
    }

    fn label(s: &str) -> SeasonLabel {
        SeasonLabel::parse(s).unwrap()
    }

    #[test]
    fn test_feature_order_contract() {
        let dir = tempfile::tempdir().unwrap();
        write_season(dir.path(), "2018-19", ADVANCED, PER_GAME);

        let request = SeasonRequest::new(label("2018-19"))
            .with_advanced(&[advanced::AGE, advanced::PACE])
            .with_per_game(&[per_game::THREE_POINT_ATTEMPTS])
            .with_win_rate(true);
        let map = SeasonLoader::new(dir.path())
            .assemble_season(&request)
            .unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.width(), 4);
        // [win %, col 2, col 13, col 8]
        assert_eq!(map.get("Milwaukee Bucks"), Some(&[73.2, 26.9, 103.3, 38.2][..]));
        assert_eq!(map.get("Chicago Bulls"), Some(&[26.8, 24.4, 100.5, 25.9][..]));
        let labels: Vec<_> = map.columns().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Win %", "Age", "Pace", "3PA"]);
    }

    #[test]
    fn test_keys_follow_per_game_order_without_markers() {
        let dir = tempfile::tempdir().unwrap();
        write_season(dir.path(), "2018-19", ADVANCED, PER_GAME);

        let request = SeasonRequest::new(label("2018-19")).with_win_rate(true);
        let map = SeasonLoader::new(dir.path())
            .assemble_season(&request)
            .unwrap();

        let teams: Vec<_> = map.teams().collect();
        assert_eq!(
            teams,
            ["Milwaukee Bucks", "Chicago Bulls", "Golden State Warriors"]
        );
        assert_eq!(map.get("Golden State Warriors"), Some(&[69.5][..]));
    }

    #[test]
    fn test_without_win_rate() {
        let dir = tempfile::tempdir().unwrap();
        write_season(dir.path(), "1999-00", ADVANCED, PER_GAME);

        let request = SeasonRequest::new(label("1999-00"))
            .with_per_game(&[per_game::THREE_POINT_ATTEMPTS, 9]);
        let map = SeasonLoader::new(dir.path())
            .assemble_season(&request)
            .unwrap();
        assert_eq!(map.get("Chicago Bulls"), Some(&[25.9, 0.351][..]));
    }

    #[test]
    fn test_missing_season_files() {
        let dir = tempfile::tempdir().unwrap();
        let request = SeasonRequest::new(label("1979-80")).with_win_rate(true);
        let err = SeasonLoader::new(dir.path())
            .assemble_season(&request)
            .unwrap_err();
        match err {
            HoopsError::Read { path, .. } => {
                assert!(path.ends_with("1979-80 Advanced Data.txt"))
            }
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_advanced_team_not_in_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let extra = format!("{}4,Seattle SuperSonics,28.3,45,37,44,38,1.2,0.1,1.3,108.0,106.8,1.2,93.2,0.300\n", ADVANCED);
        write_season(dir.path(), "2018-19", &extra, PER_GAME);

        let request = SeasonRequest::new(label("2018-19")).with_win_rate(true);
        let err = SeasonLoader::new(dir.path())
            .assemble_season(&request)
            .unwrap_err();
        assert!(matches!(err, HoopsError::UnknownTeam(name) if name == "Seattle SuperSonics"));
    }

    #[test]
    fn test_requested_column_wider_than_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_season(dir.path(), "2018-19", ADVANCED, PER_GAME);

        let request = SeasonRequest::new(label("2018-19")).with_advanced(&[20]);
        let err = SeasonLoader::new(dir.path())
            .assemble_season(&request)
            .unwrap_err();
        assert!(matches!(err, HoopsError::Format { column: 20, .. }));
    }

    #[test]
    fn test_seasons_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        write_season(dir.path(), "2018-19", ADVANCED, PER_GAME);
        write_season(dir.path(), "1999-00", ADVANCED, PER_GAME);

        let loader = SeasonLoader::new(dir.path());
        let first = loader
            .assemble_season(&SeasonRequest::new(label("2018-19")).with_win_rate(true))
            .unwrap();
        let second = loader
            .assemble_season(
                &SeasonRequest::new(label("1999-00"))
                    .with_win_rate(true)
                    .with_per_game(&[per_game::THREE_POINT_ATTEMPTS]),
            )
            .unwrap();

        assert_eq!(first.width(), 1);
        assert_eq!(second.width(), 2);
        assert_eq!(first.get("Chicago Bulls"), Some(&[26.8][..]));
    }

    #[test]
    fn test_bundled_2018_19_philadelphia() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let season = label("2018-19");
        let loader = SeasonLoader::new(&data_dir);

        let request = SeasonRequest::new(season.clone())
            .with_advanced(&[advanced::AGE, advanced::PACE])
            .with_per_game(&[per_game::THREE_POINT_ATTEMPTS])
            .with_win_rate(true);
        let map = loader.assemble_season(&request).unwrap();
        assert_eq!(map.len(), 30);

        let advanced_table = loader
            .load_table(&season, TableKind::Advanced, &[])
            .unwrap();
        let row = advanced_table
            .rows()
            .iter()
            .find(|r| r.get(1) == Some("Philadelphia 76ers"))
            .unwrap();
        let wins = advanced_table.number(row, advanced::WINS).unwrap();
        let losses = advanced_table.number(row, advanced::LOSSES).unwrap();
        let expected = (wins / (wins + losses) * 1000.0).round() / 10.0;

        let sixers = map.get("Philadelphia 76ers").unwrap();
        assert_eq!(sixers.len(), 4);
        assert_eq!(sixers[0], expected);
        assert_eq!(sixers[0], 62.2);
    }
}
