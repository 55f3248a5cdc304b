//! The season comparison report
//!
//! Three seasons: 2018-19 with age, pace and three-point attempts, and
//! 1999-00 / 1979-80 with three-point attempts only. Charts compare age,
//! pace, win rate and three-point volume, and a bar chart shows average win
//! rate per age bracket.

use crate::charts::{save_chart, BarChart, Chart, ScatterChart, ScatterSeries};
use crate::data::schema::{advanced, per_game};
use crate::data::season::SeasonLabel;
use crate::features::age_brackets::{group_by_age, summarize_groups, BracketField, BracketSummary};
use crate::features::rounding::format_float;
use crate::features::season::{SeasonLoader, SeasonRequest};
use crate::features::team_index::TeamFeatureMap;
use crate::{Config, Result};
use std::path::PathBuf;

/// Positions in the 2018-19 vectors: `[win %, age, pace, 3PA]`
pub mod modern {
    pub const WIN_RATE: usize = 0;
    pub const AGE: usize = 1;
    pub const PACE: usize = 2;
    pub const THREE_POINT_ATTEMPTS: usize = 3;
}

/// Positions in the older seasons' vectors: `[win %, 3PA]`
pub mod historical {
    pub const WIN_RATE: usize = 0;
    pub const THREE_POINT_ATTEMPTS: usize = 1;
}

pub const MODERN_SEASON: &str = "2018-19";
pub const HISTORICAL_SEASONS: [&str; 2] = ["1999-00", "1979-80"];

/// Team whose 2018-19 vector is printed at the end of the report
pub const SPOTLIGHT_TEAM: &str = "Philadelphia 76ers";

const WIN_TITLE: &str = "Winning Percentage (%)";
const THREE_TITLE: &str = "Number 3 Pt. Attempts";

/// Everything the report produced
#[derive(Debug)]
pub struct ReportOutput {
    /// Seasons in report order, modern first
    pub seasons: Vec<(SeasonLabel, TeamFeatureMap)>,
    pub brackets: BracketSummary,
    pub charts: Vec<PathBuf>,
}

impl ReportOutput {
    pub fn season(&self, label: &str) -> Option<&TeamFeatureMap> {
        self.seasons
            .iter()
            .find(|(s, _)| s.as_str() == label)
            .map(|(_, map)| map)
    }

    /// The spotlight team's 2018-19 features
    pub fn spotlight(&self) -> Option<&[f64]> {
        self.season(MODERN_SEASON)?.get(SPOTLIGHT_TEAM)
    }
}

pub fn modern_request() -> Result<SeasonRequest> {
    Ok(SeasonRequest::new(SeasonLabel::parse(MODERN_SEASON)?)
        .with_advanced(&[advanced::AGE, advanced::PACE])
        .with_per_game(&[per_game::THREE_POINT_ATTEMPTS])
        .with_win_rate(true))
}

pub fn historical_request(season: &str) -> Result<SeasonRequest> {
    Ok(SeasonRequest::new(SeasonLabel::parse(season)?)
        .with_per_game(&[per_game::THREE_POINT_ATTEMPTS])
        .with_win_rate(true))
}

/// Average win rate per age bracket
pub fn win_rate_by_age(map: &TeamFeatureMap, config: &Config) -> Result<BracketSummary> {
    let groups = group_by_age(map, modern::WIN_RATE, modern::AGE, &config.brackets)?;
    summarize_groups(&groups, BracketField::Value)
}

/// The report's charts with the file stem each is saved under
pub fn build_charts(
    modern_map: &TeamFeatureMap,
    historical_maps: &[(SeasonLabel, TeamFeatureMap)],
    brackets: &BracketSummary,
) -> Result<Vec<(&'static str, Box<dyn Chart>)>> {
    let season = MODERN_SEASON;
    let mut charts: Vec<(&'static str, Box<dyn Chart>)> = Vec::new();

    charts.push((
        "age_vs_pace",
        Box::new(
            ScatterChart::new(
                &format!("How Average Age Correlates to Pace ({} Season)", season),
                "Average Age",
                "Pace",
            )
            .with_series(ScatterSeries::from_features(
                modern_map,
                modern::AGE,
                modern::PACE,
                "darkgreen",
                None,
            )?),
        ),
    ));

    charts.push((
        "pace_vs_win_rate",
        Box::new(
            ScatterChart::new(
                &format!("How Pace Correlates to Winning Percentage ({} Season)", season),
                "Pace",
                WIN_TITLE,
            )
            .with_series(ScatterSeries::from_features(
                modern_map,
                modern::PACE,
                modern::WIN_RATE,
                "deeppink",
                None,
            )?),
        ),
    ));

    charts.push((
        "age_vs_win_rate",
        Box::new(
            ScatterChart::new(
                &format!("How Age Correlates to Winning Percentage ({} Season)", season),
                "Average Age",
                WIN_TITLE,
            )
            .with_series(ScatterSeries::from_features(
                modern_map,
                modern::AGE,
                modern::WIN_RATE,
                "#ff6362",
                None,
            )?),
        ),
    ));

    let mut three_point = ScatterChart::new(
        "How 3 Pt Attempts Correlate to Winning Percentage Over Time",
        WIN_TITLE,
        THREE_TITLE,
    )
    .with_series(ScatterSeries::from_features(
        modern_map,
        modern::WIN_RATE,
        modern::THREE_POINT_ATTEMPTS,
        "mediumseagreen",
        Some(season),
    )?);
    for ((label, map), color) in historical_maps.iter().zip(["gold", "lightcoral"]) {
        three_point = three_point.with_series(ScatterSeries::from_features(
            map,
            historical::WIN_RATE,
            historical::THREE_POINT_ATTEMPTS,
            color,
            Some(label.as_str()),
        )?);
    }
    charts.push(("three_point_attempts_over_time", Box::new(three_point)));

    charts.push((
        "win_rate_by_age",
        Box::new(BarChart::from_summary(
            brackets,
            &format!("Average Age and Winning Percentage ({} Season)", season),
            "Average Age",
            WIN_TITLE,
            "#ff6362",
        )),
    ));

    Ok(charts)
}

/// Assemble every season, bracket 2018-19 by age, and write the charts to
/// `config.data.output_dir`
pub fn run(config: &Config) -> Result<ReportOutput> {
    let loader = SeasonLoader::from_config(config);

    let modern_request = modern_request()?;
    let modern_map = loader.assemble_season(&modern_request)?;

    let mut historical_maps = Vec::new();
    for season in HISTORICAL_SEASONS {
        let request = historical_request(season)?;
        let map = loader.assemble_season(&request)?;
        historical_maps.push((request.season, map));
    }

    let brackets = win_rate_by_age(&modern_map, config)?;

    let mut paths = Vec::new();
    for (stem, chart) in build_charts(&modern_map, &historical_maps, &brackets)? {
        paths.push(save_chart(
            &*chart,
            &config.data.output_dir,
            stem,
            &config.charts,
        )?);
    }

    let mut seasons = vec![(modern_request.season, modern_map)];
    seasons.extend(historical_maps);

    Ok(ReportOutput {
        seasons,
        brackets,
        charts: paths,
    })
}

/// Aligned text table of a season's map, one team per line
pub fn format_feature_map(map: &TeamFeatureMap) -> String {
    let name_width = map
        .teams()
        .map(|t| t.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = format!("{:<width$}", "Team", width = name_width);
    for column in map.columns() {
        out.push_str(&format!(" {:>8}", column.label));
    }
    out.push('\n');

    for team in map.iter() {
        out.push_str(&format!("{:<width$}", team.team, width = name_width));
        for value in &team.features {
            out.push_str(&format!(" {:>8}", format_float(*value)));
        }
        out.push('\n');
    }
    out
}

/// Bracket labels and averages, one bracket per line
pub fn format_brackets(summary: &BracketSummary) -> String {
    summary
        .iter()
        .map(|(label, average)| format!("{:<14} {:>8}\n", label, format_float(average)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn bundled_config(output: &Path) -> Config {
        let mut config = Config::default();
        config.data.data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        config.data.output_dir = output.to_path_buf();
        config
    }

    #[test]
    fn test_requests_match_vector_layout() {
        let modern = modern_request().unwrap();
        assert_eq!(modern.width(), 4);
        assert_eq!(modern.advanced_columns, [2, 13]);
        assert_eq!(modern.per_game_columns, [8]);

        let old = historical_request("1979-80").unwrap();
        assert_eq!(old.width(), 2);
        assert!(old.advanced_columns.is_empty());
    }

    #[test]
    fn test_full_report_on_bundled_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = bundled_config(dir.path());
        let output = run(&config).unwrap();

        let labels: Vec<_> = output.seasons.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(labels, ["2018-19", "1999-00", "1979-80"]);
        assert_eq!(output.season("2018-19").unwrap().len(), 30);
        assert_eq!(output.season("1999-00").unwrap().len(), 29);
        assert_eq!(output.season("1979-80").unwrap().len(), 22);
        assert_eq!(output.season("1979-80").unwrap().width(), 2);

        assert_eq!(output.charts.len(), 5);
        assert!(output.charts.iter().all(|p| p.exists()));

        assert_eq!(output.brackets.len(), 5);
        let spotlight = output.spotlight().unwrap();
        assert_eq!(spotlight[modern::WIN_RATE], 62.2);
        assert_eq!(spotlight[modern::AGE], 26.3);
        assert_eq!(spotlight[modern::PACE], 101.6);
        assert_eq!(spotlight[modern::THREE_POINT_ATTEMPTS], 30.2);
    }

    #[test]
    fn test_brackets_on_bundled_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = bundled_config(dir.path());
        let map = SeasonLoader::from_config(&config)
            .assemble_season(&modern_request().unwrap())
            .unwrap();
        let summary = win_rate_by_age(&map, &config).unwrap();

        assert_eq!(summary.labels.first().map(String::as_str), Some("24.0 - 25.1"));
        assert_eq!(summary.labels.last().map(String::as_str), Some("27.3 - 29.2"));
        // youngest six: Suns, Knicks, Bulls, Nuggets, Kings, Hawks
        let youngest = [23.2, 20.7, 26.8, 65.9, 47.6, 35.4];
        let mean = youngest.iter().sum::<f64>() / 6.0;
        assert!((summary.averages[0] - mean).abs() <= 0.005);
    }

    #[test]
    fn test_missing_historical_season_aborts_report() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        for name in ["2018-19 Advanced Data.txt", "2018-19 Per Game Data.txt"] {
            std::fs::copy(bundled.join(name), data.path().join(name)).unwrap();
        }

        let mut config = Config::default();
        config.data.data_dir = data.path().to_path_buf();
        config.data.output_dir = out.path().join("charts");
        assert!(run(&config).is_err());
        assert!(!out.path().join("charts").exists());
    }

    #[test]
    fn test_format_feature_map() {
        let dir = tempfile::tempdir().unwrap();
        let config = bundled_config(dir.path());
        let map = SeasonLoader::from_config(&config)
            .assemble_season(&historical_request("1979-80").unwrap())
            .unwrap();
        let text = format_feature_map(&map);

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Team"));
        assert!(header.contains("Win %") && header.contains("3PA"));
        assert_eq!(text.lines().count(), 23);
        assert!(text.contains("Boston Celtics"));
    }

    #[test]
    fn test_format_brackets() {
        let summary = BracketSummary {
            labels: vec!["24.0 - 25.1".into()],
            averages: vec![36.4],
        };
        assert_eq!(format_brackets(&summary), "24.0 - 25.1        36.4\n");
    }
}
