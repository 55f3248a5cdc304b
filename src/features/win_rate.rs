//! Win percentage

use crate::features::rounding::round_to;
use crate::{HoopsError, Result};

/// `wins / (wins + losses)` as a percentage rounded to one decimal
pub fn win_rate(wins: f64, losses: f64) -> Result<f64> {
    if !wins.is_finite() || !losses.is_finite() || wins < 0.0 || losses < 0.0 {
        return Err(HoopsError::InvalidInput(format!(
            "record {}-{} is not a valid win/loss count",
            wins, losses
        )));
    }

    let games = wins + losses;
    if games == 0.0 {
        return Err(HoopsError::InvalidInput(
            "win rate undefined with no games played".to_string(),
        ));
    }

    Ok(round_to(wins / games * 100.0, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(41.0, 41.0).unwrap(), 50.0);
        assert_eq!(win_rate(1.0, 2.0).unwrap(), 33.3);
        assert_eq!(win_rate(51.0, 31.0).unwrap(), 62.2);
        // undefeated record; only 0-0 has no rate
        assert_eq!(win_rate(10.0, 0.0).unwrap(), 100.0);
        assert_eq!(win_rate(0.0, 82.0).unwrap(), 0.0);
    }

    #[test]
    fn test_no_games_is_invalid() {
        assert!(matches!(win_rate(0.0, 0.0), Err(HoopsError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_or_nan_is_invalid() {
        assert!(matches!(win_rate(-1.0, 5.0), Err(HoopsError::InvalidInput(_))));
        assert!(matches!(win_rate(f64::NAN, 5.0), Err(HoopsError::InvalidInput(_))));
    }
}
