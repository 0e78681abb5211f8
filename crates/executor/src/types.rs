use serde::Deserialize;
use tracing::debug;

use super::error::Error;

/// A trait defining the contract for any source of season results.
///
/// This decouples the pipeline from where the games come from (a CSV file,
/// a simulated season, ...).
pub trait ResultSource {
    fn load(&self) -> Result<Vec<SeasonRecord>, Error>;
}

/// One game of a season.
///
/// The outcome is taken from `winner`/`loser` when both are present, and
/// otherwise worked out from `home`/`away` and their scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeasonRecord {
    pub week: u32,

    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub loser: Option<String>,

    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl SeasonRecord {
    #[cfg(test)]
    pub fn decided(week: u32, winner: &str, loser: &str) -> Self {
        SeasonRecord {
            week,
            winner: Some(winner.to_string()),
            loser: Some(loser.to_string()),
            ..Default::default()
        }
    }

    pub fn scored(week: u32, home: &str, away: &str, home_score: u32, away_score: u32) -> Self {
        SeasonRecord {
            week,
            home: Some(home.to_string()),
            away: Some(away.to_string()),
            home_score: Some(home_score),
            away_score: Some(away_score),
            ..Default::default()
        }
    }

    /// Resolves the game to a `(winner, loser)` pair.
    ///
    /// Returns `Ok(None)` for a tied game. `index` is only used for error
    /// reporting.
    pub fn outcome(&self, index: usize) -> Result<Option<(String, String)>, Error> {
        if let (Some(winner), Some(loser)) = (present(&self.winner), present(&self.loser)) {
            return Ok(Some((winner.to_string(), loser.to_string())));
        }

        match (
            present(&self.home),
            present(&self.away),
            self.home_score,
            self.away_score,
        ) {
            (Some(home), Some(away), Some(home_score), Some(away_score)) => {
                if home_score > away_score {
                    Ok(Some((home.to_string(), away.to_string())))
                } else if away_score > home_score {
                    Ok(Some((away.to_string(), home.to_string())))
                } else {
                    Ok(None)
                }
            }
            _ => Err(Error::InvalidRecord {
                index,
                reason: "expected winner and loser, or home and away with both scores".into(),
            }),
        }
    }
}

/// Keeps the games played up to and including `through_week`.
pub fn filter_through_week(records: Vec<SeasonRecord>, through_week: Option<u32>) -> Vec<SeasonRecord> {
    match through_week {
        Some(week) => records.into_iter().filter(|r| r.week <= week).collect(),
        None => records,
    }
}

/// Projects records onto `(winner, loser)` pairs, dropping tied games.
///
/// Fails on the first record that cannot be resolved.
pub fn match_results(records: &[SeasonRecord]) -> Result<Vec<(String, String)>, Error> {
    let mut results = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match record.outcome(index)? {
            Some(pair) => results.push(pair),
            None => debug!(index, week = record.week, "Tied game contributes no edge"),
        }
    }

    Ok(results)
}
