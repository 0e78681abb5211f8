use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{ResultSource, SeasonRecord};

/// Produces a synthetic single round-robin season.
///
/// Teams are named `T01`, `T02`, ... and ranked by that order: the
/// lower-numbered team wins each game unless an upset is drawn with
/// probability `upset_probability`. Games carry home/away scores, never
/// tied. With a fixed seed the season is reproducible.
pub struct SimulatedSeason {
    pub teams: usize,
    pub seed: Option<u64>,
    pub upset_probability: f64,
}

impl SimulatedSeason {
    pub fn new(config: &SimulatorConfig) -> Self {
        let upset_probability = if config.upset_probability.is_nan() {
            0.0
        } else {
            config.upset_probability.clamp(0.0, 1.0)
        };

        SimulatedSeason {
            teams: config.teams,
            seed: config.seed,
            upset_probability,
        }
    }

    fn team_names(&self) -> Vec<String> {
        let width = self.teams.to_string().len().max(2);
        (1..=self.teams)
            .map(|i| format!("T{:0width$}", i, width = width))
            .collect()
    }

    fn generate(&self) -> Vec<SeasonRecord> {
        let mut rng: SmallRng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let names = self.team_names();
        let mut records = Vec::new();

        for (round, pairings) in round_robin(self.teams).into_iter().enumerate() {
            let week = round as u32 + 1;
            for (home, away) in pairings {
                let favourite_is_home = home < away;
                let home_wins = favourite_is_home != rng.random_bool(self.upset_probability);

                let losing_score = rng.random_range(0..=30);
                let winning_score = losing_score + rng.random_range(1..=14);
                let (home_score, away_score) = if home_wins {
                    (winning_score, losing_score)
                } else {
                    (losing_score, winning_score)
                };

                records.push(SeasonRecord::scored(
                    week,
                    &names[home],
                    &names[away],
                    home_score,
                    away_score,
                ));
            }
        }

        records
    }
}

impl ResultSource for SimulatedSeason {
    fn load(&self) -> Result<Vec<SeasonRecord>, Error> {
        let records = self.generate();

        info!(
            teams = self.teams,
            games = records.len(),
            seed = ?self.seed,
            "Simulated round-robin season"
        );
        Ok(records)
    }
}

/// Circle-method schedule: every pair of teams meets exactly once.
///
/// Returns one list of pairings per round. With an odd number of teams a
/// phantom team is added and its games become byes.
fn round_robin(teams: usize) -> Vec<Vec<(usize, usize)>> {
    if teams < 2 {
        return Vec::new();
    }

    let slots = teams + teams % 2;
    let pivot = slots - 1;
    let mut rounds = Vec::with_capacity(pivot);

    for round in 0..pivot {
        let mut pairings = Vec::with_capacity(slots / 2);
        pairings.push((round, pivot));
        for i in 1..slots / 2 {
            let a = (round + i) % pivot;
            let b = (round + pivot - i) % pivot;
            pairings.push((a, b));
        }
        pairings.retain(|&(a, b)| a < teams && b < teams);
        rounds.push(pairings);
    }

    rounds
}
