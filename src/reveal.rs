//! Reveal animation: a timed random "spin" of the spotlight before a pick is committed.

use crate::config::RevealTiming;
use crate::models::{DrawError, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Picks a team from a pool while moving the spotlight around it.
///
/// The animator never mutates the pool; removing the pick is the caller's job.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealAnimator {
    timing: RevealTiming,
}

impl RevealAnimator {
    pub fn new(timing: RevealTiming) -> Self {
        Self { timing }
    }

    /// Pick one team from `pool`, calling `spotlight` for every highlighted team.
    ///
    /// 1. Empty pool: `DrawError::EmptyPool`.
    /// 2. Single team: spotlight it, hold `solo_hold`, return it.
    /// 3. Otherwise spin for a random duration in `[spin_min, spin_max)`: every `tick`
    ///    spotlight a random member until the elapsed ticks reach the duration. Then pick
    ///    a final random member, spotlight it, hold `settle`, and return it.
    pub async fn pick<F>(&self, pool: &[Team], mut spotlight: F) -> Result<Team, DrawError>
    where
        F: FnMut(&Team),
    {
        match pool {
            [] => return Err(DrawError::EmptyPool),
            [only] => {
                spotlight(only);
                sleep(self.timing.solo_hold).await;
                return Ok(only.clone());
            }
            _ => {}
        }

        let duration = spin_duration(&self.timing);
        let tick = self.timing.tick.max(Duration::from_millis(1));
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            sleep(tick).await;
            elapsed += tick;
            spotlight(&random_member(pool)?);
        }

        let picked = random_member(pool)?;
        spotlight(&picked);
        sleep(self.timing.settle).await;
        Ok(picked)
    }
}

fn random_member(pool: &[Team]) -> Result<Team, DrawError> {
    pool.choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(DrawError::EmptyPool)
}

fn spin_duration(timing: &RevealTiming) -> Duration {
    let min = timing.spin_min.as_millis() as u64;
    let max = timing.spin_max.as_millis() as u64;
    if max <= min {
        return timing.spin_min;
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..max))
}
