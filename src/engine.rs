//! Draw engine: owns the observable draw state and runs draw cycles.
//!
//! State lives in a `watch` channel, so every mutation is visible to subscribers as soon
//! as it happens. Mutations are applied synchronously between the suspension points of
//! a cycle (reveal ticks and the pause between groups).

use crate::config::DrawTiming;
use crate::logic;
use crate::models::{DrawCycleId, DrawError, DrawState, GroupLabel, SlotPosition, Team, TeamId};
use crate::reveal::RevealAnimator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

/// Result of a `confirm_seeds` call that did not fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfirmOutcome {
    /// Preconditions not met (not exactly 4 seeds, wrong phase, or already drawing); nothing changed.
    Rejected,
    /// All three rounds ran; every slot is filled.
    Completed,
}

/// Handle to the draw engine. Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct DrawEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    state: watch::Sender<DrawState>,
    animator: RevealAnimator,
    timing: DrawTiming,
}

impl DrawEngine {
    /// Engine with no roster loaded yet.
    pub fn new(timing: DrawTiming) -> Self {
        Self::with_state(DrawState::new(), timing)
    }

    /// Engine starting from an existing state.
    pub fn with_state(state: DrawState, timing: DrawTiming) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(EngineInner {
                state: tx,
                animator: RevealAnimator::new(timing.reveal),
                timing,
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> DrawState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<DrawState> {
        self.inner.state.subscribe()
    }

    /// Install a freshly loaded roster and reset the draw. Rejected while drawing.
    pub fn load_roster(&self, teams: Vec<Team>) -> bool {
        let count = teams.len();
        let loaded = self
            .inner
            .state
            .send_if_modified(|s| logic::replace_roster(s, teams));
        if loaded {
            log::info!("Roster installed with {} teams", count);
        } else {
            log::warn!("Roster not replaced: a draw is in progress");
        }
        loaded
    }

    /// Record a failed roster load; the operator can retry.
    pub fn roster_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Roster load failed: {}", reason);
        self.inner
            .state
            .send_modify(|s| logic::mark_roster_failed(s, reason));
    }

    /// Toggle a seed (saturating at 4). Returns true if the selection changed.
    pub fn toggle_seed(&self, team_id: TeamId) -> bool {
        self.inner
            .state
            .send_if_modified(|s| logic::toggle_seed(s, team_id))
    }

    /// Back to SeedSelection with everything cleared. Returns false while drawing.
    pub fn reset_draw(&self) -> bool {
        let reset = self.inner.state.send_if_modified(logic::reset_draw);
        if reset {
            log::info!("Draw reset");
        }
        reset
    }

    /// Run a full draw cycle: seed round, then slot 2 and slot 3 for every group.
    ///
    /// Returns `Ok(Rejected)` without touching the state unless exactly four seeds are
    /// selected in SeedSelection and no draw is running. Otherwise behaves like
    /// [`DrawEngine::begin_cycle`] followed by [`DrawEngine::run_cycle`].
    pub async fn confirm_seeds(&self) -> Result<ConfirmOutcome, DrawError> {
        match self.begin_cycle() {
            Some(cycle_id) => self.run_cycle(cycle_id).await,
            None => Ok(ConfirmOutcome::Rejected),
        }
    }

    /// Claim the drawing guard and enter SeedDraw, without drawing anything yet.
    ///
    /// Returns None (state untouched) unless the seeds are ready and no draw is running.
    /// Only one caller can win the guard, so a second concurrent start gets None.
    pub fn begin_cycle(&self) -> Option<DrawCycleId> {
        let mut started = None;
        self.inner.state.send_if_modified(|s| {
            started = logic::begin_draw(s);
            started.is_some()
        });
        match started {
            Some(cycle_id) => log::info!("Draw cycle {} started", cycle_id),
            None => log::debug!("Confirm rejected: seeds not ready or draw in progress"),
        }
        started
    }

    /// Draw the rounds of a cycle started by [`DrawEngine::begin_cycle`].
    ///
    /// Returns `Ok(Rejected)` if `cycle_id` is not the running cycle. On failure the
    /// cycle stops at the failing group, the status shows the error, and the phase and
    /// already filled slots are left as they are. Either way the drawing guard is
    /// released and the spotlight is cleared after a short delay.
    pub async fn run_cycle(&self, cycle_id: DrawCycleId) -> Result<ConfirmOutcome, DrawError> {
        let running = {
            let s = self.inner.state.borrow();
            s.drawing && s.cycle_id == Some(cycle_id)
        };
        if !running {
            return Ok(ConfirmOutcome::Rejected);
        }

        let result = self.run_rounds().await;
        match &result {
            Ok(()) => {
                self.inner.state.send_modify(logic::finish_draw);
                log::info!("Draw cycle {} complete", cycle_id);
                self.schedule_clear(
                    cycle_id,
                    self.inner.timing.celebration,
                    logic::clear_celebration_for,
                );
            }
            Err(e) => {
                self.inner.state.send_modify(|s| logic::abort_draw(s, e));
                log::warn!("Draw cycle {} aborted: {}", cycle_id, e);
            }
        }
        self.schedule_clear(
            cycle_id,
            self.inner.timing.spotlight_clear,
            logic::clear_spotlight_for,
        );
        result.map(|()| ConfirmOutcome::Completed)
    }

    async fn run_rounds(&self) -> Result<(), DrawError> {
        let seeds = logic::seed_pool(&self.inner.state.borrow());
        logic::ensure_pool_covers_groups(&seeds)?;
        self.draw_round(SlotPosition::Seed, seeds).await?;

        self.inner.state.send_modify(logic::begin_regular_rounds);
        let regular = logic::regular_pool(&self.inner.state.borrow());
        let residual = self.draw_round(SlotPosition::Second, regular).await?;
        self.draw_round(SlotPosition::Third, residual).await?;
        Ok(())
    }

    /// Fill `position` in every group from `pool`, in group order. Returns what is left.
    async fn draw_round(
        &self,
        position: SlotPosition,
        mut pool: Vec<Team>,
    ) -> Result<Vec<Team>, DrawError> {
        for group in GroupLabel::ALL {
            if pool.is_empty() {
                return Err(DrawError::PoolExhausted { group, position });
            }
            self.inner
                .state
                .send_modify(|s| logic::announce_slot(s, group, position));

            let picked = self
                .inner
                .animator
                .pick(&pool, |team| self.set_spotlight(team))
                .await?;

            let mut committed = Ok(());
            self.inner.state.send_if_modified(|s| {
                committed = logic::assign_slot(s, group, position, picked.clone());
                committed.is_ok()
            });
            committed?;
            pool.retain(|t| t.id != picked.id);

            sleep(self.inner.timing.between_groups).await;
        }
        Ok(pool)
    }

    fn set_spotlight(&self, team: &Team) {
        self.inner
            .state
            .send_modify(|s| s.spotlight = Some(team.clone()));
    }

    /// Run `clear` after `delay`, unless a reset or a newer cycle replaced `cycle_id`.
    fn schedule_clear(
        &self,
        cycle_id: DrawCycleId,
        delay: Duration,
        clear: fn(&mut DrawState, DrawCycleId) -> bool,
    ) {
        let engine = self.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            engine
                .inner
                .state
                .send_if_modified(|s| clear(s, cycle_id));
        });
    }
}
