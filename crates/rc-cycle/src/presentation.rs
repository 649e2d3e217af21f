//! The presentation boundary
//!
//! The engine owns what happened on a spin; implementations of this
//! trait own how it is shown. Every method is required: a presentation
//! that ignores a phase must say so itself rather than inherit a silent
//! no-op.

use rc_math::SlotResults;

/// View hooks driven by the spin cycle.
///
/// `begin_*` methods start a phase; the matching `is_*_done` query is
/// polled once per tick until the phase reports complete. The cycle
/// settles nothing while a phase is still showing, with no timeout: a
/// stalled presentation stalls the cycle.
pub trait Presentation {
    /// Tear down any lingering win or bonus show from the previous
    /// cycle. Called every tick until `is_kill_done` reports true, so
    /// the teardown must be idempotent.
    fn kill_results(&mut self);
    fn is_kill_done(&self) -> bool;

    /// A play was requested without sufficient credits
    fn play_rejected(&mut self, credits: u64, required: u64);

    /// Reels start spinning toward the resolved stops, one stop vector
    /// per group
    fn begin_spin(&mut self, stops: &[Vec<usize>]);
    /// True once every reel is shown at its stop
    fn is_spin_done(&self) -> bool;

    /// Launch the bonus feature identified by `bonus_code`
    fn begin_bonus(&mut self, bonus_code: i32);
    /// True once the bonus feature completed
    fn is_bonus_done(&self) -> bool;

    /// Start the win show for the totalled results
    fn begin_award(&mut self, results: &SlotResults);
    /// True once the award show completed; must also report true when
    /// no show was begun this cycle
    fn is_award_done(&self) -> bool;
}

/// Completes every phase on the tick it starts; simulation and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPresentation {
    pub kills: u64,
    pub rejections: u64,
    pub spins: u64,
    pub bonuses: u64,
    pub awards: u64,
    /// Bonus code of the most recent feature launch
    pub last_bonus_code: i32,
    /// Total win handed to the most recent award show
    pub last_award: u64,
}

impl InstantPresentation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presentation for InstantPresentation {
    fn kill_results(&mut self) {
        self.kills += 1;
    }

    fn is_kill_done(&self) -> bool {
        true
    }

    fn play_rejected(&mut self, _credits: u64, _required: u64) {
        self.rejections += 1;
    }

    fn begin_spin(&mut self, _stops: &[Vec<usize>]) {
        self.spins += 1;
    }

    fn is_spin_done(&self) -> bool {
        true
    }

    fn begin_bonus(&mut self, bonus_code: i32) {
        self.bonuses += 1;
        self.last_bonus_code = bonus_code;
    }

    fn is_bonus_done(&self) -> bool {
        true
    }

    fn begin_award(&mut self, results: &SlotResults) {
        self.awards += 1;
        self.last_award = results.total_win();
    }

    fn is_award_done(&self) -> bool {
        true
    }
}
