//! Player credit ledger and wager settlement

use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};

/// Credits and bet configuration for one session.
///
/// The total bet is recomputed whenever the line bet or line count is
/// set, so it always equals `line_bet * total_lines`. An explicit
/// context object: the session owns its ledger and hands out access,
/// nothing reaches it globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetLedger {
    credits: u64,
    line_bet: u32,
    total_lines: u32,
    total_bet: u64,
}

impl Default for BetLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BetLedger {
    /// Empty ledger betting one credit on one line
    pub fn new() -> Self {
        Self {
            credits: 0,
            line_bet: 1,
            total_lines: 1,
            total_bet: 1,
        }
    }

    /// Seed the session bankroll
    pub fn set_credits(&mut self, credits: u64) {
        self.credits = credits;
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn set_line_bet(&mut self, line_bet: u32) {
        self.line_bet = line_bet;
        self.recompute_total();
    }

    pub fn line_bet(&self) -> u32 {
        self.line_bet
    }

    pub fn set_total_lines(&mut self, total_lines: u32) {
        self.total_lines = total_lines;
        self.recompute_total();
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    /// Wager for one spin: line bet times line count
    pub fn total_bet(&self) -> u64 {
        self.total_bet
    }

    /// True when the session can afford a spin
    pub fn allow_play(&self) -> bool {
        self.total_bet > 0 && self.credits >= self.total_bet
    }

    /// Take the wager; must only be invoked while `allow_play()` holds,
    /// and fails rather than ever driving credits negative
    pub fn deduct_bet(&mut self) -> CycleResult<()> {
        if !self.allow_play() {
            return Err(CycleError::InsufficientCredits {
                credits: self.credits,
                required: self.total_bet,
            });
        }
        self.credits -= self.total_bet;
        Ok(())
    }

    /// Credit winnings
    pub fn add_award(&mut self, amount: u64) {
        self.credits += amount;
    }

    fn recompute_total(&mut self) {
        self.total_bet = u64::from(self.line_bet) * u64::from(self.total_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_bet_tracks_setters() {
        let mut ledger = BetLedger::new();
        ledger.set_line_bet(5);
        ledger.set_total_lines(20);
        assert_eq!(ledger.total_bet(), 100);

        ledger.set_line_bet(2);
        assert_eq!(ledger.total_bet(), 40);
    }

    #[test]
    fn test_allow_play_requires_cover_and_nonzero_bet() {
        let mut ledger = BetLedger::new();
        ledger.set_line_bet(5);
        ledger.set_total_lines(2);

        ledger.set_credits(9);
        assert!(!ledger.allow_play());
        ledger.set_credits(10);
        assert!(ledger.allow_play());

        ledger.set_line_bet(0);
        assert!(!ledger.allow_play());
    }

    #[test]
    fn test_deduct_refuses_uncovered_wager() {
        let mut ledger = BetLedger::new();
        ledger.set_line_bet(10);
        ledger.set_credits(5);

        let err = ledger.deduct_bet().unwrap_err();
        assert!(matches!(err, CycleError::InsufficientCredits { .. }));
        assert_eq!(ledger.credits(), 5);
    }

    #[test]
    fn test_settlement_balances() {
        let mut ledger = BetLedger::new();
        ledger.set_line_bet(2);
        ledger.set_total_lines(10);
        ledger.set_credits(1000);

        ledger.deduct_bet().unwrap();
        ledger.add_award(75);
        // start - total_bet + total_win
        assert_eq!(ledger.credits(), 1000 - 20 + 75);
    }
}
