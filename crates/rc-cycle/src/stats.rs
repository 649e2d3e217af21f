//! Session statistics

use serde::{Deserialize, Serialize};

/// Running totals for one play session, updated as each cycle ends
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub spins: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    pub hits: u64,
    pub bonus_triggers: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one settled spin into the totals
    pub fn record_spin(&mut self, wagered: u64, won: u64, bonus: bool) {
        self.spins += 1;
        self.total_wagered += wagered;
        self.total_won += won;
        if won > 0 {
            self.hits += 1;
        }
        if bonus {
            self.bonus_triggers += 1;
        }
    }

    /// Measured return to player (0.0 when nothing wagered)
    pub fn rtp(&self) -> f64 {
        if self.total_wagered == 0 {
            return 0.0;
        }
        self.total_won as f64 / self.total_wagered as f64
    }

    /// Fraction of spins that won anything
    pub fn hit_rate(&self) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        self.hits as f64 / self.spins as f64
    }
}
