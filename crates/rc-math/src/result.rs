//! Spin results: pays, evaluation passes, and the spin-level container

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::paytable::PayCombo;

/// Line index recorded on scatter pays
pub const SCATTER_WIN_LINE: i32 = -1;

/// Location of one paying symbol: reel index and the configured offset
/// that matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbPos {
    pub reel: i16,
    pub pos: i16,
}

/// A single awarded combination.
///
/// Line pays carry the line bet as multiplier and the line index as
/// `win_line`; scatter pays carry the total bet and `win_line` -1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pay {
    pub combo: PayCombo,
    pub multiplier: u64,
    pub win_line: i32,
    pub positions: Vec<SymbPos>,
}

impl Pay {
    /// Combo award before the bet multiplier
    pub fn base_award(&self) -> u32 {
        self.combo.award
    }

    /// Awarded credits: combo award times the bet multiplier
    pub fn final_award(&self) -> u64 {
        u64::from(self.combo.award) * self.multiplier
    }

    pub fn is_scatter(&self) -> bool {
        self.win_line == SCATTER_WIN_LINE
    }

    /// True if this pay launches a bonus feature
    pub fn triggers_bonus(&self) -> bool {
        self.combo.bonus_code != 0
    }
}

/// One evaluation pass of a spin (base game or one bonus pass).
///
/// The total is cached by `add_up_win` and invalidated by `add_pay`;
/// before any totalling the pass reads as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayResult {
    pays: Vec<Pay>,
    total_win: Option<u64>,
}

impl PlayResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pay, invalidating the cached total
    pub fn add_pay(&mut self, pay: Pay) {
        self.pays.push(pay);
        self.total_win = None;
    }

    pub fn pays(&self) -> &[Pay] {
        &self.pays
    }

    /// Pay by position
    pub fn pay(&self, index: usize) -> MathResult<&Pay> {
        self.pays.get(index).ok_or_else(|| {
            MathError::out_of_range("pay index", index as u64, self.pays.len() as u64)
        })
    }

    pub fn pay_count(&self) -> usize {
        self.pays.len()
    }

    /// Order pays by descending base award.
    ///
    /// The sort is stable: award ties keep insertion order, and sorting an
    /// already sorted pass changes nothing.
    pub fn sort_pays(&mut self) {
        self.pays
            .sort_by(|a, b| b.base_award().cmp(&a.base_award()));
    }

    /// Recompute and cache the pass total
    pub fn add_up_win(&mut self) -> u64 {
        let total = self.pays.iter().map(Pay::final_award).sum();
        self.total_win = Some(total);
        total
    }

    /// Pass total as of the last `add_up_win` (zero before any totalling)
    pub fn total_win(&self) -> u64 {
        self.total_win.unwrap_or(0)
    }

    pub fn is_win(&self) -> bool {
        self.total_win() > 0
    }

    /// Drop all pays and the cached total
    pub fn clear(&mut self) {
        self.pays.clear();
        self.total_win = None;
    }
}

/// All evaluation passes of one spin: the base pass plus any bonus passes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotResults {
    plays: Vec<PlayResult>,
    total_win: u64,
}

impl SlotResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fresh pass and hand it out for evaluation
    pub fn create(&mut self) -> &mut PlayResult {
        self.plays.push(PlayResult::new());
        // Just pushed, the vec cannot be empty
        let index = self.plays.len() - 1;
        &mut self.plays[index]
    }

    pub fn plays(&self) -> &[PlayResult] {
        &self.plays
    }

    /// Pass by position
    pub fn play(&self, index: usize) -> MathResult<&PlayResult> {
        self.plays.get(index).ok_or_else(|| {
            MathError::out_of_range("play index", index as u64, self.plays.len() as u64)
        })
    }

    pub fn play_count(&self) -> usize {
        self.plays.len()
    }

    /// Sort every pass by descending base award
    pub fn sort_pays(&mut self) {
        for play in &mut self.plays {
            play.sort_pays();
        }
    }

    /// Recompute every pass total and the spin total
    pub fn add_up_win(&mut self) -> u64 {
        self.total_win = self.plays.iter_mut().map(PlayResult::add_up_win).sum();
        self.total_win
    }

    /// Spin total as of the last `add_up_win`
    pub fn total_win(&self) -> u64 {
        self.total_win
    }

    /// True once totalling found any winning pay
    pub fn is_win(&self) -> bool {
        self.total_win > 0
    }

    /// First bonus-triggering pay across passes, in pay order
    pub fn bonus_trigger(&self) -> Option<&Pay> {
        self.plays
            .iter()
            .flat_map(|play| play.pays())
            .find(|pay| pay.triggers_bonus())
    }

    /// Drop all passes
    pub fn clear(&mut self) {
        self.plays.clear();
        self.total_win = 0;
    }
}
