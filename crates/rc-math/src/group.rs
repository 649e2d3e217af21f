//! Per-group stop generation and pattern evaluation

use crate::draws::DrawSource;
use crate::error::{MathError, MathResult};
use crate::model::MathModel;
use crate::payline::PaylineSet;
use crate::paytable::{ComboSet, PayType};
use crate::result::{Pay, PlayResult, SymbPos, SCATTER_WIN_LINE};
use crate::strip::StripModel;
use crate::symbol::{SymbolCatalog, SymbolId};

/// One independently stopped and evaluated set of reels.
///
/// A group resolves its strip set against the math at construction and
/// from then on owns the per-reel stop state. Evaluation reads the math
/// it was built from; pays land in the caller's [`PlayResult`].
#[derive(Debug)]
pub struct SlotGroupModel {
    strip_set_id: String,
    paytable_set_id: String,
    reels: Vec<StripModel>,
}

impl SlotGroupModel {
    /// Build a group from a strip set and the paytable set it pays by.
    ///
    /// The strip set's column count must agree with the reel span of the
    /// math's active payline set.
    pub fn new(math: &MathModel, strip_set_id: &str, paytable_set_id: &str) -> MathResult<Self> {
        let strip_set = math.strip_set(strip_set_id)?;
        if strip_set.columns.is_empty() {
            return Err(MathError::config(format!(
                "strip set '{strip_set_id}' has no columns"
            )));
        }
        // Fail on a dangling paytable set now, not at first evaluation
        math.paytable_set(paytable_set_id)?;

        let payline_set = math.active_payline_set()?;
        if payline_set.reel_count() != strip_set.columns.len() {
            return Err(MathError::config(format!(
                "strip set '{strip_set_id}' has {} columns but payline set '{}' spans {} reels",
                strip_set.columns.len(),
                payline_set.id(),
                payline_set.reel_count()
            )));
        }

        let mut reels = Vec::with_capacity(strip_set.columns.len());
        for column in &strip_set.columns {
            let strip = math.strip(&column.strip)?;
            // The strip's symbol set must resolve before any evaluation
            math.symbol_set(&strip.symbol_set)?;
            reels.push(StripModel::resolve(strip, &column.eval_indices)?);
        }
        Ok(Self {
            strip_set_id: strip_set_id.to_string(),
            paytable_set_id: paytable_set_id.to_string(),
            reels,
        })
    }

    pub fn strip_set_id(&self) -> &str {
        &self.strip_set_id
    }

    pub fn paytable_set_id(&self) -> &str {
        &self.paytable_set_id
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn reels(&self) -> &[StripModel] {
        &self.reels
    }

    /// Current stop per reel
    pub fn stops(&self) -> Vec<usize> {
        self.reels.iter().map(StripModel::stop).collect()
    }

    /// Draw one stop per reel through the injected source.
    ///
    /// Stops are final once this returns; evaluation and presentation
    /// both read the same resolved positions.
    pub fn generate_stops(&mut self, draws: &mut dyn DrawSource) -> MathResult<()> {
        for (reel, strip) in self.reels.iter_mut().enumerate() {
            let draw = draws.draw(strip.total_weight());
            let stop = strip.generate_stop(draw)?;
            log::debug!(
                "group '{}' reel {reel}: draw {draw} -> stop {stop}",
                self.strip_set_id
            );
        }
        Ok(())
    }

    /// Evaluate line and scatter pays for the current stops into `play`.
    ///
    /// Line pays multiply by the line bet, scatter pays by the total bet.
    /// At most one pay is granted per line and per symbol per scatter
    /// evaluation.
    pub fn evaluate(
        &self,
        math: &MathModel,
        line_bet: u64,
        total_bet: u64,
        play: &mut PlayResult,
    ) -> MathResult<()> {
        let payline_set = math.active_payline_set()?;
        let paytable = math.paytable_set(&self.paytable_set_id)?;

        let mut catalogs: Vec<&SymbolCatalog> = Vec::with_capacity(self.reels.len());
        for strip in &self.reels {
            catalogs.push(math.symbol_set(strip.symbol_set())?);
        }

        if let Some(combo_set_id) = paytable.combo_set_id(PayType::Payline) {
            let combos = math.combo_set(combo_set_id)?;
            for (line_index, offsets) in payline_set.lines().enumerate() {
                self.evaluate_line(&catalogs, combos, line_index, offsets, line_bet, play)?;
            }
        }

        if let Some(combo_set_id) = paytable.combo_set_id(PayType::Scatter) {
            let combos = math.combo_set(combo_set_id)?;
            self.evaluate_scatters(&catalogs, combos, payline_set, total_bet, play)?;
        }

        log::debug!(
            "group '{}' evaluated: {} pays",
            self.strip_set_id,
            play.pay_count()
        );
        Ok(())
    }

    /// One line: find the target symbol, count the contiguous run from
    /// reel 0, and award the best combo the run achieves.
    fn evaluate_line(
        &self,
        catalogs: &[&SymbolCatalog],
        combos: &ComboSet,
        line_index: usize,
        offsets: &[i8],
        line_bet: u64,
        play: &mut PlayResult,
    ) -> MathResult<()> {
        // Target is the leftmost non-wild symbol; an all-wild line
        // targets the first symbol
        let mut target: Option<SymbolId> = None;
        for (reel, &offset) in offsets.iter().enumerate() {
            let id = self.reels[reel].symbol_at(i32::from(offset));
            let symbol = catalogs[reel].get(id)?;
            if !symbol.is_wild() {
                target = Some(symbol.id);
                break;
            }
        }
        let target = match target {
            Some(id) => id,
            None => self.reels[0].symbol_at(i32::from(offsets[0])),
        };

        let mut run: u32 = 0;
        let mut positions: Vec<SymbPos> = Vec::new();
        for (reel, &offset) in offsets.iter().enumerate() {
            let id = self.reels[reel].symbol_at(i32::from(offset));
            let symbol = catalogs[reel].get(id)?;
            if !symbol.matches(target) {
                break;
            }
            run += 1;
            positions.push(SymbPos {
                reel: reel as i16,
                pos: i16::from(offset),
            });
        }

        if run == 0 {
            return Ok(());
        }
        if let Some(combo) = combos.best_combo(target, run) {
            positions.truncate(combo.count as usize);
            play.add_pay(Pay {
                combo: *combo,
                multiplier: line_bet,
                win_line: line_index as i32,
                positions,
            });
        }
        Ok(())
    }

    /// Scatters: count matches per distinct combo symbol over every
    /// configured stop-relative position, wilds substituting as usual.
    fn evaluate_scatters(
        &self,
        catalogs: &[&SymbolCatalog],
        combos: &ComboSet,
        payline_set: &PaylineSet,
        total_bet: u64,
        play: &mut PlayResult,
    ) -> MathResult<()> {
        for target in combos.symbols() {
            let mut count: u32 = 0;
            let mut positions: Vec<SymbPos> = Vec::new();
            for (reel, strip) in self.reels.iter().enumerate() {
                for &offset in payline_set.scatter_offsets(reel) {
                    let id = strip.symbol_at(i32::from(offset));
                    let symbol = catalogs[reel].get(id)?;
                    if symbol.matches(target) {
                        count += 1;
                        positions.push(SymbPos {
                            reel: reel as i16,
                            pos: i16::from(offset),
                        });
                    }
                }
            }
            if count == 0 {
                continue;
            }
            if let Some(combo) = combos.best_combo(target, count) {
                positions.truncate(combo.count as usize);
                play.add_pay(Pay {
                    combo: *combo,
                    multiplier: total_bet,
                    win_line: SCATTER_WIN_LINE,
                    positions,
                });
            }
        }
        Ok(())
    }
}
