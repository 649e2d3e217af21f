//! The tick-driven spin cycle

use serde::{Deserialize, Serialize};

use rc_math::{DrawSource, MathModel, PlayResult, SlotGroupModel, SlotResults};

use crate::bet::BetLedger;
use crate::error::{CycleError, CycleResult};
use crate::presentation::Presentation;
use crate::stats::SessionStats;

/// Spin cycle phases.
///
/// Initial state is `Idle`; `End` loops back to it. The wager is taken
/// in `PlaceWager` and nowhere else; winnings are credited in
/// `PostAwardWin` and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Idle,
    KillCycleResults,
    PlaceWager,
    GenerateStops,
    Evaluate,
    PreSpin,
    Spin,
    PostSpin,
    PreAwardWin,
    BonusDecision,
    PreBonus,
    Bonus,
    PostBonus,
    PostAwardWin,
    WaitForAward,
    End,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickEvent {
    /// Controller is idle, nothing to consider
    Idle,
    /// Transitioned into the given state
    Advanced(SlotState),
    /// Holding in the given state for a presentation phase
    Held(SlotState),
    /// The wager guard failed; the cycle aborted back to idle
    PlayRejected,
}

/// Drives one spin per cycle through the sixteen states.
///
/// The cycle owns the session: its groups, results, ledger and
/// statistics. It is single-threaded by contract; the host calls
/// [`SpinCycle::advance`] at its own cadence and exactly one transition
/// is considered per call. Stops are final in `GenerateStops` and
/// evaluation in `Evaluate`, both before the spin show begins, so the
/// post-spin routing has nothing left to compute.
#[derive(Debug)]
pub struct SpinCycle {
    state: SlotState,
    groups: Vec<SlotGroupModel>,
    results: SlotResults,
    ledger: BetLedger,
    stats: SessionStats,
    /// Wager captured when deducted, so evaluation and settlement use
    /// the same numbers even if the ledger is reconfigured mid-cycle
    wager: u64,
    line_wager: u64,
    bonus_launched: bool,
}

impl SpinCycle {
    pub fn new(ledger: BetLedger) -> Self {
        Self {
            state: SlotState::Idle,
            groups: Vec::new(),
            results: SlotResults::new(),
            ledger,
            stats: SessionStats::new(),
            wager: 0,
            line_wager: 0,
            bonus_launched: false,
        }
    }

    /// Add an evaluation group; the standard session has one
    pub fn add_group(&mut self, group: SlotGroupModel) {
        self.groups.push(group);
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn groups(&self) -> &[SlotGroupModel] {
        &self.groups
    }

    pub fn results(&self) -> &SlotResults {
        &self.results
    }

    pub fn ledger(&self) -> &BetLedger {
        &self.ledger
    }

    /// Bet configuration between cycles goes through here
    pub fn ledger_mut(&mut self) -> &mut BetLedger {
        &mut self.ledger
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Request a spin; only legal while idle and with at least one
    /// group added.
    ///
    /// Any other state rejects the request and the machine does not
    /// advance. A cycle without groups rejects too: there is nothing to
    /// spin, and the wager would otherwise settle against an empty
    /// result.
    pub fn request_spin(&mut self) -> CycleResult<()> {
        if self.state != SlotState::Idle {
            return Err(CycleError::IllegalState {
                request: "spin request",
                state: self.state,
            });
        }
        if self.groups.is_empty() {
            return Err(CycleError::NoGroups);
        }
        log::debug!("spin requested");
        self.state = SlotState::KillCycleResults;
        Ok(())
    }

    /// Append a bonus pass to the spin under evaluation.
    ///
    /// Bonus features run between ticks while the cycle sits in
    /// `PreBonus` or `Bonus`; the pays they add are folded into the spin
    /// total in `PostBonus`.
    pub fn create_play_result(&mut self) -> CycleResult<&mut PlayResult> {
        match self.state {
            SlotState::PreBonus | SlotState::Bonus => Ok(self.results.create()),
            state => Err(CycleError::IllegalState {
                request: "play result creation",
                state,
            }),
        }
    }

    /// Consider one transition.
    ///
    /// Presentation-coupled states report [`TickEvent::Held`] until the
    /// phase completes; everything else advances.
    pub fn advance(
        &mut self,
        math: &MathModel,
        draws: &mut dyn DrawSource,
        presentation: &mut dyn Presentation,
    ) -> CycleResult<TickEvent> {
        match self.state {
            SlotState::Idle => Ok(TickEvent::Idle),

            SlotState::KillCycleResults => {
                presentation.kill_results();
                if presentation.is_kill_done() {
                    Ok(self.advance_to(SlotState::PlaceWager))
                } else {
                    Ok(TickEvent::Held(self.state))
                }
            }

            SlotState::PlaceWager => {
                if !self.ledger.allow_play() {
                    let credits = self.ledger.credits();
                    let required = self.ledger.total_bet();
                    log::debug!(
                        "play rejected: credits {credits} cannot cover wager {required}"
                    );
                    presentation.play_rejected(credits, required);
                    self.state = SlotState::Idle;
                    return Ok(TickEvent::PlayRejected);
                }
                self.ledger.deduct_bet()?;
                self.wager = self.ledger.total_bet();
                self.line_wager = u64::from(self.ledger.line_bet());
                self.results.clear();
                self.bonus_launched = false;
                Ok(self.advance_to(SlotState::GenerateStops))
            }

            SlotState::GenerateStops => {
                for group in &mut self.groups {
                    group.generate_stops(draws)?;
                }
                Ok(self.advance_to(SlotState::Evaluate))
            }

            SlotState::Evaluate => {
                for group in &self.groups {
                    let play = self.results.create();
                    group.evaluate(math, self.line_wager, self.wager, play)?;
                }
                self.results.sort_pays();
                self.results.add_up_win();
                Ok(self.advance_to(SlotState::PreSpin))
            }

            SlotState::PreSpin => {
                let stops: Vec<Vec<usize>> =
                    self.groups.iter().map(SlotGroupModel::stops).collect();
                presentation.begin_spin(&stops);
                Ok(self.advance_to(SlotState::Spin))
            }

            SlotState::Spin => {
                if presentation.is_spin_done() {
                    Ok(self.advance_to(SlotState::PostSpin))
                } else {
                    Ok(TickEvent::Held(self.state))
                }
            }

            SlotState::PostSpin => {
                if self.results.is_win() || self.results.bonus_trigger().is_some() {
                    Ok(self.advance_to(SlotState::PreAwardWin))
                } else {
                    Ok(self.advance_to(SlotState::End))
                }
            }

            SlotState::PreAwardWin => Ok(self.advance_to(SlotState::BonusDecision)),

            SlotState::BonusDecision => {
                if self.results.bonus_trigger().is_some() {
                    Ok(self.advance_to(SlotState::PreBonus))
                } else {
                    Ok(self.advance_to(SlotState::PostAwardWin))
                }
            }

            SlotState::PreBonus => {
                let code = self
                    .results
                    .bonus_trigger()
                    .map(|pay| pay.combo.bonus_code);
                if let Some(code) = code {
                    log::debug!("bonus {code} launched");
                    presentation.begin_bonus(code);
                    self.bonus_launched = true;
                }
                Ok(self.advance_to(SlotState::Bonus))
            }

            SlotState::Bonus => {
                if presentation.is_bonus_done() {
                    Ok(self.advance_to(SlotState::PostBonus))
                } else {
                    Ok(TickEvent::Held(self.state))
                }
            }

            SlotState::PostBonus => {
                // Fold bonus passes into the spin total
                self.results.sort_pays();
                self.results.add_up_win();
                Ok(self.advance_to(SlotState::PostAwardWin))
            }

            SlotState::PostAwardWin => {
                if self.results.is_win() {
                    let total = self.results.total_win();
                    self.ledger.add_award(total);
                    log::debug!(
                        "award {total} credited, balance {}",
                        self.ledger.credits()
                    );
                    presentation.begin_award(&self.results);
                }
                Ok(self.advance_to(SlotState::WaitForAward))
            }

            SlotState::WaitForAward => {
                if presentation.is_award_done() {
                    Ok(self.advance_to(SlotState::End))
                } else {
                    Ok(TickEvent::Held(self.state))
                }
            }

            SlotState::End => {
                self.stats.record_spin(
                    self.wager,
                    self.results.total_win(),
                    self.bonus_launched,
                );
                log::debug!(
                    "cycle settled: wager {} win {} credits {}",
                    self.wager,
                    self.results.total_win(),
                    self.ledger.credits()
                );
                Ok(self.advance_to(SlotState::Idle))
            }
        }
    }

    fn advance_to(&mut self, next: SlotState) -> TickEvent {
        log::debug!("spin cycle: {:?} -> {:?}", self.state, next);
        self.state = next;
        TickEvent::Advanced(next)
    }
}
