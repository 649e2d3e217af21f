//! Pay combinations and paytable sets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::symbol::SymbolId;

/// Pattern family a combo set applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    Payline,
    Scatter,
}

/// One paying combination
///
/// `bonus_code` 0 means no bonus trigger; any other value identifies the
/// bonus feature this combo launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCombo {
    pub symbol: SymbolId,
    pub count: u32,
    pub award: u32,
    #[serde(default)]
    pub bonus_code: i32,
}

/// Pay combinations grouped for lookup by (symbol, count)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboSet {
    combos: BTreeMap<(SymbolId, u32), PayCombo>,
}

impl ComboSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combo; zero counts and duplicate (symbol, count) keys are
    /// config errors
    pub fn insert(&mut self, combo: PayCombo) -> MathResult<()> {
        if combo.count == 0 {
            return Err(MathError::config(format!(
                "combo for symbol {} has zero count",
                combo.symbol
            )));
        }
        let key = (combo.symbol, combo.count);
        if self.combos.contains_key(&key) {
            return Err(MathError::config(format!(
                "duplicate combo for symbol {} count {}",
                key.0, key.1
            )));
        }
        self.combos.insert(key, combo);
        Ok(())
    }

    /// Exact (symbol, count) lookup
    pub fn get(&self, symbol: SymbolId, count: u32) -> Option<&PayCombo> {
        self.combos.get(&(symbol, count))
    }

    /// Best combo achievable by a run of `count` matching symbols.
    ///
    /// Counts are tried from `count` downward and the first combo present
    /// wins, so a 4-symbol run still pays the 3-of-a-kind combo when no
    /// 4-of-a-kind is configured.
    pub fn best_combo(&self, symbol: SymbolId, count: u32) -> Option<&PayCombo> {
        (1..=count)
            .rev()
            .find_map(|c| self.combos.get(&(symbol, c)))
    }

    /// Distinct symbols that have at least one combo, ascending
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        let mut last = None;
        self.combos.keys().filter_map(move |&(symbol, _)| {
            if last == Some(symbol) {
                None
            } else {
                last = Some(symbol);
                Some(symbol)
            }
        })
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PayCombo> {
        self.combos.values()
    }
}

/// Maps pay types to the combo set evaluated for that pattern family
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaytableSet {
    entries: BTreeMap<PayType, String>,
}

impl PaytableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a pay type to a combo set id; one binding per type
    pub fn insert(&mut self, pay_type: PayType, combo_set: impl Into<String>) -> MathResult<()> {
        if self.entries.contains_key(&pay_type) {
            return Err(MathError::config(format!(
                "paytable set binds {pay_type:?} twice"
            )));
        }
        self.entries.insert(pay_type, combo_set.into());
        Ok(())
    }

    /// Combo set id for a pay type, if bound
    pub fn combo_set_id(&self, pay_type: PayType) -> Option<&str> {
        self.entries.get(&pay_type).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PayType, &str)> {
        self.entries.iter().map(|(t, id)| (*t, id.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
