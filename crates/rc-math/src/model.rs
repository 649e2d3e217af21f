//! The assembled math model

use std::collections::BTreeMap;

use crate::error::{MathError, MathResult};
use crate::payline::PaylineSet;
use crate::paytable::{ComboSet, PaytableSet};
use crate::strip::{Strip, StripSetDef};
use crate::symbol::SymbolCatalog;
use crate::table::{ValueTable, WeightedTable};

/// Immutable math for one game: every catalog, strip, pattern and pay
/// definition evaluation needs, plus the designed return percentage.
///
/// Built by [`crate::config::MathConfig::build`], which has already
/// verified every cross reference; the typed getters cover run-time
/// lookups by id. An explicit context object: sessions own their model
/// and pass it where needed.
#[derive(Debug, Clone)]
pub struct MathModel {
    pub(crate) id: String,
    pub(crate) percentage: f32,
    pub(crate) payline_set_id: String,
    pub(crate) symbol_sets: BTreeMap<String, SymbolCatalog>,
    pub(crate) strips: BTreeMap<String, Strip>,
    pub(crate) strip_sets: BTreeMap<String, StripSetDef>,
    pub(crate) combo_sets: BTreeMap<String, ComboSet>,
    pub(crate) paytable_sets: BTreeMap<String, PaytableSet>,
    pub(crate) weighted_tables: BTreeMap<String, WeightedTable<i64>>,
    pub(crate) value_tables: BTreeMap<String, ValueTable>,
    pub(crate) payline_sets: BTreeMap<String, PaylineSet>,
}

impl MathModel {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Designed return-to-player percentage, as configured
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// Id of the payline set this math evaluates against
    pub fn payline_set_id(&self) -> &str {
        &self.payline_set_id
    }

    pub fn symbol_set(&self, id: &str) -> MathResult<&SymbolCatalog> {
        self.symbol_sets
            .get(id)
            .ok_or_else(|| MathError::not_found("symbol set", id))
    }

    pub fn strip(&self, id: &str) -> MathResult<&Strip> {
        self.strips
            .get(id)
            .ok_or_else(|| MathError::not_found("strip", id))
    }

    pub fn strip_set(&self, id: &str) -> MathResult<&StripSetDef> {
        self.strip_sets
            .get(id)
            .ok_or_else(|| MathError::not_found("strip set", id))
    }

    pub fn combo_set(&self, id: &str) -> MathResult<&ComboSet> {
        self.combo_sets
            .get(id)
            .ok_or_else(|| MathError::not_found("combo set", id))
    }

    pub fn paytable_set(&self, id: &str) -> MathResult<&PaytableSet> {
        self.paytable_sets
            .get(id)
            .ok_or_else(|| MathError::not_found("paytable set", id))
    }

    pub fn weighted_table(&self, id: &str) -> MathResult<&WeightedTable<i64>> {
        self.weighted_tables
            .get(id)
            .ok_or_else(|| MathError::not_found("weighted table", id))
    }

    pub fn value_table(&self, id: &str) -> MathResult<&ValueTable> {
        self.value_tables
            .get(id)
            .ok_or_else(|| MathError::not_found("value table", id))
    }

    pub fn payline_set(&self, id: &str) -> MathResult<&PaylineSet> {
        self.payline_sets
            .get(id)
            .ok_or_else(|| MathError::not_found("payline set", id))
    }

    /// The payline set named by `payline_set_id`
    pub fn active_payline_set(&self) -> MathResult<&PaylineSet> {
        self.payline_set(&self.payline_set_id)
    }

    pub fn strip_set_ids(&self) -> impl Iterator<Item = &str> {
        self.strip_sets.keys().map(String::as_str)
    }

    pub fn paytable_set_ids(&self) -> impl Iterator<Item = &str> {
        self.paytable_sets.keys().map(String::as_str)
    }
}
