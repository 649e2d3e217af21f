//! Reel strips and their resolved runtime models

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::symbol::SymbolId;
use crate::table::WeightedTable;

/// One stop of a strip: the symbol shown there and its selection weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripStop {
    pub symbol: SymbolId,
    pub weight: u32,
}

/// A configured strip: ordered stops over a named symbol set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strip {
    /// Symbol set the stop symbols belong to
    pub symbol_set: String,
    pub stops: Vec<StripStop>,
}

/// One reel column of a strip set: a strip and its circular evaluation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripSetColumn {
    /// Strip id
    pub strip: String,
    /// Indices into the strip's stop list, in evaluation order
    pub eval_indices: Vec<u16>,
}

/// Assembles one playable reel per device column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripSetDef {
    pub columns: Vec<StripSetColumn>,
}

/// A resolved reel: stops, circular evaluation order, and the weighted
/// table that maps a draw to a stop.
///
/// A stop is an index into the evaluation order. The eval sequence may
/// repeat or omit strip positions; its length is the modulus for all
/// offset arithmetic.
#[derive(Debug, Clone)]
pub struct StripModel {
    symbol_set: String,
    stops: Vec<StripStop>,
    eval_indices: Vec<u16>,
    table: WeightedTable<usize>,
    stop: usize,
    last_stop: usize,
}

impl StripModel {
    /// Resolve a strip against an evaluation order.
    ///
    /// Each eval slot carries the weight of the strip stop it exposes, so
    /// repeated positions are proportionally more likely.
    pub fn resolve(strip: &Strip, eval_indices: &[u16]) -> MathResult<Self> {
        if strip.stops.is_empty() {
            return Err(MathError::config("strip has no stops"));
        }
        if eval_indices.is_empty() {
            return Err(MathError::config("strip eval order is empty"));
        }
        let mut entries = Vec::with_capacity(eval_indices.len());
        for (slot, &index) in eval_indices.iter().enumerate() {
            let stop = strip.stops.get(usize::from(index)).ok_or_else(|| {
                MathError::config(format!(
                    "eval index {index} out of bounds for strip of {} stops",
                    strip.stops.len()
                ))
            })?;
            entries.push((stop.weight, slot));
        }
        let table = WeightedTable::new(None, entries)?;
        Ok(Self {
            symbol_set: strip.symbol_set.clone(),
            stops: strip.stops.clone(),
            eval_indices: eval_indices.to_vec(),
            table,
            stop: 0,
            last_stop: 0,
        })
    }

    pub fn symbol_set(&self) -> &str {
        &self.symbol_set
    }

    pub fn total_weight(&self) -> u32 {
        self.table.total_weight()
    }

    /// Length of the evaluation order (the modulus for offsets)
    pub fn eval_len(&self) -> usize {
        self.eval_indices.len()
    }

    /// Resolve a draw to a new stop; the previous stop is retained
    pub fn generate_stop(&mut self, draw: u32) -> MathResult<usize> {
        let slot = *self.table.select(draw)?;
        self.last_stop = self.stop;
        self.stop = slot;
        Ok(slot)
    }

    /// Current stop (eval slot index)
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Stop before the most recent generate_stop
    pub fn last_stop(&self) -> usize {
        self.last_stop
    }

    /// Strip position shown at signed `offset` from the current stop.
    ///
    /// Wraps circularly over the eval order; the result is always a valid
    /// index into the stop list (offset -1 from stop 0 wraps to the final
    /// eval slot).
    pub fn symbol_index_at(&self, offset: i32) -> usize {
        let len = self.eval_indices.len() as i64;
        let slot = (self.stop as i64 + i64::from(offset)).rem_euclid(len);
        usize::from(self.eval_indices[slot as usize])
    }

    /// Symbol id shown at signed `offset` from the current stop
    pub fn symbol_at(&self, offset: i32) -> SymbolId {
        self.stops[self.symbol_index_at(offset)].symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stops [A=0, B=1, C=2] exposed through eval order [0, 1, 2, 0, 1]
    fn wrapped_strip() -> StripModel {
        let strip = Strip {
            symbol_set: "main".to_string(),
            stops: vec![
                StripStop { symbol: 0, weight: 1 },
                StripStop { symbol: 1, weight: 1 },
                StripStop { symbol: 2, weight: 1 },
            ],
        };
        StripModel::resolve(&strip, &[0, 1, 2, 0, 1]).unwrap()
    }

    #[test]
    fn test_negative_offset_wraps_non_negative() {
        let mut model = wrapped_strip();
        // Force stop 3; slot weights are all 1 so draw == slot
        model.generate_stop(3).unwrap();
        assert_eq!(model.stop(), 3);

        // Offset -1 from stop 3 -> eval slot 2 -> strip index 2 -> symbol C
        assert_eq!(model.symbol_index_at(-1), 2);
        assert_eq!(model.symbol_at(-1), 2);

        // Offset -1 from stop 0 wraps to the final eval slot
        model.generate_stop(0).unwrap();
        assert_eq!(model.symbol_index_at(-1), 1);
    }

    #[test]
    fn test_repeated_eval_positions_weight_selection() {
        let strip = Strip {
            symbol_set: "main".to_string(),
            stops: vec![
                StripStop { symbol: 0, weight: 3 },
                StripStop { symbol: 1, weight: 2 },
            ],
        };
        let model = StripModel::resolve(&strip, &[0, 1, 0]).unwrap();
        // Slots carry 3, 2, 3 -> total 8
        assert_eq!(model.total_weight(), 8);
        assert_eq!(model.eval_len(), 3);
    }

    #[test]
    fn test_last_stop_tracks_previous() {
        let mut model = wrapped_strip();
        model.generate_stop(2).unwrap();
        model.generate_stop(4).unwrap();
        assert_eq!(model.stop(), 4);
        assert_eq!(model.last_stop(), 2);
    }

    #[test]
    fn test_eval_index_out_of_bounds_is_config_error() {
        let strip = Strip {
            symbol_set: "main".to_string(),
            stops: vec![StripStop { symbol: 0, weight: 1 }],
        };
        let err = StripModel::resolve(&strip, &[0, 1]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }
}
