//! Weighted selection and value tables

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// A cumulative-weight table resolving a uniform draw to a value
///
/// Selection walks the entries accumulating weights and returns the first
/// entry whose running sum exceeds the draw. A zero-weight entry can never
/// be selected; each entry is selected with probability weight / total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedTable<T> {
    total_weight: u32,
    entries: Vec<(u32, T)>,
}

impl<T> WeightedTable<T> {
    /// Build a table from (weight, value) pairs.
    ///
    /// A declared total that disagrees with the sum of the entry weights is
    /// a config error, as are an empty entry list and a zero total.
    pub fn new(declared_total: Option<u32>, entries: Vec<(u32, T)>) -> MathResult<Self> {
        if entries.is_empty() {
            return Err(MathError::config("weighted table has no entries"));
        }
        let sum: u64 = entries.iter().map(|(w, _)| u64::from(*w)).sum();
        let total = match declared_total {
            Some(declared) => {
                if sum != u64::from(declared) {
                    return Err(MathError::config(format!(
                        "weighted table declares total {declared} but entries sum to {sum}"
                    )));
                }
                declared
            }
            None => u32::try_from(sum).map_err(|_| {
                MathError::config(format!("weighted table total {sum} exceeds u32"))
            })?,
        };
        if total == 0 {
            return Err(MathError::config("weighted table total weight is zero"));
        }
        Ok(Self {
            total_weight: total,
            entries,
        })
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a draw in [0, total_weight) to an entry index
    pub fn select_index(&self, draw: u32) -> MathResult<usize> {
        if draw >= self.total_weight {
            return Err(MathError::out_of_range(
                "draw",
                u64::from(draw),
                u64::from(self.total_weight),
            ));
        }
        let mut running: u64 = 0;
        for (index, (weight, _)) in self.entries.iter().enumerate() {
            running += u64::from(*weight);
            if running > u64::from(draw) {
                return Ok(index);
            }
        }
        // Unreachable: the entry weights sum to total_weight and draw < total_weight
        Err(MathError::out_of_range(
            "draw",
            u64::from(draw),
            u64::from(self.total_weight),
        ))
    }

    /// Resolve a draw in [0, total_weight) to the selected value
    pub fn select(&self, draw: u32) -> MathResult<&T> {
        let index = self.select_index(draw)?;
        Ok(&self.entries[index].1)
    }

    /// Entry value by position
    pub fn value_at(&self, index: usize) -> MathResult<&T> {
        self.entries
            .get(index)
            .map(|(_, value)| value)
            .ok_or_else(|| {
                MathError::out_of_range("table index", index as u64, self.entries.len() as u64)
            })
    }

    /// Entry weight by position
    pub fn weight_at(&self, index: usize) -> MathResult<u32> {
        self.entries
            .get(index)
            .map(|(weight, _)| *weight)
            .ok_or_else(|| {
                MathError::out_of_range("table index", index as u64, self.entries.len() as u64)
            })
    }
}

/// A uniform list of values addressed by index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTable {
    values: Vec<i64>,
}

impl ValueTable {
    pub fn new(values: Vec<i64>) -> MathResult<Self> {
        if values.is_empty() {
            return Err(MathError::config("value table has no entries"));
        }
        Ok(Self { values })
    }

    /// Value by index; out of bounds is an error, never clamped
    pub fn value_at(&self, index: usize) -> MathResult<i64> {
        self.values.get(index).copied().ok_or_else(|| {
            MathError::out_of_range("table index", index as u64, self.values.len() as u64)
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_boundaries() {
        // Weights 10 / 0 / 5: draws 0..=9 -> A, 10..=14 -> C, B never selected
        let table = WeightedTable::new(Some(15), vec![(10, 'A'), (0, 'B'), (5, 'C')]).unwrap();

        for draw in 0..=9 {
            assert_eq!(*table.select(draw).unwrap(), 'A', "draw {draw}");
        }
        for draw in 10..=14 {
            assert_eq!(*table.select(draw).unwrap(), 'C', "draw {draw}");
        }
    }

    #[test]
    fn test_select_rejects_out_of_domain_draw() {
        let table = WeightedTable::new(Some(15), vec![(10, 'A'), (0, 'B'), (5, 'C')]).unwrap();
        let err = table.select(15).unwrap_err();
        assert!(matches!(err, MathError::OutOfRange { .. }));
    }

    #[test]
    fn test_zero_weight_entry_never_selected() {
        let table = WeightedTable::new(None, vec![(1, 'A'), (0, 'B'), (1, 'C')]).unwrap();
        assert_eq!(table.total_weight(), 2);
        assert_eq!(*table.select(0).unwrap(), 'A');
        assert_eq!(*table.select(1).unwrap(), 'C');
    }

    #[test]
    fn test_declared_total_mismatch_is_config_error() {
        let err = WeightedTable::new(Some(16), vec![(10, 0), (5, 1)]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_empty_and_zero_total_rejected() {
        let err = WeightedTable::<i64>::new(None, vec![]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));

        let err = WeightedTable::new(None, vec![(0, 'A')]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_value_at_no_clamping() {
        let table = WeightedTable::new(None, vec![(1, 'A'), (1, 'B')]).unwrap();
        assert_eq!(*table.value_at(1).unwrap(), 'B');
        assert!(matches!(
            table.value_at(2),
            Err(MathError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_value_table_lookup() {
        let table = ValueTable::new(vec![5, 10, 25]).unwrap();
        assert_eq!(table.value_at(2).unwrap(), 25);
        assert!(matches!(
            table.value_at(3),
            Err(MathError::OutOfRange { .. })
        ));
    }
}
