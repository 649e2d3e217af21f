//! Payline and scatter pattern definitions

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Line and scatter patterns for one reel window.
///
/// Every line carries one signed offset per reel, measured from that
/// reel's stop. Scatter positions are held per reel as a list of
/// stop-relative offsets, wrapping exactly like line offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaylineSet {
    id: String,
    lines: Vec<Vec<i8>>,
    scatters: Vec<Vec<i8>>,
}

impl PaylineSet {
    pub fn new(
        id: impl Into<String>,
        lines: Vec<Vec<i8>>,
        scatters: Vec<Vec<i8>>,
    ) -> MathResult<Self> {
        let id = id.into();
        if lines.is_empty() && scatters.is_empty() {
            return Err(MathError::config(format!(
                "payline set '{id}' defines no lines and no scatter positions"
            )));
        }
        let reel_count = lines.first().map(Vec::len).unwrap_or(scatters.len());
        if reel_count == 0 {
            return Err(MathError::config(format!(
                "payline set '{id}' has a line with no reels"
            )));
        }
        for (index, line) in lines.iter().enumerate() {
            if line.len() != reel_count {
                return Err(MathError::config(format!(
                    "payline set '{id}' line {index} spans {} reels, expected {reel_count}",
                    line.len()
                )));
            }
        }
        if !scatters.is_empty() && scatters.len() != reel_count {
            return Err(MathError::config(format!(
                "payline set '{id}' scatter rows cover {} reels, expected {reel_count}",
                scatters.len()
            )));
        }
        Ok(Self { id, lines, scatters })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of reels every pattern spans
    pub fn reel_count(&self) -> usize {
        self.lines.first().map(Vec::len).unwrap_or(self.scatters.len())
    }

    /// Offsets of one line, by configured line index
    pub fn line(&self, index: usize) -> MathResult<&[i8]> {
        self.lines
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                MathError::out_of_range("line index", index as u64, self.lines.len() as u64)
            })
    }

    /// Lines in configured order
    pub fn lines(&self) -> impl Iterator<Item = &[i8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Stop-relative scatter offsets of one reel (empty when the reel has none)
    pub fn scatter_offsets(&self, reel: usize) -> &[i8] {
        self.scatters.get(reel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if any reel carries scatter positions
    pub fn has_scatters(&self) -> bool {
        self.scatters.iter().any(|row| !row.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_access() {
        let set = PaylineSet::new("lines", vec![vec![0, 0, 0], vec![-1, 0, 1]], vec![]).unwrap();
        assert_eq!(set.line_count(), 2);
        assert_eq!(set.reel_count(), 3);
        assert_eq!(set.line(1).unwrap(), &[-1, 0, 1]);
        assert!(matches!(set.line(2), Err(MathError::OutOfRange { .. })));
    }

    #[test]
    fn test_ragged_lines_rejected() {
        let err = PaylineSet::new("bad", vec![vec![0, 0, 0], vec![0, 0]], vec![]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_scatter_rows_must_cover_all_reels() {
        let err =
            PaylineSet::new("bad", vec![vec![0, 0, 0]], vec![vec![0], vec![0]]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));

        let set = PaylineSet::new(
            "ok",
            vec![vec![0, 0, 0]],
            vec![vec![-1, 0, 1], vec![], vec![0]],
        )
        .unwrap();
        assert!(set.has_scatters());
        assert_eq!(set.scatter_offsets(0), &[-1, 0, 1]);
        assert_eq!(set.scatter_offsets(1), &[] as &[i8]);
    }

    #[test]
    fn test_empty_set_rejected() {
        let err = PaylineSet::new("empty", vec![], vec![]).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }
}
