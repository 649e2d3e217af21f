//! Symbol identities and wild-match relations

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Symbol identifier within a catalog
pub type SymbolId = u16;

/// A symbol identity
///
/// `wild_matches` lists the symbol ids this symbol substitutes for. The
/// relation is asymmetric: a WILD listing BAR matches BAR, while BAR does
/// not match WILD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathSymbol {
    /// Unique symbol id within the catalog
    pub id: SymbolId,
    /// Symbol ids this symbol substitutes for (empty for regular symbols)
    #[serde(default)]
    pub wild_matches: BTreeSet<SymbolId>,
}

impl MathSymbol {
    /// Create a regular symbol
    pub fn regular(id: SymbolId) -> Self {
        Self {
            id,
            wild_matches: BTreeSet::new(),
        }
    }

    /// Create a wild symbol substituting for the given ids
    pub fn wild(id: SymbolId, matches: impl IntoIterator<Item = SymbolId>) -> Self {
        Self {
            id,
            wild_matches: matches.into_iter().collect(),
        }
    }

    /// True if this symbol pays as `other`: identity or wild substitution
    pub fn matches(&self, other: SymbolId) -> bool {
        self.id == other || self.wild_matches.contains(&other)
    }

    /// True if this symbol substitutes for at least one other symbol
    pub fn is_wild(&self) -> bool {
        !self.wild_matches.is_empty()
    }
}

/// An immutable set of symbol identities keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolCatalog {
    symbols: BTreeMap<SymbolId, MathSymbol>,
}

impl SymbolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol; a duplicate id is a config error
    pub fn insert(&mut self, symbol: MathSymbol) -> MathResult<()> {
        if self.symbols.contains_key(&symbol.id) {
            return Err(MathError::config(format!(
                "duplicate symbol id {}",
                symbol.id
            )));
        }
        self.symbols.insert(symbol.id, symbol);
        Ok(())
    }

    /// Look up a symbol by id
    pub fn get(&self, id: SymbolId) -> MathResult<&MathSymbol> {
        self.symbols
            .get(&id)
            .ok_or_else(|| MathError::not_found("symbol", id.to_string()))
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.symbols.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &MathSymbol> {
        self.symbols.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wild_match_is_asymmetric() {
        let wild = MathSymbol::wild(0, [3, 4, 5]);
        let bar = MathSymbol::regular(3);

        assert!(wild.matches(3));
        assert!(wild.matches(0)); // identity
        assert!(!bar.matches(0)); // BAR does not match WILD
        assert!(bar.matches(3));
    }

    #[test]
    fn test_regular_symbol_matches_only_itself() {
        let seven = MathSymbol::regular(1);
        assert!(seven.matches(1));
        assert!(!seven.matches(2));
        assert!(!seven.is_wild());
    }

    #[test]
    fn test_catalog_rejects_duplicate_id() {
        let mut catalog = SymbolCatalog::new();
        catalog.insert(MathSymbol::regular(1)).unwrap();
        let err = catalog.insert(MathSymbol::regular(1)).unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_catalog_lookup_missing_is_not_found() {
        let catalog = SymbolCatalog::new();
        let err = catalog.get(9).unwrap_err();
        assert!(matches!(err, MathError::NotFound { .. }));
    }
}
