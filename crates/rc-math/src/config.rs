//! Math configuration documents and model building
//!
//! A math document declares every catalog, strip, pattern and pay table
//! of one game. Documents load from JSON or YAML; `build` verifies every
//! cross reference (duplicate ids, dangling references, weight totals)
//! before handing back an immutable [`MathModel`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::model::MathModel;
use crate::payline::PaylineSet;
use crate::paytable::{ComboSet, PayCombo, PayType, PaytableSet};
use crate::strip::{Strip, StripSetColumn, StripSetDef, StripStop};
use crate::symbol::{MathSymbol, SymbolCatalog, SymbolId};
use crate::table::{ValueTable, WeightedTable};

fn default_stop_weight() -> u32 {
    1
}

/// Top-level math document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathConfig {
    pub id: String,
    /// Payline set this math evaluates against
    pub payline_set_id: String,
    /// Designed return-to-player percentage
    #[serde(default)]
    pub percentage: f32,
    #[serde(default)]
    pub symbol_sets: Vec<SymbolSetConfig>,
    #[serde(default)]
    pub strips: Vec<StripConfig>,
    #[serde(default)]
    pub strip_sets: Vec<StripSetConfig>,
    #[serde(default)]
    pub combo_sets: Vec<ComboSetConfig>,
    #[serde(default)]
    pub paytable_sets: Vec<PaytableSetConfig>,
    #[serde(default)]
    pub weighted_tables: Vec<WeightedTableConfig>,
    #[serde(default)]
    pub value_tables: Vec<ValueTableConfig>,
    #[serde(default)]
    pub payline_sets: Vec<PaylineSetConfig>,
}

/// One named symbol set: regular symbols plus wild definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSetConfig {
    pub id: String,
    #[serde(default)]
    pub symbols: Vec<SymbolConfig>,
    #[serde(default)]
    pub wilds: Vec<WildConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolConfig {
    pub id: SymbolId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WildConfig {
    pub id: SymbolId,
    /// Symbol ids this wild substitutes for
    pub matches: Vec<SymbolId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    pub id: String,
    /// Symbol set the stop symbols belong to
    pub symbol_set: String,
    pub stops: Vec<StopConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopConfig {
    pub symbol: SymbolId,
    #[serde(default = "default_stop_weight")]
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripSetConfig {
    pub id: String,
    pub columns: Vec<StripSetColumnConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripSetColumnConfig {
    pub strip: String,
    /// Indices into the strip's stop list, in evaluation order
    pub eval_indices: Vec<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboSetConfig {
    pub id: String,
    pub combos: Vec<PayCombo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaytableSetConfig {
    pub id: String,
    pub paytables: Vec<PaytableConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaytableConfig {
    #[serde(rename = "type")]
    pub pay_type: PayType,
    pub combo_set: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedTableConfig {
    pub id: String,
    /// Declared total; validated against the entry sum when present
    #[serde(default)]
    pub total_weight: Option<u32>,
    pub entries: Vec<WeightedEntryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedEntryConfig {
    pub weight: u32,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTableConfig {
    pub id: String,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaylineSetConfig {
    pub id: String,
    /// Per line, one signed offset per reel
    #[serde(default)]
    pub lines: Vec<Vec<i8>>,
    /// Per reel, the stop-relative offsets evaluated for scatters
    #[serde(default)]
    pub scatters: Vec<Vec<i8>>,
}

impl MathConfig {
    /// Parse a JSON math document
    pub fn from_json(text: &str) -> MathResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| MathError::config(format!("math document parse failed: {e}")))
    }

    /// Parse a YAML math document
    pub fn from_yaml(text: &str) -> MathResult<Self> {
        serde_yml::from_str(text)
            .map_err(|e| MathError::config(format!("math document parse failed: {e}")))
    }

    /// Load a document by file extension (.json, .yaml, .yml)
    pub fn load(path: &Path) -> MathResult<Self> {
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            other => Err(MathError::config(format!(
                "unsupported math document extension: {other:?}"
            ))),
        }
    }

    /// Serialize back to pretty JSON
    pub fn to_json(&self) -> MathResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MathError::config(format!("math document serialize failed: {e}")))
    }

    /// Validate every cross reference and assemble the runtime model
    pub fn build(&self) -> MathResult<MathModel> {
        if self.id.is_empty() {
            return Err(MathError::config("math id is empty"));
        }

        // Symbol sets: duplicate symbol ids and unknown wild targets are
        // caught per set
        let mut symbol_sets: BTreeMap<String, SymbolCatalog> = BTreeMap::new();
        for set in &self.symbol_sets {
            let mut catalog = SymbolCatalog::new();
            for symbol in &set.symbols {
                catalog.insert(MathSymbol::regular(symbol.id)).map_err(|e| {
                    MathError::config(format!("symbol set '{}': {e}", set.id))
                })?;
            }
            for wild in &set.wilds {
                catalog
                    .insert(MathSymbol::wild(wild.id, wild.matches.iter().copied()))
                    .map_err(|e| MathError::config(format!("symbol set '{}': {e}", set.id)))?;
            }
            for wild in &set.wilds {
                for &target in &wild.matches {
                    if !catalog.contains(target) {
                        return Err(MathError::config(format!(
                            "symbol set '{}': wild {} matches unknown symbol {target}",
                            set.id, wild.id
                        )));
                    }
                }
            }
            insert_unique(&mut symbol_sets, "symbol set", &set.id, catalog)?;
        }

        // Strips: the symbol set and every stop symbol must resolve
        let mut strips: BTreeMap<String, Strip> = BTreeMap::new();
        for strip in &self.strips {
            let catalog = symbol_sets.get(&strip.symbol_set).ok_or_else(|| {
                MathError::config(format!(
                    "strip '{}' references unknown symbol set '{}'",
                    strip.id, strip.symbol_set
                ))
            })?;
            if strip.stops.is_empty() {
                return Err(MathError::config(format!("strip '{}' has no stops", strip.id)));
            }
            let mut stops = Vec::with_capacity(strip.stops.len());
            for stop in &strip.stops {
                if !catalog.contains(stop.symbol) {
                    return Err(MathError::config(format!(
                        "strip '{}' stop references unknown symbol {}",
                        strip.id, stop.symbol
                    )));
                }
                stops.push(StripStop {
                    symbol: stop.symbol,
                    weight: stop.weight,
                });
            }
            insert_unique(
                &mut strips,
                "strip",
                &strip.id,
                Strip {
                    symbol_set: strip.symbol_set.clone(),
                    stops,
                },
            )?;
        }

        // Strip sets: strip references and eval indices checked here so a
        // bad document fails at load, not at group construction
        let mut strip_sets: BTreeMap<String, StripSetDef> = BTreeMap::new();
        for set in &self.strip_sets {
            if set.columns.is_empty() {
                return Err(MathError::config(format!(
                    "strip set '{}' has no columns",
                    set.id
                )));
            }
            let mut columns = Vec::with_capacity(set.columns.len());
            for column in &set.columns {
                let strip = strips.get(&column.strip).ok_or_else(|| {
                    MathError::config(format!(
                        "strip set '{}' references unknown strip '{}'",
                        set.id, column.strip
                    ))
                })?;
                if column.eval_indices.is_empty() {
                    return Err(MathError::config(format!(
                        "strip set '{}' column '{}' has an empty eval order",
                        set.id, column.strip
                    )));
                }
                for &index in &column.eval_indices {
                    if usize::from(index) >= strip.stops.len() {
                        return Err(MathError::config(format!(
                            "strip set '{}' column '{}': eval index {index} out of bounds ({} stops)",
                            set.id,
                            column.strip,
                            strip.stops.len()
                        )));
                    }
                }
                columns.push(StripSetColumn {
                    strip: column.strip.clone(),
                    eval_indices: column.eval_indices.clone(),
                });
            }
            insert_unique(&mut strip_sets, "strip set", &set.id, StripSetDef { columns })?;
        }

        // Combo sets: duplicate (symbol, count) pairs surface from insert
        let mut combo_sets: BTreeMap<String, ComboSet> = BTreeMap::new();
        for set in &self.combo_sets {
            let mut combos = ComboSet::new();
            for combo in &set.combos {
                combos
                    .insert(*combo)
                    .map_err(|e| MathError::config(format!("combo set '{}': {e}", set.id)))?;
            }
            insert_unique(&mut combo_sets, "combo set", &set.id, combos)?;
        }

        // Paytable sets: each binding must name a known combo set
        let mut paytable_sets: BTreeMap<String, PaytableSet> = BTreeMap::new();
        for set in &self.paytable_sets {
            let mut paytable = PaytableSet::new();
            for entry in &set.paytables {
                if !combo_sets.contains_key(&entry.combo_set) {
                    return Err(MathError::config(format!(
                        "paytable set '{}' references unknown combo set '{}'",
                        set.id, entry.combo_set
                    )));
                }
                paytable
                    .insert(entry.pay_type, entry.combo_set.clone())
                    .map_err(|e| MathError::config(format!("paytable set '{}': {e}", set.id)))?;
            }
            insert_unique(&mut paytable_sets, "paytable set", &set.id, paytable)?;
        }

        let mut weighted_tables: BTreeMap<String, WeightedTable<i64>> = BTreeMap::new();
        for table in &self.weighted_tables {
            let entries = table
                .entries
                .iter()
                .map(|entry| (entry.weight, entry.value))
                .collect();
            let built = WeightedTable::new(table.total_weight, entries)
                .map_err(|e| MathError::config(format!("weighted table '{}': {e}", table.id)))?;
            insert_unique(&mut weighted_tables, "weighted table", &table.id, built)?;
        }

        let mut value_tables: BTreeMap<String, ValueTable> = BTreeMap::new();
        for table in &self.value_tables {
            let built = ValueTable::new(table.values.clone())
                .map_err(|e| MathError::config(format!("value table '{}': {e}", table.id)))?;
            insert_unique(&mut value_tables, "value table", &table.id, built)?;
        }

        let mut payline_sets: BTreeMap<String, PaylineSet> = BTreeMap::new();
        for set in &self.payline_sets {
            let built = PaylineSet::new(set.id.clone(), set.lines.clone(), set.scatters.clone())?;
            insert_unique(&mut payline_sets, "payline set", &set.id, built)?;
        }

        if !payline_sets.contains_key(&self.payline_set_id) {
            return Err(MathError::config(format!(
                "math '{}' references unknown payline set '{}'",
                self.id, self.payline_set_id
            )));
        }

        log::info!(
            "math '{}' built: {} symbol sets, {} strips, {} strip sets, {} combo sets, {} paytable sets, {} payline sets",
            self.id,
            symbol_sets.len(),
            strips.len(),
            strip_sets.len(),
            combo_sets.len(),
            paytable_sets.len(),
            payline_sets.len()
        );

        Ok(MathModel {
            id: self.id.clone(),
            percentage: self.percentage,
            payline_set_id: self.payline_set_id.clone(),
            symbol_sets,
            strips,
            strip_sets,
            combo_sets,
            paytable_sets,
            weighted_tables,
            value_tables,
            payline_sets,
        })
    }
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    kind: &str,
    id: &str,
    value: T,
) -> MathResult<()> {
    if map.insert(id.to_string(), value).is_some() {
        return Err(MathError::config(format!("duplicate {kind} id '{id}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_json() -> &'static str {
        r#"{
            "id": "demo",
            "payline_set_id": "lines",
            "percentage": 94.5,
            "symbol_sets": [
                {
                    "id": "main",
                    "symbols": [{"id": 1}, {"id": 3}, {"id": 8}, {"id": 9}],
                    "wilds": [{"id": 0, "matches": [1, 3, 9]}]
                }
            ],
            "strips": [
                {
                    "id": "r0",
                    "symbol_set": "main",
                    "stops": [
                        {"symbol": 9}, {"symbol": 1, "weight": 2},
                        {"symbol": 3}, {"symbol": 0}, {"symbol": 8}
                    ]
                },
                {
                    "id": "r1",
                    "symbol_set": "main",
                    "stops": [
                        {"symbol": 9}, {"symbol": 3}, {"symbol": 1},
                        {"symbol": 8}, {"symbol": 0}
                    ]
                },
                {
                    "id": "r2",
                    "symbol_set": "main",
                    "stops": [
                        {"symbol": 9}, {"symbol": 8}, {"symbol": 3},
                        {"symbol": 1}, {"symbol": 0}
                    ]
                }
            ],
            "strip_sets": [
                {
                    "id": "reels",
                    "columns": [
                        {"strip": "r0", "eval_indices": [0, 1, 2, 3, 4]},
                        {"strip": "r1", "eval_indices": [0, 1, 2, 3, 4]},
                        {"strip": "r2", "eval_indices": [0, 1, 2, 3, 4]}
                    ]
                }
            ],
            "combo_sets": [
                {
                    "id": "base",
                    "combos": [
                        {"symbol": 9, "count": 3, "award": 50},
                        {"symbol": 3, "count": 3, "award": 25},
                        {"symbol": 1, "count": 3, "award": 100}
                    ]
                },
                {
                    "id": "scat",
                    "combos": [{"symbol": 8, "count": 3, "award": 5, "bonus_code": 2}]
                }
            ],
            "paytable_sets": [
                {
                    "id": "pays",
                    "paytables": [
                        {"type": "payline", "combo_set": "base"},
                        {"type": "scatter", "combo_set": "scat"}
                    ]
                }
            ],
            "weighted_tables": [
                {
                    "id": "wheel",
                    "total_weight": 15,
                    "entries": [
                        {"weight": 10, "value": 100},
                        {"weight": 0, "value": 500},
                        {"weight": 5, "value": 250}
                    ]
                }
            ],
            "value_tables": [{"id": "fs_awards", "values": [5, 10, 25]}],
            "payline_sets": [
                {
                    "id": "lines",
                    "lines": [[0, 0, 0], [-1, -1, -1], [1, 1, 1]],
                    "scatters": [[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]]
                }
            ]
        }"#
    }

    #[test]
    fn test_build_from_json() {
        let config = MathConfig::from_json(demo_json()).unwrap();
        let model = config.build().unwrap();

        assert_eq!(model.id(), "demo");
        assert_eq!(model.percentage(), 94.5);
        assert_eq!(model.payline_set_id(), "lines");
        assert_eq!(model.active_payline_set().unwrap().line_count(), 3);
        assert_eq!(model.symbol_set("main").unwrap().len(), 5);
        assert_eq!(model.strip("r0").unwrap().stops.len(), 5);
        assert_eq!(model.strip_set("reels").unwrap().columns.len(), 3);
        assert_eq!(model.combo_set("base").unwrap().len(), 3);
        assert_eq!(model.weighted_table("wheel").unwrap().total_weight(), 15);
        assert_eq!(model.value_table("fs_awards").unwrap().value_at(1).unwrap(), 10);
    }

    #[test]
    fn test_default_stop_weight_is_one() {
        let config = MathConfig::from_json(demo_json()).unwrap();
        let model = config.build().unwrap();
        let strip = model.strip("r0").unwrap();
        assert_eq!(strip.stops[0].weight, 1);
        assert_eq!(strip.stops[1].weight, 2);
    }

    #[test]
    fn test_yaml_round_trips_the_same_model() {
        let config = MathConfig::from_json(demo_json()).unwrap();
        let yaml = serde_yml::to_string(&config).unwrap();
        let reparsed = MathConfig::from_yaml(&yaml).unwrap();
        let model = reparsed.build().unwrap();
        assert_eq!(model.id(), "demo");
        assert_eq!(model.combo_set("scat").unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_strip_id_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        let dup = config.strips[0].clone();
        config.strips.push(dup);
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_dangling_symbol_set_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        config.strips[0].symbol_set = "missing".to_string();
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_dangling_payline_set_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        config.payline_set_id = "missing".to_string();
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_dangling_combo_set_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        config.paytable_sets[0].paytables[0].combo_set = "missing".to_string();
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_eval_index_out_of_bounds_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        config.strip_sets[0].columns[0].eval_indices.push(5);
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_wild_matching_unknown_symbol_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        config.symbol_sets[0].wilds[0].matches.push(77);
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }

    #[test]
    fn test_declared_total_mismatch_rejected() {
        let mut config = MathConfig::from_json(demo_json()).unwrap();
        config.weighted_tables[0].total_weight = Some(16);
        let err = config.build().unwrap_err();
        assert!(matches!(err, MathError::Config(_)));
    }
}
