//! Built-in demo game: five reels, three rows, ten lines
//!
//! A classic fruit machine over the full document surface: weighted
//! strips, a wild on the middle reels, line and scatter pay tables and
//! a free-spins trigger. Used when no math document is given on the
//! command line, and exportable as a starting point for custom games.

use rc_math::{
    ComboSetConfig, MathConfig, PayCombo, PayType, PaylineSetConfig, PaytableConfig,
    PaytableSetConfig, StopConfig, StripConfig, StripSetColumnConfig, StripSetConfig, SymbolConfig,
    SymbolSetConfig, WildConfig,
};

pub const WILD: u16 = 0;
pub const SEVEN: u16 = 1;
pub const BELL: u16 = 2;
pub const BAR: u16 = 3;
pub const GRAPE: u16 = 4;
pub const MELON: u16 = 5;
pub const ORANGE: u16 = 6;
pub const LEMON: u16 = 7;
pub const SCATTER: u16 = 8;
pub const CHERRY: u16 = 9;

/// Bonus code carried by the scatter combos
pub const FREE_SPINS: i32 = 1;

fn strip(id: &str, stops: &[(u16, u32)]) -> StripConfig {
    StripConfig {
        id: id.into(),
        symbol_set: "fruits".into(),
        stops: stops
            .iter()
            .map(|&(symbol, weight)| StopConfig { symbol, weight })
            .collect(),
    }
}

fn combo(symbol: u16, count: u32, award: u32) -> PayCombo {
    PayCombo {
        symbol,
        count,
        award,
        bonus_code: 0,
    }
}

fn scatter_combo(count: u32, award: u32) -> PayCombo {
    PayCombo {
        symbol: SCATTER,
        count,
        award,
        bonus_code: FREE_SPINS,
    }
}

/// The complete demo math document.
///
/// Each strip weighs 25 across ten stops; the wild appears on reels
/// two to four only. Scatter pays are total-bet multiples and every one
/// of them triggers the free-spins feature.
pub fn demo_config() -> MathConfig {
    MathConfig {
        id: "demo_fruits".into(),
        payline_set_id: "lines10".into(),
        percentage: 94.0,
        symbol_sets: vec![SymbolSetConfig {
            id: "fruits".into(),
            symbols: [SEVEN, BELL, BAR, GRAPE, MELON, ORANGE, LEMON, SCATTER, CHERRY]
                .iter()
                .map(|&id| SymbolConfig { id })
                .collect(),
            wilds: vec![WildConfig {
                id: WILD,
                matches: vec![SEVEN, BELL, BAR, GRAPE, MELON, ORANGE, LEMON, CHERRY],
            }],
        }],
        strips: vec![
            strip(
                "reel_1",
                &[
                    (CHERRY, 4),
                    (LEMON, 4),
                    (SEVEN, 1),
                    (ORANGE, 4),
                    (MELON, 3),
                    (SCATTER, 1),
                    (GRAPE, 3),
                    (BAR, 2),
                    (BELL, 2),
                    (ORANGE, 1),
                ],
            ),
            strip(
                "reel_2",
                &[
                    (BAR, 2),
                    (CHERRY, 4),
                    (MELON, 3),
                    (WILD, 1),
                    (ORANGE, 4),
                    (LEMON, 4),
                    (SCATTER, 1),
                    (BELL, 2),
                    (GRAPE, 3),
                    (SEVEN, 1),
                ],
            ),
            strip(
                "reel_3",
                &[
                    (LEMON, 4),
                    (GRAPE, 3),
                    (SCATTER, 1),
                    (CHERRY, 4),
                    (BELL, 2),
                    (WILD, 1),
                    (MELON, 3),
                    (ORANGE, 4),
                    (SEVEN, 1),
                    (BAR, 2),
                ],
            ),
            strip(
                "reel_4",
                &[
                    (ORANGE, 4),
                    (SCATTER, 1),
                    (BELL, 2),
                    (LEMON, 4),
                    (WILD, 1),
                    (GRAPE, 3),
                    (CHERRY, 4),
                    (SEVEN, 1),
                    (BAR, 2),
                    (MELON, 3),
                ],
            ),
            strip(
                "reel_5",
                &[
                    (MELON, 3),
                    (BELL, 2),
                    (CHERRY, 4),
                    (GRAPE, 3),
                    (SEVEN, 1),
                    (LEMON, 4),
                    (BAR, 2),
                    (SCATTER, 1),
                    (ORANGE, 4),
                    (LEMON, 1),
                ],
            ),
        ],
        strip_sets: vec![StripSetConfig {
            id: "base_reels".into(),
            columns: (1..=5)
                .map(|n| StripSetColumnConfig {
                    strip: format!("reel_{n}"),
                    eval_indices: (0..10).collect(),
                })
                .collect(),
        }],
        combo_sets: vec![
            ComboSetConfig {
                id: "line_pays".into(),
                combos: vec![
                    combo(SEVEN, 3, 100),
                    combo(SEVEN, 4, 250),
                    combo(SEVEN, 5, 1000),
                    combo(BAR, 3, 50),
                    combo(BAR, 4, 120),
                    combo(BAR, 5, 400),
                    combo(BELL, 3, 40),
                    combo(BELL, 4, 100),
                    combo(BELL, 5, 300),
                    combo(MELON, 3, 25),
                    combo(MELON, 4, 60),
                    combo(MELON, 5, 150),
                    combo(GRAPE, 3, 20),
                    combo(GRAPE, 4, 50),
                    combo(GRAPE, 5, 120),
                    combo(ORANGE, 3, 10),
                    combo(ORANGE, 4, 25),
                    combo(ORANGE, 5, 60),
                    combo(LEMON, 3, 10),
                    combo(LEMON, 4, 25),
                    combo(LEMON, 5, 60),
                    combo(CHERRY, 2, 2),
                    combo(CHERRY, 3, 10),
                    combo(CHERRY, 4, 30),
                    combo(CHERRY, 5, 80),
                ],
            },
            ComboSetConfig {
                id: "scatter_pays".into(),
                combos: vec![
                    scatter_combo(3, 2),
                    scatter_combo(4, 10),
                    scatter_combo(5, 50),
                ],
            },
        ],
        paytable_sets: vec![PaytableSetConfig {
            id: "base_pays".into(),
            paytables: vec![
                PaytableConfig {
                    pay_type: PayType::Payline,
                    combo_set: "line_pays".into(),
                },
                PaytableConfig {
                    pay_type: PayType::Scatter,
                    combo_set: "scatter_pays".into(),
                },
            ],
        }],
        weighted_tables: Vec::new(),
        value_tables: Vec::new(),
        payline_sets: vec![PaylineSetConfig {
            id: "lines10".into(),
            lines: vec![
                vec![0, 0, 0, 0, 0],
                vec![-1, -1, -1, -1, -1],
                vec![1, 1, 1, 1, 1],
                vec![-1, 0, 1, 0, -1],
                vec![1, 0, -1, 0, 1],
                vec![-1, -1, 0, 1, 1],
                vec![1, 1, 0, -1, -1],
                vec![0, -1, -1, -1, 0],
                vec![0, 1, 1, 1, 0],
                vec![-1, 0, 0, 0, -1],
            ],
            scatters: vec![vec![-1, 0, 1]; 5],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_math::{RngDraws, SlotGroupModel, SlotResults};

    #[test]
    fn test_demo_document_builds() {
        let model = demo_config().build().unwrap();
        assert_eq!(model.id(), "demo_fruits");

        let lines = model.active_payline_set().unwrap();
        assert_eq!(lines.line_count(), 10);
        assert_eq!(lines.reel_count(), 5);
        assert!(lines.has_scatters());

        assert_eq!(
            model.strip_set_ids().collect::<Vec<_>>(),
            vec!["base_reels"]
        );
        assert_eq!(
            model.paytable_set_ids().collect::<Vec<_>>(),
            vec!["base_pays"]
        );
    }

    #[test]
    fn test_demo_survives_json_export_and_reload() {
        let text = demo_config().to_json().unwrap();
        let model = MathConfig::from_json(&text).unwrap().build().unwrap();
        assert_eq!(model.id(), "demo_fruits");
    }

    #[test]
    fn test_demo_pays_out_over_a_seeded_session() {
        let model = demo_config().build().unwrap();
        let mut group = SlotGroupModel::new(&model, "base_reels", "base_pays").unwrap();
        let mut draws = RngDraws::seeded(1234);

        let mut won = 0u64;
        for _ in 0..2000 {
            group.generate_stops(&mut draws).unwrap();
            let mut results = SlotResults::new();
            let play = results.create();
            group.evaluate(&model, 1, 10, play).unwrap();
            results.sort_pays();
            won += results.add_up_win();
        }
        // Ten lines with pair pays: a couple of thousand spins cannot
        // all lose
        assert!(won > 0);
    }
}
