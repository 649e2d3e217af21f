//! End-to-end math tests: document in, evaluated spin out

use rc_math::{
    MathConfig, MathModel, RecordingDraws, ReplayDraws, RngDraws, SlotGroupModel, SlotResults,
};

/// Three identical reels over CHERRY / SEVEN / BAR / WILD / SCAT so a
/// replayed draw picks the stop directly (all weights 1).
fn fixture_model() -> MathModel {
    let doc = r#"{
        "id": "fixture",
        "payline_set_id": "lines",
        "percentage": 92.0,
        "symbol_sets": [
            {
                "id": "main",
                "symbols": [{"id": 1}, {"id": 3}, {"id": 8}, {"id": 9}],
                "wilds": [{"id": 0, "matches": [1, 3, 9]}]
            }
        ],
        "strips": [
            {
                "id": "reel",
                "symbol_set": "main",
                "stops": [
                    {"symbol": 9}, {"symbol": 1}, {"symbol": 3},
                    {"symbol": 0}, {"symbol": 8}
                ]
            }
        ],
        "strip_sets": [
            {
                "id": "reels",
                "columns": [
                    {"strip": "reel", "eval_indices": [0, 1, 2, 3, 4]},
                    {"strip": "reel", "eval_indices": [0, 1, 2, 3, 4]},
                    {"strip": "reel", "eval_indices": [0, 1, 2, 3, 4]}
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
        "payline_sets": [
            {
                "id": "lines",
                "lines": [[0, 0, 0], [-1, -1, -1], [1, 1, 1]],
                "scatters": [[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]]
            }
        ]
    }"#;
    MathConfig::from_json(doc).unwrap().build().unwrap()
}

fn spin(model: &MathModel, group: &mut SlotGroupModel, draws: Vec<u32>) -> SlotResults {
    let mut source = ReplayDraws::new(draws);
    group.generate_stops(&mut source).unwrap();

    let mut results = SlotResults::new();
    let line_bet = 2u64;
    let total_bet = 6u64; // 3 lines
    let play = results.create();
    group.evaluate(model, line_bet, total_bet, play).unwrap();
    results.sort_pays();
    results.add_up_win();
    results
}

#[test]
fn test_triple_cherry_window_pays_lines_and_scatter() {
    let model = fixture_model();
    let mut group = SlotGroupModel::new(&model, "reels", "pays").unwrap();

    // Stops (0,0,0): middle row CHERRY*3, bottom row SEVEN*3, and one
    // SCAT per reel on the row above
    let results = spin(&model, &mut group, vec![0, 0, 0]);
    let pays = results.plays()[0].pays();

    assert_eq!(pays.len(), 3);
    // Sorted by descending base award: SEVEN line, CHERRY line, scatter
    assert_eq!(pays[0].combo.award, 100);
    assert_eq!(pays[0].win_line, 2);
    assert_eq!(pays[1].combo.award, 50);
    assert_eq!(pays[1].win_line, 0);
    assert_eq!(pays[2].combo.award, 5);
    assert_eq!(pays[2].win_line, -1);
    assert_eq!(pays[2].multiplier, 6);

    // 100*2 + 50*2 + 5*6
    assert_eq!(results.total_win(), 330);
    assert!(results.is_win());
    assert_eq!(results.bonus_trigger().unwrap().combo.bonus_code, 2);
}

#[test]
fn test_wild_completes_bar_line() {
    let model = fixture_model();
    let mut group = SlotGroupModel::new(&model, "reels", "pays").unwrap();

    // Stops (3,2,2): middle row WILD BAR BAR
    let results = spin(&model, &mut group, vec![3, 2, 2]);
    let pays = results.plays()[0].pays();

    assert_eq!(pays.len(), 1);
    assert_eq!(pays[0].combo.symbol, 3);
    assert_eq!(pays[0].combo.award, 25);
    assert_eq!(pays[0].win_line, 0);
    assert_eq!(results.total_win(), 50); // 25 * line bet 2
}

#[test]
fn test_losing_spin_has_no_win() {
    let model = fixture_model();
    let mut group = SlotGroupModel::new(&model, "reels", "pays").unwrap();

    // Stops (0,2,1): rows CHERRY/BAR/SEVEN columns never line up
    let results = spin(&model, &mut group, vec![0, 2, 1]);
    assert_eq!(results.plays()[0].pay_count(), 0);
    assert_eq!(results.total_win(), 0);
    assert!(!results.is_win());
}

#[test]
fn test_recorded_session_replays_identically() {
    let model = fixture_model();

    // First pass: seeded entropy, recorded
    let mut group = SlotGroupModel::new(&model, "reels", "pays").unwrap();
    let mut recording = RecordingDraws::new(RngDraws::seeded(4242));
    let mut first = Vec::new();
    for _ in 0..20 {
        group.generate_stops(&mut recording).unwrap();
        let mut results = SlotResults::new();
        let play = results.create();
        group.evaluate(&model, 1, 3, play).unwrap();
        results.sort_pays();
        results.add_up_win();
        first.push((group.stops(), results.total_win()));
    }

    // Second pass: replay the recording against a fresh group
    let mut group = SlotGroupModel::new(&model, "reels", "pays").unwrap();
    let mut replay = ReplayDraws::new(recording.into_recorded());
    for (stops, total) in first {
        group.generate_stops(&mut replay).unwrap();
        let mut results = SlotResults::new();
        let play = results.create();
        group.evaluate(&model, 1, 3, play).unwrap();
        results.sort_pays();
        results.add_up_win();
        assert_eq!(group.stops(), stops);
        assert_eq!(results.total_win(), total);
    }
    // The recording was consumed exactly once
    assert_eq!(replay.laps(), 1);
    assert_eq!(replay.position(), 0);
}

#[test]
fn test_unknown_strip_set_is_not_found() {
    let model = fixture_model();
    let err = SlotGroupModel::new(&model, "missing", "pays").unwrap_err();
    assert!(matches!(err, rc_math::MathError::NotFound { .. }));
}
