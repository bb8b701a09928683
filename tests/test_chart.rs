use holdem_coach::chart::*;
use holdem_coach::table::Action;

#[test]
fn test_ladder_covers_all_classes() {
    assert_eq!(HAND_LADDER.len(), 169);
    let combos: u32 = HAND_LADDER.iter().map(|c| combo_count(c)).sum();
    assert_eq!(combos, 1326);
}

#[test]
fn test_ladder_has_no_duplicates() {
    let unique: std::collections::HashSet<&str> = HAND_LADDER.iter().copied().collect();
    assert_eq!(unique.len(), HAND_LADDER.len());
}

#[test]
fn test_combo_counts() {
    assert_eq!(combo_count("AA"), 6);
    assert_eq!(combo_count("AKs"), 4);
    assert_eq!(combo_count("AKo"), 12);
    assert_eq!(combo_count("bogus"), 0);
}

#[test]
fn test_percentile_monotonic_down_the_ladder() {
    let mut last = 0.0;
    for class in HAND_LADDER {
        let pct = class_percentile(class);
        assert!(pct > last);
        last = pct;
    }
    assert!((last - 100.0).abs() < 0.01);
}

#[test]
fn test_percentile_endpoints() {
    assert!(class_percentile("AA") < 1.0);
    assert!((class_percentile("72o") - 100.0).abs() < 0.01);
    // Unknown notation counts as bottom of the deck.
    assert!((class_percentile("ZZ") - 100.0).abs() < 1e-9);
}

#[test]
fn test_classes_in_top_pct() {
    assert_eq!(classes_in_top_pct(0.5), vec!["AA"]);
    let top5 = classes_in_top_pct(5.0);
    assert!(top5.contains(&"AA"));
    assert!(top5.contains(&"QQ"));
    assert!(!top5.contains(&"72o"));
}

#[test]
fn test_positions_six_max() {
    let n = 6;
    let button = 2;
    assert_eq!(TablePosition::from_seat(2, button, n), TablePosition::Button);
    assert_eq!(TablePosition::from_seat(3, button, n), TablePosition::SmallBlind);
    assert_eq!(TablePosition::from_seat(4, button, n), TablePosition::BigBlind);
    assert_eq!(TablePosition::from_seat(5, button, n), TablePosition::Early);
    assert_eq!(TablePosition::from_seat(0, button, n), TablePosition::Middle);
    assert_eq!(TablePosition::from_seat(1, button, n), TablePosition::Cutoff);
}

#[test]
fn test_positions_heads_up() {
    assert_eq!(TablePosition::from_seat(0, 0, 2), TablePosition::SmallBlind);
    assert_eq!(TablePosition::from_seat(1, 0, 2), TablePosition::BigBlind);
}

#[test]
fn test_position_labels() {
    assert_eq!(TablePosition::Button.label(), "BTN");
    assert_eq!(TablePosition::Early.label(), "EP");
}

#[test]
fn test_open_ranges_widen_by_position() {
    let depth = 100.0;
    let ep = open_percent(TablePosition::Early, depth, 6);
    let co = open_percent(TablePosition::Cutoff, depth, 6);
    let btn = open_percent(TablePosition::Button, depth, 6);
    assert!(ep < co);
    assert!(co < btn);
}

#[test]
fn test_short_stacks_widen_opens() {
    let deep = open_percent(TablePosition::Cutoff, 100.0, 6);
    let short = open_percent(TablePosition::Cutoff, 20.0, 6);
    assert!(short > deep);
}

#[test]
fn test_defend_tightens_short_stacked() {
    let deep = defend_percent(TablePosition::BigBlind, 100.0);
    let short = defend_percent(TablePosition::BigBlind, 20.0);
    assert!(short < deep);
}

#[test]
fn test_preflop_premium_opens_everywhere() {
    for pos in [
        TablePosition::Early,
        TablePosition::Middle,
        TablePosition::Cutoff,
        TablePosition::Button,
        TablePosition::SmallBlind,
    ] {
        let action = preflop_advice("AA", pos, 1.0, false, 100.0, 6);
        assert_eq!(action, Action::Raise);
    }
}

#[test]
fn test_preflop_trash_folds_unopened() {
    let action = preflop_advice("72o", TablePosition::Button, 1.0, false, 100.0, 6);
    assert_eq!(action, Action::Fold);
}

#[test]
fn test_big_blind_option_checks_trash() {
    let action = preflop_advice("72o", TablePosition::BigBlind, 1.0, true, 100.0, 6);
    assert_eq!(action, Action::Check);
}

#[test]
fn test_big_blind_option_raises_premiums() {
    let action = preflop_advice("AA", TablePosition::BigBlind, 1.0, true, 100.0, 6);
    assert_eq!(action, Action::Raise);
}

#[test]
fn test_facing_a_raise_three_tiers() {
    // Premium re-raises, a playable hand defends, trash folds.
    assert_eq!(
        preflop_advice("QQ", TablePosition::SmallBlind, 3.0, false, 100.0, 6),
        Action::Raise
    );
    assert_eq!(
        preflop_advice("KQo", TablePosition::Early, 3.0, false, 100.0, 6),
        Action::Call
    );
    assert_eq!(
        preflop_advice("72o", TablePosition::Button, 3.0, false, 100.0, 6),
        Action::Fold
    );
}

#[test]
fn test_postflop_advice_tiers() {
    assert_eq!(postflop_advice(0.80, true, 0.25), Action::Raise);
    assert_eq!(postflop_advice(0.50, true, 0.25), Action::Call);
    assert_eq!(postflop_advice(0.20, true, 0.25), Action::Fold);
    assert_eq!(postflop_advice(0.65, false, 0.0), Action::Bet);
    assert_eq!(postflop_advice(0.40, false, 0.0), Action::Check);
}
