use holdem_coach::table::{Action, Stage};
use holdem_coach::validator::*;

const BB: f64 = 1.0;

#[test]
fn test_fold_always_legal() {
    let v = validate(Action::Fold, Stage::Preflop, true, 10.0, 0.0, 100.0, BB, None);
    assert!(v.legal);
    let v = validate(Action::Fold, Stage::River, false, 0.0, 0.0, 100.0, BB, None);
    assert!(v.legal);
}

#[test]
fn test_nothing_legal_after_hand_complete() {
    for action in [Action::Fold, Action::Check, Action::Call, Action::Bet, Action::Raise] {
        let v = validate(action, Stage::HandComplete, false, 0.0, 0.0, 100.0, BB, None);
        assert!(!v.legal);
    }
}

#[test]
fn test_check_legal_unfaced() {
    let v = validate(Action::Check, Stage::Flop, false, 0.0, 0.0, 100.0, BB, None);
    assert!(v.legal);
}

#[test]
fn test_check_illegal_facing_bet() {
    let v = validate(Action::Check, Stage::Flop, true, 5.0, 0.0, 100.0, BB, None);
    assert!(!v.legal);
    assert!(v.reason.is_some());
}

#[test]
fn test_check_legal_when_bet_matched() {
    // Big blind option: street bet already matches the current bet.
    let v = validate(Action::Check, Stage::Preflop, false, 1.0, 1.0, 99.0, BB, None);
    assert!(v.legal);
}

#[test]
fn test_call_amount_is_the_difference() {
    let v = validate(Action::Call, Stage::Preflop, true, 2.0, 0.5, 99.5, BB, None);
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 1.5).abs() < 1e-9);
}

#[test]
fn test_call_illegal_with_nothing_owed() {
    let v = validate(Action::Call, Stage::Flop, false, 0.0, 0.0, 100.0, BB, None);
    assert!(!v.legal);
}

#[test]
fn test_short_call_converts_to_all_in() {
    let v = validate(Action::Call, Stage::Turn, true, 10.0, 0.0, 4.0, BB, None);
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn test_bet_illegal_facing_bet() {
    let v = validate(Action::Bet, Stage::Flop, true, 5.0, 0.0, 100.0, BB, Some(10.0));
    assert!(!v.legal);
}

#[test]
fn test_bet_clamped_to_minimum() {
    let v = validate(Action::Bet, Stage::Flop, false, 0.0, 0.0, 100.0, BB, Some(0.25));
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - BB).abs() < 1e-9);
}

#[test]
fn test_bet_clamped_to_stack() {
    let v = validate(Action::Bet, Stage::Flop, false, 0.0, 0.0, 40.0, BB, Some(500.0));
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 40.0).abs() < 1e-9);
}

#[test]
fn test_raise_illegal_with_no_bet() {
    let v = validate(Action::Raise, Stage::Flop, false, 0.0, 0.0, 100.0, BB, Some(5.0));
    assert!(!v.legal);
}

#[test]
fn test_raise_minimum_is_double_the_bet() {
    let v = validate(Action::Raise, Stage::Flop, true, 2.0, 0.0, 100.0, BB, Some(3.0));
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn test_raise_minimum_at_least_one_bb_on_top() {
    let v = validate(Action::Raise, Stage::Flop, true, 0.5, 0.0, 100.0, BB, Some(0.6));
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 1.5).abs() < 1e-9);
}

#[test]
fn test_raise_clamped_to_all_in() {
    let v = validate(Action::Raise, Stage::Turn, true, 10.0, 2.0, 30.0, BB, Some(500.0));
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 32.0).abs() < 1e-9);
}

#[test]
fn test_short_all_in_raise_below_minimum() {
    // Stack covers more than the bet but less than a min-raise:
    // the all-in total is the only legal raise size.
    let v = validate(Action::Raise, Stage::Preflop, true, 2.0, 0.0, 3.0, BB, None);
    assert!(v.legal);
    assert!((v.adjusted.unwrap() - 3.0).abs() < 1e-9);
}

#[test]
fn test_raise_illegal_when_stack_cannot_exceed_bet() {
    let v = validate(Action::Raise, Stage::Preflop, true, 5.0, 1.0, 4.0, BB, None);
    assert!(!v.legal);
}

#[test]
fn test_available_actions_facing_bet() {
    let actions = available_actions(Stage::Preflop, true, 2.0, 0.0, 100.0, BB);
    assert_eq!(actions, vec![Action::Fold, Action::Call, Action::Raise]);
}

#[test]
fn test_available_actions_unfaced() {
    let actions = available_actions(Stage::Flop, false, 0.0, 0.0, 100.0, BB);
    assert_eq!(actions, vec![Action::Fold, Action::Check, Action::Bet]);
}

#[test]
fn test_bet_sizes_postflop_pot_fractions() {
    let sizes = valid_bet_sizes(Stage::Flop, 10.0, 0.0, 0.0, 100.0, BB);
    assert_eq!(sizes.len(), 5);
    assert!((sizes[0] - 10.0 / 3.0).abs() < 0.01);
    assert!((sizes[1] - 5.0).abs() < 1e-9);
    assert!((sizes[2] - 20.0 / 3.0).abs() < 0.01);
    assert!((sizes[3] - 10.0).abs() < 1e-9);
    assert!((sizes[4] - 100.0).abs() < 1e-9);
}

#[test]
fn test_bet_sizes_preflop_bb_steps() {
    let sizes = valid_bet_sizes(Stage::Preflop, 1.5, 1.0, 0.0, 100.0, BB);
    assert_eq!(sizes.len(), 9);
    assert!((sizes[0] - 2.0).abs() < 1e-9);
    assert!((sizes[7] - 9.0).abs() < 1e-9);
    assert!((sizes[8] - 100.0).abs() < 1e-9);
}

#[test]
fn test_bet_sizes_facing_bet_multipliers() {
    let sizes = valid_bet_sizes(Stage::Turn, 10.0, 4.0, 0.0, 100.0, BB);
    assert_eq!(sizes.len(), 4);
    assert!((sizes[0] - 10.0).abs() < 1e-9);
    assert!((sizes[1] - 12.0).abs() < 1e-9);
    assert!((sizes[2] - 16.0).abs() < 1e-9);
    assert!((sizes[3] - 100.0).abs() < 1e-9);
}

#[test]
fn test_bet_sizes_always_include_all_in() {
    let sizes = valid_bet_sizes(Stage::River, 200.0, 0.0, 0.0, 8.0, BB);
    assert!((sizes.last().unwrap() - 8.0).abs() < 1e-9);
}

#[test]
fn test_bet_sizes_sorted_and_deduped() {
    let sizes = valid_bet_sizes(Stage::Flop, 12.0, 0.0, 0.0, 12.0, BB);
    for pair in sizes.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}
