use std::cmp::Ordering;

use holdem_coach::cards::{parse_board, parse_hand};
use holdem_coach::hand_evaluator::*;

fn eval(hand: &str, board: &str) -> HandResult {
    let h = parse_hand(hand).unwrap();
    let b = parse_board(board).unwrap();
    evaluate_hand(&h, &b).unwrap()
}

#[test]
fn test_royal_flush() {
    let result = eval("AhKh", "QhJhTh2c3d");
    assert_eq!(result.category, HandCategory::RoyalFlush);
}

#[test]
fn test_straight_flush() {
    let result = eval("9h8h", "7h6h5h2c3d");
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.kickers, vec![9]);
}

#[test]
fn test_four_of_a_kind() {
    let result = eval("AhAd", "AsAcKh2c3d");
    assert_eq!(result.category, HandCategory::FourOfAKind);
    assert_eq!(result.kickers[0], 14);
}

#[test]
fn test_full_house() {
    let result = eval("KhKd", "Ks2c2d7h9s");
    assert_eq!(result.category, HandCategory::FullHouse);
    assert_eq!(result.kickers, vec![13, 2]);
}

#[test]
fn test_flush() {
    let result = eval("Ah2h", "Kh9h4h7c8d");
    assert_eq!(result.category, HandCategory::Flush);
    assert_eq!(result.kickers[0], 14);
}

#[test]
fn test_straight() {
    let result = eval("9c8d", "7h6s5d2cKh");
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.kickers, vec![9]);
}

#[test]
fn test_wheel_straight() {
    let result = eval("Ah2d", "3c4s5dKh9c");
    assert_eq!(result.category, HandCategory::Straight);
    // The ace plays low: the wheel tops out at the five.
    assert_eq!(result.kickers, vec![5]);
}

#[test]
fn test_wheel_loses_to_six_high_straight() {
    let wheel = eval("Ah2d", "3c4s5dKh9c");
    let six_high = eval("6h2d", "3c4s5dKh9c");
    assert!(six_high > wheel);
}

#[test]
fn test_three_of_a_kind() {
    let result = eval("7h7d", "7s2cKh9d4s");
    assert_eq!(result.category, HandCategory::ThreeOfAKind);
    assert_eq!(result.kickers[0], 7);
}

#[test]
fn test_two_pair() {
    let result = eval("KhQd", "Ks2cQh9d4s");
    assert_eq!(result.category, HandCategory::TwoPair);
    assert_eq!(result.kickers[0], 13);
    assert_eq!(result.kickers[1], 12);
}

#[test]
fn test_one_pair() {
    let result = eval("AhAd", "Ks2cQh9d4s");
    assert_eq!(result.category, HandCategory::OnePair);
    assert_eq!(result.kickers[0], 14);
}

#[test]
fn test_high_card() {
    let result = eval("AhQd", "Ks2c9h7d4s");
    assert_eq!(result.category, HandCategory::HighCard);
    assert_eq!(result.kickers[0], 14);
}

#[test]
fn test_not_enough_cards() {
    let h = parse_hand("AhKd").unwrap();
    let b = parse_board("2c3d").unwrap();
    assert!(evaluate_hand(&h, &b).is_err());
}

#[test]
fn test_compare_kicker_decides() {
    let h1 = parse_hand("AhKd").unwrap();
    let h2 = parse_hand("AdQc").unwrap();
    let board = parse_board("As2c9h7d4s").unwrap();
    assert_eq!(compare_hands(&h1, &h2, &board).unwrap(), Ordering::Greater);
}

#[test]
fn test_compare_board_plays_split() {
    let h1 = parse_hand("2h3d").unwrap();
    let h2 = parse_hand("2d3c").unwrap();
    let board = parse_board("AsKsQh JdTc").unwrap();
    assert_eq!(compare_hands(&h1, &h2, &board).unwrap(), Ordering::Equal);
}

#[test]
fn test_flush_draw_detected() {
    let h = parse_hand("Ah9h").unwrap();
    let b = parse_board("Kh7h2c").unwrap();
    assert!(has_flush_draw(&h, &b));
}

#[test]
fn test_flush_draw_requires_hero_card() {
    let h = parse_hand("As9d").unwrap();
    let b = parse_board("Kh7h2h4h").unwrap();
    assert!(!has_flush_draw(&h, &b));
}

#[test]
fn test_straight_draw_open_ended() {
    let h = parse_hand("9c8d").unwrap();
    let b = parse_board("7h6s2c").unwrap();
    assert!(has_straight_draw(&h, &b));
}

#[test]
fn test_straight_draw_gutshot() {
    let h = parse_hand("9c8d").unwrap();
    let b = parse_board("7h5s2c").unwrap();
    assert!(has_straight_draw(&h, &b));
}

#[test]
fn test_straight_draw_absent() {
    let h = parse_hand("AcKd").unwrap();
    let b = parse_board("9h5s2c").unwrap();
    assert!(!has_straight_draw(&h, &b));
}

#[test]
fn test_category_ordering() {
    assert!(HandCategory::Flush > HandCategory::Straight);
    assert!(HandCategory::RoyalFlush > HandCategory::StraightFlush);
    assert!(HandCategory::OnePair > HandCategory::HighCard);
}
