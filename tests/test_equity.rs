use approx::assert_abs_diff_eq;
use holdem_coach::cards::{parse_board, parse_hand};
use holdem_coach::equity::*;
use holdem_coach::table::Stage;

#[test]
fn test_equity_stays_inside_clamp() {
    let aces = parse_hand("AhAd").unwrap();
    let trash = parse_hand("7h2c").unwrap();
    for n in 2..=9 {
        assert!(hand_equity(&aces, &[], Stage::Preflop, n) <= EQUITY_CEIL);
        assert!(hand_equity(&trash, &[], Stage::Preflop, n) >= EQUITY_FLOOR);
    }
}

#[test]
fn test_preflop_ordering() {
    let aces = parse_hand("AhAd").unwrap();
    let ak = parse_hand("AhKh").unwrap();
    let trash = parse_hand("7h2c").unwrap();
    let e_aces = hand_equity(&aces, &[], Stage::Preflop, 2);
    let e_ak = hand_equity(&ak, &[], Stage::Preflop, 2);
    let e_trash = hand_equity(&trash, &[], Stage::Preflop, 2);
    assert!(e_aces > e_ak);
    assert!(e_ak > e_trash);
}

#[test]
fn test_suited_beats_offsuit() {
    let suited = parse_hand("AhKh").unwrap();
    let offsuit = parse_hand("AhKd").unwrap();
    assert!(
        hand_equity(&suited, &[], Stage::Preflop, 6)
            > hand_equity(&offsuit, &[], Stage::Preflop, 6)
    );
}

#[test]
fn test_more_players_means_less_equity() {
    let ak = parse_hand("AhKd").unwrap();
    let heads_up = hand_equity(&ak, &[], Stage::Preflop, 2);
    let full_ring = hand_equity(&ak, &[], Stage::Preflop, 9);
    assert!(heads_up > full_ring);
}

#[test]
fn test_postflop_made_hands_order() {
    let board = parse_board("8s2c5d").unwrap();
    let set = parse_hand("8h8d").unwrap();
    let top_pair = parse_hand("8hAd").unwrap();
    let air = parse_hand("KhQd").unwrap();
    let e_set = hand_equity(&set, &board, Stage::Flop, 2);
    let e_pair = hand_equity(&top_pair, &board, Stage::Flop, 2);
    let e_air = hand_equity(&air, &board, Stage::Flop, 2);
    assert!(e_set > e_pair);
    assert!(e_pair > e_air);
}

#[test]
fn test_flush_draw_adds_equity() {
    let board = parse_board("Kh7h2c").unwrap();
    let draw = parse_hand("Ah9h").unwrap();
    let no_draw = parse_hand("Ad9s").unwrap();
    assert!(
        hand_equity(&draw, &board, Stage::Flop, 2) > hand_equity(&no_draw, &board, Stage::Flop, 2)
    );
}

#[test]
fn test_draws_are_dead_on_the_river() {
    let board = parse_board("Kh7h2c4s9d").unwrap();
    let busted = parse_hand("Ah5h").unwrap();
    let made_nothing = parse_hand("Ad5c").unwrap();
    let e1 = hand_equity(&busted, &board, Stage::River, 2);
    let e2 = hand_equity(&made_nothing, &board, Stage::River, 2);
    assert_abs_diff_eq!(e1, e2, epsilon = 1e-9);
}

#[test]
fn test_monte_carlo_aces_dominate() {
    let aces = parse_hand("AhAd").unwrap();
    let result = equity_vs_random(&aces, &[], 2000, 7).unwrap();
    assert!(result.equity() > 0.75);
    assert_eq!(result.simulations, 2000);
}

#[test]
fn test_monte_carlo_seeded_reproducible() {
    let hand = parse_hand("JhTh").unwrap();
    let board = parse_board("9h8h2c").unwrap();
    let a = equity_vs_random(&hand, &board, 500, 11).unwrap();
    let b = equity_vs_random(&hand, &board, 500, 11).unwrap();
    assert_abs_diff_eq!(a.win, b.win, epsilon = 1e-12);
    assert_abs_diff_eq!(a.tie, b.tie, epsilon = 1e-12);
}

#[test]
fn test_monte_carlo_rejects_long_board() {
    let hand = parse_hand("AhKd").unwrap();
    let board = parse_board("2c3c4c5c6c7c").unwrap();
    assert!(equity_vs_random(&hand, &board, 100, 1).is_err());
}

#[test]
fn test_win_tie_lose_sum_to_one() {
    let hand = parse_hand("QsQd").unwrap();
    let result = equity_vs_random(&hand, &[], 1000, 3).unwrap();
    assert_abs_diff_eq!(result.win + result.tie + result.lose, 1.0, epsilon = 1e-9);
}
