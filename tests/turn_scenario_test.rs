//! Turn controller scenarios driven through the public session API.
//!
//! Boards are set up by restoring a known snapshot so card positions are
//! fixed, then played with explicit clock values.

use pairs::persistence::GameSnapshot;
use pairs::{
    CardSnapshot, GameConfig, GameEvent, GameSession, GridSize, IgnoreReason, SaveStore,
    SelectOutcome, TurnPhase,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn face_down(values: &[u32]) -> Vec<CardSnapshot> {
    values
        .iter()
        .map(|&value| CardSnapshot {
            value,
            is_matched: false,
            is_flipped: false,
        })
        .collect()
}

fn fixed_snapshot(width: u32, height: u32, values: &[u32]) -> GameSnapshot {
    let num_pairs = width * height / 2;
    GameSnapshot {
        grid_width: width,
        grid_height: height,
        remaining_pairs: num_pairs,
        total_moves: 0,
        score: 0,
        cards: face_down(values),
        symbols: (0..num_pairs).collect(),
    }
}

fn session_with(values: &[u32], width: u32, height: u32, store: Option<SaveStore>) -> GameSession {
    let mut rng = create_test_rng();
    let mut session = GameSession::start(
        GameConfig::default(),
        GridSize::new(width, height),
        store,
        &mut rng,
    );
    session.restore(fixed_snapshot(width, height, values), 0.0);
    session.drain_events();
    session
}

// ============================================================================
// 2x2 board [0, 1, 0, 1]
// ============================================================================

#[test]
fn test_two_matches_finish_game_and_clear_save() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = SaveStore::in_dir(temp.path()).expect("store");
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, Some(store.clone()));
    session.save().expect("save");
    assert!(store.has_saved_game());

    // First pair
    assert_eq!(session.select_card(0, 1.0), SelectOutcome::Revealed);
    assert_eq!(session.select_card(2, 1.2), SelectOutcome::Resolving);
    assert!(session.tick(2.0));
    assert_eq!(session.board().remaining_pairs(), 1);
    assert_eq!(session.summary().score, 100);
    assert_eq!(session.phase(), TurnPhase::Idle);
    assert!(store.has_saved_game());

    // Second pair, well outside the combo window
    session.select_card(1, 20.0);
    session.select_card(3, 20.1);
    assert!(session.tick(21.0));
    assert_eq!(session.board().remaining_pairs(), 0);
    assert_eq!(session.phase(), TurnPhase::GameOver);
    assert_eq!(session.summary().score, 200);
    assert_eq!(session.summary().total_moves, 2);

    assert!(!store.has_saved_game());
    assert!(!store.save_path().exists());

    let events = session.drain_events();
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            final_score: 200,
            total_moves: 2
        })
    );
}

#[test]
fn test_mismatch_counts_move_at_selection_time() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);

    session.select_card(0, 0.0);
    assert_eq!(session.summary().total_moves, 0);
    session.select_card(1, 0.2);
    assert_eq!(session.summary().total_moves, 1);
    assert!(session.board().card(1).revealed);

    // Not yet: mismatch delay is one second
    assert!(!session.tick(1.0));
    assert!(session.board().card(0).revealed);

    assert!(session.tick(1.5));
    assert!(!session.board().card(0).revealed);
    assert!(!session.board().card(1).revealed);
    assert_eq!(session.board().remaining_pairs(), 2);
    assert_eq!(session.summary().total_moves, 1);
    assert_eq!(session.phase(), TurnPhase::Idle);
}

#[test]
fn test_reselecting_first_card_is_noop() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);
    session.select_card(0, 0.0);
    session.drain_events();

    let outcome = session.select_card(0, 0.1);
    assert_eq!(outcome, SelectOutcome::Ignored(IgnoreReason::SameCard));
    assert_eq!(session.phase(), TurnPhase::OneSelected);
    assert_eq!(session.summary().total_moves, 0);
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_gate_closed_during_resolution() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);
    session.select_card(0, 0.0);
    session.select_card(1, 0.0);

    for index in 0..4 {
        assert!(!session.can_select_card(index));
    }
    assert_eq!(
        session.select_card(3, 0.5),
        SelectOutcome::Ignored(IgnoreReason::Resolving)
    );

    session.tick(1.0);
    assert!(session.can_select_card(0));
    assert!(session.can_select_card(3));
}

#[test]
fn test_matched_cards_cannot_be_selected() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);
    session.select_card(0, 0.0);
    session.select_card(2, 0.0);
    session.tick(0.5);

    assert!(!session.can_select_card(0));
    assert_eq!(
        session.select_card(2, 1.0),
        SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
}

// ============================================================================
// Combo
// ============================================================================

#[test]
fn test_quick_matches_build_combo() {
    // 3x2: pairs at (0,1) (2,3) (4,5)
    let mut session = session_with(&[0, 0, 1, 1, 2, 2], 3, 2, None);

    let mut t = 0.0;
    for (a, b) in [(0, 1), (2, 3), (4, 5)] {
        session.select_card(a, t);
        session.select_card(b, t);
        t += 0.5;
        session.tick(t);
    }

    let summary = session.summary();
    assert_eq!(summary.combo, 2);
    // combo 0: 100, combo 1: 100 (bonus truncated), combo 2: 200
    assert_eq!(summary.score, 400);
    assert_eq!(summary.phase, TurnPhase::GameOver);
}

#[test]
fn test_slow_match_resets_combo() {
    let mut session = session_with(&[0, 0, 1, 1, 2, 2], 3, 2, None);
    session.select_card(0, 0.0);
    session.select_card(1, 0.0);
    session.tick(0.5);
    session.select_card(2, 1.0);
    session.select_card(3, 1.0);
    session.tick(1.5);
    assert_eq!(session.summary().combo, 1);

    session.select_card(4, 30.0);
    session.select_card(5, 30.0);
    session.tick(30.5);
    assert_eq!(session.summary().combo, 0);
    assert_eq!(session.summary().score, 300);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_single_pair_board_ends_on_first_move() {
    let mut rng = create_test_rng();
    let mut session =
        GameSession::start(GameConfig::instant(), GridSize::new(1, 2), None, &mut rng);
    assert_eq!(session.board().card(0).value, 0);
    assert_eq!(session.board().card(1).value, 0);

    session.select_card(0, 0.0);
    session.select_card(1, 0.0);
    assert!(session.tick(0.0));
    assert_eq!(session.phase(), TurnPhase::GameOver);
    assert_eq!(session.board().remaining_pairs(), 0);
    assert_eq!(session.summary().total_moves, 1);
}

#[test]
fn test_remaining_pairs_never_negative() {
    let mut rng = create_test_rng();
    let mut session =
        GameSession::start(GameConfig::instant(), GridSize::new(4, 4), None, &mut rng);

    // Play perfectly by looking up each partner
    let mut t = 0.0;
    while session.phase() != TurnPhase::GameOver {
        let first = (0..16)
            .find(|&i| session.can_select_card(i))
            .expect("an unmatched card remains");
        let value = session.board().card(first).value;
        let second = (0..16)
            .find(|&i| i != first && session.board().card(i).value == value)
            .expect("partner exists");
        session.select_card(first, t);
        session.select_card(second, t);
        session.tick(t);
        t += 10.0;
    }

    assert_eq!(session.board().remaining_pairs(), 0);
    assert_eq!(session.summary().pairs_found, 8);
    assert_eq!(session.summary().total_moves, 8);
    assert!(!session.tick(t + 100.0));
}

#[test]
fn test_shutdown_cancels_pending_match() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);
    session.select_card(0, 0.0);
    session.select_card(2, 0.0);
    session.shutdown();

    assert!(!session.tick(5.0));
    assert_eq!(session.summary().score, 0);
    assert_eq!(session.board().remaining_pairs(), 2);
    assert!(session.next_deadline().is_none());
}

#[test]
fn test_session_resumes_after_shutdown() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);
    session.select_card(0, 0.0);
    session.select_card(1, 0.0);
    let before = session.snapshot();

    session.shutdown();
    assert_eq!(session.phase(), TurnPhase::Suspended);
    assert_eq!(session.snapshot(), before);
    assert!(!session.tick(100.0));

    assert!(session.resume(100.0));
    assert!(!session.tick(100.5));
    assert!(session.tick(101.0));
    assert_eq!(session.phase(), TurnPhase::Idle);
    assert!(!session.board().card(0).revealed);
    assert!(!session.board().card(1).revealed);
    for index in 0..4 {
        assert!(session.can_select_card(index));
    }
    assert!(!session.resume(102.0));
}

#[test]
fn test_save_after_shutdown_resumes_pending_pair() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = SaveStore::in_dir(temp.path()).expect("store");
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, Some(store.clone()));
    session.select_card(0, 0.0);
    session.select_card(2, 0.0);
    session.shutdown();
    session.save().expect("save");

    let mut rng = create_test_rng();
    let mut resumed =
        GameSession::load_or_new(GameConfig::default(), GridSize::default(), Some(store), &mut rng, 50.0);
    assert_eq!(resumed.phase(), TurnPhase::Resolving);
    assert!(resumed.tick(50.5));
    assert_eq!(resumed.board().remaining_pairs(), 1);
    assert_eq!(resumed.summary().score, 100);
}

#[test]
#[should_panic]
fn test_foreign_card_reference_panics() {
    let mut session = session_with(&[0, 1, 0, 1], 2, 2, None);
    session.select_card(4, 0.0);
}
