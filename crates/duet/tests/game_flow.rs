//! End-to-end and concurrency tests for the `Game` facade.
//!
//! The concurrency tests drive two clones of the same `Game` — one per
//! player's client — the way two independently-connected browsers would,
//! with no coordination between them beyond the shared store.

use duet::prelude::*;

fn qids(n: usize) -> Vec<QuestionId> {
    (0..n).map(|i| QuestionId::new(format!("q{i}"))).collect()
}

fn opt(s: &str) -> OptionId {
    OptionId::new(s)
}

/// Create → join → ready both → start. Returns (room, host, guest).
async fn started_game(game: &Game) -> (RoomId, PlayerId, PlayerId) {
    let created = game.create_room("Ava", "🙂").await.unwrap();
    let joined = game.join_room(&created.code, "Ben", "😎").await.unwrap();
    game.set_ready(created.host_player_id, true).await.unwrap();
    game.set_ready(joined.player_id, true).await.unwrap();
    game.start_game(created.room_id, "deck", qids(10))
        .await
        .unwrap();
    (created.room_id, created.host_player_id, joined.player_id)
}

// =========================================================================
// The full scenario from the product script
// =========================================================================

#[tokio::test]
async fn test_full_game_alternating_matches() {
    let game = Game::new();

    // Host "Ava" creates the room and shares the code; "Ben" joins.
    let created = game.create_room("Ava", "🙂").await.unwrap();
    let snapshot = game.room_by_code(&created.code).await.unwrap();
    assert_eq!(snapshot.room.id, created.room_id);
    assert_eq!(snapshot.room.status, RoomStatus::Lobby);

    let joined = game.join_room(&created.code, "Ben", "😎").await.unwrap();
    let (ava, ben) = (created.host_player_id, joined.player_id);
    let room = created.room_id;

    // Both ready up; the host starts with ten question ids.
    game.set_ready(ava, true).await.unwrap();
    game.set_ready(ben, true).await.unwrap();
    game.start_game(room, "deck", qids(10)).await.unwrap();

    let round0 = game.current_round(room, 0).await.unwrap();
    assert_eq!(round0.round_index, 0);
    assert!(!round0.revealed);

    // Rounds alternate match / mismatch: even rounds agree, odd disagree.
    let mut expected_score = 0;
    for i in 0..10u32 {
        let (ava_pick, ben_pick) = if i % 2 == 0 {
            expected_score += 1;
            ("same", "same")
        } else {
            ("this", "that")
        };

        game.lock_answer(room, i, ava, opt(ava_pick)).await.unwrap();
        game.lock_answer(room, i, ben, opt(ben_pick)).await.unwrap();

        let delta = game.reveal_round(room, i, ava, ben).await.unwrap();
        assert_eq!(delta, u32::from(i % 2 == 0), "round {i}");

        let advance = game.advance_round(room).await.unwrap();
        if i < 9 {
            assert_eq!(advance, Advance::InProgress { index: i + 1 });
        } else {
            assert_eq!(advance, Advance::Finished);
        }
    }

    // Final state: finished, ten rounds of history, 5/10 matched.
    let snapshot = game.room_by_code(&created.code).await.unwrap();
    assert_eq!(snapshot.room.status, RoomStatus::Finished);
    assert_eq!(game.all_rounds(room).await.len(), 10);

    let summary = game.score_summary(room).await.unwrap();
    assert_eq!(summary.score, expected_score);
    assert_eq!(summary.percentage, 50);
    assert_eq!(summary.message, "Good compatibility! 😊");
}

// =========================================================================
// Racing clients
// =========================================================================

#[tokio::test]
async fn test_racing_reveals_resolve_to_one_winner() {
    let game = Game::new();
    let (room, ava, ben) = started_game(&game).await;

    game.lock_answer(room, 0, ava, opt("x")).await.unwrap();
    game.lock_answer(room, 0, ben, opt("x")).await.unwrap();

    // Both clients' auto-reveal timers fire at once.
    let client_a = game.clone();
    let client_b = game.clone();
    let (ra, rb) = tokio::join!(
        client_a.reveal_round(room, 0, ava, ben),
        client_b.reveal_round(room, 0, ava, ben),
    );

    // Exactly one wins; the loser gets a benign InvalidState-style error.
    let wins = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one reveal may take effect");
    for result in [ra, rb] {
        match result {
            Ok(delta) => assert_eq!(delta, 1),
            Err(err) => assert!(matches!(
                err,
                DuetError::Round(RoundError::AlreadyRevealed(_, 0))
            )),
        }
    }

    // The stored delta was decided exactly once.
    let round = game.current_round(room, 0).await.unwrap();
    assert!(round.revealed);
    assert_eq!(round.score_delta, 1);
}

#[tokio::test]
async fn test_concurrent_locks_keep_both_entries() {
    let game = Game::new();
    let (room, ava, ben) = started_game(&game).await;

    // Both players lock simultaneously from their own clients. The
    // per-player upserts must not clobber each other.
    let client_a = game.clone();
    let client_b = game.clone();
    let (ra, rb) = tokio::join!(
        client_a.lock_answer(room, 0, ava, opt("sunrise")),
        client_b.lock_answer(room, 0, ben, opt("sunset")),
    );
    ra.unwrap();
    rb.unwrap();

    let round = game.current_round(room, 0).await.unwrap();
    assert!(round.both_locked(ava, ben));
    assert_eq!(round.answers.get(&ava), Some(&opt("sunrise")));
    assert_eq!(round.answers.get(&ben), Some(&opt("sunset")));
}

#[tokio::test]
async fn test_racing_advances_move_exactly_one_round() {
    let game = Game::new();
    let (room, ava, ben) = started_game(&game).await;

    game.lock_answer(room, 0, ava, opt("x")).await.unwrap();
    game.lock_answer(room, 0, ben, opt("x")).await.unwrap();
    game.reveal_round(room, 0, ava, ben).await.unwrap();

    // Both auto-advance timers fire. Both calls succeed, both report the
    // same new index, and only one round was created.
    let client_a = game.clone();
    let client_b = game.clone();
    let (ra, rb) = tokio::join!(
        client_a.advance_round(room),
        client_b.advance_round(room),
    );
    assert_eq!(ra.unwrap(), Advance::InProgress { index: 1 });
    assert_eq!(rb.unwrap(), Advance::InProgress { index: 1 });

    assert_eq!(game.all_rounds(room).await.len(), 2);
}

#[tokio::test]
async fn test_concurrent_room_creation_yields_unique_codes() {
    let game = Game::new();

    let mut handles = Vec::new();
    for i in 0..50 {
        let client = game.clone();
        handles.push(tokio::spawn(async move {
            client
                .create_room(&format!("Host{i}"), "🙂")
                .await
                .unwrap()
                .code
        }));
    }

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        let code = handle.await.unwrap();
        assert!(codes.insert(code), "two rooms shared a code");
    }
}

// =========================================================================
// Guard behavior through the facade
// =========================================================================

#[tokio::test]
async fn test_join_full_room_and_duplicate_name_rejected() {
    let game = Game::new();
    let created = game.create_room("Ava", "🙂").await.unwrap();
    game.join_room(&created.code, "Ben", "😎").await.unwrap();

    let full = game.join_room(&created.code, "Cleo", "🥳").await;
    assert!(matches!(
        full,
        Err(DuetError::Room(RoomError::RoomFull(_)))
    ));

    // Name clash would be rejected even before the room filled up — shown
    // on a fresh room.
    let created2 = game.create_room("Ava", "🙂").await.unwrap();
    let clash = game.join_room(&created2.code, "Ava", "😎").await;
    assert!(matches!(
        clash,
        Err(DuetError::Room(RoomError::NameTaken(_)))
    ));
}

#[tokio::test]
async fn test_presence_is_derived_from_heartbeat() {
    let game = Game::new();
    let created = game.create_room("Ava", "🙂").await.unwrap();

    game.heartbeat(created.host_player_id).await.unwrap();

    let players = game.players(created.room_id).await;
    let ava = &players[0];
    // Just heartbeated: online by the 20s presence rule.
    assert!(ava.is_online(duet::now_millis()));
    // An observer 21 seconds in the future would see them offline —
    // derived on read, nothing stored.
    assert!(!ava.is_online(duet::now_millis() + 21_000));
}

#[tokio::test]
async fn test_score_summary_unknown_room_rejected() {
    let game = Game::new();
    let result = game.score_summary(RoomId(404)).await;
    assert!(matches!(
        result,
        Err(DuetError::Room(RoomError::RoomNotFound(_)))
    ));
}
