//! Session layer tests: matchmaking, synchronized play and notifications.

use std::sync::{Arc, Mutex};

use lane_skirmish::cards::CardId;
use lane_skirmish::core::{DirectoryError, PlayError, Side, TerminationReason, Winner};
use lane_skirmish::rules::MatchEngine;
use lane_skirmish::session::{
    MatchRegistry, Notification, Notifier, PlayerKey, QueueStatus, SessionDirectory,
};

/// Keeps every notification for inspection.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(PlayerKey, Notification)>>,
}

impl RecordingNotifier {
    fn for_player(&self, player: &str) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p.as_str() == player)
            .map(|(_, n)| n.clone())
            .collect()
    }

    fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, player: &PlayerKey, notification: Notification) {
        self.sent.lock().unwrap().push((player.clone(), notification));
    }
}

fn setup() -> (SessionDirectory, Arc<RecordingNotifier>) {
    let registry = Arc::new(MatchRegistry::new(MatchEngine::standard(), 1234));
    let notifier = Arc::new(RecordingNotifier::default());
    let directory = SessionDirectory::new(registry, notifier.clone());
    (directory, notifier)
}

fn key(name: &str) -> PlayerKey {
    PlayerKey::new(name)
}

fn paired() -> (SessionDirectory, Arc<RecordingNotifier>) {
    let (dir, notifier) = setup();
    dir.enqueue(key("ann"), None).unwrap();
    dir.enqueue(key("bo"), None).unwrap();
    (dir, notifier)
}

/// Pairing notifies both players with their seat and a snapshot.
#[test]
fn test_pairing_notifies_both() {
    let (dir, notifier) = paired();
    let seat = dir.seat(&key("ann")).unwrap();

    let ann = notifier.for_player("ann");
    assert_eq!(
        ann[0],
        Notification::MatchFound {
            match_id: seat.match_id,
            side: Side::A
        }
    );
    assert!(matches!(&ann[1], Notification::SnapshotUpdated(s) if s.perspective == Side::A));

    let bo = notifier.for_player("bo");
    assert!(matches!(bo[0], Notification::MatchFound { side: Side::B, .. }));
}

/// Queue positions are 1-based and shift as players leave.
#[test]
fn test_queue_positions() {
    let (dir, _) = setup();
    dir.enqueue(key("ann"), None).unwrap();
    dir.dequeue(&key("ann")).unwrap();
    dir.enqueue(key("bo"), None).unwrap();

    assert_eq!(
        dir.queue_status(&key("bo")),
        QueueStatus::Queued {
            position: 1,
            queue_size: 1
        }
    );
    assert_eq!(dir.queue_status(&key("ann")), QueueStatus::Idle);
}

/// Three players: the first two are paired, the third waits.
#[test]
fn test_no_double_pairing() {
    let (dir, _) = setup();
    dir.enqueue(key("ann"), None).unwrap();
    dir.enqueue(key("bo"), None).unwrap();
    let status = dir.enqueue(key("cy"), None).unwrap();

    assert!(matches!(status, QueueStatus::Queued { position: 1, .. }));
    assert_eq!(dir.registry().len(), 1);
    assert_eq!(dir.enqueue(key("bo"), None), Err(DirectoryError::AlreadyInMatch));
}

/// Side B must wait for side A, then both alternate.
#[test]
fn test_turn_alternation_through_directory() {
    let (dir, notifier) = paired();
    notifier.clear();

    let early = dir.end_turn(&key("bo")).unwrap();
    assert!(!early.ok);
    assert_eq!(early.reason, Some(PlayError::NotYourTurn));
    assert!(notifier.for_player("bo").is_empty());

    let a_done = dir.end_turn(&key("ann")).unwrap();
    assert!(a_done.ok);
    assert_eq!(a_done.snapshot.current, Some(Side::B));
    assert_eq!(a_done.snapshot.turn, 1);

    let b_done = dir.end_turn(&key("bo")).unwrap();
    assert!(b_done.ok);
    assert_eq!(b_done.snapshot.turn, 2);
    assert_eq!(b_done.snapshot.current, Some(Side::A));

    assert!(notifier
        .for_player("ann")
        .iter()
        .all(|n| matches!(n, Notification::SnapshotUpdated(_))));
    assert_eq!(notifier.for_player("ann").len(), 2);
}

/// On the last turn, both ready ends the match and both hear the result.
#[test]
fn test_synchronized_final_turn() {
    let (dir, notifier) = paired();
    let seat = dir.seat(&key("ann")).unwrap();
    let max_turns = dir.registry().engine().config().max_turns;

    for _ in 1..max_turns {
        dir.end_turn(&key("ann")).unwrap();
        dir.end_turn(&key("bo")).unwrap();
    }
    dir.end_turn(&key("ann")).unwrap();
    notifier.clear();
    let last = dir.end_turn(&key("bo")).unwrap();

    assert!(last.ok);
    assert!(last.snapshot.game_over);
    assert_ne!(last.snapshot.winner, Winner::Undetermined);

    for player in ["ann", "bo"] {
        assert!(notifier
            .for_player(player)
            .iter()
            .any(|n| matches!(n, Notification::MatchComplete { .. })));
    }

    // The finished match is discarded and both seats are free.
    assert!(dir.registry().get(seat.match_id).is_err());
    assert_eq!(dir.queue_status(&key("ann")), QueueStatus::Idle);
    assert_eq!(
        dir.play_card(&key("ann"), 0, 0).unwrap_err(),
        DirectoryError::PlayerNotInMatch
    );
    assert!(dir.enqueue(key("ann"), None).is_ok());
}

/// Back-to-back matches between the same players never pile up in the registry.
#[test]
fn test_finished_matches_are_discarded() {
    let (dir, _) = setup();
    let max_turns = dir.registry().engine().config().max_turns;

    for _ in 0..3 {
        dir.enqueue(key("ann"), None).unwrap();
        dir.enqueue(key("bo"), None).unwrap();
        assert_eq!(dir.registry().len(), 1);

        let mut last = None;
        for _ in 0..max_turns {
            dir.end_turn(&key("ann")).unwrap();
            last = Some(dir.end_turn(&key("bo")).unwrap());
        }
        assert!(last.unwrap().snapshot.game_over);
        assert!(dir.registry().is_empty());
    }
}

/// Leaving terminates the match and tells the opponent.
#[test]
fn test_leave_terminates_for_both() {
    let (dir, notifier) = paired();
    notifier.clear();

    dir.leave(&key("ann")).unwrap();

    assert_eq!(
        notifier.for_player("bo"),
        vec![Notification::MatchTerminated {
            reason: TerminationReason::Abandoned { by: Side::A }
        }]
    );
    assert_eq!(dir.seat(&key("bo")), Err(DirectoryError::PlayerNotInMatch));
    assert_eq!(dir.snapshot(&key("ann")).unwrap_err(), DirectoryError::PlayerNotInMatch);
    assert!(dir.registry().is_empty());
}

/// Playing a card updates both players' views.
#[test]
fn test_play_card_broadcasts() {
    let (dir, notifier) = paired();
    notifier.clear();

    let seat = dir.seat(&key("ann")).unwrap();
    let index = dir
        .registry()
        .with_match(seat.match_id, |engine, state| {
            let wasp = engine.cards().lookup(CardId::new(10)).cloned().unwrap();
            state.add_to_hand(Side::A, &wasp);
            state.hands[Side::A].len() - 1
        })
        .unwrap();
    let outcome = dir.play_card(&key("ann"), index, 0).unwrap();
    assert!(outcome.ok);
    assert_eq!(outcome.snapshot.locations[0].cards[Side::A].len(), 1);

    let bo = notifier.for_player("bo");
    assert!(matches!(&bo[0], Notification::SnapshotUpdated(s) if s.perspective == Side::B));
}
