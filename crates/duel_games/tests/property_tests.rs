//! Property-based tests for the game state machine.
//!
//! Random move sequences, including out-of-turn, outsider and out-of-range
//! attempts, are replayed against a fresh game.

use duel_games::{
    Advance, GameKey, GameMachine, GameRecord, MemoryStore, Name, SignerSet, Start, Winner,
    evaluate,
};
use proptest::prelude::*;

const HOST: Name = Name::from_static("alice");
const CHALLENGER: Name = Name::from_static("bob");
const OUTSIDER: Name = Name::from_static("carol");

prop_compose! {
    fn arbitrary_move()(who in 0..3u8, row in 0..4u32, column in 0..4u32) -> Advance {
        let by = match who {
            0 => HOST,
            1 => CHALLENGER,
            _ => OUTSIDER,
        };
        Advance { challenger: CHALLENGER, host: HOST, by, row, column }
    }
}

fn fresh() -> GameMachine<MemoryStore> {
    let mut machine = GameMachine::new(MemoryStore::new());
    machine
        .start(
            &SignerSet::single(HOST),
            &Start {
                challenger: CHALLENGER,
                host: HOST,
            },
        )
        .expect("Start failed");
    machine
}

fn current(machine: &GameMachine<MemoryStore>) -> GameRecord {
    machine
        .game(GameKey::new(HOST, CHALLENGER))
        .expect("Game missing")
}

proptest! {
    #[test]
    fn successful_move_marks_exactly_one_cell(moves in prop::collection::vec(arbitrary_move(), 0..40)) {
        let mut machine = fresh();
        for action in moves {
            let before = current(&machine);
            let result = machine.advance(&SignerSet::single(action.by), &action);
            let after = current(&machine);

            match result {
                Ok(returned) => {
                    prop_assert_eq!(returned, after);
                    prop_assert_eq!(after.board().marked(), before.board().marked() + 1);
                    for (old, new) in before.board().cells().iter().zip(after.board().cells()) {
                        if !old.is_empty() {
                            prop_assert_eq!(old, new);
                        }
                    }
                }
                Err(_) => {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }

    #[test]
    fn winner_always_matches_board(moves in prop::collection::vec(arbitrary_move(), 0..40)) {
        let mut machine = fresh();
        for action in moves {
            let _ = machine.advance(&SignerSet::single(action.by), &action);
            let record = current(&machine);
            let expected = Winner::from_outcome(evaluate(record.board()), HOST, CHALLENGER);
            prop_assert_eq!(*record.winner(), expected);
        }
    }

    #[test]
    fn turn_stays_with_participants(moves in prop::collection::vec(arbitrary_move(), 0..40)) {
        let mut machine = fresh();
        for action in moves {
            let _ = machine.advance(&SignerSet::single(action.by), &action);
            let record = current(&machine);
            prop_assert!(*record.turn() == HOST || *record.turn() == CHALLENGER);
            let host_marks = record.board().marks_of(duel_games::Side::Host);
            let challenger_marks = record.board().marks_of(duel_games::Side::Challenger);
            prop_assert!(host_marks == challenger_marks || host_marks == challenger_marks + 1);
        }
    }
}
