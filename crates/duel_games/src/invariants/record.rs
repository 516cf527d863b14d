//! Invariants over a single record snapshot.

use super::Invariant;
use crate::GameRecord;
use duel_board::Side;

/// Host and challenger are different accounts.
pub struct DistinctParticipants;

impl Invariant<GameRecord> for DistinctParticipants {
    fn holds(record: &GameRecord) -> bool {
        record.host() != record.challenger()
    }

    fn description() -> &'static str {
        "Host and challenger are distinct"
    }
}

/// The account to move is one of the two participants.
pub struct TurnBelongsToParticipant;

impl Invariant<GameRecord> for TurnBelongsToParticipant {
    fn holds(record: &GameRecord) -> bool {
        record.side_of(*record.turn()).is_some()
    }

    fn description() -> &'static str {
        "Turn belongs to a participant"
    }
}

/// The host moves first, so it leads by at most one mark and never trails.
pub struct MarkBalance;

impl Invariant<GameRecord> for MarkBalance {
    fn holds(record: &GameRecord) -> bool {
        let host = record.board().marks_of(Side::Host);
        let challenger = record.board().marks_of(Side::Challenger);
        host == challenger || host == challenger + 1
    }

    fn description() -> &'static str {
        "Host marks equal challenger marks or lead by one"
    }
}

/// Turn passes after every move: the host is due iff the marks are level.
pub struct TurnFollowsMarks;

impl Invariant<GameRecord> for TurnFollowsMarks {
    fn holds(record: &GameRecord) -> bool {
        let host = record.board().marks_of(Side::Host);
        let challenger = record.board().marks_of(Side::Challenger);
        let due = if host == challenger {
            Side::Host
        } else {
            Side::Challenger
        };
        *record.turn() == record.name_of(due)
    }

    fn description() -> &'static str {
        "Turn matches the number of marks played"
    }
}

/// The stored winner is what the board evaluates to.
pub struct WinnerMatchesBoard;

impl Invariant<GameRecord> for WinnerMatchesBoard {
    fn holds(record: &GameRecord) -> bool {
        *record.winner() == record.evaluate()
    }

    fn description() -> &'static str {
        "Winner agrees with the board"
    }
}
