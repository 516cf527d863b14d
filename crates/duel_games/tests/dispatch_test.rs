//! End-to-end tests driving the engine through raw action payloads.

use duel_games::{
    DispatchError, Dispatched, Dispatcher, EngineError, GameKey, GameMachine, MemoryStore, Name,
    SignerSet, Verb, Winner,
};

fn name(s: &str) -> Name {
    s.parse().expect("valid name")
}

/// Concatenates fixed-width little-endian fields the way the wire carries them.
fn start_bytes(challenger: Name, host: Name) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&challenger.raw().to_le_bytes());
    bytes.extend_from_slice(&host.raw().to_le_bytes());
    bytes
}

fn advance_bytes(challenger: Name, host: Name, by: Name, row: u32, column: u32) -> Vec<u8> {
    let mut bytes = start_bytes(challenger, host);
    bytes.extend_from_slice(&by.raw().to_le_bytes());
    bytes.extend_from_slice(&row.to_le_bytes());
    bytes.extend_from_slice(&column.to_le_bytes());
    bytes
}

fn dispatcher() -> Dispatcher<MemoryStore> {
    Dispatcher::new(name("tictactoe"), GameMachine::new(MemoryStore::new()))
}

#[test]
fn test_scenario_over_wire() {
    let (a, b) = (name("a"), name("b"));
    let mut d = dispatcher();

    // start(a, b): challenger a, host b
    let outcome = d
        .invoke(b, Verb::Start.tag(), &start_bytes(a, b))
        .expect("Start failed");
    assert_eq!(outcome, Dispatched::Handled(Verb::Start));

    for (by, row, column) in [(b, 0, 0), (a, 1, 1), (b, 0, 1), (a, 2, 2), (b, 0, 2)] {
        let outcome = d
            .invoke(by, Verb::Advance.tag(), &advance_bytes(a, b, by, row, column))
            .expect("Move failed");
        assert_eq!(outcome, Dispatched::Handled(Verb::Advance));
    }

    let record = d.machine().game(GameKey::new(b, a)).unwrap();
    assert_eq!(*record.winner(), Winner::Player(b));

    let late = d.invoke(a, Verb::Advance.tag(), &advance_bytes(a, b, a, 2, 0));
    assert!(matches!(
        late,
        Err(DispatchError::Engine(EngineError::GameOver { .. }))
    ));
}

#[test]
fn test_move_signed_by_someone_else() {
    let (a, b) = (name("a"), name("b"));
    let mut d = dispatcher();
    d.invoke(b, Verb::Start.tag(), &start_bytes(a, b)).unwrap();

    let result = d.invoke(a, Verb::Advance.tag(), &advance_bytes(a, b, b, 0, 0));
    assert!(matches!(
        result,
        Err(DispatchError::Engine(EngineError::Unauthorized(_)))
    ));
}

#[test]
fn test_multiple_signers_accepted() {
    let (a, b) = (name("a"), name("b"));
    let contract = name("tictactoe");
    let mut d = dispatcher();
    let both = SignerSet::new([a, b]);

    d.apply(contract, &both, Verb::Start.tag(), &start_bytes(a, b))
        .unwrap();
    d.apply(
        contract,
        &both,
        Verb::Advance.tag(),
        &advance_bytes(a, b, b, 1, 1),
    )
    .unwrap();

    let record = d.machine().game(GameKey::new(b, a)).unwrap();
    assert_eq!(*record.turn(), a);
}

#[test]
fn test_trailing_bytes_rejected() {
    let (a, b) = (name("a"), name("b"));
    let mut d = dispatcher();
    let mut payload = start_bytes(a, b);
    payload.push(0);

    let result = d.invoke(b, Verb::Start.tag(), &payload);
    assert!(matches!(result, Err(DispatchError::Payload(_))));
    assert!(d.machine().store().is_empty());
}

#[test]
fn test_truncated_payload_rejected() {
    let (a, b) = (name("a"), name("b"));
    let mut d = dispatcher();
    d.invoke(b, Verb::Start.tag(), &start_bytes(a, b)).unwrap();

    let mut payload = advance_bytes(a, b, b, 0, 0);
    payload.truncate(28);
    let result = d.invoke(b, Verb::Advance.tag(), &payload);
    assert!(matches!(result, Err(DispatchError::Payload(_))));
}

#[test]
fn test_unknown_verb_leaves_store_alone() {
    let (a, b) = (name("a"), name("b"));
    let mut d = dispatcher();
    let result = d.invoke(b, name("resign"), &start_bytes(a, b));
    assert_eq!(result.unwrap(), Dispatched::Ignored);
    assert!(d.machine().store().is_empty());
}
