use cardthropic_rules::{EngineCommand, EngineConfig, GameMode, Session, SnapshotError};

#[test]
fn session_survives_encode_decode_mid_game() {
    let config = EngineConfig::from_toml_str("auto_move_enabled = false\nklondike_draw_mode = 3")
        .unwrap();
    let mut session = Session::new(GameMode::Klondike, Some(2024), config);

    for _ in 0..5 {
        let Some(command) = session.runtime().valid_commands().into_iter().next() else {
            break;
        };
        assert!(session.apply(command));
    }
    let moves_played = session.runtime().move_count();

    let encoded = session.encode().unwrap();
    let restored = Session::decode(&encoded, EngineConfig::default()).unwrap();

    assert_eq!(restored.mode(), GameMode::Klondike);
    assert_eq!(restored.seed(), 2024);
    assert_eq!(restored.runtime(), session.runtime());
    assert_eq!(restored.runtime().move_count(), moves_played);
    assert!(!restored.config().auto_move_enabled);
}

#[test]
fn undo_walks_back_to_the_deal() {
    let mut session = Session::new(GameMode::Spider, Some(5), EngineConfig::default());
    let dealt = session.runtime().clone();

    let mut applied = 0;
    for _ in 0..10 {
        let commands = session.runtime().valid_commands();
        let Some(command) = commands.last().copied() else {
            break;
        };
        assert!(session.apply(command));
        applied += 1;
    }
    assert_eq!(session.undo_depth(), applied);

    while session.undo() {}
    assert_eq!(session.runtime(), &dealt);

    while session.redo() {}
    assert_eq!(session.undo_depth(), applied);
    assert!(session.runtime().validate_game());
}

#[test]
fn decode_rejects_foreign_mode_and_garbage() {
    let config = EngineConfig::default();
    assert!(matches!(
        Session::decode("", config),
        Err(SnapshotError::MissingField("v"))
    ));
    assert!(matches!(
        Session::decode("v=1\nmode=golf\nseed=3\ngame={}", config),
        Err(SnapshotError::UnknownMode(_))
    ));
    assert!(matches!(
        Session::decode("v=1\nmode=klondike\nseed=3\ngame=[", config),
        Err(SnapshotError::Json(_))
    ));
    assert!(matches!(
        Session::decode("v=1\nmode=klondike\nseed=3", config),
        Err(SnapshotError::MissingField("game"))
    ));
}

#[test]
fn commands_for_other_variants_are_rejected_without_an_undo_step() {
    let mut session = Session::new(GameMode::Freecell, Some(9), EngineConfig::default());
    assert!(!session.apply(EngineCommand::DrawFromStock));
    assert!(!session.apply(EngineCommand::DealFromStock));
    assert!(!session.can_undo());
}
