use loto_regie_core::snapshot::parse_saved;
use loto_regie_core::{codec, GameSession, GameTier, SessionAction, StateSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn populated_session() -> GameSession {
    let mut rng = StdRng::seed_from_u64(99);
    let mut session = GameSession::default();
    session.apply(
        SessionAction::SetPrizeDescriptions {
            quine: "ham".into(),
            double_quine: "basket".into(),
            carton_plein: "tv".into(),
        },
        &mut rng,
    );
    session.apply(SessionAction::StartGame(GameTier::Quine), &mut rng);
    for _ in 0..5 {
        session.apply(SessionAction::DrawNumber, &mut rng);
        session.apply(SessionAction::DrawFinished, &mut rng);
    }
    session.apply(
        SessionAction::AddImage {
            id: "img-1".into(),
            name: "sponsor.png".into(),
            data_url: "data:image/png;base64,AAAA".into(),
        },
        &mut rng,
    );
    session
}

#[test]
fn storage_round_trip_is_field_equal_except_images() {
    let session = populated_session();
    let snapshot = StateSnapshot::new(1234, session.clone());

    let raw = codec::encode(&snapshot.for_storage()).unwrap();
    let restored = parse_saved(&raw).unwrap();

    assert_eq!(restored.timestamp, 1234);
    let mut expected = session;
    expected.local_images.clear();
    assert_eq!(restored.session, expected);
}

#[test]
fn wire_round_trip_carries_images() {
    let snapshot = StateSnapshot::new(1, populated_session());
    let raw = codec::encode(&snapshot).unwrap();
    let restored: StateSnapshot = codec::decode(&raw).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn wire_format_is_flat_camel_case_json() {
    let snapshot = StateSnapshot::new(42, populated_session());
    let raw = codec::encode(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "timestamp",
        "currentGame",
        "drawnNumbers",
        "isDrawing",
        "gameHistory",
        "isBingoMode",
        "withDemarque",
        "isQuinesDuSudMode",
        "prizeDescriptions",
        "isWinning",
        "isWheelMode",
        "wheelNumberCount",
        "wheelTargetRotation",
        "wheelCurrentRotation",
        "localImages",
        "selectedImageId",
        "isImageDisplayMode",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert_eq!(object["currentGame"], "quine");
}

#[test]
fn quota_reduction_drops_exactly_the_history_arrays() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = populated_session();
    session.apply(SessionAction::EndGame, &mut rng);
    session.apply(SessionAction::SpinWheel, &mut rng);
    session.apply(SessionAction::WheelSpinFinished, &mut rng);
    session.apply(SessionAction::SpinWheel, &mut rng);
    assert!(!session.game_history.is_empty());
    assert!(!session.wheel_draw_history.is_empty());

    let snapshot = StateSnapshot::new(9, session);
    let reduced = snapshot.reduced_for_quota();

    assert!(reduced.session.game_history.is_empty());
    assert!(reduced.session.wheel_draw_history.is_empty());
    let mut expected = snapshot.for_storage();
    expected.session.game_history.clear();
    expected.session.wheel_draw_history.clear();
    assert_eq!(reduced, expected);
}

#[test]
fn missing_fields_merge_over_defaults() {
    let restored = parse_saved(r#"{"timestamp":3,"drawnNumbers":[4,8],"isBingoMode":true}"#).unwrap();
    assert_eq!(restored.timestamp, 3);
    assert_eq!(restored.session.drawn_numbers, vec![4, 8]);
    assert!(restored.session.is_bingo_mode);
    // Everything absent falls back to defaults.
    assert!(restored.session.with_demarque);
    assert!(restored.session.is_manual_mode);
    assert_eq!(restored.session.current_game, None);
    assert_eq!(restored.session.wheel_number_count, 20);
}

#[test]
fn missing_timestamp_defaults_to_zero() {
    let restored = parse_saved("{}").unwrap();
    assert_eq!(restored.timestamp, 0);
    assert_eq!(restored.session, GameSession::default());
}

#[test]
fn non_list_junk_in_list_fields_coerces_to_empty() {
    let restored = parse_saved(
        r#"{"timestamp":1,"drawnNumbers":"oops","gameHistory":42,"wheelDrawHistory":{},"localImages":null}"#,
    )
    .unwrap();
    assert!(restored.session.drawn_numbers.is_empty());
    assert!(restored.session.game_history.is_empty());
    assert!(restored.session.wheel_draw_history.is_empty());
    assert!(restored.session.local_images.is_empty());
}

#[test]
fn unreadable_list_entries_are_skipped() {
    let restored = parse_saved(
        r#"{"timestamp":1,"drawnNumbers":[1,"x",2,null,3],"gameHistory":[{"type":"quine","numbers":[9]},{"bogus":true}]}"#,
    )
    .unwrap();
    assert_eq!(restored.session.drawn_numbers, vec![1, 2, 3]);
    assert_eq!(restored.session.game_history.len(), 1);
    assert_eq!(restored.session.game_history[0].numbers, vec![9]);
}

#[test]
fn unknown_fields_are_ignored() {
    let restored = parse_saved(r#"{"timestamp":2,"someFutureField":{"nested":true}}"#).unwrap();
    assert_eq!(restored.timestamp, 2);
}

#[test]
fn corrupt_json_parses_to_none() {
    assert!(parse_saved("not json at all").is_none());
    assert!(parse_saved(r#"["a","list"]"#).is_none());
    assert!(parse_saved("").is_none());
}
