use loto_regie_core::{
    DisplayMode, DisplayReducer, GameSession, GameTier, SessionAction, StateSnapshot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn snapshot_with_game(timestamp: u64, tier: GameTier) -> StateSnapshot {
    let mut rng = StdRng::seed_from_u64(timestamp);
    let mut session = GameSession::default();
    session.apply(SessionAction::StartGame(tier), &mut rng);
    StateSnapshot::new(timestamp, session)
}

#[test]
fn out_of_order_delivery_keeps_the_newest_state() {
    let older = snapshot_with_game(5, GameTier::Quine);
    let newer = snapshot_with_game(10, GameTier::DoubleQuine);

    let mut reducer = DisplayReducer::new();
    assert!(reducer.apply(newer.clone()));
    assert!(!reducer.apply(older));

    assert_eq!(reducer.session().current_game, Some(GameTier::DoubleQuine));
    assert_eq!(reducer.last_applied(), 10);
}

#[test]
fn duplicate_delivery_is_idempotent() {
    let snapshot = snapshot_with_game(7, GameTier::Quine);
    let mut reducer = DisplayReducer::new();
    assert!(reducer.apply(snapshot.clone()));
    // The same write arrives again over the other channels.
    assert!(!reducer.apply(snapshot.clone()));
    assert!(!reducer.apply(snapshot));
    assert_eq!(reducer.last_applied(), 7);
}

#[test]
fn zero_timestamp_snapshot_is_never_applied() {
    let mut reducer = DisplayReducer::new();
    assert!(!reducer.apply(snapshot_with_game(0, GameTier::Quine)));
    assert_eq!(reducer.session().current_game, None);
}

#[test]
fn mode_prefers_image_then_wheel_then_grid() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut session = GameSession::default();
    assert_eq!(loto_regie_core::display_mode(&session), DisplayMode::NumberGrid);

    session.apply(SessionAction::ToggleWheelMode, &mut rng);
    assert_eq!(loto_regie_core::display_mode(&session), DisplayMode::Wheel);

    session.apply(
        SessionAction::AddImage {
            id: "img-1".into(),
            name: "a.png".into(),
            data_url: "data:,".into(),
        },
        &mut rng,
    );
    session.apply(SessionAction::SelectImage(Some("img-1".into())), &mut rng);
    session.apply(SessionAction::ToggleImageDisplay, &mut rng);
    assert_eq!(loto_regie_core::display_mode(&session), DisplayMode::ImageSlide);
}

#[test]
fn image_mode_without_resolvable_image_falls_back() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut session = GameSession::default();
    session.apply(SessionAction::ToggleImageDisplay, &mut rng);
    // Projection flag is on but nothing is selected.
    assert_eq!(loto_regie_core::display_mode(&session), DisplayMode::NumberGrid);
}
