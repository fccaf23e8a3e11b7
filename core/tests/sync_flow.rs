use loto_regie_core::{
    codec, DisplayMode, DisplayReducer, GameSession, GameTier, SessionAction, StateSnapshot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Minimal stand-in for the operator store's write path: apply an action,
/// stamp a strictly increasing timestamp, serialize the full snapshot the
/// way every propagation channel carries it.
struct Operator {
    session: GameSession,
    rng: StdRng,
    last_timestamp: u64,
}

impl Operator {
    fn new() -> Self {
        Self {
            session: GameSession::default(),
            rng: StdRng::seed_from_u64(0xB1060),
            last_timestamp: 0,
        }
    }

    fn dispatch(&mut self, action: SessionAction) -> Option<String> {
        if !self.session.apply(action, &mut self.rng) {
            return None;
        }
        self.last_timestamp += 1;
        let snapshot = StateSnapshot::new(self.last_timestamp, self.session.clone());
        codec::encode(&snapshot)
    }
}

#[test]
fn display_mirrors_a_five_draw_quine_round() {
    let mut operator = Operator::new();
    let mut published = Vec::new();

    published.extend(operator.dispatch(SessionAction::StartGame(GameTier::Quine)));
    for _ in 0..5 {
        published.extend(operator.dispatch(SessionAction::DrawNumber));
        published.extend(operator.dispatch(SessionAction::DrawFinished));
    }

    // A display attaches late and receives every published payload, each one
    // duplicated over the redundant channels and shuffled out of order.
    let mut reducer = DisplayReducer::new();
    for raw in published.iter().rev() {
        let snapshot: StateSnapshot = codec::decode(raw).unwrap();
        reducer.apply(snapshot);
    }
    for raw in &published {
        let snapshot: StateSnapshot = codec::decode(raw).unwrap();
        reducer.apply(snapshot);
    }

    assert_eq!(reducer.session().drawn_numbers.len(), 5);
    assert_eq!(reducer.session().current_game, Some(GameTier::Quine));
    assert!(reducer.session().with_demarque);
    assert_eq!(reducer.mode(), DisplayMode::NumberGrid);
    assert_eq!(reducer.session(), &operator.session);
}

#[test]
fn rejected_actions_publish_nothing() {
    let mut operator = Operator::new();
    operator.dispatch(SessionAction::StartGame(GameTier::Quine));
    assert!(operator.dispatch(SessionAction::DrawNumber).is_some());
    // Second draw while the ball animation runs: no state change, no payload.
    assert!(operator.dispatch(SessionAction::DrawNumber).is_none());
}

#[test]
fn late_display_catches_up_from_a_single_snapshot() {
    let mut operator = Operator::new();
    let mut latest = None;
    latest = operator.dispatch(SessionAction::ToggleWheelMode).or(latest);
    latest = operator.dispatch(SessionAction::SetWheelPrize("jambon".into())).or(latest);
    latest = operator.dispatch(SessionAction::SpinWheel).or(latest);

    let mut reducer = DisplayReducer::new();
    let snapshot: StateSnapshot = codec::decode(&latest.unwrap()).unwrap();
    assert!(reducer.apply(snapshot));
    assert_eq!(reducer.mode(), DisplayMode::Wheel);
    assert!(reducer.session().is_wheel_spinning);
    assert_eq!(reducer.session().wheel_active_prize, "jambon");
}
