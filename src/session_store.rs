use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use js_sys::Date;
use rand::rngs::OsRng;

use loto_regie_core::{
    GameSession, SessionAction, StateSnapshot, DRAW_ANIMATION_MS, WHEEL_SPIN_MS,
};

use crate::local_state;
use crate::sync_channel::SyncPublisher;

pub(crate) type StoreSubscriber = Rc<dyn Fn()>;

/// The canonical session, owned by the operator tab. Every applied action
/// is persisted and fanned out with a strictly increasing timestamp; the
/// cosmetic draw/spin timers dispatch their completion actions here too.
pub(crate) struct SessionStore {
    session: RefCell<GameSession>,
    last_timestamp: Cell<u64>,
    subscribers: RefCell<Vec<(u64, StoreSubscriber)>>,
    next_subscriber_id: Cell<u64>,
    publisher: SyncPublisher,
    draw_timer: RefCell<Option<Timeout>>,
    spin_timer: RefCell<Option<Timeout>>,
}

pub(crate) struct StoreSubscription {
    store: Rc<SessionStore>,
    id: u64,
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.store
            .subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}

impl SessionStore {
    /// Restore the persisted session (or defaults) and start publishing.
    pub(crate) fn bootstrap() -> Rc<Self> {
        let (session, last_timestamp) = match local_state::load_state() {
            Some(snapshot) => {
                let mut session = snapshot.session;
                // No timer survives a reload; pending animations are settled.
                session.settle_transients();
                (session, snapshot.timestamp)
            }
            None => (GameSession::default(), 0),
        };
        let store = Rc::new(Self {
            session: RefCell::new(session),
            last_timestamp: Cell::new(last_timestamp),
            subscribers: RefCell::new(Vec::new()),
            next_subscriber_id: Cell::new(0),
            publisher: SyncPublisher::new(),
            draw_timer: RefCell::new(None),
            spin_timer: RefCell::new(None),
        });
        // Publishing on boot lets an already open display resync at once.
        store.publish();
        store
    }

    pub(crate) fn session(&self) -> GameSession {
        self.session.borrow().clone()
    }

    pub(crate) fn subscribe(self: &Rc<Self>, subscriber: StoreSubscriber) -> StoreSubscription {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, subscriber));
        StoreSubscription {
            store: self.clone(),
            id,
        }
    }

    pub(crate) fn dispatch(self: &Rc<Self>, action: SessionAction) {
        let starts_draw = matches!(
            action,
            SessionAction::DrawNumber | SessionAction::DrawManualNumber(_)
        );
        let starts_spin = matches!(action, SessionAction::SpinWheel);

        let changed = self.session.borrow_mut().apply(action, &mut OsRng);
        if !changed {
            return;
        }

        if starts_draw && self.session.borrow().is_drawing {
            let store = self.clone();
            *self.draw_timer.borrow_mut() = Some(Timeout::new(DRAW_ANIMATION_MS, move || {
                store.draw_timer.borrow_mut().take();
                store.dispatch(SessionAction::DrawFinished);
            }));
        }
        if starts_spin && self.session.borrow().is_wheel_spinning {
            let store = self.clone();
            *self.spin_timer.borrow_mut() = Some(Timeout::new(WHEEL_SPIN_MS, move || {
                store.spin_timer.borrow_mut().take();
                store.dispatch(SessionAction::WheelSpinFinished);
            }));
        }

        self.publish();
        self.notify();
    }

    fn publish(&self) {
        let snapshot = StateSnapshot::new(self.next_timestamp(), self.session.borrow().clone());
        local_state::save_state(&snapshot);
        self.publisher.publish(&snapshot);
    }

    /// Strictly increasing even if the wall clock stalls or steps backwards.
    fn next_timestamp(&self) -> u64 {
        let now = Date::now() as u64;
        let next = now.max(self.last_timestamp.get() + 1);
        self.last_timestamp.set(next);
        next
    }

    fn notify(&self) {
        let subscribers: Vec<StoreSubscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber();
        }
    }
}
