//! End-to-end scenarios: an editable record driven through its lifecycle
//! and order events fanned out to services.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use turnstile::builder::TransitionTableBuilder;
use turnstile::core::{ChangeState, StateHolder, StateId, StateSet, TransitionParam};
use turnstile::notification::{Event, NotificationBus, Publisher};
use turnstile::transition::{FnCommand, NoCommand, RejectCommand, TransitionEngine};
use turnstile::{state_ids, BoxError};

state_ids! {
    enum EditState {
        NoState,
        ReadOnly,
        Add,
    }
}

#[derive(Default)]
struct Record {
    state: StateId,
    param: Option<TransitionParam>,
    flag: bool,
    log: Vec<String>,
}

impl StateHolder for Record {
    fn state(&self) -> StateId {
        self.state
    }

    fn set_state(&mut self, state: StateId) {
        self.state = state;
    }

    fn transition_param(&self) -> Option<&TransitionParam> {
        self.param.as_ref()
    }

    fn set_transition_param(&mut self, param: Option<TransitionParam>) {
        self.param = param;
    }
}

fn record_engine() -> TransitionEngine<Record> {
    let open = FnCommand::new()
        .before(|r: &mut Record| {
            r.flag = true;
            Ok(())
        })
        .after(|r: &mut Record| {
            let entered = EditState::from_id(r.state()).map_or("?", EditState::name);
            r.log.push(format!("entered {entered}"));
            Ok(())
        });

    let table = TransitionTableBuilder::for_states::<EditState>()
        .on(EditState::NoState, EditState::ReadOnly, open)
        .on(EditState::ReadOnly, EditState::Add, RejectCommand::default())
        .same_state(NoCommand)
        .otherwise(NoCommand)
        .build()
        .unwrap();
    TransitionEngine::new(table)
}

#[test]
fn record_moves_to_read_only_and_refuses_add() {
    let engine = record_engine();
    let mut record = Record::default();

    engine
        .do_transition(EditState::ReadOnly, &mut record)
        .unwrap();
    assert_eq!(record.state(), StateId::from(EditState::ReadOnly));
    assert!(record.flag);
    assert_eq!(record.log, vec!["entered ReadOnly"]);

    let outcome = engine.do_transition(EditState::Add, &mut record).unwrap();
    assert!(outcome.is_rejected());
    assert_eq!(record.state(), StateId::from(EditState::ReadOnly));
}

#[test]
fn record_changes_its_own_state() {
    let engine = record_engine();
    let mut record = Record::default();

    assert!(record
        .change_state_to(&engine, EditState::ReadOnly)
        .unwrap()
        .is_applied());
    assert!(record
        .change_state_to(&engine, EditState::ReadOnly)
        .unwrap()
        .is_applied());
    assert_eq!(record.log.len(), 1);
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = record_engine();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut record = Record::default();
                engine
                    .do_transition(EditState::ReadOnly, &mut record)
                    .unwrap();
                assert_eq!(record.state(), StateId::from(EditState::ReadOnly));
            });
        }
    });
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum EventKind {
    OrderCreated,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ServiceKind {
    OrderService,
    InventoryService,
}

trait DomainEvent: Event<Tag = EventKind> {
    fn order_id(&self) -> u64;
}

struct OrderCreated {
    order_id: u64,
}

impl Event for OrderCreated {
    type Tag = EventKind;

    fn event_tag(&self) -> EventKind {
        EventKind::OrderCreated
    }
}

impl DomainEvent for OrderCreated {
    fn order_id(&self) -> u64 {
        self.order_id
    }
}

struct OrderService;

impl Publisher for OrderService {
    type Tag = ServiceKind;

    fn publisher_tag(&self) -> ServiceKind {
        ServiceKind::OrderService
    }
}

struct InventoryService;

impl Publisher for InventoryService {
    type Tag = ServiceKind;

    fn publisher_tag(&self) -> ServiceKind {
        ServiceKind::InventoryService
    }
}

type DynEvent = dyn DomainEvent;
type DynPublisher = dyn Publisher<Tag = ServiceKind>;
type DomainBus = NotificationBus<DynEvent, DynPublisher>;

#[test]
fn order_created_reaches_only_order_service_subscribers() {
    let bus = DomainBus::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    bus.subscribe_fn(
        EventKind::OrderCreated,
        ServiceKind::OrderService,
        move |_: &DynEvent, _: &DynPublisher| -> Result<(), BoxError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    );

    let event = OrderCreated { order_id: 11 };
    assert_eq!(bus.publish(&event, &OrderService).unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(bus.publish(&event, &InventoryService).unwrap(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn subscribers_see_the_event_instance() {
    let bus = DomainBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe_fn(
        EventKind::OrderCreated,
        ServiceKind::InventoryService,
        move |event: &DynEvent,
              publisher: &DynPublisher|
              -> Result<(), BoxError> {
            sink.lock().push((event.order_id(), publisher.publisher_tag()));
            Ok(())
        },
    );

    bus.publish(&OrderCreated { order_id: 3 }, &InventoryService)
        .unwrap();
    bus.publish(&OrderCreated { order_id: 4 }, &InventoryService)
        .unwrap();

    assert_eq!(
        *seen.lock(),
        vec![
            (3, ServiceKind::InventoryService),
            (4, ServiceKind::InventoryService)
        ]
    );
}

#[test]
fn concurrent_registration_on_distinct_pairs_loses_nothing() {
    let bus = DomainBus::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            bus.subscribe_fn(
                EventKind::OrderCreated,
                ServiceKind::OrderService,
                |_: &DynEvent, _: &DynPublisher| -> Result<(), BoxError> {
                    Ok(())
                },
            );
        });
        scope.spawn(|| {
            bus.subscribe_fn(
                EventKind::OrderCreated,
                ServiceKind::InventoryService,
                |_: &DynEvent, _: &DynPublisher| -> Result<(), BoxError> {
                    Ok(())
                },
            );
        });
    });

    assert_eq!(
        bus.subscriber_count(EventKind::OrderCreated, ServiceKind::OrderService),
        1
    );
    assert_eq!(
        bus.subscriber_count(EventKind::OrderCreated, ServiceKind::InventoryService),
        1
    );
}
