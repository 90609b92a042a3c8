use std::sync::Arc;

use logging::capture::with_capture;
use logic_engine::{
    Dispatch, Dispatcher, LifecycleEvent, LifecycleNotifier, LifecycleState, Observer,
    RouteTable, Scenario, ServiceBroker, ServiceHandle, WorkflowCategory,
    test_support::{RecordingExecutor, handle_with},
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Shared record of tagged notifications.
type TagLog = Arc<Mutex<Vec<(&'static str, Option<usize>)>>>;

/// Observer that appends a tag and the notified handle's address to `log`.
fn tagged_observer(tag: &'static str, log: &TagLog) -> Observer {
    let log = Arc::clone(log);
    Arc::new(move |h: Option<Arc<ServiceHandle>>| {
        log.lock().push((tag, h.map(|h| Arc::as_ptr(&h) as usize)));
    })
}

fn addr(h: &Arc<ServiceHandle>) -> Option<usize> {
    Some(Arc::as_ptr(h) as usize)
}

#[test]
fn dispatch_before_start_is_a_quiet_no_op() {
    let broker = Arc::new(ServiceBroker::new());
    let exec = RecordingExecutor::new();
    let _handle = handle_with(&broker, &exec).unwrap();

    let (out, logs) = with_capture(|| broker.dispatch("/buy1"));
    assert_eq!(out.unwrap(), Dispatch::Unavailable);
    assert!(exec.runs().is_empty());
    assert!(logs.any(|r| r.level == "WARN" && r.message == "dispatch_without_service"));
}

#[test]
fn dispatch_after_start_runs_label_once() {
    let broker = Arc::new(ServiceBroker::new());
    let exec = RecordingExecutor::new();
    let handle = handle_with(&broker, &exec).unwrap();

    assert!(handle.start(Scenario::smart(7)));
    let out = broker.dispatch("/sell1").unwrap();
    assert_eq!(out.category(), WorkflowCategory::TradeExecution);
    assert_eq!(exec.runs(), vec!["SELL"]);
}

#[test]
fn unknown_key_emits_diagnostic_only() {
    let broker = Arc::new(ServiceBroker::new());
    let exec = RecordingExecutor::new();
    let handle = handle_with(&broker, &exec).unwrap();
    handle.start(Scenario::dumb());

    let (out, logs) = with_capture(|| broker.dispatch("/doesnotexist"));
    assert_eq!(out.unwrap(), Dispatch::UnknownKey);
    assert!(exec.runs().is_empty());
    assert_eq!(logs.count_message("unknown_logic_key"), 1);
}

#[test]
fn observer_replacement() {
    let broker = Arc::new(ServiceBroker::new());
    let h1 = handle_with(&broker, &RecordingExecutor::new()).unwrap();
    let h2 = handle_with(&broker, &RecordingExecutor::new()).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));

    broker.register_observer(Some(tagged_observer("A", &log)));
    broker.set_service(Some(h1.clone()));
    broker.register_observer(Some(tagged_observer("B", &log)));
    broker.set_service(Some(h2.clone()));

    assert_eq!(
        *log.lock(),
        vec![
            ("A", None),
            ("A", addr(&h1)),
            ("B", addr(&h1)),
            ("B", addr(&h2)),
        ]
    );
}

#[test]
fn start_is_idempotent_for_observers() {
    let broker = Arc::new(ServiceBroker::new());
    let handle = handle_with(&broker, &RecordingExecutor::new()).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    broker.register_observer(Some(tagged_observer("ui", &log)));

    assert!(handle.start(Scenario::smart(7)));
    assert!(!handle.start(Scenario::smart(7)));
    assert_eq!(*log.lock(), vec![("ui", None), ("ui", addr(&handle))]);
    assert_eq!(handle.status().state, LifecycleState::Running);
}

#[test]
fn stop_then_release_leaves_broker_idle() {
    // From running.
    let broker = Arc::new(ServiceBroker::new());
    let handle = handle_with(&broker, &RecordingExecutor::new()).unwrap();
    handle.start(Scenario::smart(1));
    handle.stop();
    handle.release();
    assert!(!broker.is_available());
    assert_eq!(handle.status().state, LifecycleState::Idle);

    // From idle.
    let fresh = handle_with(&broker, &RecordingExecutor::new()).unwrap();
    fresh.stop();
    fresh.release();
    assert!(!broker.is_available());
}

#[test]
fn release_while_running_notifies_absent() {
    let broker = Arc::new(ServiceBroker::new());
    let handle = handle_with(&broker, &RecordingExecutor::new()).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    broker.register_observer(Some(tagged_observer("ui", &log)));
    handle.start(Scenario::dumb());
    handle.release();
    assert_eq!(log.lock().last(), Some(&("ui", None)));
}

#[test]
fn executor_failure_reaches_the_caller() {
    let broker = Arc::new(ServiceBroker::new());
    let exec = RecordingExecutor::new().fail_on("Free Exploration");
    let handle = handle_with(&broker, &exec).unwrap();
    handle.start(Scenario::dumb());

    let err = broker.dispatch("/free").unwrap_err();
    assert_eq!(err.to_string(), "executor failed on 'Free Exploration'");
    // The service keeps running; the failure is the executor's business.
    assert!(broker.is_available());
}

#[test]
fn dispatch_in_flight_is_not_rolled_back_by_stop() {
    let broker = Arc::new(ServiceBroker::new());
    let exec = RecordingExecutor::new();
    let handle = handle_with(&broker, &exec).unwrap();
    handle.start(Scenario::dumb());

    // The UI resolved the handle before the service stopped itself.
    let resolved = broker.current().unwrap();
    handle.stop();
    assert!(matches!(
        resolved.execute_logic_key("/buy1"),
        Ok(Dispatch::Executed(_))
    ));
    assert_eq!(exec.runs(), vec!["BUY"]);
    assert_eq!(broker.dispatch("/buy1").unwrap(), Dispatch::Unavailable);
}

#[test]
fn configured_routes_extend_dispatch() {
    let cfg = config::load_from_str(
        r#"(routes: [(key: "/scan", category: CurrencySearch, label: "Scan Currencies")])"#,
        None,
    )
    .unwrap();
    let broker = Arc::new(ServiceBroker::new());
    let exec = RecordingExecutor::new();
    let handle = ServiceHandle::new(
        &broker,
        Dispatcher::new(Arc::new(RouteTable::with_extra(&cfg.routes).unwrap())),
        Arc::new(exec.clone()),
        LifecycleNotifier::disabled(),
    );
    handle.start(cfg.scenario.into());
    broker.dispatch("/scan").unwrap();
    broker.dispatch("/cplist").unwrap();
    assert_eq!(exec.runs(), vec!["Scan Currencies", "Open Currency List"]);
}

#[tokio::test]
async fn host_observes_lifecycle_from_another_task() {
    let broker = Arc::new(ServiceBroker::new());
    let (tx, mut rx) = mpsc::channel(4);
    let handle = ServiceHandle::new(
        &broker,
        Dispatcher::new(Arc::new(RouteTable::builtin().unwrap())),
        Arc::new(RecordingExecutor::new()),
        LifecycleNotifier::new(tx),
    );

    let service = Arc::clone(&handle);
    tokio::task::spawn_blocking(move || {
        service.start(Scenario::smart(42));
        service.stop();
        service.release();
    })
    .await
    .unwrap();

    assert_eq!(
        rx.recv().await,
        Some(LifecycleEvent::Started(Scenario::smart(42)))
    );
    assert_eq!(rx.recv().await, Some(LifecycleEvent::Stopped));
    assert_eq!(rx.recv().await, Some(LifecycleEvent::Released));
}
