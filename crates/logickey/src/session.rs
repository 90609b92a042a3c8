//! Drive one service session: the lifecycle host starts a scenario on one
//! context while the UI side waits for availability and dispatches keys.

use std::{path::Path, sync::Arc, time::Duration};

use config::{Config, LogicKey};
use logic_engine::{
    ActionExecutor, Dispatch, Dispatcher, LifecycleNotifier, RouteTable, Scenario, ServiceBroker,
    ServiceHandle, provider,
};
use tokio::{
    runtime::Builder,
    sync::{mpsc, watch},
    task, time,
};
use tracing::{debug, info};

use crate::{
    cli::{RoutesArgs, RunArgs},
    error::{Error, Result},
    executor::TraceExecutor,
};

/// Capacity of the lifecycle event channel.
const LIFECYCLE_QUEUE: usize = 16;

/// Load the configuration file if one was given.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Ok(config::load_from_path(p)?),
        None => Ok(Config::default()),
    }
}

/// Print the effective routing table.
pub fn routes(args: &RoutesArgs) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let table = RouteTable::with_extra(&cfg.routes)?;
    for route in table.iter() {
        println!("{:<10} {:<12} {}", route.key, route.category, route.label);
    }
    Ok(())
}

/// Keys to fire: positional arguments, else the configured click actions.
fn session_keys(args: &RunArgs, cfg: &Config) -> Result<Vec<LogicKey>> {
    if args.keys.is_empty() {
        return Ok(cfg.action_keys().cloned().collect());
    }
    args.keys
        .iter()
        .map(|k| LogicKey::parse(k.as_str()).map_err(Error::from))
        .collect()
}

/// Scenario to launch: command-line flags override the configuration.
fn session_scenario(args: &RunArgs, cfg: &Config) -> Scenario {
    let mut scenario = Scenario::from(cfg.scenario);
    if args.scenario.is_some() {
        scenario.id = args.scenario;
    }
    if args.smart {
        scenario.smart = true;
    }
    scenario
}

/// Run a session to completion on a fresh runtime.
pub fn run(args: &RunArgs) -> Result<()> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(session(args))
}

/// Body of [`run`].
async fn session(args: &RunArgs) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let routes = Arc::new(RouteTable::with_extra(&cfg.routes)?);
    let keys = session_keys(args, &cfg)?;
    let scenario = session_scenario(args, &cfg);

    let broker = provider::init();
    let (ready_tx, mut ready_rx) = watch::channel(false);
    broker.observe(move |h| {
        let _was_ready = ready_tx.send_replace(h.is_some());
    });

    let (event_tx, mut event_rx) = mpsc::channel(LIFECYCLE_QUEUE);
    let events = tokio::spawn(async move {
        while let Some(ev) = event_rx.recv().await {
            info!(event = ?ev, "host_lifecycle");
        }
    });

    let executor = Arc::new(TraceExecutor::new());
    let handle = ServiceHandle::new(
        &broker,
        Dispatcher::new(routes),
        Arc::clone(&executor) as Arc<dyn ActionExecutor>,
        LifecycleNotifier::new(event_tx),
    );

    // Lifecycle host context.
    let service = Arc::clone(&handle);
    task::spawn_blocking(move || service.start(scenario)).await?;

    // UI context.
    let ready = match time::timeout(args.ready_timeout, ready_rx.wait_for(|up| *up)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(_)) => Err(Error::other("availability observer dropped")),
        Err(_) => Err(Error::NotReady(args.ready_timeout)),
    };
    let outcome = match ready {
        Ok(()) => fire(&broker, &keys, args.delay).await,
        Err(e) => Err(e),
    };

    handle.stop();
    handle.release();
    broker.register_observer(None);
    provider::teardown();
    drop(handle);
    events.await?;
    info!(actions = executor.count(), "session_finished");
    outcome
}

/// Dispatch `keys` in order, pausing `delay` between them.
async fn fire(broker: &ServiceBroker, keys: &[LogicKey], delay: Duration) -> Result<()> {
    for (i, key) in keys.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            time::sleep(delay).await;
        }
        let out = broker.dispatch(key.as_str()).map_err(Error::Executor)?;
        debug!(key = %key, outcome = ?out, "dispatched");
        match out {
            Dispatch::Executed(route) => println!("{}\t{}\t{}", key, route.category, route.label),
            Dispatch::UnknownKey => println!("{}\tunknown", key),
            Dispatch::Unavailable => println!("{}\tunavailable", key),
        }
    }
    Ok(())
}
