use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use unistate::Store;

mod actions;
mod commands;
mod logger;
mod middleware;
mod reducer;
mod state;

use actions::Action;
use commands::Command;
use state::CounterState;

type CounterStore = Store<CounterState, Action>;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> anyhow::Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting unistate-counter");

    let config = unistate_config::load();
    let store = Store::builder(reducer::reduce, CounterState::default())
        .middleware(middleware::chain(config.log_actions))
        .config(config)
        .build();

    store
        .subscribe(|state| println!("counter = {}", state.counter))
        .detach();
    let _tens = store.subscribe_select(
        |state: &CounterState| state.counter / 10,
        |tens: &i64| println!("reached the {}0s", tens),
    );

    println!("{}", commands::HELP);
    run(&store, spawn_input_reader());

    log::info!("Exiting unistate-counter");
    println!("log written to {}", log_file.display());
    Ok(())
}

/// Read stdin lines on a separate thread so the store thread can keep
/// processing deliveries while waiting for input
fn spawn_input_reader() -> Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        log::debug!("Input reader stopped");
    });
    line_rx
}

fn run(store: &CounterStore, line_rx: Receiver<String>) {
    let mut input_open = true;

    while store.state().running {
        store.process_deliveries();

        if !input_open {
            // stdin closed: finish outstanding slow increments, then stop
            if store.state().pending == 0 {
                break;
            }
            store.process_deliveries_timeout(Duration::from_millis(100));
            continue;
        }

        match line_rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => handle_line(store, &line),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Input closed");
                input_open = false;
            }
        }
    }
}

fn handle_line(store: &CounterStore, line: &str) {
    match commands::parse(line) {
        Some(Command::Dispatch(action)) => {
            if store.dispatch(action).is_vetoed() {
                println!("rejected");
            }
        }
        Some(Command::SlowIncrement(delay)) => slow_increment(store, delay),
        Some(Command::Help) => println!("{}", commands::HELP),
        None if line.trim().is_empty() => {}
        None => println!("unknown command: {}\n{}", line.trim(), commands::HELP),
    }
}

/// Increment from a worker thread after `delay`
///
/// The delivered creator checks the state when it lands, so a slow increment
/// arriving after quit is dropped.
fn slow_increment(store: &CounterStore, delay: Duration) {
    store.dispatch(Action::SlowIncrementStarted);
    store.dispatch_async_with(
        move |_, _, dispatcher| {
            thread::spawn(move || {
                thread::sleep(delay);
                let delivered = dispatcher.deliver(|state: &CounterState, _| {
                    state.running.then_some(Action::SlowIncrementLanded)
                });
                if let Err(e) = delivered {
                    log::warn!("Slow increment lost: {}", e);
                }
            });
        },
        |state: &CounterState| log::info!("Slow increment landed, counter now {}", state.counter),
    );
}
