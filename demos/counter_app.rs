//! Complete counter application demonstrating the core store features

use pawl::{Observable, Store, StoreAction, StoreError};

#[derive(Debug, Clone, Copy)]
enum CounterAction {
    Increment,
    Decrement,
    SetStep(i32),
    Reset,
}

#[derive(Clone, Debug)]
struct CounterState {
    count: i32,
    step: i32,
    history: Vec<i32>,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            count: 0,
            step: 1,
            history: vec![0],
        }
    }
}

fn counter(state: Option<CounterState>, action: StoreAction<&CounterAction>) -> CounterState {
    let mut state = state.unwrap_or_default();
    match action {
        StoreAction::Action(CounterAction::Increment) => {
            state.count += state.step;
            state.history.push(state.count);
        }
        StoreAction::Action(CounterAction::Decrement) => {
            state.count -= state.step;
            state.history.push(state.count);
        }
        StoreAction::Action(CounterAction::SetStep(step)) => {
            state.step = *step;
        }
        StoreAction::Action(CounterAction::Reset) => {
            state.count = 0;
            state.history.push(0);
        }
        _ => {}
    }
    state
}

fn main() -> Result<(), StoreError> {
    println!("=== Complete Counter Application ===\n");

    println!("1. Initializing counter store");
    let store = Store::new(counter);

    // Setup a subscriber to log changes
    let log_store = store.clone();
    let _subscription = store.subscribe(move || {
        if let Ok(state) = log_store.state() {
            println!("   [State] Count: {}, Step: {}", state.count, state.step);
        }
    })?;

    println!("\n2. Observing derived values");
    let _observer = store.observe(|state: &CounterState| {
        println!(
            "   Count: {} | Positive: {} | Even: {}",
            state.count,
            state.count > 0,
            state.count % 2 == 0
        );
    })?;

    println!("\n3. Incrementing...");
    store.dispatch(CounterAction::Increment)?;
    store.dispatch(CounterAction::Increment)?;
    store.dispatch(CounterAction::Increment)?;

    println!("\n4. Changing step size to 5");
    store.dispatch(CounterAction::SetStep(5))?;

    println!("\n5. Incrementing with new step...");
    store.dispatch(CounterAction::Increment)?;

    println!("\n6. Decrementing...");
    store.dispatch(CounterAction::Decrement)?;
    store.dispatch(CounterAction::Decrement)?;

    println!("\n7. History:");
    store.read(|state| {
        println!("   {:?}", state.history);
    })?;

    println!("\n8. Resetting...");
    store.dispatch(CounterAction::Reset)?;

    println!("\n9. Final history:");
    store.read(|state| {
        println!("   {:?}", state.history);
    })?;

    println!("\n✓ Counter application complete!");
    Ok(())
}
