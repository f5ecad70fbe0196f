//! Demonstration of the middleware pipeline: logging and action rewriting
//!
//! Run with `RUST_LOG=debug` to see the store's own tracing as well.

use std::sync::Arc;

use pawl::{apply_middleware, create_store, Dispatch, Middleware, StoreAction, StoreError};

#[derive(Debug, Clone, Copy)]
enum BankAction {
    Deposit(i64),
    Withdraw(i64),
}

fn balance(state: Option<i64>, action: StoreAction<&BankAction>) -> i64 {
    let state = state.unwrap_or(0);
    match action {
        StoreAction::Action(BankAction::Deposit(amount)) => state + amount,
        StoreAction::Action(BankAction::Withdraw(amount)) => state - amount,
        _ => state,
    }
}

/// Logs every action with the state before and after the rest of the chain.
fn logger() -> Middleware<i64, BankAction> {
    Box::new(|api| {
        Box::new(move |next: Dispatch<BankAction>| {
            Arc::new(move |action| {
                let before = api.state()?;
                log::info!("-> {action:?} (balance {before})");
                let result = next(action);
                let after = api.state()?;
                log::info!("<- balance {after}");
                result
            })
        })
    })
}

/// Refuses withdrawals that would overdraw the account.
fn overdraft_guard() -> Middleware<i64, BankAction> {
    Box::new(|api| {
        Box::new(move |next: Dispatch<BankAction>| {
            Arc::new(move |action| {
                if let BankAction::Withdraw(amount) = action {
                    if amount > api.state()? {
                        log::warn!("refusing overdraft of {amount}");
                        return Ok(action);
                    }
                }
                next(action)
            })
        })
    })
}

fn main() -> Result<(), StoreError> {
    env_logger::init();

    println!("=== Middleware Pipeline: Bank Account ===\n");

    // The logger is listed first, so it sees every action before the guard
    // and observes whatever the guard lets through.
    println!("1. Creating store with [logger, overdraft_guard]");
    let store = create_store(
        balance,
        None,
        Some(apply_middleware(vec![logger(), overdraft_guard()])),
    )?;

    println!("\n2. Depositing 100");
    store.dispatch(BankAction::Deposit(100))?;
    println!("   balance: {}", store.state()?);

    println!("\n3. Withdrawing 30");
    store.dispatch(BankAction::Withdraw(30))?;
    println!("   balance: {}", store.state()?);

    println!("\n4. Attempting to withdraw 500 (guarded)");
    store.dispatch(BankAction::Withdraw(500))?;
    println!("   balance: {}", store.state()?);

    println!("\n✓ Middleware demo complete!");
    Ok(())
}
