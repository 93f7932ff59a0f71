//! Process-wide session gates, one per terminal address.
//!
//! Exactly one session may be open against a given terminal at a time,
//! no matter how many `SessionManager` instances exist for that address.
//! The gate therefore cannot live inside any single manager: this module
//! keeps one `tokio::sync::Mutex` per `host:port` in a process-wide table.
//! Tokio's mutex queues waiters fairly, so contending callers are served
//! in arrival order.
//!
//! The table holds only serialization primitives; it grows by one entry
//! per distinct terminal address ever used and never accumulates request
//! state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::sync::Mutex as AsyncMutex;

static GATES: OnceLock<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>> = OnceLock::new();

/// Get the gate for a terminal address, creating it on first use.
pub(crate) fn for_address(address: &str) -> Arc<AsyncMutex<()>> {
    let gates = GATES.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = gates.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(
        map.entry(address.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
    )
}
