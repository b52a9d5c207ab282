//! Deferred handoff of the implementors table.
//!
//! The implementors script for a trait may run before or after the page
//! code that renders it has registered itself. The registry covers both
//! orders: a delivered table goes straight to the registered consumer, or
//! waits in a single pending slot until one shows up.
//!
//! ```text
//! deliver(T) ──► consumer registered? ──yes──► consumer(T)
//!                       │
//!                       no
//!                       ▼
//!                pending = Some(T)   (last write wins)
//!                       │
//! register_consumer(C) ─┴──► C(T), pending = None
//! ```
//!
//! A consumer is either a callback (kept for later deliveries) or a single
//! [`Registry::wait`] future (resolved once).

use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;

use super::types::ImplementorTable;
use crate::log;

/// Callback that receives delivered implementors tables.
pub type ConsumerFn = Box<dyn FnMut(ImplementorTable) -> anyhow::Result<()> + Send>;

/// Registry failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The consumer returned an error; the table it was given is dropped.
    #[error("implementors consumer failed")]
    Consumer(#[source] anyhow::Error),

    #[error("a consumer callback is registered, waiting is not possible")]
    ConsumerPresent,

    #[error("another task is already waiting for the implementors table")]
    WaiterPending,

    #[error("registry was cleared before a table was delivered")]
    Closed,
}

/// Where a delivered table ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the registered consumer.
    Consumed,
    /// Stored in the pending slot; `replaced` is set when an unconsumed
    /// table was overwritten.
    Stashed { replaced: bool },
}

enum Consumer {
    Callback(ConsumerFn),
    Waiter(oneshot::Sender<ImplementorTable>),
}

impl Consumer {
    fn is_live(&self) -> bool {
        match self {
            Self::Callback(_) => true,
            Self::Waiter(sender) => !sender.is_closed(),
        }
    }
}

#[derive(Default)]
struct RegistryState {
    pending: Option<ImplementorTable>,
    consumer: Option<Consumer>,
    /// Bumped whenever the consumer slot is replaced, so a callback taken
    /// out for invocation is only put back if nobody swapped it meanwhile.
    generation: u64,
}

/// Single-slot mailbox for the implementors table of one page load.
///
/// The consumer callback is never invoked while the internal lock is held,
/// so it may call back into the registry. A `deliver` made from inside the
/// callback is stashed while the callback runs and handed to it right
/// after, so a registered consumer never coexists with a pending table.
pub struct Registry {
    state: Mutex<RegistryState>,
    /// Emit `[registry]` log lines.
    verbose: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_logging(true)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("has_pending", &self.has_pending())
            .field("has_consumer", &self.has_consumer())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logging(verbose: bool) -> Self {
        Self {
            state: Mutex::default(),
            verbose,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether a delivery right now would reach a consumer.
    pub fn has_consumer(&self) -> bool {
        self.state
            .lock()
            .consumer
            .as_ref()
            .is_some_and(Consumer::is_live)
    }

    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Hand a completed table to the consumer, or stash it.
    ///
    /// The table is not inspected. If the consumer fails, its error is
    /// returned and the pending slot is left untouched. Tables delivered
    /// from inside the consumer reach it before this returns.
    pub fn deliver(&self, table: ImplementorTable) -> Result<Delivery, RegistryError> {
        let packages = table.len();
        let mut state = self.state.lock();

        match state.consumer.take() {
            Some(Consumer::Callback(callback)) => {
                let generation = state.generation;
                drop(state);

                if self.verbose {
                    log!("registry"; "delivering {packages} package(s) to consumer");
                }
                self.run_callback(callback, table, generation)?;
                Ok(Delivery::Consumed)
            }
            Some(Consumer::Waiter(sender)) => match sender.send(table) {
                Ok(()) => {
                    if self.verbose {
                        log!("registry"; "delivering {packages} package(s) to waiter");
                    }
                    Ok(Delivery::Consumed)
                }
                // Waiter was dropped before anything arrived
                Err(table) => Ok(self.stash(&mut state, table)),
            },
            None => Ok(self.stash(&mut state, table)),
        }
    }

    /// Install a callback consumer, replacing any previous callback.
    ///
    /// A pending table is drained and handed to the new consumer before
    /// this returns. Returns whether that happened.
    pub fn register_consumer<F>(&self, consumer: F) -> Result<bool, RegistryError>
    where
        F: FnMut(ImplementorTable) -> anyhow::Result<()> + Send + 'static,
    {
        let callback: ConsumerFn = Box::new(consumer);
        let mut state = self.state.lock();

        if matches!(&state.consumer, Some(waiter @ Consumer::Waiter(_)) if waiter.is_live()) {
            return Err(RegistryError::WaiterPending);
        }

        state.generation += 1;
        let Some(table) = state.pending.take() else {
            state.consumer = Some(Consumer::Callback(callback));
            return Ok(false);
        };

        let generation = state.generation;
        drop(state);

        if self.verbose {
            log!("registry"; "handing pending table ({} package(s)) to new consumer", table.len());
        }
        self.run_callback(callback, table, generation)?;
        Ok(true)
    }

    /// Remove the consumer. Returns whether one was registered.
    pub fn unregister_consumer(&self) -> bool {
        let mut state = self.state.lock();
        state.generation += 1;
        state.consumer.take().is_some_and(|consumer| consumer.is_live())
    }

    /// Drain the pending slot.
    pub fn take_pending(&self) -> Option<ImplementorTable> {
        self.state.lock().pending.take()
    }

    /// Wait for the implementors table.
    ///
    /// Resolves immediately with the pending table if there is one,
    /// otherwise with the next delivered table. Only one waiter may exist,
    /// and not alongside a callback consumer.
    pub async fn wait(&self) -> Result<ImplementorTable, RegistryError> {
        let receiver = {
            let mut state = self.state.lock();
            if let Some(table) = state.pending.take() {
                return Ok(table);
            }

            match &state.consumer {
                Some(Consumer::Callback(_)) => return Err(RegistryError::ConsumerPresent),
                Some(waiter) if waiter.is_live() => return Err(RegistryError::WaiterPending),
                _ => {}
            }

            let (sender, receiver) = oneshot::channel();
            state.generation += 1;
            state.consumer = Some(Consumer::Waiter(sender));
            receiver
        };

        receiver.await.map_err(|_| RegistryError::Closed)
    }

    /// Drop the pending table and the consumer.
    ///
    /// A task blocked in [`Registry::wait`] resolves with
    /// [`RegistryError::Closed`].
    pub fn clear(&self) {
        let mut state = self.state.lock();
        if state.pending.take().is_some() && self.verbose {
            log!("registry"; "discarding unconsumed implementors table");
        }
        state.consumer = None;
        state.generation += 1;
    }

    fn stash(&self, state: &mut RegistryState, table: ImplementorTable) -> Delivery {
        let packages = table.len();
        let replaced = state.pending.replace(table).is_some();
        if self.verbose {
            if replaced {
                log!("warn"; "replacing unconsumed implementors table");
            }
            log!("registry"; "no consumer yet, holding {packages} package(s)");
        }
        Delivery::Stashed { replaced }
    }

    /// Invoke a callback taken out of its slot, then put it back.
    ///
    /// Tables stashed by deliveries made while it ran are handed to it in
    /// turn until the slot is empty. The first failure is returned once the
    /// slot is drained. If the consumer was replaced or removed meanwhile,
    /// the callback is dropped and anything stashed stays pending.
    fn run_callback(
        &self,
        mut callback: ConsumerFn,
        mut table: ImplementorTable,
        generation: u64,
    ) -> Result<(), RegistryError> {
        let mut failure = None;
        loop {
            if let Err(err) = callback(table) {
                failure.get_or_insert(err);
            }

            let mut state = self.state.lock();
            if state.generation != generation || state.consumer.is_some() {
                break;
            }
            match state.pending.take() {
                Some(next) => {
                    drop(state);
                    if self.verbose {
                        log!("registry"; "delivering table stashed during consumer run");
                    }
                    table = next;
                }
                None => {
                    state.consumer = Some(Consumer::Callback(callback));
                    break;
                }
            }
        }

        match failure {
            Some(err) => Err(RegistryError::Consumer(err)),
            None => Ok(()),
        }
    }
}
