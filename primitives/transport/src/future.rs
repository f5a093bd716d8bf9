//! Single-slot result pair shared between a transport and its callers.

use std::fmt;
use std::pin::pin;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::Notify;

use crate::{Result, TransportError};

enum State {
    Pending,
    Done(Result<Value>),
}

/// Outcome storage shared by a promise and every clone of its future.
///
/// Unlike a oneshot receiver the stored outcome is never taken, so it can be
/// received any number of times, from async tasks through `notify` and from
/// plain threads through `ready`.
struct Slot {
    state: Mutex<State>,
    ready: Condvar,
    notify: Notify,
}

impl Slot {
    fn new(state: State) -> Self { Self { state: Mutex::new(state), ready: Condvar::new(), notify: Notify::new() } }

    fn lock(&self) -> MutexGuard<'_, State> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

    /// First completion wins; later ones are ignored.
    fn complete(&self, outcome: Result<Value>) {
        let mut state = self.lock();
        if let State::Pending = *state {
            *state = State::Done(outcome);
            drop(state);
            self.ready.notify_all();
            self.notify.notify_waiters();
        }
    }

    fn outcome(&self) -> Option<Result<Value>> {
        match &*self.lock() {
            State::Pending => None,
            State::Done(outcome) => Some(outcome.clone()),
        }
    }
}

/// Create a connected promise and future.
pub fn channel() -> (Promise, ResponseFuture) {
    let slot = Arc::new(Slot::new(State::Pending));
    (Promise { slot: Some(slot.clone()) }, ResponseFuture { slot })
}

/// Consumer side: the eventual raw result of one request.
///
/// Clones share the slot, so every clone observes the same outcome and
/// receiving never consumes it.
#[derive(Clone)]
pub struct ResponseFuture {
    slot: Arc<Slot>,
}

impl ResponseFuture {
    /// A future that has already failed with `err`.
    pub fn failed(err: TransportError) -> Self { Self { slot: Arc::new(Slot::new(State::Done(Err(err)))) } }

    /// A future that already holds `value`.
    pub fn ready(value: Value) -> Self { Self { slot: Arc::new(Slot::new(State::Done(Ok(value)))) } }

    /// Wait for the outcome.
    pub async fn receive(&self) -> Result<Value> {
        loop {
            let mut notified = pin!(self.slot.notify.notified());
            notified.as_mut().enable();
            if let Some(outcome) = self.slot.outcome() {
                return outcome;
            }
            notified.await;
        }
    }

    /// Block the current thread until the outcome is available.
    ///
    /// Must not be called from inside an async task.
    pub fn receive_blocking(&self) -> Result<Value> {
        let mut state = self.slot.lock();
        loop {
            if let State::Done(outcome) = &*state {
                return outcome.clone();
            }
            state = self.slot.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// The outcome if it has arrived, without waiting.
    pub fn try_receive(&self) -> Option<Result<Value>> { self.slot.outcome() }

    /// Returns `true` once the outcome has arrived.
    pub fn is_ready(&self) -> bool { self.slot.outcome().is_some() }
}

impl fmt::Debug for ResponseFuture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseFuture").field("ready", &self.is_ready()).finish()
    }
}

/// Producer side, held by the transport.
///
/// Completing consumes the promise. Dropping it while still pending fails
/// the future with [`TransportError::ConnectionClosed`].
pub struct Promise {
    slot: Option<Arc<Slot>>,
}

impl Promise {
    /// Deliver a successful payload.
    pub fn fulfill(self, value: Value) { self.complete(Ok(value)) }

    /// Deliver a failure.
    pub fn fail(self, err: TransportError) { self.complete(Err(err)) }

    /// Deliver either outcome.
    pub fn complete(mut self, outcome: Result<Value>) {
        if let Some(slot) = self.slot.take() {
            slot.complete(outcome);
        }
    }
}

impl Drop for Promise {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.complete(Err(TransportError::ConnectionClosed));
        }
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_struct("Promise").finish_non_exhaustive() }
}
