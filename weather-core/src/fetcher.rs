//! Stateful fetchers that own the result of the request they issued.
//!
//! Every request is tagged with a sequence number when it is issued. Only the
//! most recently issued request may write the visible state or clear the busy
//! flag, so a slow earlier response never overwrites a newer one.

use parking_lot::Mutex;

pub mod current;
pub mod history;

pub use current::WeatherFetcher;
pub use history::{HistoryBatch, HistoryFetcher};

/// Lifecycle of the latest request issued by a fetcher.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T, E> {
    Idle,
    Loading,
    Success(T),
    Failed(E),
}

impl<T, E> FetchState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T, E> Default for FetchState<T, E> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T, E> From<Result<T, E>> for FetchState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FetchState::Success(value),
            Err(err) => FetchState::Failed(err),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Slot<T, E> {
    state: FetchState<T, E>,
    busy: bool,
    latest: u64,
}

impl<T, E> Default for Slot<T, E> {
    fn default() -> Self {
        Self { state: FetchState::Idle, busy: false, latest: 0 }
    }
}

impl<T, E> Slot<T, E> {
    /// Supersede whatever is in flight and drop the previous result.
    fn reset(&mut self) {
        self.latest += 1;
        self.state = FetchState::Idle;
        self.busy = false;
    }
}

/// Ticket for one issued request.
///
/// Dropping it without [`Settle::finish`] (e.g. the future was cancelled)
/// still clears the busy flag if this request is the latest one.
pub(crate) struct Settle<'a, T, E> {
    slot: &'a Mutex<Slot<T, E>>,
    ticket: u64,
}

impl<'a, T, E> Settle<'a, T, E> {
    /// Mark a new request as in flight: previous result cleared, busy asserted.
    pub(crate) fn begin(slot: &'a Mutex<Slot<T, E>>) -> Self {
        let mut guard = slot.lock();
        guard.latest += 1;
        guard.state = FetchState::Loading;
        guard.busy = true;
        let ticket = guard.latest;
        drop(guard);

        Self { slot, ticket }
    }

    /// Apply `result` if this is still the latest request. Returns whether it was applied.
    pub(crate) fn finish(self, result: Result<T, E>) -> bool {
        let applied = {
            let mut guard = self.slot.lock();
            if guard.latest == self.ticket {
                guard.state = result.into();
                guard.busy = false;
                true
            } else {
                false
            }
        };

        if !applied {
            tracing::debug!(ticket = self.ticket, "discarding superseded response");
        }
        applied
    }
}

impl<T, E> Drop for Settle<'_, T, E> {
    fn drop(&mut self) {
        let mut guard = self.slot.lock();
        if guard.latest == self.ticket && guard.busy {
            guard.busy = false;
            if guard.state.is_loading() {
                guard.state = FetchState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestSlot = Mutex<Slot<u32, String>>;

    #[test]
    fn begin_asserts_busy_and_finish_clears_it() {
        let slot = TestSlot::default();

        let settle = Settle::begin(&slot);
        assert!(slot.lock().busy);
        assert!(slot.lock().state.is_loading());

        assert!(settle.finish(Ok(7)));
        let guard = slot.lock();
        assert!(!guard.busy);
        assert_eq!(guard.state, FetchState::Success(7));
    }

    #[test]
    fn stale_ticket_is_not_applied() {
        let slot = TestSlot::default();

        let first = Settle::begin(&slot);
        let second = Settle::begin(&slot);

        assert!(second.finish(Ok(2)));
        assert!(!first.finish(Ok(1)));

        assert_eq!(slot.lock().state, FetchState::Success(2));
    }

    #[test]
    fn stale_ticket_does_not_clear_busy_of_newer_request() {
        let slot = TestSlot::default();

        let first = Settle::begin(&slot);
        let _second = Settle::begin(&slot);

        assert!(!first.finish(Err("late".into())));
        assert!(slot.lock().busy);
    }

    #[test]
    fn dropped_ticket_clears_busy() {
        let slot = TestSlot::default();

        drop(Settle::begin(&slot));

        let guard = slot.lock();
        assert!(!guard.busy);
        assert_eq!(guard.state, FetchState::Idle);
    }

    #[test]
    fn reset_supersedes_in_flight_request() {
        let slot = TestSlot::default();
        let settle = Settle::begin(&slot);

        slot.lock().reset();
        assert!(!settle.finish(Ok(1)));
        assert_eq!(slot.lock().state, FetchState::Idle);
    }

    #[test]
    fn fetch_state_from_result() {
        let ok: FetchState<u32, String> = Ok(1).into();
        assert_eq!(ok.success(), Some(&1));

        let err: FetchState<u32, String> = Err("boom".to_string()).into();
        assert_eq!(err.failure().map(String::as_str), Some("boom"));
    }
}
