use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::debug;

use super::{FetchState, Settle, Slot};
use crate::{
    Coordinates, HistoryDay, HistoryError, HistoryRange, provider::HistorySource, range::Clock,
};

/// The one live history sequence and the location it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBatch {
    pub coordinates: Coordinates,
    pub range: HistoryRange,
    pub days: Vec<HistoryDay>,
}

/// Fetches the trailing week for a location once, then only toggles visibility.
#[derive(Debug)]
pub struct HistoryFetcher {
    source: Arc<dyn HistorySource>,
    clock: Arc<dyn Clock>,
    slot: Mutex<Slot<HistoryBatch, HistoryError>>,
    visible: AtomicBool,
}

impl HistoryFetcher {
    pub fn new(source: Arc<dyn HistorySource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            slot: Mutex::default(),
            visible: AtomicBool::new(false),
        }
    }

    /// Days for `coordinates`, fetched on the first call.
    ///
    /// Once a fetch for the same coordinates has succeeded, further calls make
    /// no request and only flip visibility. Different coordinates discard the
    /// held sequence. A previous failure does not block a retry.
    pub async fn fetch_history(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<HistoryDay>, HistoryError> {
        if let Some(days) = self.cached_days(coordinates) {
            let visible = !self.visible.fetch_xor(true, Ordering::SeqCst);
            debug!(visible, "history already loaded, toggled visibility");
            return Ok(days);
        }

        let settle = Settle::begin(&self.slot);
        self.visible.store(false, Ordering::SeqCst);

        let range = HistoryRange::trailing_week(self.clock.today());
        let result = self
            .source
            .daily_history(coordinates, range)
            .await
            .map(|days| HistoryBatch { coordinates, range, days });

        let days = result.as_ref().map(|batch| batch.days.clone()).map_err(Clone::clone);

        if settle.finish(result) && days.is_ok() {
            self.visible.store(true, Ordering::SeqCst);
        }

        days
    }

    fn cached_days(&self, coordinates: Coordinates) -> Option<Vec<HistoryDay>> {
        let slot = self.slot.lock();
        slot.state
            .success()
            .filter(|batch| batch.coordinates == coordinates)
            .map(|batch| batch.days.clone())
    }

    /// Flip visibility of already-fetched days. Without data this does nothing.
    /// Returns the visibility after the call.
    pub fn toggle_visibility(&self) -> bool {
        if self.slot.lock().state.success().is_none() {
            return false;
        }
        !self.visible.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.slot.lock().busy
    }

    pub fn state(&self) -> FetchState<HistoryBatch, HistoryError> {
        self.slot.lock().state.clone()
    }

    /// Days currently shown, i.e. fetched and visible.
    pub fn visible_days(&self) -> Option<Vec<HistoryDay>> {
        if !self.is_visible() {
            return None;
        }
        self.slot.lock().state.success().map(|batch| batch.days.clone())
    }

    /// Forget the held sequence, e.g. because a new search started.
    pub fn reset(&self) {
        self.slot.lock().reset();
        self.visible.store(false, Ordering::SeqCst);
    }
}
