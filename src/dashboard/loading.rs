//! Shared loading indicator
//!
//! Reference-counted so that overlapping requests keep it visible until the
//! last one finishes. The count drops when a [`LoadingGuard`] is dropped, so
//! every exit path of a request clears its share.

use std::sync::{Arc, Mutex};

use crate::view::View;

pub struct LoadingIndicator {
    in_flight: Mutex<usize>,
    view: Arc<dyn View>,
}

impl LoadingIndicator {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            in_flight: Mutex::new(0),
            view,
        }
    }

    /// Register a request; shows the indicator if it was hidden
    pub fn begin(&self) -> LoadingGuard<'_> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());
        *in_flight += 1;
        if *in_flight == 1 {
            self.view.set_loading(true);
        }
        LoadingGuard { indicator: self }
    }

    /// Requests currently holding the indicator
    pub fn in_flight(&self) -> usize {
        *self.in_flight.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn end(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.view.set_loading(false);
        }
    }
}

/// Holds the loading indicator visible while alive
pub struct LoadingGuard<'a> {
    indicator: &'a LoadingIndicator,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.end();
    }
}
