use crate::domain::model::{CalculateShippingRequest, CalculateShippingResponse};
use crate::domain::ports::CalculateShippingHandler;
use crate::utils::error::Result;
use std::sync::Mutex;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Tally {
    total_cost: f64,
    handled: usize,
}

/// Wraps a [`CalculateShippingHandler`] and keeps a running total of every cost it returns.
///
/// Responses pass through untouched; failed calls leave the total as it was.
#[derive(Debug)]
pub struct RunningTotal<P: CalculateShippingHandler> {
    inner: P,
    tally: Mutex<Tally>,
}

impl<P: CalculateShippingHandler> RunningTotal<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            tally: Mutex::new(Tally::default()),
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.snapshot().total_cost
    }

    /// Number of successful `handle` calls counted so far.
    pub fn handled(&self) -> usize {
        self.snapshot().handled
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn snapshot(&self) -> Tally {
        // Nothing panics while the lock is held, so a poisoned tally is still complete.
        *self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<P: CalculateShippingHandler> CalculateShippingHandler for RunningTotal<P> {
    fn handle(&self, request: CalculateShippingRequest) -> Result<CalculateShippingResponse> {
        let response = self.inner.handle(request)?;

        let mut tally = self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tally.total_cost += response.cost();
        tally.handled += 1;
        tracing::debug!(
            cost = response.cost(),
            total_cost = tally.total_cost,
            handled = tally.handled,
            "running total updated"
        );

        Ok(response)
    }
}
