use crate::{backend::BookingStore, errors::StoreResult, types::StoredBooking};
use std::sync::{Arc, Mutex, PoisonError};

/// Impersistent store, used with `--ephemeral`. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    bookings: Arc<Mutex<Vec<StoredBooking>>>,
}

impl BookingStore for LocalBookings {
    fn load(&self) -> StoreResult<Vec<StoredBooking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&mut self, bookings: &[StoredBooking]) -> StoreResult<()> {
        *self
            .bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = bookings.to_vec();
        Ok(())
    }
}
