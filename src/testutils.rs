use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use crate::{
    backend::BookingStore,
    errors::{StoreError, StoreResult},
    types::StoredBooking,
};

pub struct MockBookingStoreInner {
    pub corrupt: AtomicBool,
    pub fail_save: AtomicBool,
    pub calls_to_load: AtomicU64,
    pub calls_to_save: AtomicU64,
    pub bookings: Mutex<Vec<StoredBooking>>,
}

#[derive(Clone)]
pub struct MockBookingStore(pub Arc<MockBookingStoreInner>);

impl MockBookingStoreInner {
    fn new() -> Self {
        Self {
            corrupt: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
            calls_to_load: AtomicU64::default(),
            calls_to_save: AtomicU64::default(),
            bookings: Mutex::default(),
        }
    }
}

impl MockBookingStore {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingStoreInner::new()))
    }
}

impl BookingStore for MockBookingStore {
    fn load(&self) -> StoreResult<Vec<StoredBooking>> {
        self.0.calls_to_load.fetch_add(1, Ordering::SeqCst);
        if self.0.corrupt.load(Ordering::SeqCst) {
            let err = serde_json::from_str::<Vec<StoredBooking>>("[{").unwrap_err();
            return Err(StoreError::Corrupt(err));
        }
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn save(&mut self, bookings: &[StoredBooking]) -> StoreResult<()> {
        self.0.calls_to_save.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_save.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("Supposed to fail").into());
        }
        *self.0.bookings.lock().unwrap() = bookings.to_vec();
        Ok(())
    }
}
