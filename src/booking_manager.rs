use crate::{
    backend::{BookingStore, CorruptionPolicy},
    errors::{BookingError, StoreError, StoreResult},
    types::{Availability, Booking, BookingRequest, Confirmation, StoredBooking, TIME_SLOTS},
    validation::validate,
};
use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Booking rules on top of a store. Every store access happens while
/// holding `store`'s lock, so load-check-append-save is one step.
pub struct BookingManager<S: BookingStore> {
    store: Arc<Mutex<S>>,
    corruption_policy: CorruptionPolicy,
}

impl<S: BookingStore> Clone for BookingManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            corruption_policy: self.corruption_policy,
        }
    }
}

impl<S: BookingStore> BookingManager<S> {
    pub fn new(store: S, corruption_policy: CorruptionPolicy) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            corruption_policy,
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // Poisoning is ignored: the list itself lives in the store.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self, store: &S) -> StoreResult<Vec<StoredBooking>> {
        match store.load() {
            Err(StoreError::Corrupt(err))
                if self.corruption_policy == CorruptionPolicy::TreatAsEmpty =>
            {
                warn!(?err, "Booking store is unreadable, continuing with an empty list");
                Ok(vec![])
            }
            result => result,
        }
    }

    pub fn availability(&self) -> Result<Availability, BookingError> {
        let booked = {
            let store = self.lock();
            self.load(&store)?
        };
        Ok(Availability {
            booked,
            time_slots: TIME_SLOTS.iter().map(|slot| slot.to_string()).collect(),
            today: today(),
        })
    }

    pub fn book(&self, request: &BookingRequest) -> Result<Confirmation, BookingError> {
        self.book_on(request, today())
    }

    /// `today` is the first bookable day.
    pub fn book_on(
        &self,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<Confirmation, BookingError> {
        let booking = validate(request, today)
            .inspect_err(|err| debug!(%err, "Rejected booking request"))?;
        let date = booking.date_key();

        let mut store = self.lock();
        let mut bookings = self.load(&store)?;

        if bookings
            .iter()
            .any(|existing| existing.occupies(booking.date, &booking.time))
        {
            info!(%date, time = %booking.time, "Slot already booked");
            return Err(BookingError::SlotTaken);
        }

        bookings.push(
            Booking {
                date: date.clone(),
                time: booking.time.clone(),
                email: booking.email,
                message: booking.message,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            }
            .into(),
        );
        store.save(&bookings)?;

        info!(%date, time = %booking.time, "Slot booked");
        Ok(Confirmation::booked())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
