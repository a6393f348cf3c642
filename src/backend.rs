use crate::{errors::StoreResult, types::StoredBooking};

/// Persistence for the booking list. Implementations are not synchronised;
/// `BookingManager` serialises every call behind one lock.
///
/// `load` must return `Ok(vec![])` for a store that does not exist yet and
/// `Err(StoreError::Corrupt)` only for one that is not a JSON list at all, so
/// callers can tell the two apart. Entries it cannot interpret are returned
/// as `StoredBooking::Other` and must survive a later `save`.
pub trait BookingStore: Send + 'static {
    fn load(&self) -> StoreResult<Vec<StoredBooking>>;
    fn save(&mut self, bookings: &[StoredBooking]) -> StoreResult<()>;
}

/// What to do when the store reports that its contents cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptionPolicy {
    /// Carry on with an empty list. The next successful booking overwrites
    /// the unreadable file.
    #[default]
    TreatAsEmpty,
    /// Surface the corruption as a server error.
    Fail,
}
