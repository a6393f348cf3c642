use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TIME_SLOTS: [&str; 7] = ["09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00"];

pub const MAX_MESSAGE_CHARS: usize = 1000;

/// A booking written by this service. `created_at` is RFC 3339 UTC with
/// microseconds and a `Z` suffix, kept as text so it is saved back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Booking {
    pub date: String,
    pub time: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

/// One entry of the persisted list. Entries that do not have the exact
/// `Booking` shape (older or hand-edited files) are kept as raw JSON and
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredBooking {
    Booking(Booking),
    Other(Value),
}

impl StoredBooking {
    pub fn date(&self) -> Option<&str> {
        match self {
            StoredBooking::Booking(booking) => Some(&booking.date),
            StoredBooking::Other(value) => value.get("date").and_then(Value::as_str),
        }
    }

    pub fn time(&self) -> Option<&str> {
        match self {
            StoredBooking::Booking(booking) => Some(&booking.time),
            StoredBooking::Other(value) => value.get("time").and_then(Value::as_str),
        }
    }

    pub fn as_booking(&self) -> Option<&Booking> {
        match self {
            StoredBooking::Booking(booking) => Some(booking),
            StoredBooking::Other(_) => None,
        }
    }

    /// Dates are compared as calendar days, so `2030-1-1` and `2030-01-01`
    /// hold the same slot. Unparseable dates only match verbatim.
    pub fn occupies(&self, date: NaiveDate, time: &str) -> bool {
        let (Some(stored_date), Some(stored_time)) = (self.date(), self.time()) else {
            return false;
        };
        if stored_time.trim() != time {
            return false;
        }
        match parse_date(stored_date) {
            Some(stored_date) => stored_date == date,
            None => stored_date == format_date(date),
        }
    }
}

impl From<Booking> for StoredBooking {
    fn from(booking: Booking) -> Self {
        StoredBooking::Booking(booking)
    }
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Raw body of a booking submission. Nothing in here is trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub agree: Value,
}

impl BookingRequest {
    /// Parses a request body leniently: anything that is not a matching JSON
    /// object becomes an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn agreed(&self) -> bool {
        match &self.agree {
            Value::Null => false,
            Value::Bool(agree) => *agree,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub booked: Vec<StoredBooking>,
    #[serde(rename = "timeSlots")]
    pub time_slots: Vec<String>,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub ok: bool,
    pub message: String,
}

impl Confirmation {
    pub fn booked() -> Self {
        Self {
            ok: true,
            message: "Booked successfully!".into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test_case::test_case(json!(true), true)]
    #[test_case::test_case(json!(false), false)]
    #[test_case::test_case(json!(null), false)]
    #[test_case::test_case(json!(1), true)]
    #[test_case::test_case(json!(0), false)]
    #[test_case::test_case(json!("yes"), true)]
    #[test_case::test_case(json!(""), false)]
    #[test_case::test_case(json!([]), false)]
    #[test_case::test_case(json!({"a": 1}), true)]
    fn test_agree_truthiness(agree: Value, expected: bool) {
        let request = BookingRequest {
            agree,
            ..Default::default()
        };
        assert_eq!(request.agreed(), expected);
    }

    #[test]
    fn test_malformed_body_becomes_empty_request() {
        let request = BookingRequest::from_body(b"not json at all");
        assert!(request.date.is_none());
        assert!(!request.agreed());

        let request = BookingRequest::from_body(br#"{"date": 5}"#);
        assert!(request.date.is_none());
    }

    #[test]
    fn test_written_booking_is_typed() {
        let stored: StoredBooking = serde_json::from_value(json!({
            "date": "2030-01-01",
            "time": "09:00",
            "email": "a@b.com",
            "message": "hi",
            "created_at": "2030-01-01T08:30:00.123456Z",
        }))
        .unwrap();

        let booking = stored.as_booking().unwrap();
        assert_eq!(booking.email, "a@b.com");
        assert_eq!(
            serde_json::to_value(&stored).unwrap()["created_at"],
            "2030-01-01T08:30:00.123456Z"
        );
    }

    #[test_case::test_case(json!({"date": "2030-01-01", "time": "09:00", "email": "a@b.com", "message": null, "created_at": "2030-01-01T08:00:00"}) ; "null message and naive timestamp")]
    #[test_case::test_case(json!({"date": "2030-01-01", "time": "09:00"}) ; "only the slot")]
    #[test_case::test_case(json!({"date": "2030-01-01", "time": "09:00", "email": "a@b.com", "message": "", "created_at": "2030-01-01T08:00:00Z", "name": "Ann"}) ; "extra field")]
    #[test_case::test_case(json!({"date": "2030-1-1", "time": "09:00", "email": 7}) ; "unpadded date")]
    fn test_odd_records_keep_their_slot(record: Value) {
        let stored: StoredBooking = serde_json::from_value(record.clone()).unwrap();

        assert!(stored.as_booking().is_none());
        assert!(stored.occupies(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), "09:00"));
        assert!(!stored.occupies(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), "10:00"));
        assert_eq!(serde_json::to_value(&stored).unwrap(), record);
    }

    #[test_case::test_case(json!("2030-01-01 09:00") ; "plain string")]
    #[test_case::test_case(json!({"date": "someday", "time": "09:00"}) ; "unparseable date")]
    #[test_case::test_case(json!({"date": 20300101, "time": "09:00"}) ; "numeric date")]
    fn test_records_without_usable_slot(record: Value) {
        let stored: StoredBooking = serde_json::from_value(record).unwrap();
        assert!(!stored.occupies(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), "09:00"));
    }

    #[test]
    fn test_availability_field_names() {
        let availability = Availability {
            booked: vec![],
            time_slots: TIME_SLOTS.iter().map(|slot| slot.to_string()).collect(),
            today: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        };
        let json = serde_json::to_value(&availability).unwrap();
        assert_eq!(json["today"], "2030-01-01");
        assert_eq!(json["timeSlots"][0], "09:00");
        assert_eq!(json["booked"], json!([]));
    }
}
