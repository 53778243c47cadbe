//! Identifier generation
//!
//! Two kinds of identifiers are issued by the service:
//!
//! - **User IDs**: 14-digit `YYYYMMDDhhmmss` timestamps taken at creation time.
//!   The generator never hands out the same value twice; when the clock has not
//!   moved past the last issued second it issues the next second instead.
//! - **Request IDs**: TypeID strings (`req_<base32 uuidv7>`) attached to every
//!   HTTP request for log correlation.

use chrono::{DateTime, Duration, DurationRound, Utc};
use http::Request;
use mti::prelude::*;
use std::sync::Mutex;
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};

/// `strftime` layout of user identifiers
pub const USER_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Width of a generated user identifier
pub const USER_ID_LEN: usize = 14;

/// Issues timestamp-shaped user identifiers that are unique within a process.
#[derive(Debug, Default)]
pub struct UserIdGenerator {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl UserIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for a record created at `now`.
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        // Truncation only fails for instants outside chrono's range
        let second = now
            .duration_trunc(Duration::seconds(1))
            .unwrap_or(now);

        let issued = {
            let mut last = self
                .last
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let issued = match *last {
                Some(prev) if second <= prev => prev + Duration::seconds(1),
                _ => second,
            };
            *last = Some(issued);
            issued
        };

        if issued != second {
            tracing::debug!(
                requested = %second.format(USER_ID_FORMAT),
                issued = %issued.format(USER_ID_FORMAT),
                "User id second already taken, advancing"
            );
        }

        issued.format(USER_ID_FORMAT).to_string()
    }
}

/// A type-safe request identifier for distributed tracing.
///
/// Request IDs follow the TypeID format: `req_<base32-encoded-uuidv7>`,
/// e.g. `req_01h455vb4pex5vsknk084sn02q`.
#[derive(Debug, Clone)]
pub(crate) struct RequestId(MagicTypeId);

impl RequestId {
    /// The prefix used for request IDs
    const PREFIX: &'static str = "req";

    /// Creates a new request ID with a UUIDv7 (time-sortable).
    #[must_use]
    fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Returns the request ID as a string slice.
    #[must_use]
    fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// `MakeRequestId` for tower-http that stamps requests with a `req_` TypeID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = RequestId::new();
        let header_value = http::HeaderValue::from_str(id.as_str()).ok()?;
        Some(TowerRequestId::new(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32, nanos: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, h, m, s).unwrap() + Duration::nanoseconds(nanos as i64)
    }

    #[test]
    fn test_user_id_format() {
        let ids = UserIdGenerator::new();
        let id = ids.next_id(at(7, 5, 3, 250_000_000));
        assert_eq!(id, "20240309070503");
        assert_eq!(id.len(), USER_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_same_second_does_not_collide() {
        let ids = UserIdGenerator::new();
        let first = ids.next_id(at(23, 59, 59, 0));
        let second = ids.next_id(at(23, 59, 59, 900_000_000));
        let third = ids.next_id(at(23, 59, 59, 999_999_999));
        assert_eq!(first, "20240309235959");
        assert_eq!(second, "20240310000000");
        assert_eq!(third, "20240310000001");
    }

    #[test]
    fn test_clock_catching_up_resumes_real_time() {
        let ids = UserIdGenerator::new();
        ids.next_id(at(10, 0, 0, 0));
        ids.next_id(at(10, 0, 0, 1));
        assert_eq!(ids.next_id(at(10, 0, 5, 0)), "20240309100005");
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let ids = UserIdGenerator::new();
        let later = ids.next_id(at(12, 0, 0, 0));
        let earlier = ids.next_id(at(11, 0, 0, 0));
        assert!(earlier > later);
    }

    #[test]
    fn test_request_id_new() {
        let id = RequestId::new();
        assert!(id.as_str().starts_with("req_"));
        // prefix (3) + underscore (1) + suffix (26)
        assert_eq!(id.as_str().len(), 30);
    }

    #[test]
    fn test_make_typed_request_id() {
        let mut maker = MakeTypedRequestId;
        let request = http::Request::builder().body(()).unwrap();

        let header_value = maker
            .make_request_id(&request)
            .expect("request id")
            .into_header_value();
        assert!(header_value.to_str().unwrap().starts_with("req_"));
    }
}
