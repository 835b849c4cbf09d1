use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Well-known status values. The store accepts any string.
pub mod status {
    pub const REGISTERED: &str = "registered";
    pub const SENT: &str = "sent";
    pub const DELIVERED: &str = "delivered";
}

/// A shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Assigned by the store on insert; `None` until then.
    pub number: Option<i64>,
    pub client: i64,
    pub status: String,
    pub address: String,
    /// RFC 3339 timestamp supplied by the caller, stored verbatim.
    pub created_at: String,
}

impl Parcel {
    /// Create an unsaved parcel.
    pub fn new(
        client: i64,
        status: impl Into<String>,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: None,
            client,
            status: status.into(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Create an unsaved parcel in the `registered` status, stamped with the current UTC time.
    pub fn registered(client: i64, address: impl Into<String>) -> Self {
        Self::new(
            client,
            status::REGISTERED,
            address,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    /// Copy of this parcel carrying the given number.
    pub fn with_number(mut self, number: i64) -> Self {
        self.number = Some(number);
        self
    }
}
