//! SQLite-backed storage for parcel (shipment) records.
//!
//! # Intention
//!
//! - Map [`Parcel`] values to rows of a single `parcel` table and back.
//! - Borrow a caller-owned [`rusqlite::Connection`]; never open or close it.
//!
//! # Architectural Boundaries
//!
//! - Only data-access code belongs here.
//! - Status values are opaque strings; no transition rules live in this crate.

pub mod config;
pub mod error;
pub mod parcel;
pub mod schema;
pub mod store;

pub use config::TrackerConfig;
pub use error::{Result, StoreError};
pub use parcel::Parcel;
pub use store::ParcelStore;
