//! Domain models for the reservation engine
//!
//! Entities and payload types shared between the engine and its callers.

pub mod booking;
pub mod branch;
pub mod dining_table;
pub mod floor;
pub mod hold;
pub mod waitlist;

pub use booking::{Booking, BookingCreate, BookingPatch, BookingStatus};
pub use branch::Branch;
pub use dining_table::{DiningTable, TableStatus};
pub use floor::Floor;
pub use hold::TableHold;
pub use waitlist::{WaitlistEntry, WaitlistEntryCreate, WaitlistStatus};
