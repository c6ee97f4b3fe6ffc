//! Table Reservation & Occupancy State Engine
//!
//! Keeps a venue's physical tables consistent across overlapping
//! reservations, temporary holds, check-in/check-out transitions and a
//! waitlist competing for the same tables, while multiple staff terminals
//! operate concurrently.
//!
//! The engine owns no durable state itself: bookings and tables live behind
//! the [`repository::ReservationRepository`] trait, holds are ephemeral and
//! in-process. One rule carries all correctness: the conflict check and the
//! resulting write for a table are serialized through a per-table lock, so
//! no two concurrent claims can both pass the check and both commit.
//!
//! Entry point is [`engine::FloorEngine`], which wires the clock, the
//! repository, the hold manager, the waitlist board and the snapshot
//! computer behind the operation surface consumed by booking, waitlist and
//! floor-plan callers.

pub mod clock;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod events;
pub mod holds;
pub mod locks;
pub mod logging;
pub mod repository;
pub mod reservations;
pub mod snapshot;
pub mod waitlist;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::FloorEngine;
pub use events::ReservationEvent;
pub use holds::TableHoldManager;
pub use repository::{ReservationRepository, memory::InMemoryRepository};
pub use reservations::ReservationManager;
pub use snapshot::{FloorSnapshotComputer, TableFlags, TableView};
pub use waitlist::WaitlistBoard;
