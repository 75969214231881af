//! # Slotbook Core
//!
//! Domain types and the availability/booking rules of the Slotbook booking
//! service. This crate performs no I/O of its own: persistence is reached
//! through the [`store::BookingStore`] trait.

pub mod admission;
pub mod availability;
pub mod errors;
pub mod models;
pub mod store;
pub mod time_grid;
