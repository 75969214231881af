pub mod availability;
pub mod businesses;
pub mod reservations;
