pub mod availability;
pub mod businesses;
pub mod health;
pub mod reservations;
