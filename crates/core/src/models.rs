pub mod availability;
pub mod business;
pub mod employee;
pub mod reservation;
