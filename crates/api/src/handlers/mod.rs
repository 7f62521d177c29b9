pub mod car;
pub mod driver;
pub mod passenger;
pub mod transfer;
