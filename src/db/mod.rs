pub mod balance;
pub mod connection;
pub mod migration;
pub mod transaction;
pub mod user;
pub mod wallet;
