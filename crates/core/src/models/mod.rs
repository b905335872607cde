pub mod account;
pub mod asset;
pub mod catalog;
pub mod holding;
pub mod ledger;
pub mod number;
pub mod portfolio;
pub mod server;
pub mod settings;
pub mod transaction;
