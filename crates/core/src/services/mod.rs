pub mod aggregation_service;
pub mod currency_service;
pub mod ledger_service;
pub mod valuation_service;
