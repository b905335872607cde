pub mod swyftx;
pub mod traits;
