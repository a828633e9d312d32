// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{error, model};

// === MODULE DEFINITION ===
pub mod module;
pub use module::CarMarket;

// === INTERNAL MODULES ===
// Exposed so controllers can inject storage and call services directly.
pub mod config;
pub mod domain;
pub mod infra;
