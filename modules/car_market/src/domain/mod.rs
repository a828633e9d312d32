pub mod auth;
pub mod cars;
pub mod compare;
pub mod error;
pub mod favorites;
pub mod listing;
pub mod outreach;
pub mod ports;
pub mod seed;
pub mod session;
pub mod state;
