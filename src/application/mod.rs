pub mod bootstrap;
pub mod error;
pub mod exchange;
pub mod listing;
pub mod service;
pub mod store;
