pub mod agent;
pub mod bundle;
pub mod config;
pub mod delivery;
pub mod extract;
pub mod fields;
pub mod sanitize;
pub mod schedule;
