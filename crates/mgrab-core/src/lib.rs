pub mod config;
pub mod logging;

// Core pipeline: classify -> filter -> registry, fed by the capture coordinator.
pub mod capture;
pub mod classify;
pub mod command;
pub mod convert;
pub mod fetch;
pub mod filename;
pub mod filter;
pub mod harvest;
pub mod probe;
pub mod registry;
pub mod sink;
pub mod state_db;
