pub mod clients;
pub mod config_store;
pub mod defaults;
pub mod fs;
pub mod pdf;
pub mod preferences;
pub mod runtime_engine;
