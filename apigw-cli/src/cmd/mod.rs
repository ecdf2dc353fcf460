pub mod config;
pub mod deploy;
pub mod endpoints;
pub mod validate;
