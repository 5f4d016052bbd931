pub mod config;
pub mod handlers;
pub mod hosted;
pub mod services;
pub mod startup;
