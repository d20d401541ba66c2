pub mod adapters;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod services;
pub mod session_state;
pub mod startup;
pub mod utils;
