pub mod account_service;
pub mod authentication;
pub mod configuration;
pub mod credential_store;
pub mod domains;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
