pub mod configuration;
pub mod contact_client;
pub mod domain;
pub mod handler;
pub mod page;
pub mod startup;
pub mod telemetry;
