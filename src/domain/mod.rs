//! Domain layer: data model and port traits, free of infrastructure.

pub mod models;
pub mod ports;
