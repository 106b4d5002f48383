// Library for the service binary, demos and tests

pub mod config;
pub mod models;
pub mod probe;
pub mod query;
pub mod routes;
pub mod sampler;
pub mod server;
pub mod snapshot;
pub mod store;
pub mod version;
