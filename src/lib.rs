// Library exports for integration tests and the binary

pub mod api;
pub mod app_data;
pub mod cli;
pub mod config;
pub mod errors;
pub mod server;
pub mod services;
pub mod stores;
pub mod types;

#[cfg(test)]
pub(crate) mod test;
