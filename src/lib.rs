pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod ingest;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod output;
pub mod table;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
