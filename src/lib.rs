//! Rusty Census: load a CSV file, inspect summary statistics, merge a second
//! file and export the results.
//!
//! The statistics core lives in [`stats`] and works on the in-memory
//! [`data::model::Dataset`]; everything under [`ui`] only renders it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod stats;
pub mod ui;
