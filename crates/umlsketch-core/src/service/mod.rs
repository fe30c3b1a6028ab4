//! Request services: one per endpoint.

pub mod generator;
pub mod renderer;
