//! Markup encoders for rendering-service URLs.

pub mod plantuml;

pub use plantuml::PlantUmlEncoder;
