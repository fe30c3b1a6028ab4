//! Diagram building blocks: the house-style prompt, the structured output
//! schema, markup normalization, and image link construction.

pub mod link;
pub mod markup;
pub mod prompt;
pub mod schema;
