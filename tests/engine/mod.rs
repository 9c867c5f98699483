//! Tests for the samplers and analyzers through the lower-level API

mod analysis;
mod sampling;
