//! Integration tests for the gsa-rs library
//!
//! These tests run whole analysis sessions, from model definition to the
//! written plot.

// The parabola model with one fixed argument
pub mod parabola;

// Sellmeijer piping rule, compared with SALib reference values
pub mod piping;

// Ranking, determinism and error behaviour of a session
pub mod session;

// Plot output
pub mod plotting;
