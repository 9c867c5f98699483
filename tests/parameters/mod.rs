//! Tests for the parameter space definition

mod bounds_tests;
mod problem_tests;
