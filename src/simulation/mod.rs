//! Random group generation for benchmarks, stress tests, and the CLI.

pub mod generator;
