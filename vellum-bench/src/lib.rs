//! Vellum Benchmark Library
//!
//! Schema fixtures and generated payloads for the validation, merge and
//! sort-parsing benchmarks.

pub mod data_gen;
