//! Shared fixtures and synthetic data for indexr tests.

pub mod data_gen;
pub mod fixtures;
