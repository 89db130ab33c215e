//! Wire models for the upgrade mock HTTP API

pub mod models;
