//! Data models module
//!
//! Contains all data structures used throughout the application:
//! - Email and corpus types
//! - Linguistic profile and metric types

pub mod email;
pub mod metrics;
