//! Core use-case services.
//!
//! # Responsibility
//! - Combine the stores into the use-cases the UI performs.
//! - Derive read-only home screen projections.

pub mod app_service;
pub mod dashboard;
