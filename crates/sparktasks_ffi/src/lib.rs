//! Flutter bridge crate for SparkTasks.

pub mod api;
