//! Configuration and data types shared by the handler

pub mod config;
pub mod models;
