//! Fest Admin API Library
//!
//! This library provides the core functionality for the fest registration
//! admin panel, including the registration domain, repositories, the report
//! exporter and the HTTP API.

pub mod api;
pub mod config;
pub mod domain;
pub mod export;
pub mod infrastructure;
