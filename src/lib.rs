//! Luxmeet - backend service for a digital business card platform
//!
//! This library provides the core functionality behind the Luxmeet
//! editor and dashboard: validated card storage, a short-link registry
//! with click tracking, lead capture with model-based scoring, and thin
//! facades over the payment processor and CRM providers.
//!
//! # Architecture
//! - `models`: card/link/lead/account entities and their invariants
//! - `storage`: store traits and the in-memory backend
//! - `services`: business logic and external-collaborator ports
//! - `api`: HTTP handlers, middleware and response envelopes
//! - `config`: configuration management
//! - `system`: logging and process-level utilities

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
