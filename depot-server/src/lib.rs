//! Depot Server
//!
//! Backend of the supply-chain dashboard: CRUD over suppliers, products,
//! inventory and orders, plus ETL pipelines whose runs are executed by the
//! [`engine`] and summarised by the dashboard aggregator.
//!
//! Architecture:
//! - API: axum handlers, one module per resource
//! - Services: validation and business rules
//! - Engine: run lifecycle and the bounded worker pool
//! - Repository: record store traits with Postgres and in-memory backends

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod repository;
pub mod service;
pub mod shutdown;
pub mod state;
