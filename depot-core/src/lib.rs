//! Depot Core
//!
//! Core types shared by the Depot supply-chain services.
//!
//! This crate contains:
//! - Domain types: Core business entities (Supplier, Product, PipelineRun, etc.)
//! - DTOs: Request payloads accepted by the API

pub mod domain;
pub mod dto;
