//! Core domain types
//!
//! This module contains the business entities of the supply-chain dashboard.
//! They are persisted by the server's record store and serialized as the JSON
//! bodies of the HTTP API (camelCase field names).

pub mod dashboard;
pub mod inventory;
pub mod log;
pub mod order;
pub mod pipeline;
pub mod product;
pub mod run;
pub mod supplier;
