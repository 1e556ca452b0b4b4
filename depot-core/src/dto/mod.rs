//! Data Transfer Objects
//!
//! Request payloads accepted by the API and handed to the record store.
//! Store-assigned fields (ids, creation timestamps) are absent here.

pub mod inventory;
pub mod order;
pub mod pipeline;
pub mod product;
pub mod run;
pub mod supplier;
