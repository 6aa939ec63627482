//! Core lookup functionality: input normalization, the per-barcode
//! client, and the bounded-concurrency batch dispatcher.

pub mod batch;
pub mod client;
pub mod input;
pub mod records;
