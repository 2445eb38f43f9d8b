//! Persistence layer for payment records.

pub mod payments_repo;
