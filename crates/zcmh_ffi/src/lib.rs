//! Flutter bridge for the ZCMH core.

pub mod api;
