//! Infrastructure layer: store connection lifecycle and state construction.

pub mod state;
pub mod store;
