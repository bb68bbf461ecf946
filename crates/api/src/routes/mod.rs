//! Route handlers for `/api/v1.0`

pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;
