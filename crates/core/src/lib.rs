#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod sampling;
pub mod stats;
pub mod time;

pub use error::ValidationError;
pub use time::Clock;
