pub mod materializer;

pub use materializer::{MaterializeOptions, Materializer};
