//! Domain types and models

pub mod message;

pub use message::{Message, SignalInfo};
