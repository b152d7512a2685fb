//! Backend core implementations

pub mod json;
pub mod observer;

pub use json::JsonCore;
pub use observer::{ObservedCore, ObservedEntry};

// Re-export the trait alongside its implementations
pub use crate::core::Core;
