//! Engine session lifecycle for Querypad.
//!
//! Owns the single lazily-created engine connection and the memoized
//! extension loader. Constructed once by the composition root and shared by
//! reference with everything that needs engine access.

mod manager;

pub use manager::{EngineSession, Extension, SessionManager};
