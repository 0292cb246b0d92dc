//! Server-side state

pub mod sessions;
