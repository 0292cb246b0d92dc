//! HTTP handlers

pub mod cards;
pub mod sessions;
