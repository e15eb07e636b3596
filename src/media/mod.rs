//! Input frame sources.

pub mod source;
