//! Input decoding and preprocessing

pub mod json;
pub mod preprocessing;
