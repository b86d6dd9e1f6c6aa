//! Core math modules.

pub mod holder;
pub mod stable;
