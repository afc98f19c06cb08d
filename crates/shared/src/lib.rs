//! Wire and domain types shared by the listing engine and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
