//! Vaultrag Core - Note and chunk types shared across the vaultrag crates.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;
