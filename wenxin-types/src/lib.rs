#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::*;
pub use traits::*;
pub use types::*;
