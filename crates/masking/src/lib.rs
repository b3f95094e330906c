#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Wrapper types and traits for secret management.
//!
//! Values wrapped in [`Secret`] cannot be formatted or logged in clear text:
//! their `Debug` output is produced by a masking [`Strategy`] instead of the
//! inner value. Access to the inner value is explicit, through
//! [`PeekInterface`] or [`ExposeInterface`], so every exposure point is
//! visible in the code.

mod abs;
pub mod maskable;
mod secret;
mod serde;
mod strategy;
mod string;

pub use abs::{ExposeInterface, PeekInterface};
pub use maskable::{Mask, Maskable};
pub use secret::Secret;
pub use strategy::{Strategy, WithType, WithoutType};

pub use crate::serde::{ErasedSerialize, SerializableSecret};

/// This module should be included with an asterisk.
///
/// `use masking::prelude::*;`
pub mod prelude {
    pub use super::{ExposeInterface, PeekInterface};
}
