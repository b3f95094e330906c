//!
//! Secret strings
//!
//! There is no alias type by design.

use std::str::FromStr;

use super::{Secret, Strategy};

impl<I> FromStr for Secret<String, I>
where
    I: Strategy<String>,
{
    type Err = std::convert::Infallible;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(src.to_string()))
    }
}
