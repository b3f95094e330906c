//!
//! Serde-related.
//!

pub use erased_serde::Serialize as ErasedSerialize;
use serde::{de, Serialize, Serializer};

use crate::{PeekInterface, Secret, Strategy};

/// Marker trait for secret types which may be [`Serialize`]-d by [`serde`].
///
/// Only types marked with this trait receive a `Serialize` impl for
/// `Secret<T>`, while every type implementing `DeserializeOwned` receives a
/// `Deserialize` impl. This asymmetry is deliberate: reading a secret into
/// the process is always fine, writing one out must be an explicit decision
/// made where the wrapped type is defined.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for serde_json::Value {}
impl SerializableSecret for String {}

impl<'de, T, I> de::Deserialize<'de> for Secret<T, I>
where
    T: Clone + de::DeserializeOwned + Sized,
    I: Strategy<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}

impl<T, I> Serialize for Secret<T, I>
where
    T: SerializableSecret + Serialize + Sized,
    I: Strategy<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.peek().serialize(serializer)
    }
}
