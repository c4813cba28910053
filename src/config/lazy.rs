//! Fields whose default is computed on first read

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::OnceCell;
use std::fmt;

/// A value that is either set explicitly or computed once, on first read.
///
/// After the first read the computed value is cached; later changes to the
/// fields it was derived from do not affect it. Only [`Defaulted::set`]
/// replaces a cached value.
#[derive(Clone, PartialEq, Eq)]
pub struct Defaulted<T> {
    cell: OnceCell<T>,
}

impl<T> Defaulted<T> {
    /// No explicit value; the default will be computed on first read
    pub fn unset() -> Self {
        Self { cell: OnceCell::new() }
    }

    /// An explicit, user-supplied value
    pub fn explicit(value: T) -> Self {
        Self {
            cell: OnceCell::from(value),
        }
    }

    /// Return the held value, computing it with `compute` if nothing is held yet
    pub fn get_or_compute<F>(&self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(compute)
    }

    /// The held value, without computing anything
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Replace whatever is held with an explicit value
    pub fn set(&mut self, value: T) {
        self.cell = OnceCell::from(value);
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Defaulted<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T> From<T> for Defaulted<T> {
    fn from(value: T) -> Self {
        Self::explicit(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Defaulted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => value.fmt(f),
            None => write!(f, "<default>"),
        }
    }
}

// Serialized as the held value, or null when nothing has been resolved yet.

impl<T: Serialize> Serialize for Defaulted<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cell.get().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Defaulted<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::explicit(value),
            None => Self::unset(),
        })
    }
}
