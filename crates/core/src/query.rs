//! Query descriptor capability.

use alloc::string::String;
use alloc::vec::Vec;

/// A description of a live query that can be compared by content.
///
/// Callers may rebuild an equivalent descriptor on every call, so the engine
/// decides whether two descriptors denote the same live query through
/// `is_equal` and never through reference identity.
pub trait QueryDescriptor {
    /// Returns true if both descriptors select the same ordered result.
    fn is_equal(&self, other: &Self) -> bool;
}

impl QueryDescriptor for String {
    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl QueryDescriptor for &str {
    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl<Q: QueryDescriptor> QueryDescriptor for Vec<Q> {
    fn is_equal(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.is_equal(b))
    }
}

impl<Q: QueryDescriptor> QueryDescriptor for alloc::rc::Rc<Q> {
    fn is_equal(&self, other: &Self) -> bool {
        (**self).is_equal(other)
    }
}
