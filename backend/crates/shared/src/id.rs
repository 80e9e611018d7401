//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.
//!
//! Ids are assigned by the database (`BIGSERIAL`), so there is no random
//! constructor; values always come from a row or from client input.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper over a database `BIGSERIAL` value
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type CommentId = Id<markers::Comment>;
/// let id = CommentId::from_i64(42);
/// assert_eq!(id.value(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

// Manual impls: derives would demand the same bounds of the marker type,
// and markers are plain unit structs
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Id<T> {
    /// Create from a raw database value
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying value
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for credential (user) IDs
    pub struct User;

    /// Marker for comment IDs
    pub struct Comment;

    /// Marker for blog post IDs
    pub struct Post;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type CommentId = Id<markers::Comment>;
pub type PostId = Id<markers::Post>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let comment_id: CommentId = Id::from_i64(1);
        let post_id: PostId = Id::from_i64(1);

        // These are different types, cannot be mixed
        let _c: i64 = comment_id.value();
        let _p: i64 = post_id.value();
    }

    #[test]
    fn test_id_roundtrip() {
        let id: CommentId = 42.into();
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }
}
