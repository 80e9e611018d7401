//! Comment State Value Object
//!
//! Lifecycle: every comment is created `pending`; moderation moves it to
//! `approved` or `rejected`. Those two are the only legal targets of a state
//! change — `pending` can never be re-entered — and re-applying the current
//! state is an allowed no-op. The public submission path never mutates state
//! after creation.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Comment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentState {
    /// Initial state, awaiting moderation; not publicly visible
    Pending,
    /// Approved by a moderator; publicly visible
    Approved,
    /// Rejected by a moderator; kept for the audit trail
    Rejected,
}

impl CommentState {
    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentState::Pending => "pending",
            CommentState::Approved => "approved",
            CommentState::Rejected => "rejected",
        }
    }

    /// Parse any lifecycle state (for filters and row mapping)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(CommentState::Pending),
            "approved" => Some(CommentState::Approved),
            "rejected" => Some(CommentState::Rejected),
            _ => None,
        }
    }

    /// Parse a moderation target state
    ///
    /// Only `approved` and `rejected` are valid targets; everything else,
    /// `pending` included, is a validation error.
    pub fn parse_moderation_target(s: &str) -> AppResult<Self> {
        match Self::parse(s) {
            Some(CommentState::Approved) => Ok(CommentState::Approved),
            Some(CommentState::Rejected) => Ok(CommentState::Rejected),
            _ => Err(AppError::bad_request(
                "status must be approved or rejected",
            )),
        }
    }
}

impl fmt::Display for CommentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for state in [
            CommentState::Pending,
            CommentState::Approved,
            CommentState::Rejected,
        ] {
            assert_eq!(CommentState::parse(state.as_str()), Some(state));
        }
        assert_eq!(CommentState::parse("deleted"), None);
        assert_eq!(CommentState::parse("Approved"), None);
    }

    #[test]
    fn test_moderation_targets() {
        assert_eq!(
            CommentState::parse_moderation_target("approved").unwrap(),
            CommentState::Approved
        );
        assert_eq!(
            CommentState::parse_moderation_target("rejected").unwrap(),
            CommentState::Rejected
        );
    }

    #[test]
    fn test_pending_is_not_a_moderation_target() {
        assert!(CommentState::parse_moderation_target("pending").is_err());
        assert!(CommentState::parse_moderation_target("deleted").is_err());
        assert!(CommentState::parse_moderation_target("").is_err());
    }
}
