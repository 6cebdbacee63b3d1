//! Invocation key slots.
//!
//! A command is invoked by up to three keys: a required primary key and
//! optional short and alternate keys. Each slot holds either a fixed
//! string or a zero-argument function evaluated once at registry build.

use std::borrow::Cow;
use std::fmt;

use crate::error::{ChainError, Result};

/// One key slot of a command definition.
#[derive(Clone)]
pub enum KeySlot {
    /// Fixed key string.
    Literal(Cow<'static, str>),
    /// Key computed when the registry is built. `None` means the key
    /// cannot be produced.
    Computed(fn() -> Option<String>),
}

impl KeySlot {
    /// Fixed key.
    pub fn literal(key: impl Into<Cow<'static, str>>) -> Self {
        Self::Literal(key.into())
    }

    /// Key produced by `f` at registry build.
    #[must_use]
    pub const fn computed(f: fn() -> Option<String>) -> Self {
        Self::Computed(f)
    }

    /// Resolve the slot to its key string.
    ///
    /// Any string is a key, including an empty one. `None` only when a
    /// computed slot produced nothing.
    #[must_use]
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Literal(key) => Some(key.to_string()),
            Self::Computed(f) => f(),
        }
    }

    /// Resolve a required slot, failing with `InvalidKeyDefinition` when it
    /// yields no key or the empty string.
    pub(crate) fn resolve_required(&self, command: &str) -> Result<String> {
        let reason = match (self, self.resolve()) {
            (_, Some(key)) if !key.is_empty() => return Ok(key),
            (Self::Computed(_), None) => "primary key function produced no key",
            _ => "primary key is empty",
        };
        Err(ChainError::InvalidKeyDefinition {
            command: command.to_string(),
            reason: reason.to_string(),
        })
    }
}

impl fmt::Debug for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&'static str> for KeySlot {
    fn from(key: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(key))
    }
}

impl From<String> for KeySlot {
    fn from(key: String) -> Self {
        Self::Literal(Cow::Owned(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classmethod_key() -> Option<String> {
        Some("classmethod".to_string())
    }

    fn unbound_key() -> Option<String> {
        None
    }

    #[test]
    fn literal_resolves_directly() {
        assert_eq!(KeySlot::from("start").resolve().as_deref(), Some("start"));
    }

    #[test]
    fn computed_is_invoked() {
        assert_eq!(
            KeySlot::computed(classmethod_key).resolve().as_deref(),
            Some("classmethod")
        );
    }

    #[test]
    fn empty_literal_resolves_as_is() {
        assert_eq!(KeySlot::from("").resolve().as_deref(), Some(""));
        assert_eq!(KeySlot::from("  ").resolve().as_deref(), Some("  "));
    }

    #[test]
    fn required_slot_rejects_only_the_empty_string() {
        let err = KeySlot::from("").resolve_required("BadKey").unwrap_err();
        assert!(err.to_string().contains("primary key is empty"));

        assert_eq!(KeySlot::from("  ").resolve_required("Spaced").unwrap(), "  ");
    }

    #[test]
    fn required_slot_reports_command_name() {
        let err = KeySlot::computed(unbound_key)
            .resolve_required("BadKey2")
            .unwrap_err();
        assert!(matches!(
            err,
            ChainError::InvalidKeyDefinition { ref command, .. } if command == "BadKey2"
        ));
    }
}
