//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `ItemUseError`, `SnapshotError`) live next to
//! the operations that raise them; this module only provides the shared
//! severity classification and the trait every error implements.
//!
//! Nothing in the simulation is fatal: rejected player operations are
//! reported back so the caller can show a message and re-prompt, and an
//! unusable save is discarded in favour of a fresh run.

/// Severity level of an error, used by callers to pick a recovery strategy.
///
/// - **Recoverable**: the player may retry with a different action
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: inventory full, no space to summon, already at full health.
    Recoverable,

    /// Examples: inventory slot out of range, undecodable snapshot payload.
    Validation,

    /// Examples: a snapshot that cannot be encoded.
    Internal,
}

impl ErrorSeverity {
    /// Returns true if this error indicates a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;
}
