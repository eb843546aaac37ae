//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g., `EffectError`, `CombatError`) live next to the
//! operations they describe. Every one of them maps onto a [`ReasonCode`], the
//! fixed vocabulary that travels in `{ ok: false, reason }` records to other
//! replicas and to the presentation layer.
//!
//! # Design Principles
//!
//! - **No panics for domain conditions**: expected failures are values
//! - **Stable codes**: reason codes are part of the wire contract
//! - **Severity Classification**: errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: not enough AP, target out of range
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown effect id, unknown weapon id
    Validation,

    /// Internal error - malformed data reached the engine.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Fixed vocabulary of failure reasons shared by every public operation.
///
/// The string form (`unknown_effect`, `no_ap`, ...) is what other replicas and
/// the UI see, so variants must never be renamed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReasonCode {
    UnknownEffect,
    NotHexEffect,
    NoAp,
    BadWeapon,
    TooClose,
    OutOfRange,
    NoUnit,
    StatusSlotsFull,
    AbilitiesDisabled,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Map every variant onto exactly one [`ReasonCode`]
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the wire-level reason code for this error.
    fn reason(&self) -> ReasonCode;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        self.reason().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn reason_codes_use_snake_case_wire_names() {
        assert_eq!(ReasonCode::UnknownEffect.as_str(), "unknown_effect");
        assert_eq!(ReasonCode::NotHexEffect.as_str(), "not_hex_effect");
        assert_eq!(ReasonCode::NoAp.as_str(), "no_ap");
        assert_eq!(ReasonCode::BadWeapon.as_str(), "bad_weapon");
        assert_eq!(ReasonCode::TooClose.as_str(), "too_close");
        assert_eq!(ReasonCode::OutOfRange.as_str(), "out_of_range");
        assert_eq!(ReasonCode::NoUnit.as_str(), "no_unit");
    }

    #[test]
    fn reason_codes_parse_back() {
        for code in ReasonCode::iter() {
            let parsed: ReasonCode = code.as_str().parse().unwrap();
            assert_eq!(parsed, code);
        }
    }
}
