//! Bitwise channel operators and the name registry.
//!
//! A [`Transform`] combines two 16-bit channel samples into one 8-bit
//! result. Only the low 8 bits of the combined value survive: a sample of
//! `0xFF00` XOR `0x00FF` yields `0xFF`, while `0xFF00` alone truncates to
//! `0x00`. Blending is lossy by construction and results never depend on
//! the output raster's own precision.
//!
//! # Registry
//!
//! | Name  | Operator          | Result            |
//! |-------|-------------------|-------------------|
//! | `xor` | [`Operator::Xor`] | `(a ^ b) & 0xFF`  |
//! | `or`  | [`Operator::Or`]  | `(a \| b) & 0xFF` |
//! | `and` | [`Operator::And`] | `(a & b) & 0xFF`  |
//!
//! Lookup is case-sensitive with no trimming and no aliases.
//!
//! # Example
//!
//! ```rust
//! use bitblend_ops::operator::{resolve, Operator};
//!
//! let op = resolve("xor").unwrap();
//! assert_eq!(op, Operator::Xor);
//! assert_eq!(op.apply(0xFFFF, 0x0000), 0xFF);
//! assert!(resolve("XOR").is_err());
//! ```

use crate::{OpsError, OpsResult};
use std::str::FromStr;

/// Per-channel transform: two samples in, one truncated byte out.
pub type Transform = fn(u32, u32) -> u8;

/// Bitwise operator applied independently to each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Exclusive or.
    Xor,
    /// Inclusive or.
    Or,
    /// And.
    And,
}

/// Name table backing [`resolve`].
pub const OPERATORS: [(&str, Operator); 3] = [
    ("xor", Operator::Xor),
    ("or", Operator::Or),
    ("and", Operator::And),
];

fn xor(a: u32, b: u32) -> u8 {
    (a ^ b) as u8
}

fn or(a: u32, b: u32) -> u8 {
    (a | b) as u8
}

fn and(a: u32, b: u32) -> u8 {
    (a & b) as u8
}

impl Operator {
    /// All operators in registry order.
    pub const ALL: [Operator; 3] = [Self::Xor, Self::Or, Self::And];

    /// Registry name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Xor => "xor",
            Self::Or => "or",
            Self::And => "and",
        }
    }

    /// Returns the channel transform for this operator.
    #[inline]
    pub fn transform(&self) -> Transform {
        match self {
            Self::Xor => xor,
            Self::Or => or,
            Self::And => and,
        }
    }

    /// Applies the operator to one channel pair, keeping the low byte.
    #[inline]
    pub fn apply(&self, a: u32, b: u32) -> u8 {
        (self.transform())(a, b)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operator {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Looks up an operator by its exact registry name.
///
/// # Errors
///
/// Returns [`OpsError::UnsupportedOperator`] carrying `name` when it is not
/// one of `xor`, `or`, `and`.
pub fn resolve(name: &str) -> OpsResult<Operator> {
    OPERATORS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|&(_, op)| op)
        .ok_or_else(|| OpsError::unsupported_operator(name))
}
