//! Comparison operators shared by every algorithm.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relational operator passed to the comparison hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
}

impl Operator {
    /// Evaluates `lhs <op> rhs`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Gt => lhs > rhs,
            Self::Le => lhs <= rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }

    /// Evaluates the operator over two element values.
    #[must_use]
    pub fn apply_values(self, lhs: u32, rhs: u32) -> bool {
        self.apply(f64::from(lhs), f64::from(rhs))
    }

    /// The operator's symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_values() {
        assert!(Operator::Lt.apply_values(1, 2));
        assert!(!Operator::Gt.apply_values(1, 2));
        assert!(Operator::Le.apply_values(2, 2));
        assert!(Operator::Ge.apply_values(2, 2));
        assert!(Operator::Eq.apply_values(3, 3));
        assert!(Operator::Ne.apply_values(3, 4));
    }

    #[test]
    fn test_apply_against_scalar() {
        assert!(Operator::Lt.apply(4.0, 4.5));
        assert!(!Operator::Lt.apply(5.0, 4.5));
    }

    #[test]
    fn test_serializes_as_symbol() {
        let json = serde_json::to_string(&Operator::Ne).unwrap();
        assert_eq!(json, "\"!=\"");
        let op: Operator = serde_json::from_str("\"<=\"").unwrap();
        assert_eq!(op, Operator::Le);
        assert_eq!(Operator::Ge.to_string(), ">=");
    }
}
