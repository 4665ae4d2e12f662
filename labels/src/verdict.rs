//! Tri-state verdicts and the wire shapes that carry them

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

use crate::errors::LabelError;

/// Satisfaction score for one (activity, subspace) pair.
///
/// Ordered worst to best, so `min` picks the worst case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    /// -1
    NotSatisfied,
    /// 0
    Partial,
    /// 1
    Satisfied,
}

impl Verdict {
    /// Numeric value as sent by the classifier
    pub fn value(&self) -> i8 {
        match self {
            Self::NotSatisfied => -1,
            Self::Partial => 0,
            Self::Satisfied => 1,
        }
    }

    /// Human-readable meaning
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NotSatisfied => "not satisfied",
            Self::Partial => "partially satisfied",
            Self::Satisfied => "fully satisfied",
        }
    }

    /// Read a verdict out of an arbitrary JSON value.
    ///
    /// Accepts integral numbers in {-1, 0, 1}, including `1.0`. Everything
    /// else yields `None`.
    pub fn from_json(value: &Value) -> Option<Verdict> {
        let number = value.as_f64()?;
        if !number.is_finite() || number.fract() != 0.0 {
            return None;
        }
        Verdict::try_from(number as i64).ok()
    }
}

impl TryFrom<i64> for Verdict {
    type Error = LabelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::NotSatisfied),
            0 => Ok(Self::Partial),
            1 => Ok(Self::Satisfied),
            _ => Err(LabelError::InvalidVerdict { value }),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.value())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Verdict::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// The `result` field of a final label.
///
/// Multi-week payloads carry one verdict per tagged subspace; single
/// payloads carry one scalar for the whole activity. Values are kept raw so
/// a malformed entry only affects its own slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerdictShape {
    Many(Vec<Value>),
    Single(Value),
}

impl Default for VerdictShape {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl VerdictShape {
    /// Normalise into exactly `tag_count` slots, one per tagged subspace.
    ///
    /// A list is read index by index (missing or malformed entries become
    /// `None`); a scalar applies to every tagged subspace.
    pub fn aligned(&self, tag_count: usize) -> Vec<Option<Verdict>> {
        match self {
            Self::Many(values) => (0..tag_count)
                .map(|idx| values.get(idx).and_then(Verdict::from_json))
                .collect(),
            Self::Single(value) => vec![Verdict::from_json(value); tag_count],
        }
    }
}
