//! Resolved attribute values.
//!
//! [`AttrValue`] is what the name-based path hands back: the stored value
//! decoded according to its descriptor, or the default when nothing usable is
//! stored. Typed handles skip this enum and return plain Rust types.

use super::coerce;
use super::descriptor::{AttributeDescriptor, AttributeKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Runtime representation of a resolved attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Free-form string; `None` when unset with no default.
    Str(Option<String>),

    Int(i32),

    Long(i64),

    Bool(bool),

    /// Interval in milliseconds, plus the stored human form when there is one.
    Duration { millis: i64, raw: Option<String> },

    Timestamp(Option<DateTime<Utc>>),

    /// Enum token; `None` when unset (or unparsable) with no default.
    Enum(Option<String>),

    /// Multi-valued attribute. Empty when unset, never absent.
    Multi(Vec<String>),
}

impl AttrValue {
    /// What an attribute of this shape resolves to when neither the store nor
    /// the descriptor supplies a value.
    pub fn implicit_default(desc: &AttributeDescriptor) -> Self {
        if desc.multi {
            return AttrValue::Multi(Vec::new());
        }
        match desc.kind {
            AttributeKind::String => AttrValue::Str(None),
            AttributeKind::Int => AttrValue::Int(-1),
            AttributeKind::Long => AttrValue::Long(-1),
            AttributeKind::Bool => AttrValue::Bool(false),
            AttributeKind::Duration => AttrValue::Duration {
                millis: -1,
                raw: None,
            },
            AttributeKind::Timestamp => AttrValue::Timestamp(None),
            AttributeKind::Enum => AttrValue::Enum(None),
        }
    }

    /// Decode a single stored string for a single-valued descriptor.
    ///
    /// Returns `None` when `raw` is not representable as the descriptor's kind.
    pub fn decode(desc: &AttributeDescriptor, raw: &str) -> Option<Self> {
        let value = match desc.kind {
            AttributeKind::String => AttrValue::Str(Some(raw.to_string())),
            AttributeKind::Int => AttrValue::Int(coerce::decode_int(raw)?),
            AttributeKind::Long => AttrValue::Long(coerce::decode_long(raw)?),
            AttributeKind::Bool => AttrValue::Bool(coerce::decode_bool(raw)),
            AttributeKind::Duration => AttrValue::Duration {
                millis: coerce::decode_duration(raw)?,
                raw: Some(raw.to_string()),
            },
            AttributeKind::Timestamp => {
                AttrValue::Timestamp(Some(coerce::decode_timestamp(raw)?))
            }
            AttributeKind::Enum => {
                if !desc.values.contains(&raw) {
                    return None;
                }
                AttrValue::Enum(Some(raw.to_string()))
            }
        };
        Some(value)
    }

    /// True for the "nothing here" forms: unset strings, enums and
    /// timestamps, and empty multi-values.
    pub fn is_absent(&self) -> bool {
        match self {
            AttrValue::Str(v) | AttrValue::Enum(v) => v.is_none(),
            AttrValue::Timestamp(v) => v.is_none(),
            AttrValue::Multi(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(v) | AttrValue::Enum(v) => v.as_deref(),
            AttrValue::Duration { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            AttrValue::Long(v) => Some(*v),
            AttrValue::Int(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Milliseconds for duration values.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            AttrValue::Duration { millis, .. } => Some(*millis),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Timestamp(v) => *v,
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::Multi(v) => Some(v),
            _ => None,
        }
    }
}

/// Renders values in stored form; absent values render as an empty string.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(v) | AttrValue::Enum(v) => f.write_str(v.as_deref().unwrap_or("")),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Long(v) => write!(f, "{}", v),
            AttrValue::Bool(v) => f.write_str(coerce::encode_bool(*v)),
            AttrValue::Duration { millis, raw } => match raw {
                Some(raw) => f.write_str(raw),
                None => write!(f, "{}ms", millis),
            },
            AttrValue::Timestamp(v) => match v {
                Some(ts) => f.write_str(&coerce::encode_timestamp(ts)),
                None => Ok(()),
            },
            AttrValue::Multi(v) => f.write_str(&v.join(", ")),
        }
    }
}
