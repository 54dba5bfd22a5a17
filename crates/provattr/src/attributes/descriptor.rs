//! Attribute descriptors: the static schema behind every accessor.
//!
//! A descriptor says what an attribute is called, what kind of value it holds,
//! whether it is multi-valued, and what it resolves to when nothing is stored.

use super::coerce;
use crate::error::{ProvError, Result};
use serde::Serialize;
use std::fmt;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Int,
    Long,
    Bool,
    /// Human interval such as `2h`, read back as milliseconds.
    Duration,
    /// LDAP generalized time.
    Timestamp,
    /// Closed set of tokens (see [`AttributeDescriptor::values`]).
    Enum,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Int => "int",
            AttributeKind::Long => "long",
            AttributeKind::Bool => "bool",
            AttributeKind::Duration => "duration",
            AttributeKind::Timestamp => "timestamp",
            AttributeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for one attribute.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeDescriptor {
    /// Directory attribute name (e.g. `zimbraMailPort`)
    pub name: &'static str,

    /// Schema identifier. Informational only; `-1` for attributes from
    /// external schemas.
    pub id: i32,

    pub kind: AttributeKind,

    /// Whether the attribute holds zero or more values
    pub multi: bool,

    /// Stored form of the default, or `None` when the schema declares none
    pub default: Option<&'static str>,

    /// Valid tokens for `Enum` attributes
    pub values: &'static [&'static str],

    pub description: &'static str,
}

impl AttributeDescriptor {
    pub const fn new(name: &'static str, id: i32, kind: AttributeKind) -> Self {
        Self {
            name,
            id,
            kind,
            multi: false,
            default: None,
            values: &[],
            description: "",
        }
    }

    pub const fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub const fn default(mut self, raw: &'static str) -> Self {
        self.default = Some(raw);
        self
    }

    pub const fn values(mut self, tokens: &'static [&'static str]) -> Self {
        self.values = tokens;
        self
    }

    pub const fn describe(mut self, text: &'static str) -> Self {
        self.description = text;
        self
    }

    /// Name without the vendor prefix (`zimbraMailPort` -> `MailPort`).
    pub fn short_name(&self) -> &'static str {
        self.name.strip_prefix("zimbra").unwrap_or(self.name)
    }

    pub fn validate(&self, raw: &str) -> Result<()> {
        self.normalize(raw).map(|_| ())
    }

    /// Check `raw` against the declared kind and return its canonical stored
    /// form. An empty string is the clear sentinel and always passes.
    pub fn normalize(&self, raw: &str) -> Result<String> {
        if raw.is_empty() {
            return Ok(String::new());
        }
        let ok = match self.kind {
            AttributeKind::String => true,
            AttributeKind::Int => coerce::decode_int(raw).is_some(),
            AttributeKind::Long => coerce::decode_long(raw).is_some(),
            AttributeKind::Bool => {
                return coerce::parse_bool_token(raw)
                    .map(|b| coerce::encode_bool(b).to_string())
                    .ok_or_else(|| self.invalid(raw, "expected TRUE or FALSE"));
            }
            AttributeKind::Duration => coerce::decode_duration(raw).is_some(),
            AttributeKind::Timestamp => coerce::decode_timestamp(raw).is_some(),
            AttributeKind::Enum => self.values.contains(&raw),
        };
        if ok {
            Ok(raw.to_string())
        } else {
            Err(self.invalid(raw, &self.expectation()))
        }
    }

    fn expectation(&self) -> String {
        match self.kind {
            AttributeKind::String => "any string".to_string(),
            AttributeKind::Int => "a 32-bit integer".to_string(),
            AttributeKind::Long => "an integer, optionally with KB/MB/GB".to_string(),
            AttributeKind::Bool => "TRUE or FALSE".to_string(),
            AttributeKind::Duration => "a duration like 30s, 5m, 2h, 7d or 250ms".to_string(),
            AttributeKind::Timestamp => "generalized time like 20240131235959Z".to_string(),
            AttributeKind::Enum => format!("one of {}", self.values.join(", ")),
        }
    }

    fn invalid(&self, raw: &str, reason: &str) -> ProvError {
        ProvError::InvalidValue {
            name: self.name.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORT: AttributeDescriptor =
        AttributeDescriptor::new("zimbraMailPort", 154, AttributeKind::Int).default("80");
    const MODE: AttributeDescriptor =
        AttributeDescriptor::new("zimbraMailMode", 308, AttributeKind::Enum)
            .values(&["http", "https"]);
    const FLAG: AttributeDescriptor =
        AttributeDescriptor::new("zimbraImapServerEnabled", 176, AttributeKind::Bool);

    #[test]
    fn builder_sets_fields() {
        assert_eq!(PORT.name, "zimbraMailPort");
        assert_eq!(PORT.id, 154);
        assert_eq!(PORT.kind, AttributeKind::Int);
        assert_eq!(PORT.default, Some("80"));
        assert!(!PORT.multi);
    }

    #[test]
    fn short_name_strips_prefix() {
        assert_eq!(PORT.short_name(), "MailPort");
        let cn = AttributeDescriptor::new("cn", -1, AttributeKind::String);
        assert_eq!(cn.short_name(), "cn");
    }

    #[test]
    fn normalize_accepts_valid_values() {
        assert_eq!(PORT.normalize("8080").unwrap(), "8080");
        assert_eq!(MODE.normalize("https").unwrap(), "https");
    }

    #[test]
    fn normalize_canonicalizes_booleans() {
        assert_eq!(FLAG.normalize("true").unwrap(), "TRUE");
        assert_eq!(FLAG.normalize("FALSE").unwrap(), "FALSE");
    }

    #[test]
    fn normalize_rejects_wrong_kind() {
        let err = PORT.normalize("eighty").unwrap_err();
        assert!(matches!(err, ProvError::InvalidValue { .. }));
        assert!(MODE.normalize("gopher").is_err());
        assert!(FLAG.normalize("yes").is_err());
    }

    #[test]
    fn empty_string_is_clear_sentinel() {
        assert_eq!(PORT.normalize("").unwrap(), "");
        assert_eq!(MODE.normalize("").unwrap(), "");
    }
}
