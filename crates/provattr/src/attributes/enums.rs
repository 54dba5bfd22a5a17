//! Closed token sets for enum-kind attributes.
//!
//! Each enum is declared once with [`attr_enum!`](crate::attr_enum), which
//! derives the token table, parsing, display and stored-form conversion from a
//! single `Variant => "token"` list.

use std::fmt;

/// A Rust enum backed by a fixed list of stored tokens.
pub trait AttrEnum: Sized + Copy + PartialEq + fmt::Debug + 'static {
    /// Every valid stored token, in declaration order.
    const TOKENS: &'static [&'static str];

    /// Exact (case-sensitive) match against [`Self::TOKENS`].
    fn from_token(token: &str) -> Option<Self>;

    /// Canonical stored form.
    fn token(&self) -> &'static str;
}

/// Declares an enum-kind attribute value type.
///
/// ```
/// provattr::attr_enum! {
///     /// Example.
///     pub enum Answer {
///         Yes => "yes",
///         No => "no",
///     }
/// }
///
/// use provattr::AttrEnum;
/// assert_eq!(Answer::from_token("yes"), Some(Answer::Yes));
/// assert_eq!(Answer::No.to_string(), "no");
/// ```
#[macro_export]
macro_rules! attr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::attributes::AttrEnum for $name {
            const TOKENS: &'static [&'static str] = &[$($token),+];

            fn from_token(token: &str) -> ::std::option::Option<Self> {
                match token {
                    $($token => ::std::option::Option::Some($name::$variant),)+
                    _ => ::std::option::Option::None,
                }
            }

            fn token(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::attributes::AttrEnum::token(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::attributes::AttrEnum>::from_token(s).ok_or_else(|| {
                    format!(
                        "invalid value: {}, valid values: {:?}",
                        s,
                        <$name as $crate::attributes::AttrEnum>::TOKENS
                    )
                })
            }
        }

        impl $crate::attributes::ToAttrValue for $name {
            fn to_attr_value(&self) -> ::std::string::String {
                $crate::attributes::AttrEnum::token(self).to_string()
            }
        }
    };
}

crate::attr_enum! {
    pub enum BackupMode {
        Standard => "Standard",
        AutoGrouped => "Auto-Grouped",
    }
}

crate::attr_enum! {
    pub enum ClusterType {
        Veritas => "Veritas",
        RedHat => "RedHat",
        None => "none",
    }
}

crate::attr_enum! {
    /// HTTP/HTTPS mode of the mail service.
    pub enum MailMode {
        Http => "http",
        Https => "https",
        Both => "both",
        Mixed => "mixed",
        Redirect => "redirect",
    }
}

crate::attr_enum! {
    /// When an auth response carries a refer tag.
    pub enum MailReferMode {
        Always => "always",
        WrongHost => "wronghost",
        ReverseProxied => "reverse-proxied",
    }
}

crate::attr_enum! {
    pub enum MtaTlsSecurityLevel {
        May => "may",
        None => "none",
    }
}

crate::attr_enum! {
    pub enum ReverseProxyLogLevel {
        Debug => "debug",
        Info => "info",
        Notice => "notice",
        Warn => "warn",
        Error => "error",
        Crit => "crit",
    }
}

crate::attr_enum! {
    pub enum ReverseProxyMailMode {
        Http => "http",
        Https => "https",
        Both => "both",
        Mixed => "mixed",
        Redirect => "redirect",
    }
}

crate::attr_enum! {
    /// STARTTLS policy shared by the IMAP and POP3 proxies.
    pub enum StartTlsMode {
        Off => "off",
        On => "on",
        Only => "only",
    }
}

crate::attr_enum! {
    pub enum TableMaintenanceOperation {
        Analyze => "ANALYZE",
        Optimize => "OPTIMIZE",
    }
}
