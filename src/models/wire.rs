//! Closed-set string enumerations as they appear on the wire.
//!
//! NewsAPI.org sends categories, languages, countries, logo sizes and sort
//! criteria as bare lowercase tokens. [`wire_enum!`] turns a token table into a
//! Rust enum with an exhaustive, case-sensitive [`FromStr`](std::str::FromStr),
//! a matching [`Display`](std::fmt::Display), serde support using the same
//! tokens and an `ALL` list of variants.

use thiserror::Error;

/// A token that is not a member of the closed set it was parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{token}`")]
pub struct UnknownToken {
    /// Which closed set rejected the token (e.g. `"category"`).
    pub kind: &'static str,
    /// The raw token, exactly as received.
    pub token: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The exact token used by the API.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::wire::UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err($crate::models::wire::UnknownToken {
                        kind: $kind,
                        token: s.to_string(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;
