//! Closed enumerations exchanged and stored as snake_case text.

/// Raised when text names no variant of a [`text_enum!`] type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {input:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub input: String,
}

/// Declare an enum with a fixed text form for each variant.
///
/// Generates serde support, `as_str`, `Display` and `FromStr`, all using the
/// same spellings.
macro_rules! text_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident as $kind:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::text_enum::UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    _ => Err($crate::domain::text_enum::UnknownVariant {
                        kind: $kind,
                        input: value.to_owned(),
                    }),
                }
            }
        }
    };
}

pub(crate) use text_enum;
