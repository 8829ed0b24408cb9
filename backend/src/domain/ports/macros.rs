//! `define_port_error!` builds the error enums raised by outbound ports.
//!
//! Variants are unit-like or carry named `String` fields. Each variant gets a
//! snake_case constructor taking `impl Into<String>` per field, and the enum
//! gets a [`kind`](#method.kind) label for structured logs.

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident),+ $(,)? })? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $({ $($field: String),+ })?,
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build a [`" $name "::" $variant "`] error."]
                    pub fn [<$variant:snake>]($($($field: impl Into<String>),+)?) -> Self {
                        Self::$variant $({ $($field: $field.into()),+ })?
                    }
                )+

                /// Snake_case name of the variant.
                #[must_use]
                pub const fn kind(&self) -> &'static str {
                    match self {
                        $(Self::$variant { .. } => stringify!([<$variant:snake>]),)+
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;
