//! Helper macro for declaring port error enums.
//!
//! `define_port_error!` expands to a `thiserror` enum plus one snake_case
//! constructor per variant. Constructor parameters accept `impl Into<T>` so
//! adapters can pass `&str`, `String` or any convertible value.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant [] [] $( $field : $ty, )*);
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;
