//! `define_port_error!` declares the error enum a driven port returns.
//!
//! The plain form takes every variant with its `thiserror` message and
//! emits snake_case constructors accepting `impl Into<_>` fields:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum CredentialHashError {
//!         Hashing { message: String } => "credential hashing failed: {message}",
//!     }
//! }
//! ```
//!
//! The repository form (`pub enum Name for "subject"`) adds the shared
//! `Connection` and `Query` variants, and each extra variant names the
//! domain error it surfaces as. The enum then converts into
//! [`crate::domain::Error`]: connection failures become
//! `service_unavailable`, query failures become `internal`.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum LikePersistenceError for "like repository" {
//!         AlreadyLiked => "article already liked by this user"
//!             => conflict("You have already liked this article"),
//!     }
//! }
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident for $subject:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $message:expr
                    => $kind:ident($public:expr)
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// Repository connection could not be established.
            #[error("{} connection failed: {message}", $subject)]
            Connection { message: String },
            /// Query or mutation failed during execution.
            #[error("{} query failed: {message}", $subject)]
            Query { message: String },
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            define_port_error!(@ctor Connection { message: String });
            define_port_error!(@ctor Query { message: String });
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                match error {
                    $name::Connection { message } => Self::service_unavailable(format!(
                        "{} unavailable: {message}",
                        $subject
                    )),
                    $name::Query { message } => {
                        Self::internal(format!("{} error: {message}", $subject))
                    }
                    $(
                        $name::$variant { .. } => Self::$kind($public),
                    )*
                }
            }
        }
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
