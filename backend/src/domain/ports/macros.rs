//! Helper macro for declaring port error enums.
//!
//! `define_port_error!` emits a `thiserror` enum plus one documented
//! snake-case constructor per variant. Constructor parameters accept
//! `impl Into<T>` so adapters can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
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
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
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
                $variant $( {
                    $(
                        #[doc = concat!("Detail carried by `", stringify!($variant), "`.")]
                        $field : $ty
                    ),*
                } )?,
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

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        pub enum ProbePortError {
            Unreachable => "probe target unreachable",
            Rejected { reason: String } => "probe rejected: {reason}",
            Slow { millis: u64 } => "probe took {millis} ms",
            Partial { reason: String, millis: u64 } => "probe partial: {reason} after {millis} ms",
        }
    }

    #[rstest]
    fn unit_variants_get_constructors() {
        assert_eq!(ProbePortError::unreachable(), ProbePortError::Unreachable);
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = ProbePortError::rejected("bad slug");
        assert_eq!(err.to_string(), "probe rejected: bad slug");
    }

    #[rstest]
    fn other_fields_keep_their_types() {
        let err = ProbePortError::slow(42_u64);
        assert_eq!(err.to_string(), "probe took 42 ms");
    }

    #[rstest]
    fn mixed_fields_are_positional() {
        let err = ProbePortError::partial("timeout", 7_u64);
        assert_eq!(err.to_string(), "probe partial: timeout after 7 ms");
    }
}
