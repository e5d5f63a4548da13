/// Declares a labelled 64-bit Snowflake ID newtype.
///
/// The generated type wraps a `u64` and implements [`Id`], `Display` (plain
/// decimal), `Debug`, `FromStr` (plain decimal), and conversions to and from
/// `u64`. With the `serde` feature it also serializes as a quoted decimal
/// string (see [`as_decimal`]).
///
/// The label carries no runtime behavior: two types declared with this macro
/// are layout-identical but cannot be confused at compile time.
///
/// ## Example
///
/// ```
/// use snowmint::{Id, define_snowflake_id};
///
/// define_snowflake_id!(
///     /// Identifies a user account.
///     UserId
/// );
///
/// let id = UserId::from_raw(42);
/// assert_eq!(id.to_string(), "42");
/// assert_eq!(u64::from(id), 42);
/// assert_eq!("42".parse::<UserId>(), Ok(id));
/// ```
///
/// [`Id`]: crate::Id
/// [`as_decimal`]: crate::as_decimal
#[macro_export]
macro_rules! define_snowflake_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name {
            id: u64,
        }

        impl $name {
            /// Wraps a raw value.
            pub const fn new(id: u64) -> Self {
                Self { id }
            }

            /// Returns the raw value.
            pub const fn get(&self) -> u64 {
                self.id
            }
        }

        impl $crate::Id for $name {
            #[inline]
            fn to_raw(&self) -> u64 {
                self.id
            }

            #[inline]
            fn from_raw(raw: u64) -> Self {
                Self { id: raw }
            }
        }

        impl ::core::convert::From<u64> for $name {
            fn from(id: u64) -> Self {
                Self { id }
            }
        }

        impl ::core::convert::From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.id
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::DecodeError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::decode_digits(s).map(Self::new)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.id, f)
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let full = ::core::any::type_name::<Self>();
                let name = full.rsplit("::").next().unwrap_or(full);
                f.debug_tuple(name)
                    .field(&format_args!("{} (0x{:016x})", self.id, self.id))
                    .finish()
            }
        }

        $crate::cfg_serde! {
            impl $crate::__private::serde::Serialize for $name {
                fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
                where
                    S: $crate::__private::serde::Serializer,
                {
                    $crate::as_decimal::serialize(self, serializer)
                }
            }

            impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
                where
                    D: $crate::__private::serde::Deserializer<'de>,
                {
                    $crate::as_decimal::deserialize(deserializer)
                }
            }
        }
    };
}

define_snowflake_id!(
    /// The default Snowflake ID type.
    ///
    /// Its field layout is not fixed by the type: decode it with the
    /// [`Layout`] of the generator that minted it.
    ///
    /// [`Layout`]: crate::Layout
    SnowflakeId
);
