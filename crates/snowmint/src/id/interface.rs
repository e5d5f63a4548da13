use core::{fmt, hash::Hash};

/// A 64-bit identifier minted by a [`SnowflakeGenerator`].
///
/// The generator only ever works on the raw `u64`; this trait lets callers
/// mint into distinct types (e.g. `UserId` vs `OrderId`) that share a
/// representation but cannot be mixed up. Declare such types with
/// [`define_snowflake_id!`].
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`define_snowflake_id!`]: crate::define_snowflake_id
pub trait Id:
    Copy + Clone + fmt::Display + fmt::Debug + PartialOrd + Ord + PartialEq + Eq + Hash
{
    /// Converts this type into its raw representation.
    fn to_raw(&self) -> u64;

    /// Converts a raw value into this type.
    fn from_raw(raw: u64) -> Self;
}

impl Id for u64 {
    #[inline]
    fn to_raw(&self) -> u64 {
        *self
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        raw
    }
}
