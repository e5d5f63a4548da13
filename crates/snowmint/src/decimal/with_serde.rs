pub mod as_decimal {
    //! Serialize any [`Id`] as a quoted decimal string.
    //!
    //! ```
    //! use serde::{Deserialize, Serialize};
    //!
    //! #[derive(Serialize, Deserialize)]
    //! struct Row {
    //!     #[serde(with = "snowmint::as_decimal")]
    //!     id: u64,
    //! }
    //! ```
    //!
    //! [`Id`]: crate::Id
    use core::{fmt, marker::PhantomData};

    use serde::{Deserializer, Serializer, de};

    use crate::{Id, decode_digits, encode};

    /// Serialize an ID as its decimal representation inside a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Id,
        S: Serializer,
    {
        s.serialize_str(encode(id.to_raw()).digits())
    }

    /// Deserialize an ID from a string of decimal digits.
    ///
    /// Bare numbers are rejected: the whole point of the format is that the
    /// value never passes through a lossy numeric type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails or the input is not a string
    /// - The string is empty, negative, contains a non-digit, or exceeds
    ///   [`u64::MAX`]
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Id,
        D: Deserializer<'de>,
    {
        struct DecimalVisitor<ID>(PhantomData<ID>);

        impl<ID: Id> de::Visitor<'_> for DecimalVisitor<ID> {
            type Value = ID;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string of decimal digits")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                decode_digits(v).map(ID::from_raw).map_err(E::custom)
            }
        }

        d.deserialize_str(DecimalVisitor(PhantomData))
    }
}
