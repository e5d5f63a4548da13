/// Internal helper to emit items only when the `serde` feature is enabled.
///
/// Evaluated against this crate's features, not the caller's, so
/// [`define_snowflake_id!`] can be expanded anywhere.
///
/// [`define_snowflake_id!`]: crate::define_snowflake_id
#[doc(hidden)]
#[cfg(feature = "serde")]
#[macro_export]
macro_rules! cfg_serde {
    ($($item:item)*) => { $($item)* };
}

#[doc(hidden)]
#[cfg(not(feature = "serde"))]
#[macro_export]
macro_rules! cfg_serde {
    ($($item:item)*) => {};
}
