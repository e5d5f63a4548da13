//! Lock-free Snowflake ID minting.
//!
//! A [`SnowflakeGenerator`] packs `[timestamp | node | sequence]` into a single
//! `u64` using a bit layout chosen at construction time. Any number of threads
//! can call [`SnowflakeGenerator::mint`] on a shared generator: the last
//! issued ID lives in one atomic word that is only ever advanced with
//! compare-and-swap.
//!
//! ```
//! use snowmint::{DISCORD_EPOCH, SnowflakeGenerator, SnowflakeId, SystemClock};
//!
//! let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
//!     SnowflakeGenerator::with_default_layout(DISCORD_EPOCH, 7).unwrap();
//!
//! let id = generator.mint();
//! assert_eq!(generator.decompose(id).node, 7);
//! ```
//!
//! # Feature flags
//! - `std` (default): [`SystemClock`], the host wall clock.
//! - `serde`: quoted-decimal `Serialize`/`Deserialize` for IDs and a
//!   `serde` derive on [`GeneratorConfig`].
//! - `tracing`: emits `tracing` spans and events from the generator.
//! - `cache-padded`: pads the shared atomic word to a cache line.
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod decimal;
mod error;
mod generator;
mod id;
mod layout;
mod preset;
mod status;
mod time;

pub use crate::config::*;
pub use crate::decimal::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::layout::*;
pub use crate::preset::*;
pub use crate::status::*;
pub use crate::time::*;

#[doc(hidden)]
#[cfg(feature = "serde")]
pub mod __private {
    pub use serde;
}
