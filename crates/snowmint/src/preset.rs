use core::time::Duration;

use crate::{ClockPolicy, GeneratorConfig};
#[cfg(feature = "std")]
use crate::{ConfigError, Id, SnowflakeGenerator, SystemClock};

/// Twitter epoch: Thursday, November 4, 2010 01:42:54 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_secs(1_288_834_974);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_secs(1_420_070_400);

/// Instagram-style epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const INSTAGRAM_EPOCH: Duration = Duration::from_secs(1_420_070_400);

const MILLISECOND: Duration = Duration::from_millis(1);

impl GeneratorConfig {
    /// Instagram-style parameters.
    ///
    /// - epoch: [`INSTAGRAM_EPOCH`]
    /// - tick: 1ms
    /// - 41 timestamp bits, 13 node bits, 10 sequence bits
    ///
    /// Instagram itself wraps the sequence modulo 1024 instead of waiting for
    /// the next tick. This generator waits.
    pub const fn instagram(node: u64) -> Self {
        Self::preset(INSTAGRAM_EPOCH, node, 41, 13, 10)
    }

    /// Discord parameters.
    ///
    /// - epoch: [`DISCORD_EPOCH`]
    /// - tick: 1ms
    /// - 41 timestamp bits, 10 node bits, 12 sequence bits
    pub const fn discord(node: u64) -> Self {
        Self::preset(DISCORD_EPOCH, node, 41, 10, 12)
    }

    /// Twitter parameters.
    ///
    /// - epoch: [`TWITTER_EPOCH`]
    /// - tick: 1ms
    /// - 41 timestamp bits, 10 node bits, 12 sequence bits
    pub const fn twitter(node: u64) -> Self {
        Self::preset(TWITTER_EPOCH, node, 41, 10, 12)
    }

    /// The default bit widths with a caller-chosen epoch.
    ///
    /// - tick: 1ms
    /// - 41 timestamp bits, 10 node bits, 12 sequence bits
    pub const fn with_default_layout(epoch: Duration, node: u64) -> Self {
        Self::preset(epoch, node, 41, 10, 12)
    }

    const fn preset(epoch: Duration, node: u64, ts: u8, nb: u8, seq: u8) -> Self {
        Self {
            epoch,
            tick: MILLISECOND,
            timestamp_bits: ts,
            node_bits: nb,
            sequence_bits: seq,
            node,
            clock_policy: ClockPolicy::Wait,
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl<ID: Id> SnowflakeGenerator<ID, SystemClock> {
    /// A wall-clock generator with [`GeneratorConfig::instagram`] parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NodeOutOfRange`] if `node` exceeds 8191.
    pub fn instagram(node: u64) -> Result<Self, ConfigError> {
        Self::new(GeneratorConfig::instagram(node))
    }

    /// A wall-clock generator with [`GeneratorConfig::discord`] parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NodeOutOfRange`] if `node` exceeds 1023.
    pub fn discord(node: u64) -> Result<Self, ConfigError> {
        Self::new(GeneratorConfig::discord(node))
    }

    /// A wall-clock generator with [`GeneratorConfig::twitter`] parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NodeOutOfRange`] if `node` exceeds 1023.
    pub fn twitter(node: u64) -> Result<Self, ConfigError> {
        Self::new(GeneratorConfig::twitter(node))
    }

    /// A wall-clock generator with the default bit widths and a custom epoch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NodeOutOfRange`] if `node` exceeds 1023.
    pub fn with_default_layout(epoch: Duration, node: u64) -> Result<Self, ConfigError> {
        Self::new(GeneratorConfig::with_default_layout(epoch, node))
    }
}
