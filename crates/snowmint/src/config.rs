use core::time::Duration;

#[cfg(feature = "std")]
use crate::SystemClock;
use crate::{ConfigError, Id, Layout, SnowflakeGenerator, TimeSource};

/// How the generator reacts when the clock reads earlier than the tick of the
/// last issued ID.
///
/// Wall clocks step backwards (NTP corrections, manual changes). Minting
/// against the older tick could reproduce a `(tick, sequence)` pair that was
/// already issued, so the generator never does that.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClockPolicy {
    /// Spin until the clock catches up with the last issued tick.
    ///
    /// A large backward step stalls minting for as long as the step.
    #[default]
    Wait,
    /// Fail with [`MintError::ClockMovedBackwards`].
    ///
    /// [`MintError::ClockMovedBackwards`]: crate::MintError::ClockMovedBackwards
    Fail,
}

/// Raw generator parameters.
///
/// Nothing is checked until [`GeneratorConfig::validate`] (or a generator
/// constructor, which calls it). With the `serde` feature enabled this can be
/// loaded from a config file:
///
/// ```json
/// {
///   "epoch": { "secs": 1420070400, "nanos": 0 },
///   "tick": { "secs": 0, "nanos": 1000000 },
///   "timestamp_bits": 41,
///   "node_bits": 10,
///   "sequence_bits": 12,
///   "node": 3
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Reference instant, as a [`Duration`] since the Unix epoch.
    pub epoch: Duration,
    /// Length of one timestamp unit.
    pub tick: Duration,
    /// Width of the timestamp field.
    pub timestamp_bits: u8,
    /// Width of the node field.
    pub node_bits: u8,
    /// Width of the sequence field.
    pub sequence_bits: u8,
    /// This generator's node number.
    pub node: u64,
    /// Reaction to a clock that moved backwards.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clock_policy: ClockPolicy,
}

impl GeneratorConfig {
    /// Checks the parameters and derives the bit layout.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`ConfigError::NodeOutOfRange`] if `node > 2^node_bits - 1`
    /// - [`ConfigError::ZeroTick`] if `tick` is zero
    /// - [`ConfigError::LayoutOverflow`] if the widths add up to more than 64
    /// - [`ConfigError::ZeroSequenceBits`] if `sequence_bits` is zero
    pub fn validate(&self) -> Result<Layout, ConfigError> {
        let max_node = crate::layout::mask(self.node_bits);
        if self.node > max_node {
            return Err(ConfigError::NodeOutOfRange {
                node: self.node,
                max: max_node,
            });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        Layout::new(self.timestamp_bits, self.node_bits, self.sequence_bits)
    }
}

/// Fluent construction of a [`SnowflakeGenerator`].
///
/// Starts from the default layout: 1ms ticks, 41 timestamp bits, 10 node bits,
/// 12 sequence bits, node 0, [`ClockPolicy::Wait`].
///
/// # Example
/// ```
/// use core::time::Duration;
/// use snowmint::{Builder, SnowflakeGenerator, SnowflakeId, SystemClock};
///
/// let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
///     Builder::new(Duration::from_secs(1_672_531_200))
///         .node(5)
///         .layout(41, 3, 19)
///         .build()
///         .unwrap();
///
/// assert_eq!(generator.layout().max_node(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Builder {
    config: GeneratorConfig,
}

impl Builder {
    /// Starts a builder for the given epoch (a [`Duration`] since the Unix
    /// epoch).
    pub const fn new(epoch: Duration) -> Self {
        Self {
            config: GeneratorConfig::with_default_layout(epoch, 0),
        }
    }

    /// Starts a builder from existing parameters.
    pub const fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Sets the epoch.
    pub const fn epoch(mut self, epoch: Duration) -> Self {
        self.config.epoch = epoch;
        self
    }

    /// Sets the tick length.
    pub const fn tick(mut self, tick: Duration) -> Self {
        self.config.tick = tick;
        self
    }

    /// Sets the node number.
    pub const fn node(mut self, node: u64) -> Self {
        self.config.node = node;
        self
    }

    /// Sets the timestamp, node, and sequence widths.
    pub const fn layout(mut self, timestamp_bits: u8, node_bits: u8, sequence_bits: u8) -> Self {
        self.config.timestamp_bits = timestamp_bits;
        self.config.node_bits = node_bits;
        self.config.sequence_bits = sequence_bits;
        self
    }

    /// Sets the reaction to a clock that moved backwards.
    pub const fn clock_policy(mut self, policy: ClockPolicy) -> Self {
        self.config.clock_policy = policy;
        self
    }

    /// The parameters collected so far.
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds a generator reading the host wall clock.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::validate`].
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[cfg(feature = "std")]
    pub fn build<ID: Id>(self) -> Result<SnowflakeGenerator<ID, SystemClock>, ConfigError> {
        SnowflakeGenerator::new(self.config)
    }

    /// Builds a generator reading a custom [`TimeSource`].
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::validate`].
    pub fn build_with_time<ID: Id, T: TimeSource>(
        self,
        time: T,
    ) -> Result<SnowflakeGenerator<ID, T>, ConfigError> {
        SnowflakeGenerator::with_time(self.config, time)
    }
}
