/// A result type defaulting to [`MintError`].
pub type Result<T, E = MintError> = core::result::Result<T, E>;

/// Rejected generator configuration.
///
/// Returned before a generator exists. These describe a programming or
/// deployment mistake: fix the parameters instead of retrying.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The node number does not fit in the node field.
    #[error("node {node} is out of range, must be between 0 and {max}")]
    NodeOutOfRange {
        /// The rejected node number.
        node: u64,
        /// The largest node number the layout can hold.
        max: u64,
    },

    /// The tick duration is zero.
    #[error("tick must be at least 1ns")]
    ZeroTick,

    /// The three field widths do not fit in 64 bits.
    #[error("invalid bit lengths: {total} bits requested, at most 64 available")]
    LayoutOverflow {
        /// Sum of the timestamp, node and sequence widths.
        total: u32,
    },

    /// The layout has no room for a sequence.
    #[error("sequence bits must not be 0")]
    ZeroSequenceBits,
}

/// Fatal failure while minting an ID.
///
/// None of these are retried internally. Each one means the generator can no
/// longer produce correct IDs with its current configuration or clock.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum MintError {
    /// The clock has advanced past the largest timestamp the layout can hold.
    ///
    /// Choose a newer epoch or widen the timestamp field.
    #[error("the maximum life cycle has ended: tick {ticks} exceeds {max}, check the epoch")]
    EpochExhausted {
        /// Ticks elapsed since the epoch.
        ticks: u128,
        /// The largest representable timestamp.
        max: u64,
    },

    /// The clock reads earlier than the configured epoch.
    #[error("clock reads earlier than the configured epoch")]
    ClockBeforeEpoch,

    /// The clock moved behind the last issued tick and the generator is
    /// configured with [`ClockPolicy::Fail`].
    ///
    /// [`ClockPolicy::Fail`]: crate::ClockPolicy::Fail
    #[error("clock moved backwards: tick {now} is behind last issued tick {last}")]
    ClockMovedBackwards {
        /// The tick the clock currently reports.
        now: u64,
        /// The tick of the last issued ID.
        last: u64,
    },
}

/// Malformed quoted-decimal ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input is not wrapped in double quotes.
    #[error("invalid ID: expected a quoted decimal string")]
    Unquoted,

    /// No digits between the quotes.
    #[error("invalid ID: empty string")]
    Empty,

    /// A leading minus sign.
    #[error("invalid ID: negative value")]
    Negative,

    /// A byte that is not an ASCII digit.
    #[error("invalid ID: unexpected byte 0x{byte:02x} at offset {offset}")]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Offset of the byte within the digits.
        offset: usize,
    },

    /// The value does not fit in 64 bits.
    #[error("invalid ID: value exceeds u64::MAX")]
    Overflow,
}
