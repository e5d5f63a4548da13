use crate::Id;

/// Represents the result of a single attempt to mint an ID.
///
/// This type models the outcome of [`SnowflakeGenerator::try_poll`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully minted.
/// - [`IdGenStatus::Pending`] means nothing was minted on this attempt: the
///   current tick's sequence is exhausted, the clock is behind the last issued
///   tick, or another caller won the compare-and-swap.
///
/// This allows callers to build their own retry loops;
/// [`SnowflakeGenerator::mint`] is the busy-spinning one.
///
/// # Example
///
/// ```
/// use snowmint::{IdGenStatus, SnowflakeGenerator, SnowflakeId, SystemClock};
///
/// let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
///     SnowflakeGenerator::discord(1).unwrap();
///
/// let id = loop {
///     match generator.try_poll().unwrap() {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => core::hint::spin_loop(),
///     }
/// };
/// assert_eq!(generator.decompose(id).node, 1);
/// ```
///
/// [`SnowflakeGenerator::try_poll`]: crate::SnowflakeGenerator::try_poll
/// [`SnowflakeGenerator::mint`]: crate::SnowflakeGenerator::mint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus<T: Id> {
    /// A unique ID was minted and is ready to use.
    Ready {
        /// The minted ID.
        id: T,
    },
    /// No ID was minted on this attempt.
    Pending {
        /// Ticks to wait before a retry can succeed. `0` means the attempt
        /// lost a race and may be retried immediately.
        yield_for: u64,
    },
}
