use core::{cmp, fmt, marker::PhantomData, time::Duration};

use crossbeam_utils::Backoff;
use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

#[cfg(feature = "std")]
use crate::SystemClock;
use crate::{
    ClockPolicy, ConfigError, GeneratorConfig, Id, IdGenStatus, Layout, MintError, Parts, Result,
    TickClock, TimeSource,
};

/// A lock-free Snowflake ID generator suitable for multi-threaded environments.
///
/// The last issued ID is stored in a single [`AtomicU64`] that is only ever
/// advanced with compare-and-swap, so a shared `&SnowflakeGenerator` can be
/// used from any number of threads without a lock.
///
/// ## Guarantees
/// - Every ID returned by one generator is distinct.
/// - Timestamp fields never decrease, even when the wall clock steps back
///   (see [`ClockPolicy`]).
/// - At most `2^sequence_bits` IDs are minted per tick; further callers spin
///   until the next tick.
///
/// IDs from different generators are only distinct if their node numbers are.
///
/// ## Example
/// ```
/// use snowmint::{Builder, SnowflakeGenerator, SnowflakeId, SystemClock, TWITTER_EPOCH};
///
/// let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
///     Builder::new(TWITTER_EPOCH).node(3).build().unwrap();
///
/// let a = generator.mint();
/// let b = generator.mint();
/// assert!(a < b);
/// ```
pub struct SnowflakeGenerator<ID, T>
where
    ID: Id,
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    layout: Layout,
    node: u64,
    clock_policy: ClockPolicy,
    clock: TickClock<T>,
    _id: PhantomData<fn() -> ID>,
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl<ID: Id> SnowflakeGenerator<ID, SystemClock> {
    /// Creates a generator reading the host wall clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid; see
    /// [`GeneratorConfig::validate`].
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_time(config, SystemClock)
    }
}

impl<ID, T> SnowflakeGenerator<ID, T>
where
    ID: Id,
    T: TimeSource,
{
    /// Creates a generator reading a custom [`TimeSource`].
    ///
    /// The shared word starts at zero. No ID is minted until the first call.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid; see
    /// [`GeneratorConfig::validate`].
    pub fn with_time(config: GeneratorConfig, time: T) -> Result<Self, ConfigError> {
        let layout = config.validate()?;
        let clock = TickClock::new(time, config.epoch, config.tick)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node = config.node,
            timestamp_bits = layout.timestamp_bits(),
            node_bits = layout.node_bits(),
            sequence_bits = layout.sequence_bits(),
            epoch = ?config.epoch,
            tick = ?config.tick,
            "snowflake generator ready"
        );

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(0),
            layout,
            node: config.node,
            clock_policy: config.clock_policy,
            clock,
            _id: PhantomData,
        })
    }

    /// Mints the next ID, spinning while the current tick is exhausted.
    ///
    /// # Panics
    ///
    /// Panics on any [`MintError`], most notably when the clock has run past
    /// the largest timestamp the layout can hold. Use [`Self::try_mint`] to
    /// handle these without unwinding.
    pub fn mint(&self) -> ID {
        match self.try_mint() {
            Ok(id) => id,
            Err(e) => panic!("snowflake: {e}"),
        }
    }

    /// A fallible version of [`Self::mint`].
    ///
    /// Retries [`Self::try_poll`] until it is ready. Between attempts the
    /// caller busy-spins with a bounded exponential backoff; it never sleeps
    /// or yields to the scheduler, trading CPU for latency when the tick's
    /// sequence space runs out.
    ///
    /// # Errors
    ///
    /// Returns the first [`MintError`] reported by [`Self::try_poll`].
    pub fn try_mint(&self) -> Result<ID> {
        let backoff = Backoff::new();
        loop {
            match self.try_poll()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { .. } => backoff.spin(),
            }
        }
    }

    /// Makes exactly one attempt to mint an ID.
    ///
    /// # Returns
    /// - `Ok(IdGenStatus::Ready { id })`: a new ID was minted
    /// - `Ok(IdGenStatus::Pending { yield_for })`: nothing was minted; retry
    ///   after `yield_for` ticks (`0` after losing a race)
    ///
    /// # Errors
    ///
    /// - [`MintError::EpochExhausted`] if the clock is past the largest
    ///   timestamp
    /// - [`MintError::ClockBeforeEpoch`] if the clock is before the epoch
    /// - [`MintError::ClockMovedBackwards`] if the clock is behind the last
    ///   issued tick and the policy is [`ClockPolicy::Fail`]
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll(&self) -> Result<IdGenStatus<ID>> {
        let prev = self.state.load(Ordering::Relaxed);
        let prev_tick = self.layout.timestamp(prev);
        let prev_seq = self.layout.sequence(prev);

        let now = self.clock.ticks_since_epoch()?;
        let now = match u64::try_from(now) {
            Ok(now) if now <= self.layout.max_timestamp() => now,
            _ => return Err(self.cold_epoch_exhausted(now)),
        };

        let seq = match now.cmp(&prev_tick) {
            cmp::Ordering::Greater => 0,
            cmp::Ordering::Equal => {
                if prev_seq >= self.layout.max_sequence() {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
                prev_seq + 1
            }
            cmp::Ordering::Less => return self.cold_clock_behind(now, prev_tick),
        };

        let next = self.layout.compose(now, self.node, seq);

        if self
            .state
            .compare_exchange(prev, next, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            Ok(IdGenStatus::Ready {
                id: ID::from_raw(next),
            })
        } else {
            // Another caller won the race. Yield 0 to retry immediately.
            Ok(IdGenStatus::Pending { yield_for: 0 })
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, now: u64, last: u64) -> Result<IdGenStatus<ID>> {
        match self.clock_policy {
            ClockPolicy::Wait => {
                #[cfg(feature = "tracing")]
                tracing::debug!(now, last, "clock behind last issued tick, waiting");
                Ok(IdGenStatus::Pending {
                    yield_for: last - now,
                })
            }
            ClockPolicy::Fail => {
                #[cfg(feature = "tracing")]
                tracing::warn!(now, last, "clock moved backwards");
                Err(MintError::ClockMovedBackwards { now, last })
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_epoch_exhausted(&self, ticks: u128) -> MintError {
        let max = self.layout.max_timestamp();
        #[cfg(feature = "tracing")]
        tracing::error!(ticks = ?ticks, max, "timestamp field exhausted for this epoch");
        MintError::EpochExhausted { ticks, max }
    }

    /// Splits an ID minted by this generator into its fields.
    pub fn decompose(&self, id: ID) -> Parts {
        self.layout.decompose(id.to_raw())
    }

    /// Returns the start of the tick encoded in `id`, as a [`Duration`] since
    /// the Unix epoch.
    pub fn timestamp_of(&self, id: ID) -> Duration {
        self.clock.instant_of(self.layout.timestamp(id.to_raw()))
    }

    /// The validated bit layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// This generator's node number.
    pub fn node(&self) -> u64 {
        self.node
    }

    /// The configured epoch.
    pub fn epoch(&self) -> Duration {
        self.clock.epoch()
    }

    /// The configured tick length.
    pub fn tick(&self) -> Duration {
        self.clock.tick()
    }

    /// The reaction to a clock that moved backwards.
    pub fn clock_policy(&self) -> ClockPolicy {
        self.clock_policy
    }

    /// The underlying time source.
    pub fn time(&self) -> &T {
        self.clock.source()
    }
}

impl<ID, T> fmt::Debug for SnowflakeGenerator<ID, T>
where
    ID: Id,
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("layout", &self.layout)
            .field("node", &self.node)
            .field("clock_policy", &self.clock_policy)
            .field("epoch", &self.clock.epoch())
            .field("tick", &self.clock.tick())
            .field("last", &self.state.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
