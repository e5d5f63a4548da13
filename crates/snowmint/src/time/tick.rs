use core::time::Duration;

use crate::{ConfigError, MintError, TimeSource};

/// Converts a [`TimeSource`] into whole ticks elapsed since an epoch.
///
/// `ticks = (now - epoch) / tick`, using floor division over nanoseconds.
#[derive(Clone, Debug)]
pub struct TickClock<T> {
    source: T,
    epoch: Duration,
    epoch_nanos: u128,
    tick_nanos: u128,
}

impl<T: TimeSource> TickClock<T> {
    /// Creates a clock measuring `tick`-sized units since `epoch`.
    ///
    /// `epoch` is a [`Duration`] since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTick`] if `tick` is zero.
    pub fn new(source: T, epoch: Duration, tick: Duration) -> Result<Self, ConfigError> {
        let tick_nanos = tick.as_nanos();
        if tick_nanos == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(Self {
            source,
            epoch,
            epoch_nanos: epoch.as_nanos(),
            tick_nanos,
        })
    }

    /// Returns whole ticks elapsed since the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`MintError::ClockBeforeEpoch`] if the source reads earlier
    /// than the epoch.
    #[inline]
    pub fn ticks_since_epoch(&self) -> Result<u128, MintError> {
        let now = self.source.now().as_nanos();
        let elapsed = now
            .checked_sub(self.epoch_nanos)
            .ok_or(MintError::ClockBeforeEpoch)?;
        Ok(elapsed / self.tick_nanos)
    }

    /// Returns the absolute time (since the Unix epoch) at which `ticks`
    /// begins.
    ///
    /// Saturates at [`Duration::MAX`].
    pub fn instant_of(&self, ticks: u64) -> Duration {
        let offset = u128::from(ticks).saturating_mul(self.tick_nanos);
        let secs = offset / 1_000_000_000;
        let nanos = (offset % 1_000_000_000) as u32;
        match u64::try_from(secs) {
            Ok(secs) => self.epoch.saturating_add(Duration::new(secs, nanos)),
            Err(_) => Duration::MAX,
        }
    }

    /// The configured epoch.
    pub fn epoch(&self) -> Duration {
        self.epoch
    }

    /// The configured tick length.
    pub fn tick(&self) -> Duration {
        let secs = self.tick_nanos / 1_000_000_000;
        let nanos = (self.tick_nanos % 1_000_000_000) as u32;
        Duration::new(secs as u64, nanos)
    }

    /// The underlying time source.
    pub fn source(&self) -> &T {
        &self.source
    }
}
