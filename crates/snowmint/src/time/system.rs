use core::time::Duration;
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The host's wall clock.
///
/// This is **not** a monotonic clock: NTP steps and manual adjustments are
/// visible to the generator. See [`ClockPolicy`] for how a backward step is
/// handled.
///
/// A host clock set before 1970 reads as [`Duration::ZERO`].
///
/// [`ClockPolicy`]: crate::ClockPolicy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}
