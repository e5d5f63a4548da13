use core::time::Duration;

/// A source of absolute wall-clock time.
///
/// Implementations return the current time as a [`Duration`] since the Unix
/// epoch (1970-01-01T00:00:00Z). The generator converts this into ticks since
/// its own configured epoch, so a mocked source only needs to report absolute
/// time.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> Duration {
///         Duration::from_millis(1234)
///     }
/// }
///
/// assert_eq!(FixedTime.now().as_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time since the Unix epoch.
    fn now(&self) -> Duration;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
