use std::time::Instant;

/// Where tap timestamps come from.
///
/// A run records its epoch once via [`Clock::now`] and stamps every later tap
/// with [`Clock::ms_since`]. Tests swap in [`test_clock::TestClock`] to place
/// taps at exact offsets.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Whole milliseconds elapsed since `epoch`; 0 if `epoch` is in the future.
    fn ms_since(&self, epoch: Instant) -> u64 {
        let ms = self.now().saturating_duration_since(epoch).as_millis();
        u64::try_from(ms).unwrap_or(u64::MAX)
    }
}

/// `std::time::Instant` as a [`Clock`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(any(test, feature = "test-clock"))]
pub mod test_clock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{Duration, Instant};

    use super::Clock;

    /// Manually stepped clock. Clones share one reading, so the handle a test
    /// keeps moves the clock owned by the code under test.
    #[derive(Debug, Clone)]
    pub struct TestClock {
        origin: Instant,
        offset_ms: Arc<AtomicU64>,
    }

    impl Default for TestClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestClock {
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
                offset_ms: Arc::new(AtomicU64::new(0)),
            }
        }

        pub fn advance_ms(&self, ms: u64) {
            let _ = self
                .offset_ms
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |off| Some(off.saturating_add(ms)));
        }

        /// Sub-millisecond parts are dropped.
        pub fn advance(&self, d: Duration) {
            self.advance_ms(u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Instant {
            self.origin + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn clones_read_the_same_offset() {
            let clock = TestClock::new();
            let epoch = clock.now();
            let handle = clock.clone();
            handle.advance_ms(1500);
            assert_eq!(clock.ms_since(epoch), 1500);
            clock.advance(Duration::from_micros(250_900));
            assert_eq!(handle.ms_since(epoch), 1750);
        }

        #[test]
        fn future_epoch_reads_as_zero() {
            let clock = TestClock::new();
            let later = clock.now() + Duration::from_secs(1);
            clock.advance_ms(10);
            assert_eq!(clock.ms_since(later), 0);
        }
    }
}
