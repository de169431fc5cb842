use jiff::Timestamp;
use std::time::Duration;

pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
    /// Block and wait until the clock reaches the target time.
    fn wait_until(&self, target: Timestamp);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // The generator waits at most one millisecond here. Sleeps shorter
        // than 50µs mostly return before the timer fires and would spin the
        // loop, so the nap is clamped to that floor and the clock re-read.
        loop {
            let now = Timestamp::now();
            if now >= target {
                return;
            }
            let remaining_us = (target.as_microsecond() - now.as_microsecond()).max(50) as u64;
            std::thread::sleep(Duration::from_micros(remaining_us));
        }
    }
}


#[cfg(test)]
pub(crate) mod test_clock {
    use crate::clock::Clock;
    use jiff::Timestamp;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    pub(crate) struct TestClock {
        inner: Arc<Mutex<TestClockState>>,
    }

    struct TestClockState {
        now: Timestamp,
    }

    impl TestClock {
        pub(crate) fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(TestClockState { now })),
            }
        }

        pub(crate) fn from_millisecond(ms: i64) -> Self {
            Self::new(Timestamp::from_millisecond(ms).unwrap())
        }

        /// Moves the clock to `ms`, backwards or forwards.
        pub(crate) fn set_millisecond(&self, ms: i64) {
            self.inner
                .lock()
                .expect("test clock lock should not be poisoned")
                .now = Timestamp::from_millisecond(ms).unwrap();
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Timestamp {
            self.inner
                .lock()
                .expect("test clock lock should not be poisoned")
                .now
        }

        fn wait_until(&self, target: Timestamp) {
            let mut state = self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned");
            // just advance the clock to the target time
            if target > state.now {
                state.now = target;
            }
        }
    }

    #[test]
    fn test_clock_works() {
        let clock = TestClock::from_millisecond(0);
        assert_eq!(clock.now().as_millisecond(), 0);

        // the clock should advance to the target time after wait_until
        let target = Timestamp::from_millisecond(1000).unwrap();
        clock.wait_until(target);
        assert_eq!(clock.now(), target);

        // waiting for the past is a no-op
        clock.wait_until(Timestamp::from_millisecond(10).unwrap());
        assert_eq!(clock.now(), target);

        clock.set_millisecond(5);
        assert_eq!(clock.now().as_millisecond(), 5);
    }
}
