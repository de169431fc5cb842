use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    SnowflakeId,
};
use jiff::Timestamp;
use std::sync::Mutex;
use typed_builder::TypedBuilder;

const MAX_TIMESTAMP_MILLIS: i64 = (1_i64 << 51) - 1;
const MAX_SEQUENCE: u16 = (1 << 12) - 1;

/// 2024-01-01T00:00:00Z.
pub const DEFAULT_EPOCH: Timestamp = Timestamp::constant(1_704_067_200, 0);

/// Configures a Snowflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct SnowflakeSettings {
    /// Custom epoch used as the zero point for the 51-bit timestamp field.
    ///
    /// Timestamps are taken at millisecond precision (`Timestamp::as_millisecond`).
    #[builder(default = DEFAULT_EPOCH)]
    pub start_epoch: Timestamp,
}

impl Default for SnowflakeSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: Option<Timestamp>,
    sequence: u16,
}

/// Snowflake ID generator.
///
/// Every ID returned by one instance is strictly greater than all IDs it
/// returned before. The lock guards only the `(timestamp, sequence)` pair and
/// is never held while waiting for the clock.
pub struct Snowflake<C: Clock = SystemClock> {
    start_time: Timestamp,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl Snowflake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: SnowflakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Snowflake<C> {
    /// Creates a generator reading time from `clock`.
    pub fn with_clock(settings: SnowflakeSettings, clock: C) -> Result<Self, Error> {
        let now = clock.now();
        if settings.start_epoch > now {
            return Err(Error::EpochAhead {
                epoch: settings.start_epoch,
                now,
            });
        }

        Ok(Self {
            start_time: settings.start_epoch,
            clock,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    /// Generates the next unique SnowflakeId.
    ///
    /// - if the per-millisecond sequence is exhausted, wait for the next
    ///   millisecond outside the lock and try again
    /// - if the clock moved backward, fail with [`Error::ClockRegression`]
    pub fn next_id(&self) -> Result<SnowflakeId, Error> {
        loop {
            let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;
            let now = self.clock.now();
            let last_timestamp = state.last_timestamp;

            match last_timestamp {
                Some(last) if now.as_millisecond() < last.as_millisecond() => {
                    return Err(Error::ClockRegression { last, now });
                }
                Some(last) if now.as_millisecond() == last.as_millisecond() => {
                    if state.sequence < MAX_SEQUENCE {
                        state.sequence += 1;
                    } else {
                        drop(state);
                        let next_ms = Timestamp::from_millisecond(last.as_millisecond() + 1)
                            .map_err(|_| Error::OverTimeLimit)?;
                        self.clock.wait_until(next_ms);
                        continue;
                    }
                }
                // First call or a new millisecond: the sequence counter resets.
                _ => state.sequence = 0,
            }

            // Milliseconds elapsed since the custom epoch, used as the timestamp field.
            let elapsed = now.as_millisecond() - self.start_time.as_millisecond();
            if elapsed < 0 {
                return Err(Error::ClockRegression {
                    last: self.start_time,
                    now,
                });
            }
            if elapsed > MAX_TIMESTAMP_MILLIS {
                return Err(Error::OverTimeLimit);
            }

            let id = SnowflakeId::new()
                .with_timestamp(elapsed as u64)
                .with_sequence(state.sequence);

            state.last_timestamp = Some(now);

            return Ok(id);
        }
    }

    /// Generates the next ID as a plain integer.
    pub fn next_u64(&self) -> Result<u64, Error> {
        self.next_id().map(SnowflakeId::as_u64)
    }
}
