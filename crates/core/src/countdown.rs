use chrono::{DateTime, Duration, Utc};

/// One-shot countdown over wall-clock instants.
///
/// A countdown is pure arithmetic: it records the instant it was started
/// and answers every question against a caller-supplied `now`, so the same
/// timer can be driven by the system clock in production and by fixed
/// instants in tests. There is no reset; restarting a phase means
/// constructing a fresh `Countdown`.
///
/// Pausing freezes the remaining time exactly. While paused, observations
/// are evaluated at the pause instant, and the span spent paused is added
/// to an accumulator on resume so it never counts as elapsed time.
///
/// # Examples
///
/// ```
/// # use posture_core::Countdown;
/// # use posture_core::time::fixed_now;
/// # use chrono::Duration;
/// let start = fixed_now();
/// let timer = Countdown::start(15, start);
///
/// assert_eq!(timer.remaining_seconds(start), 15);
/// assert!(!timer.is_complete(start + Duration::seconds(14)));
/// assert!(timer.is_complete(start + Duration::seconds(15)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    started_at: DateTime<Utc>,
    paused_at: Option<DateTime<Utc>>,
    paused_total: Duration,
}

impl Countdown {
    /// Starts a countdown of `secs` seconds at `now`.
    ///
    /// A non-positive duration clamps to zero, so the countdown reads
    /// complete from its very first observation.
    #[must_use]
    pub fn start(secs: i64, now: DateTime<Utc>) -> Self {
        Self {
            duration: Duration::seconds(secs.max(0)),
            started_at: now,
            paused_at: None,
            paused_total: Duration::zero(),
        }
    }

    /// Running time observed so far, excluding paused spans.
    fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let observed = self.paused_at.unwrap_or(now);
        (observed - self.started_at - self.paused_total).max(Duration::zero())
    }

    /// Time left on the countdown, clamped at zero.
    ///
    /// Observations with `now` earlier than the start instant clamp the
    /// other way and read as the full duration.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.duration - self.elapsed(now)).max(Duration::zero())
    }

    /// Whole seconds left, rounded up.
    ///
    /// This is the display value: a fresh 15 second countdown shows 15,
    /// and the value only reaches 0 together with [`Self::is_complete`].
    #[must_use]
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u32 {
        // remaining() clamps at zero, so millis is never negative.
        let millis = self.remaining(now).num_milliseconds();
        u32::try_from((millis + 999) / 1000).unwrap_or(u32::MAX)
    }

    /// True once the countdown has reached zero.
    ///
    /// A countdown never un-completes: with no reset, any later `now`
    /// keeps reporting complete.
    #[must_use]
    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).is_zero()
    }

    /// Freezes the countdown at `now`.
    ///
    /// Pausing an already paused countdown keeps the original pause
    /// instant.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Resumes the countdown at `now`, continuing from the exact remaining
    /// time observed when it was paused.
    ///
    /// Resuming a running countdown is a no-op.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += (now - paused_at).max(Duration::zero());
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Instant the countdown will complete, or `None` while paused.
    ///
    /// The deadline moves forward by exactly the paused span every time
    /// the countdown resumes.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        if self.paused_at.is_some() {
            None
        } else {
            Some(self.started_at + self.paused_total + self.duration)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
