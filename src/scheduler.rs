use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);
/// Most ticks a single `advance` hands out; a longer gap is dropped.
pub const MAX_CATCH_UP: u32 = 1_000;

/// Converts wall-clock slices into whole ticks for one game epoch.
///
/// Partial periods accumulate between calls. Pausing or resuming throws the
/// partial period away, and so does an epoch change: time elapsed against a
/// replaced game never produces ticks on its successor.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    accumulated: Duration,
    paused: bool,
    epoch: u64,
}

impl TickScheduler {
    pub fn new(period: Duration, epoch: u64) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            accumulated: Duration::ZERO,
            paused: false,
            epoch,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pending(&self) -> Duration {
        self.accumulated
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.accumulated = Duration::ZERO;
        }
    }

    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    pub fn cancel(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    pub fn rebind(&mut self, epoch: u64) {
        if self.epoch != epoch {
            tracing::debug!(from = self.epoch, to = epoch, "scheduler rebound");
            self.epoch = epoch;
            self.cancel();
        }
    }

    /// Feeds `elapsed` time observed against `epoch` and returns how many
    /// period boundaries were crossed. A stale epoch rebinds and yields zero.
    pub fn advance(&mut self, elapsed: Duration, epoch: u64) -> u32 {
        if epoch != self.epoch {
            self.rebind(epoch);
            return 0;
        }
        if self.paused {
            return 0;
        }
        self.accumulated += elapsed;
        let due = self.accumulated.as_nanos() / self.period.as_nanos();
        if due == 0 {
            return 0;
        }
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        if due > MAX_CATCH_UP {
            tracing::warn!(due, kept = MAX_CATCH_UP, "clock jumped, dropping missed ticks");
            self.accumulated = Duration::ZERO;
            return MAX_CATCH_UP;
        }
        self.accumulated = self
            .accumulated
            .saturating_sub(self.period.saturating_mul(due));
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn counts_crossed_boundaries() {
        let mut scheduler = TickScheduler::new(ms(1_000), 0);
        assert_eq!(scheduler.advance(ms(400), 0), 0);
        assert_eq!(scheduler.advance(ms(700), 0), 1);
        assert_eq!(scheduler.pending(), ms(100));
        assert_eq!(scheduler.advance(ms(2_900), 0), 3);
        assert_eq!(scheduler.pending(), Duration::ZERO);
    }

    #[test]
    fn pause_drops_partial_period() {
        let mut scheduler = TickScheduler::new(ms(1_000), 0);
        scheduler.advance(ms(900), 0);
        scheduler.pause();
        assert_eq!(scheduler.advance(ms(5_000), 0), 0);
        scheduler.resume();
        assert_eq!(scheduler.advance(ms(200), 0), 0);
        assert_eq!(scheduler.pending(), ms(200));
    }

    #[test]
    fn epoch_change_cancels_pending_time() {
        let mut scheduler = TickScheduler::new(ms(1_000), 3);
        scheduler.advance(ms(999), 3);
        assert_eq!(scheduler.advance(ms(500), 4), 0);
        assert_eq!(scheduler.epoch(), 4);
        assert_eq!(scheduler.pending(), Duration::ZERO);
        assert_eq!(scheduler.advance(ms(1_000), 4), 1);
    }

    #[test]
    fn long_gaps_are_capped() {
        let mut scheduler = TickScheduler::new(ms(1), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(3_600), 0), MAX_CATCH_UP);
        assert_eq!(scheduler.pending(), Duration::ZERO);
        assert_eq!(scheduler.advance(ms(3), 0), 3);
    }

    #[test]
    fn zero_period_is_clamped() {
        let scheduler = TickScheduler::new(Duration::ZERO, 0);
        assert_eq!(scheduler.period(), ms(1));
    }
}
