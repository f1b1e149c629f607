use std::future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Shortest period the scheduler accepts; tokio intervals cannot be zero
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Tick timer that can be paused and re-timed without firing twice.
///
/// While paused there is no interval at all, so `tick()` stays pending and a
/// `select!` loop simply never takes that branch.
pub struct TickScheduler {
    period: Duration,
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            timer: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Begin ticking; the first tick lands one full period from now
    pub fn start(&mut self) {
        if self.timer.is_none() {
            self.timer = Some(Self::issue(self.period));
        }
    }

    pub fn pause(&mut self) {
        self.timer = None;
    }

    /// Change the period. A running timer is replaced, not stacked.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period.max(MIN_PERIOD);
        if self.timer.is_some() {
            self.timer = Some(Self::issue(self.period));
        }
    }

    /// Wait for the next tick. Never resolves while paused.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }

    fn issue(period: Duration) -> Interval {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_paused_scheduler_never_ticks() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));
        assert!(!scheduler.is_active());
        assert!(timeout(Duration::from_secs(10), scheduler.tick())
            .await
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));
        let started = Instant::now();
        scheduler.start();

        scheduler.tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(100));

        scheduler.tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_period_replaces_timer() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));
        let started = Instant::now();
        scheduler.start();
        scheduler.set_period(Duration::from_millis(300));

        scheduler.tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(300));
        assert_eq!(scheduler.period(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(50));
        scheduler.start();
        scheduler.tick().await;
        scheduler.pause();

        assert!(timeout(Duration::from_secs(1), scheduler.tick())
            .await
            .is_err());

        // Changing the period while paused keeps it paused
        scheduler.set_period(Duration::from_millis(20));
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let scheduler = TickScheduler::new(Duration::ZERO);
        assert_eq!(scheduler.period(), MIN_PERIOD);
    }
}
