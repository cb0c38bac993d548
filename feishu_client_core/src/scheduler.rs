//! Daily wall-clock trigger and the polling loop that drives it
//!
//! The loop wakes every poll interval, asks the [`DailyTrigger`] whether the
//! configured time has been reached and runs the job inline when it has.
//! There is no catch-up for runs missed while the process was down.

use crate::config::ScheduleConfig;
use crate::error::Result;
use chrono::{Days, Local, NaiveDateTime, NaiveTime};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Fires once per day at a fixed local time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTrigger {
    at: NaiveTime,
    next_run: NaiveDateTime,
}

impl DailyTrigger {
    /// Trigger whose first run is the next occurrence of `at` after `now`
    pub fn new(at: NaiveTime, now: NaiveDateTime) -> Self {
        Self {
            at,
            next_run: next_occurrence(at, now),
        }
    }

    pub fn at(&self) -> NaiveTime {
        self.at
    }

    pub fn next_run(&self) -> NaiveDateTime {
        self.next_run
    }

    /// Returns `true` when the job should run at `now`, then schedules the
    /// following day
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if now < self.next_run {
            return false;
        }
        self.next_run = next_occurrence(self.at, now);
        true
    }
}

/// First `at` strictly after `now`
fn next_occurrence(at: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

/// Polling loop around a [`DailyTrigger`]
#[derive(Debug)]
pub struct Scheduler {
    trigger: DailyTrigger,
    poll_interval: Duration,
}

impl Scheduler {
    /// Build from configuration, anchored at the current local time
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        let at = config.time_of_day()?;
        let poll_interval = config.poll_interval()?;
        Ok(Self::new(
            DailyTrigger::new(at, Local::now().naive_local()),
            poll_interval,
        ))
    }

    pub fn new(trigger: DailyTrigger, poll_interval: Duration) -> Self {
        Self {
            trigger,
            poll_interval,
        }
    }

    pub fn next_run(&self) -> NaiveDateTime {
        self.trigger.next_run()
    }

    /// Run `job` every day until `shutdown` resolves, using local time
    pub async fn run<F, Fut, S>(self, job: F, shutdown: S)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
        S: Future<Output = ()>,
    {
        self.run_with_clock(job, shutdown, || Local::now().naive_local())
            .await
    }

    /// Same as [`Scheduler::run`] with an injectable clock
    ///
    /// `shutdown` is only observed between polls, so a job that already
    /// started always runs to completion.
    pub async fn run_with_clock<F, Fut, S, C>(mut self, mut job: F, shutdown: S, clock: C)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
        S: Future<Output = ()>,
        C: Fn() -> NaiveDateTime,
    {
        tokio::pin!(shutdown);
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log::info!(
            "Scheduler started, next run at {}",
            self.trigger.next_run().format("%Y-%m-%d %H:%M:%S")
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutdown requested, stopping scheduler");
                    break;
                }
                _ = interval.tick() => {
                    let now = clock();
                    if self.trigger.poll(now) {
                        log::info!("Running daily job at {}", now.format("%Y-%m-%d %H:%M:%S"));
                        job().await;
                        log::info!(
                            "Next run at {}",
                            self.trigger.next_run().format("%Y-%m-%d %H:%M:%S")
                        );
                    }
                }
            }
        }
    }
}
