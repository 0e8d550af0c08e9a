#![forbid(unsafe_code)]

//! Connectivity monitoring.
//!
//! A health probe runs on a fire-and-reschedule cadence: each check schedules
//! the next one only after its own completion, so probes never overlap and a
//! slow server widens the effective interval instead of stacking requests.
//! The monitor only tracks state; the caller performs the actual probe when
//! [`due`](ConnectionMonitor::due) says so and reports back through
//! [`record`](ConnectionMonitor::record).

use web_time::{Duration, Instant};

/// Poll-driven connectivity state.
#[derive(Debug)]
pub struct ConnectionMonitor {
    interval: Duration,
    connected: bool,
    next_check: Option<Instant>,
    in_flight: bool,
}

impl ConnectionMonitor {
    /// Create a monitor whose first check is due immediately at `now`.
    /// Starts pessimistic: offline until the first probe succeeds.
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            connected: false,
            next_check: Some(now),
            in_flight: false,
        }
    }

    /// Whether a probe should be launched now. Returns `true` at most once
    /// per cycle; the monitor then waits for [`record`](Self::record).
    pub fn due(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        match self.next_check {
            Some(at) if now >= at => {
                self.in_flight = true;
                true
            }
            _ => false,
        }
    }

    /// Report a probe result. Schedules the next check one interval after
    /// completion and returns whether the connected state changed.
    pub fn record(&mut self, connected: bool, now: Instant) -> bool {
        self.in_flight = false;
        self.next_check = Some(now + self.interval);
        self.set_connected(connected)
    }

    /// Force the connectivity state, e.g. when a send fails with a transport
    /// error between probes. Returns whether the state changed.
    pub fn set_connected(&mut self, connected: bool) -> bool {
        let changed = self.connected != connected;
        if changed {
            tracing::debug!(connected, "connection state changed");
            self.connected = connected;
        }
        changed
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectionMonitor;
    use web_time::{Duration, Instant};

    fn monitor(t0: Instant) -> ConnectionMonitor {
        ConnectionMonitor::new(Duration::from_millis(5000), t0)
    }

    #[test]
    fn first_check_is_due_immediately() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        assert!(m.due(t0));
        assert!(!m.is_connected());
    }

    #[test]
    fn no_second_check_while_in_flight() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        assert!(m.due(t0));
        assert!(!m.due(t0 + Duration::from_millis(10_000)));
    }

    #[test]
    fn next_check_counts_from_completion() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        assert!(m.due(t0));
        // The probe took 3 seconds; the next one is 5 seconds after that.
        let done = t0 + Duration::from_millis(3000);
        assert!(m.record(true, done));
        assert!(!m.due(done + Duration::from_millis(4999)));
        assert!(m.due(done + Duration::from_millis(5000)));
    }

    #[test]
    fn record_reports_state_changes_only() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        m.due(t0);
        assert!(m.record(true, t0));
        m.due(t0 + Duration::from_millis(5000));
        assert!(!m.record(true, t0 + Duration::from_millis(5000)));
        m.due(t0 + Duration::from_millis(10_000));
        assert!(m.record(false, t0 + Duration::from_millis(10_000)));
        assert!(!m.is_connected());
    }

    #[test]
    fn send_failure_flips_state_between_probes() {
        let t0 = Instant::now();
        let mut m = monitor(t0);
        m.due(t0);
        m.record(true, t0);
        assert!(m.set_connected(false));
        assert!(!m.set_connected(false));
        assert!(!m.is_connected());
    }
}
