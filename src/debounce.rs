//! Debounced, stale-safe list fetching.
//!
//! Every list screen owns one [`RequestTracker`]. A filter change calls
//! [`RequestTracker::begin`] and waits out the debounce delay with the ticket
//! it got back; when the timer fires the fetch only goes out if no newer
//! change happened meanwhile. The response carries the same ticket and is
//! applied only while that ticket is still the latest one.

use std::time::Duration;

pub type Ticket = u64;

#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    generation: Ticket,
    in_flight: bool,
}

impl RequestTracker {
    /// Supersedes everything issued before.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.generation
    }

    pub fn latest(&self) -> Ticket {
        self.generation
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.latest()
    }

    /// Called when a debounce timer fires. Returns true when the fetch for
    /// `ticket` should go out.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = true;
            true
        } else {
            false
        }
    }

    /// Called with a response. Returns true when it must be applied; stale
    /// responses leave the loading flag alone because a newer request is
    /// still pending.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = false;
            true
        } else {
            log::debug!("dropping stale response #{ticket}, latest is #{}", self.latest());
            false
        }
    }

    /// Forget whatever is pending, e.g. when the screen is left.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Tracker for a reset screen state. Numbering carries on, so responses
    /// addressed to the old state stay stale.
    pub fn successor(&self) -> Self {
        Self { generation: self.generation + 1, in_flight: false }
    }
}

/// Sleeps for `delay` and hands the ticket back.
pub async fn wait(delay: Duration, ticket: Ticket) -> Ticket {
    tokio::time::sleep(delay).await;
    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_changes_fetches_once() {
        let mut tracker = RequestTracker::default();
        let tickets: Vec<Ticket> = (0..5).map(|_| tracker.begin()).collect();

        let fired: Vec<bool> = tickets.iter().map(|t| tracker.fire(*t)).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
        assert!(tracker.is_loading());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut tracker = RequestTracker::default();
        let first = tracker.begin();
        assert!(tracker.fire(first));
        let second = tracker.begin();
        assert!(tracker.fire(second));

        assert!(!tracker.settle(first));
        assert!(tracker.is_loading());
        assert!(tracker.settle(second));
        assert!(!tracker.is_loading());
    }

    #[test]
    fn cancel_discards_pending() {
        let mut tracker = RequestTracker::default();
        let ticket = tracker.begin();
        assert!(tracker.fire(ticket));
        tracker.cancel();
        assert!(!tracker.settle(ticket));
        assert!(!tracker.is_loading());
    }

    #[test]
    fn successor_keeps_old_tickets_stale() {
        let mut old = RequestTracker::default();
        let ticket = old.begin();
        assert!(old.fire(ticket));

        let mut fresh = old.successor();
        assert!(!fresh.is_loading());
        let next = fresh.begin();
        assert_ne!(next, ticket);
        assert!(!fresh.settle(ticket));
    }

    #[tokio::test]
    async fn wait_returns_ticket_after_delay() {
        let started = std::time::Instant::now();
        let ticket = wait(Duration::from_millis(20), 7).await;
        assert_eq!(ticket, 7);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
