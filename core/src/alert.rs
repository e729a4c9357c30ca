//! Transient user-facing notifications: the alert bus and the banner.
//!
//! # Design
//! Any component publishes an `Alert` onto the shared `AlertBus`; the single
//! `AlertBanner` subscribes and owns the visible/hidden state. The banner is
//! a virtual-clock state machine: the host calls `poll(now_ms)` with real
//! time (or a test clock), the same way the host executes the core's HTTP
//! requests. Auto-dismiss is a one-shot deadline armed from the alert's
//! duration; an alert arriving while another is shown replaces it outright —
//! last write wins, nothing is queued.

use std::cell::RefCell;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Category of a notification, mapped to presentation styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
    Success,
    Danger,
}

/// A transient notification. Lives only for one display cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    /// Auto-dismiss delay in milliseconds; `None` keeps the banner up until
    /// it is dismissed some other way.
    pub duration_ms: Option<u64>,
}

impl Alert {
    pub fn success(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
            duration_ms: Some(duration_ms),
        }
    }

    pub fn danger(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
            duration_ms: Some(duration_ms),
        }
    }
}

/// Broadcast channel decoupling alert producers from the banner.
///
/// Owned by the application scope and handed to whoever needs to notify the
/// user; in practice there is exactly one subscriber.
#[derive(Debug, Default)]
pub struct AlertBus {
    subscribers: RefCell<Vec<Sender<Alert>>>,
}

impl AlertBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<Alert> {
        let (tx, rx) = channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Deliver to every live subscriber, dropping closed ones.
    pub fn publish(&self, alert: Alert) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.send(alert.clone()).is_ok());
    }
}

/// The single rendering surface for alerts.
pub struct AlertBanner {
    rx: Receiver<Alert>,
    current: Option<Alert>,
    visible: bool,
    hide_at_ms: Option<u64>,
}

impl AlertBanner {
    pub fn new(bus: &AlertBus) -> Self {
        Self {
            rx: bus.subscribe(),
            current: None,
            visible: false,
            hide_at_ms: None,
        }
    }

    /// Advance the banner to `now_ms`: expire the armed deadline first, then
    /// take delivery of pending alerts. The latest pending alert becomes the
    /// visible one and re-arms the deadline.
    pub fn poll(&mut self, now_ms: u64) {
        if let Some(deadline) = self.hide_at_ms {
            if now_ms >= deadline {
                self.visible = false;
                self.hide_at_ms = None;
            }
        }
        while let Ok(alert) = self.rx.try_recv() {
            self.visible = true;
            self.hide_at_ms = alert.duration_ms.map(|d| now_ms + d);
            self.current = Some(alert);
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// The alert being shown, or last shown. Meaningful while `visible()`.
    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    /// Manual dismissal, for alerts without a duration.
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.hide_at_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_shows_immediately_and_hides_after_duration() {
        let bus = AlertBus::new();
        let mut banner = AlertBanner::new(&bus);

        bus.publish(Alert::success("new Posting added", 2000));
        banner.poll(0);
        assert!(banner.visible());
        assert_eq!(banner.current().unwrap().message, "new Posting added");

        banner.poll(1999);
        assert!(banner.visible(), "no earlier transition");

        banner.poll(2000);
        assert!(!banner.visible());
    }

    #[test]
    fn alert_without_duration_stays_until_dismissed() {
        let bus = AlertBus::new();
        let mut banner = AlertBanner::new(&bus);

        bus.publish(Alert {
            kind: AlertKind::Warning,
            message: "heads up".to_string(),
            duration_ms: None,
        });
        banner.poll(0);
        banner.poll(1_000_000);
        assert!(banner.visible());

        banner.dismiss();
        assert!(!banner.visible());
    }

    #[test]
    fn new_alert_replaces_visible_one_and_rearms_timer() {
        let bus = AlertBus::new();
        let mut banner = AlertBanner::new(&bus);

        bus.publish(Alert::danger("first", 2000));
        banner.poll(0);

        bus.publish(Alert::success("second", 2000));
        banner.poll(1500);
        assert_eq!(banner.current().unwrap().message, "second");

        // The first alert's deadline has passed; the fresh timer keeps the
        // banner up.
        banner.poll(2500);
        assert!(banner.visible());

        banner.poll(3500);
        assert!(!banner.visible());
    }

    #[test]
    fn last_write_wins_when_alerts_burst() {
        let bus = AlertBus::new();
        let mut banner = AlertBanner::new(&bus);

        bus.publish(Alert::danger("a", 100));
        bus.publish(Alert::danger("b", 100));
        bus.publish(Alert::success("c", 100));
        banner.poll(0);
        assert_eq!(banner.current().unwrap().message, "c");
    }

    #[test]
    fn bus_broadcasts_to_every_subscriber() {
        let bus = AlertBus::new();
        let rx_a = bus.subscribe();
        let rx_b = bus.subscribe();
        bus.publish(Alert::success("shared", 1));
        assert_eq!(rx_a.recv().unwrap().message, "shared");
        assert_eq!(rx_b.recv().unwrap().message, "shared");
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let bus = AlertBus::new();
        drop(bus.subscribe());
        let rx = bus.subscribe();
        bus.publish(Alert::success("still delivered", 1));
        assert_eq!(rx.recv().unwrap().message, "still delivered");
    }
}
