//! Domain event broadcast
//!
//! Sibling views (case list, dashboards) observe alert imports without a
//! direct reference to the triage view.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    /// Alerts were merged or imported into a case
    Imported,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AlertEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.tx.subscribe()
    }

    /// Emit to whoever is listening; an empty audience is not an error
    pub fn emit(&self, event: AlertEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_and_receive() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.emit(AlertEvent::Imported);
        assert_eq!(rx.recv().await.unwrap(), AlertEvent::Imported);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::default();
        bus.emit(AlertEvent::Imported);
    }
}
