use ratatui::layout::Position;
use tokio::sync::broadcast::{self, error::TryRecvError};

const HUB_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    pub position: Position,
}

impl PointerDown {
    pub fn new(column: u16, row: u16) -> Self {
        Self {
            position: Position::new(column, row),
        }
    }
}

/// Process-wide pointer-down broadcaster.
///
/// Widgets subscribe while mounted; dropping the [`PointerSubscription`]
/// deregisters the listener.
#[derive(Debug)]
pub struct PointerHub {
    tx: broadcast::Sender<PointerDown>,
}

impl Default for PointerHub {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        Self { tx }
    }
}

impl PointerHub {
    pub fn subscribe(&self) -> PointerSubscription {
        PointerSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Returns the number of listeners the event was delivered to.
    pub fn publish(&self, event: PointerDown) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[derive(Debug)]
pub struct PointerSubscription {
    rx: broadcast::Receiver<PointerDown>,
}

impl PointerSubscription {
    pub fn drain(&mut self) -> Vec<PointerDown> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "pointer listener lagged behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        events
    }
}
