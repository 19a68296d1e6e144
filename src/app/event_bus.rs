use std::path::PathBuf;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::event::DomainEvent;
use crate::territory::{builtin_territories, load_territories};

pub(crate) struct EventBus {
    pub(crate) tx: UnboundedSender<DomainEvent>,
    pub(crate) rx: UnboundedReceiver<DomainEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    /// Spawns the terminal reader and the territory loader. Needs a tokio runtime.
    pub(crate) fn spawn(&mut self, territory_path: Option<PathBuf>) {
        self.tasks.push(spawn_input_task(self.tx.clone()));
        self.tasks
            .push(spawn_territory_task(self.tx.clone(), territory_path));
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}

fn spawn_territory_task(
    tx: UnboundedSender<DomainEvent>,
    path: Option<PathBuf>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let loaded = match path {
            Some(path) => tokio::task::spawn_blocking(move || load_territories(path))
                .await
                .unwrap_or_else(|err| {
                    Err(AppError::invalid_argument(format!(
                        "territory loader stopped: {err}"
                    )))
                }),
            None => Ok(builtin_territories()),
        };
        let _ = tx.send(DomainEvent::TerritoriesLoaded(loaded));
    })
}
