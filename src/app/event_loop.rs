use std::time::Instant;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time;

use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::guess::GuessHitAreas;
use crate::ui;

use super::core::{App, LoopControl};
use super::terminal_session::{TerminalSession, TerminalSurface};

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        self.bus.spawn(self.config.territories.path.clone());
        self.mount_input();
        tracing::info!(
            debounce_ms = self.config.input.debounce_ms,
            max_guesses = self.config.game.max_guesses,
            "guess loop started"
        );

        let result = self.drive(&mut session).await;

        self.input.unmount();
        self.bus.shutdown();
        session.restore()?;
        result
    }

    async fn drive(&mut self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let mut redraw = true;
        loop {
            if redraw {
                self.render_frame(session)?;
            }

            let waited = wait_next_event(&mut self.bus.rx, self.input.next_deadline()).await;
            let now = Instant::now();
            let control = match waited {
                WaitEvent::Event(event) => self.handle_domain_event(event, now),
                WaitEvent::Closed => LoopControl::Break,
            };
            let control = match control {
                LoopControl::Continue { redraw: first } => match self.drain_pending_events(now) {
                    LoopControl::Continue { redraw: rest } => LoopControl::Continue {
                        redraw: first || rest,
                    },
                    LoopControl::Break => LoopControl::Break,
                },
                LoopControl::Break => LoopControl::Break,
            };

            match control {
                LoopControl::Continue { redraw: next } => redraw = next,
                LoopControl::Break => {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }
        }
    }

    pub(crate) fn render_frame(&mut self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let view = self.input.view();
        let mut hit = GuessHitAreas::default();
        session.draw(|frame| hit = ui::draw_app(frame, &self.state, &view))?;
        self.input.set_hit_areas(hit);
        Ok(())
    }
}

async fn wait_next_event(
    loop_event_rx: &mut UnboundedReceiver<DomainEvent>,
    debounce_deadline: Option<Instant>,
) -> WaitEvent {
    let debounce = async {
        match debounce_deadline {
            Some(deadline) => time::sleep_until(deadline.into()).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        biased;
        maybe_loop = loop_event_rx.recv() => {
            match maybe_loop {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        _ = debounce => WaitEvent::Event(DomainEvent::DebounceElapsed),
    }
}
