use std::time::Instant;

use crossterm::event::Event;

use crate::command::{ActionId, Command, CommandOutcome, dispatch};
use crate::config::Config;
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::guess::{GuessInput, GuessKeyResult, InputPolicy, PointerDown, PointerHub};
use crate::input::{InputAction, InputEventOutcome, classify_event};
use crate::territory::{Territory, builtin_territories};

use super::event_bus::EventBus;
use super::state::{AppState, TerritoryStatus};

pub(crate) enum LoopControl {
    Continue { redraw: bool },
    Break,
}

pub struct App {
    pub state: AppState,
    pub input: GuessInput,
    pub pointer_hub: PointerHub,
    pub config: Config,
    pub(crate) bus: EventBus,
}

impl App {
    pub fn new() -> AppResult<Self> {
        let config = Config::load()?;
        Ok(Self::new_with_config(config))
    }

    /// Builds the app without touching the terminal or the runtime.
    pub fn new_with_config(config: Config) -> Self {
        let bus = EventBus::new();
        let submit_tx = bus.tx.clone();
        let input = GuessInput::new(
            Vec::<Territory>::new(),
            InputPolicy::from_config(&config.input),
            move |value| {
                let _ = submit_tx.send(DomainEvent::Command(Command::RecordGuess { value }));
            },
        );

        Self {
            state: AppState::with_max_guesses(config.game.max_guesses),
            input,
            pointer_hub: PointerHub::default(),
            config,
            bus,
        }
    }

    pub fn mount_input(&mut self) {
        self.input.mount(&self.pointer_hub);
    }

    pub(crate) fn handle_domain_event(&mut self, event: DomainEvent, now: Instant) -> LoopControl {
        match event {
            DomainEvent::Input(event) => {
                let outcome = self.handle_input_event(event, now);
                if let Some(command) = outcome.command {
                    return self.apply_command(command);
                }
                LoopControl::Continue {
                    redraw: outcome.redraw,
                }
            }
            DomainEvent::InputError(message) => {
                tracing::warn!(message = %message, "terminal input error");
                self.state.status.last_action_id = Some(ActionId::Input);
                self.state.status.message = format!("input error: {message}");
                LoopControl::Continue { redraw: true }
            }
            DomainEvent::Command(command) => self.apply_command(command),
            DomainEvent::TerritoriesLoaded(loaded) => {
                self.apply_territories(loaded);
                LoopControl::Continue { redraw: true }
            }
            DomainEvent::DebounceElapsed => LoopControl::Continue {
                redraw: self.input.tick(now),
            },
        }
    }

    /// Processes everything already queued on the bus without waiting.
    pub(crate) fn drain_pending_events(&mut self, now: Instant) -> LoopControl {
        let mut redraw = false;
        while let Ok(event) = self.bus.rx.try_recv() {
            match self.handle_domain_event(event, now) {
                LoopControl::Break => return LoopControl::Break,
                LoopControl::Continue { redraw: changed } => redraw |= changed,
            }
        }
        LoopControl::Continue { redraw }
    }

    fn handle_input_event(&mut self, event: Event, now: Instant) -> InputEventOutcome {
        let mut outcome = InputEventOutcome::default();
        match classify_event(event) {
            InputAction::Command(command) => outcome.command = Some(command),
            InputAction::Key(key) => {
                if let GuessKeyResult::Consumed { redraw } = self.input.handle_key(key, now) {
                    outcome.redraw = redraw;
                }
            }
            InputAction::PointerDown { column, row } => {
                self.pointer_hub.publish(PointerDown::new(column, row));
                outcome.redraw = self.input.process_pointer_events();
            }
            InputAction::FocusGained => outcome.redraw = self.input.focus(),
            InputAction::Paste(text) => {
                outcome.redraw = matches!(
                    self.input.handle_paste(&text, now),
                    GuessKeyResult::Consumed { redraw: true }
                );
            }
            InputAction::Resize => outcome.redraw = true,
            InputAction::Ignored => {}
        }
        outcome
    }

    fn apply_command(&mut self, command: Command) -> LoopControl {
        match dispatch(&mut self.state, command, &mut self.input) {
            CommandOutcome::QuitRequested => LoopControl::Break,
            CommandOutcome::Applied | CommandOutcome::Noop => LoopControl::Continue { redraw: true },
        }
    }

    fn apply_territories(&mut self, loaded: AppResult<Vec<Territory>>) {
        self.state.status.last_action_id = Some(ActionId::LoadTerritories);
        let refresh = self.input.is_focused();
        match loaded {
            Ok(territories) => {
                let count = territories.len();
                tracing::info!(count, "territories loaded");
                self.input.set_territories(territories);
                self.state.territories = TerritoryStatus::Loaded { count };
                self.state.status.message = format!("{count} territories loaded");
            }
            Err(err) => {
                tracing::warn!(error = %err, "territory source failed, using built-in list");
                let fallback = builtin_territories();
                let count = fallback.len();
                self.input.set_territories(fallback);
                self.state.territories = TerritoryStatus::Fallback { count };
                self.state.status.message = format!("{err}; using built-in list");
            }
        }
        if refresh {
            self.input.focus();
        }
    }
}
