use crate::command::ActionId;

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub number: u32,
    pub guesses: Vec<String>,
    pub max_guesses: usize,
}

impl RoundState {
    pub fn new(max_guesses: usize) -> Self {
        Self {
            number: 1,
            guesses: Vec::new(),
            max_guesses: max_guesses.max(1),
        }
    }

    pub fn is_over(&self) -> bool {
        self.guesses.len() >= self.max_guesses
    }

    pub fn remaining(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses.len())
    }

    pub fn start_next(&mut self) {
        self.number = self.number.saturating_add(1);
        self.guesses.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerritoryStatus {
    Loading,
    Loaded { count: usize },
    /// The configured source failed and the built-in list is in use.
    Fallback { count: usize },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub round: RoundState,
    pub status: StatusState,
    pub territories: TerritoryStatus,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_max_guesses(6)
    }
}

impl AppState {
    pub fn with_max_guesses(max_guesses: usize) -> Self {
        Self {
            round: RoundState::new(max_guesses),
            status: StatusState::default(),
            territories: TerritoryStatus::Loading,
        }
    }
}
