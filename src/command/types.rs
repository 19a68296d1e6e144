#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RecordGuess { value: String },
    NewRound,
    FocusInput,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    RecordGuess,
    NewRound,
    FocusInput,
    Quit,
    Input,
    LoadTerritories,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecordGuess => "record-guess",
            Self::NewRound => "new-round",
            Self::FocusInput => "focus-input",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::LoadTerritories => "load-territories",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::RecordGuess { .. } => ActionId::RecordGuess,
            Self::NewRound => ActionId::NewRound,
            Self::FocusInput => ActionId::FocusInput,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
