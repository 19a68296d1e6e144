mod debounce;
mod matcher;
mod pointer;
mod resolve;
mod types;
mod widget;

pub use debounce::Debouncer;
pub use matcher::{CandidateMatcher, TerritoryMatcher, filter_territories};
pub use pointer::{PointerDown, PointerHub, PointerSubscription};
pub use resolve::resolve_submission;
pub use types::{GuessHitAreas, GuessItemView, GuessKeyResult, GuessView, InputPhase, InputPolicy};
pub use widget::GuessInput;
