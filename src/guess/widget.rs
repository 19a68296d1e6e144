use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;
use tui_input::backend::crossterm::EventHandler;
use tui_input::{Input, InputRequest};

use crate::territory::Territory;

use super::debounce::Debouncer;
use super::matcher::{CandidateMatcher, TerritoryMatcher, select_or_empty};
use super::pointer::{PointerHub, PointerSubscription};
use super::resolve::resolve_submission;
use super::types::{
    GuessHitAreas, GuessItemView, GuessKeyResult, GuessView, InputPhase, InputPolicy,
};

/// Autocomplete field for territory guesses.
///
/// Suggestions are recomputed only by [`GuessInput::tick`] after the quiet
/// period, or immediately when the field gains focus. The highlight never
/// points past the end of `suggestions`, and the list is never visible while
/// `suggestions` is empty.
pub struct GuessInput {
    territories: Arc<[Territory]>,
    matcher: Box<dyn CandidateMatcher>,
    policy: InputPolicy,
    input: Input,
    suggestions: Vec<Territory>,
    highlight: Option<usize>,
    list_visible: bool,
    focused: bool,
    disabled: bool,
    debounce: Debouncer,
    pointer: Option<PointerSubscription>,
    hit_areas: GuessHitAreas,
    recompute_count: u64,
    on_submit: Box<dyn FnMut(String)>,
}

impl GuessInput {
    pub fn new(
        territories: impl Into<Arc<[Territory]>>,
        policy: InputPolicy,
        on_submit: impl FnMut(String) + 'static,
    ) -> Self {
        Self {
            territories: territories.into(),
            matcher: Box::new(TerritoryMatcher),
            debounce: Debouncer::new(policy.quiet_period),
            policy,
            input: Input::default(),
            suggestions: Vec::new(),
            highlight: None,
            list_visible: false,
            focused: false,
            disabled: false,
            pointer: None,
            hit_areas: GuessHitAreas::default(),
            recompute_count: 0,
            on_submit: Box::new(on_submit),
        }
    }

    pub fn with_matcher(mut self, matcher: Box<dyn CandidateMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Registers the outside-click listener and takes focus.
    pub fn mount(&mut self, hub: &PointerHub) {
        if self.pointer.is_none() {
            self.pointer = Some(hub.subscribe());
        }
        tracing::debug!(listeners = hub.listener_count(), "guess input mounted");
        self.focus();
    }

    /// Releases the listener and cancels any pending recomputation.
    pub fn unmount(&mut self) {
        let had_listener = self.pointer.take().is_some();
        let had_timer = self.debounce.cancel();
        self.focused = false;
        self.close_list();
        tracing::debug!(had_listener, had_timer, "guess input unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.pointer.is_some()
    }

    /// Takes effect on the next recompute trigger.
    pub fn set_territories(&mut self, territories: impl Into<Arc<[Territory]>>) {
        self.territories = territories.into();
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.debounce.cancel();
            self.close_list();
        }
    }

    /// Focus gained: recompute for the current query and open the list.
    pub fn focus(&mut self) -> bool {
        if self.disabled || !self.is_mounted() {
            return false;
        }
        self.focused = true;
        self.debounce.cancel();
        self.recompute();
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> GuessKeyResult {
        if self.disabled || !self.focused {
            return GuessKeyResult::Ignored;
        }

        match key.code {
            KeyCode::Esc => {
                if !self.list_visible {
                    return GuessKeyResult::Ignored;
                }
                self.close_list();
                return GuessKeyResult::Consumed { redraw: true };
            }
            KeyCode::Down => {
                let moved = self.highlight_next();
                return GuessKeyResult::Consumed { redraw: moved };
            }
            KeyCode::Up => {
                let moved = self.highlight_prev();
                return GuessKeyResult::Consumed { redraw: moved };
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let moved = self.highlight_next();
                return GuessKeyResult::Consumed { redraw: moved };
            }
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let moved = self.highlight_prev();
                return GuessKeyResult::Consumed { redraw: moved };
            }
            KeyCode::Enter => {
                match self.highlighted_name() {
                    Some(name) => self.accept_text(name),
                    None => {
                        self.submit();
                    }
                }
                return GuessKeyResult::Consumed { redraw: true };
            }
            _ => {}
        }

        match self.input.handle_event(&Event::Key(key)) {
            Some(changed) => {
                if changed.value {
                    self.query_changed(now);
                }
                GuessKeyResult::Consumed { redraw: true }
            }
            None => GuessKeyResult::Ignored,
        }
    }

    pub fn handle_paste(&mut self, text: &str, now: Instant) -> GuessKeyResult {
        if self.disabled || !self.focused {
            return GuessKeyResult::Ignored;
        }
        let mut inserted = false;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            inserted |= self.input.handle(InputRequest::InsertChar(ch)).is_some();
        }
        if !inserted {
            return GuessKeyResult::Ignored;
        }
        self.query_changed(now);
        GuessKeyResult::Consumed { redraw: true }
    }

    /// Fires the debounced recomputation once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debounce.fire_if_due(now) {
            return false;
        }
        self.recompute();
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Drains pointer-down events from the hub and applies them.
    pub fn process_pointer_events(&mut self) -> bool {
        let Some(subscription) = self.pointer.as_mut() else {
            return false;
        };
        let events = subscription.drain();
        let mut changed = false;
        for event in events {
            changed |= self.handle_pointer_down(event.position);
        }
        changed
    }

    /// Resolves and emits the current query. Returns whether `on_submit` ran.
    pub fn submit(&mut self) -> bool {
        if self.disabled {
            tracing::debug!("submit ignored while disabled");
            return false;
        }

        let query = self.input.value();
        let resolved = if self.debounce.is_pending() {
            let fresh = self.compute_suggestions(query);
            resolve_submission(query, &fresh)
        } else {
            resolve_submission(query, &self.suggestions)
        };
        let Some(value) = resolved else {
            return false;
        };

        self.reset();
        tracing::info!(value = %value, "guess submitted");
        (self.on_submit)(value);
        true
    }

    pub fn set_hit_areas(&mut self, areas: GuessHitAreas) {
        self.hit_areas = areas;
    }

    pub fn view(&self) -> GuessView {
        let items = if self.list_visible {
            self.suggestions
                .iter()
                .enumerate()
                .filter_map(|(idx, territory)| {
                    let label = territory.label()?;
                    Some(GuessItemView {
                        label: label.name.to_string(),
                        detail: label.code.map(str::to_string),
                        highlighted: self.highlight == Some(idx),
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        GuessView {
            input: self.input.value().to_string(),
            cursor: self.input.cursor(),
            placeholder: self.policy.placeholder.clone(),
            focused: self.focused,
            disabled: self.disabled,
            items,
            highlight: self.highlight.filter(|_| self.list_visible),
        }
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn suggestions(&self) -> &[Territory] {
        &self.suggestions
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    pub fn policy(&self) -> &InputPolicy {
        &self.policy
    }

    pub fn phase(&self) -> InputPhase {
        match (self.list_visible, self.highlight) {
            (false, _) => InputPhase::Closed,
            (true, None) => InputPhase::OpenUnselected,
            (true, Some(idx)) => InputPhase::OpenSelected(idx),
        }
    }

    fn query_changed(&mut self, now: Instant) {
        let generation = self.debounce.schedule(now);
        tracing::trace!(generation, query = self.input.value(), "recompute scheduled");
    }

    fn recompute(&mut self) {
        let suggestions = self.compute_suggestions(self.input.value());
        self.recompute_count = self.recompute_count.saturating_add(1);
        self.suggestions = suggestions;
        self.highlight = None;
        self.list_visible = self.focused && !self.suggestions.is_empty();
        tracing::debug!(
            query = self.input.value(),
            count = self.suggestions.len(),
            visible = self.list_visible,
            "suggestions recomputed"
        );
    }

    fn compute_suggestions(&self, query: &str) -> Vec<Territory> {
        let selected = select_or_empty(self.matcher.as_ref(), query, &self.territories);
        let limit = if query.is_empty() {
            usize::MAX
        } else {
            self.policy.max_suggestions.unwrap_or(usize::MAX)
        };
        selected
            .into_iter()
            .take(limit)
            .filter_map(|idx| self.territories.get(idx).cloned())
            .collect()
    }

    fn highlight_next(&mut self) -> bool {
        if !self.list_visible || self.suggestions.is_empty() {
            return false;
        }
        let last = self.suggestions.len() - 1;
        let next = match self.highlight {
            None => 0,
            Some(idx) => (idx + 1).min(last),
        };
        let moved = self.highlight != Some(next);
        self.highlight = Some(next);
        moved
    }

    fn highlight_prev(&mut self) -> bool {
        if !self.list_visible {
            return false;
        }
        let prev = match self.highlight {
            None | Some(0) => None,
            Some(idx) => Some(idx - 1),
        };
        let moved = self.highlight != prev;
        self.highlight = prev;
        moved
    }

    fn highlighted_name(&self) -> Option<String> {
        if !self.list_visible {
            return None;
        }
        let idx = self.highlight?;
        self.suggestions
            .get(idx)
            .and_then(Territory::name)
            .map(str::to_string)
    }

    /// Copies a suggestion into the field without submitting it.
    fn accept_text(&mut self, name: String) {
        self.input = Input::new(name);
        self.debounce.cancel();
        self.close_list();
    }

    fn handle_pointer_down(&mut self, position: Position) -> bool {
        if self.disabled {
            return false;
        }

        if self.list_visible
            && let Some(list) = self.hit_areas.list
            && list.contains(position)
        {
            let Some(items) = self.hit_areas.items.filter(|items| items.contains(position))
            else {
                return false;
            };
            let idx = self.hit_areas.list_offset + usize::from(position.y - items.y);
            let Some(name) = self
                .suggestions
                .get(idx)
                .and_then(Territory::name)
                .map(str::to_string)
            else {
                return false;
            };
            tracing::debug!(idx, name = %name, "suggestion clicked");
            self.accept_text(name);
            return true;
        }

        if self
            .hit_areas
            .field
            .is_some_and(|field| field.contains(position))
        {
            if self.focused {
                return false;
            }
            return self.focus();
        }

        self.dismiss()
    }

    fn dismiss(&mut self) -> bool {
        let changed = self.list_visible || self.focused;
        self.close_list();
        self.focused = false;
        if changed {
            tracing::debug!("guess input dismissed by outside pointer");
        }
        changed
    }

    fn close_list(&mut self) {
        self.list_visible = false;
        self.highlight = None;
    }

    fn reset(&mut self) {
        self.input.reset();
        self.suggestions = Vec::new();
        self.debounce.cancel();
        self.close_list();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use proptest::prelude::*;
    use ratatui::layout::Rect;

    use crate::error::{AppError, AppResult};
    use crate::guess::pointer::{PointerDown, PointerHub};
    use crate::guess::types::{GuessHitAreas, GuessKeyResult, InputPhase, InputPolicy};
    use crate::guess::CandidateMatcher;
    use crate::territory::Territory;

    use super::GuessInput;

    type Submitted = Rc<RefCell<Vec<String>>>;

    const QUIET: Duration = Duration::from_millis(200);

    fn territories(names: &[&str]) -> Vec<Territory> {
        names.iter().map(|name| Territory::named(*name)).collect()
    }

    fn widget(names: &[&str]) -> (GuessInput, Submitted, PointerHub) {
        widget_with_policy(names, InputPolicy::default())
    }

    fn widget_with_policy(names: &[&str], policy: InputPolicy) -> (GuessInput, Submitted, PointerHub) {
        let submitted: Submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        let mut input = GuessInput::new(territories(names), policy, move |value| {
            sink.borrow_mut().push(value)
        });
        let hub = PointerHub::default();
        input.mount(&hub);
        (input, submitted, hub)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(input: &mut GuessInput, text: &str, now: Instant) {
        for ch in text.chars() {
            input.handle_key(key(KeyCode::Char(ch)), now);
        }
    }

    /// Types `text` and lets the quiet period elapse.
    fn settle(input: &mut GuessInput, text: &str, now: Instant) -> Instant {
        type_text(input, text, now);
        let later = now + QUIET;
        assert!(input.tick(later));
        later
    }

    fn suggestion_names(input: &GuessInput) -> Vec<&str> {
        input.suggestions().iter().filter_map(Territory::name).collect()
    }

    fn hit_areas() -> GuessHitAreas {
        GuessHitAreas {
            field: Some(Rect::new(0, 0, 30, 3)),
            list: Some(Rect::new(0, 3, 30, 6)),
            items: Some(Rect::new(1, 4, 28, 4)),
            list_offset: 0,
        }
    }

    #[test]
    fn rapid_keystrokes_trigger_one_recompute_with_the_last_query() {
        let (mut input, _, _hub) = widget(&["France", "French Polynesia", "Germany", "Francia"]);
        let start = Instant::now();
        let baseline = input.recompute_count();

        input.handle_key(key(KeyCode::Char('F')), start);
        input.handle_key(key(KeyCode::Char('r')), start + Duration::from_millis(20));
        input.handle_key(key(KeyCode::Char('a')), start + Duration::from_millis(40));

        assert!(!input.tick(start + Duration::from_millis(200)));
        assert_eq!(input.recompute_count(), baseline);
        assert_eq!(
            input.next_deadline(),
            Some(start + Duration::from_millis(240))
        );

        assert!(input.tick(start + Duration::from_millis(240)));
        assert_eq!(input.recompute_count(), baseline + 1);
        assert_eq!(suggestion_names(&input), vec!["France", "Francia"]);
        assert_eq!(input.phase(), InputPhase::OpenUnselected);

        assert!(!input.tick(start + Duration::from_secs(2)));
        assert_eq!(input.recompute_count(), baseline + 1);
    }

    #[test]
    fn focus_browses_the_full_list() {
        let (input, _, _hub) = widget(&["Chad", "Chile"]);
        assert!(input.is_focused());
        assert_eq!(suggestion_names(&input), vec!["Chad", "Chile"]);
        assert_eq!(input.phase(), InputPhase::OpenUnselected);
    }

    #[test]
    fn focus_without_data_stays_closed_until_territories_arrive() {
        let (mut input, _, _hub) = widget(&[]);
        assert_eq!(input.phase(), InputPhase::Closed);

        input.set_territories(territories(&["Peru"]));
        assert_eq!(input.phase(), InputPhase::Closed);

        input.focus();
        assert_eq!(suggestion_names(&input), vec!["Peru"]);
        assert_eq!(input.phase(), InputPhase::OpenUnselected);
    }

    #[test]
    fn empty_result_closes_the_list() {
        let (mut input, _, _hub) = widget(&["Chad", "Chile"]);
        settle(&mut input, "zz", Instant::now());
        assert!(input.suggestions().is_empty());
        assert_eq!(input.phase(), InputPhase::Closed);
    }

    #[test]
    fn arrows_walk_the_list_with_none_as_the_floor() {
        let (mut input, _, _hub) = widget(&["Chad", "Chile"]);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Down), now);
        assert_eq!(input.phase(), InputPhase::OpenSelected(0));
        input.handle_key(key(KeyCode::Down), now);
        input.handle_key(key(KeyCode::Down), now);
        assert_eq!(input.highlight(), Some(1));

        input.handle_key(key(KeyCode::Up), now);
        assert_eq!(input.highlight(), Some(0));
        input.handle_key(key(KeyCode::Up), now);
        assert_eq!(input.phase(), InputPhase::OpenUnselected);
        input.handle_key(key(KeyCode::Up), now);
        assert_eq!(input.highlight(), None);

        input.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL), now);
        assert_eq!(input.highlight(), Some(0));
        assert_eq!(input.query(), "");
    }

    #[test]
    fn arrows_are_noops_while_closed() {
        let (mut input, _, _hub) = widget(&["Chad"]);
        let now = Instant::now();
        input.handle_key(key(KeyCode::Esc), now);
        assert_eq!(input.phase(), InputPhase::Closed);

        input.handle_key(key(KeyCode::Down), now);
        assert_eq!(input.highlight(), None);
        assert_eq!(input.handle_key(key(KeyCode::Esc), now), GuessKeyResult::Ignored);
    }

    #[test]
    fn escape_closes_and_clears_highlight() {
        let (mut input, _, _hub) = widget(&["Chad", "Chile"]);
        let now = Instant::now();
        input.handle_key(key(KeyCode::Down), now);
        assert_eq!(
            input.handle_key(key(KeyCode::Esc), now),
            GuessKeyResult::Consumed { redraw: true }
        );
        assert_eq!(input.phase(), InputPhase::Closed);
        assert_eq!(input.highlight(), None);
    }

    #[test]
    fn enter_on_highlight_copies_text_then_second_enter_submits() {
        let (mut input, submitted, _hub) = widget(&["France", "French Polynesia"]);
        let now = settle(&mut input, "fr", Instant::now());

        input.handle_key(key(KeyCode::Down), now);
        input.handle_key(key(KeyCode::Down), now);
        input.handle_key(key(KeyCode::Enter), now);

        assert_eq!(input.query(), "French Polynesia");
        assert_eq!(input.phase(), InputPhase::Closed);
        assert_eq!(input.next_deadline(), None);
        assert!(submitted.borrow().is_empty());

        input.handle_key(key(KeyCode::Enter), now);
        assert_eq!(*submitted.borrow(), vec!["French Polynesia".to_string()]);
        assert_eq!(input.query(), "");
        assert!(input.suggestions().is_empty());
        assert_eq!(input.phase(), InputPhase::Closed);
    }

    #[test]
    fn exact_match_wins_over_first_suggestion() {
        let (mut input, submitted, _hub) = widget(&["French Polynesia", "France"]);
        let now = settle(&mut input, "fr", Instant::now());
        input.handle_key(key(KeyCode::Down), now);
        input.handle_key(key(KeyCode::Down), now);
        input.handle_key(key(KeyCode::Enter), now);
        assert_eq!(input.query(), "France");
        assert_eq!(suggestion_names(&input), vec!["French Polynesia", "France"]);

        input.handle_key(key(KeyCode::Enter), now);
        assert_eq!(*submitted.borrow(), vec!["France".to_string()]);
    }

    #[test]
    fn positional_fallback_picks_the_first_suggestion() {
        let (mut input, submitted, _hub) = widget(&["French Polynesia", "France"]);
        settle(&mut input, "fr", Instant::now());
        assert!(input.submit());
        assert_eq!(*submitted.borrow(), vec!["French Polynesia".to_string()]);
    }

    #[test]
    fn submit_uses_fresh_matches_while_recompute_is_pending() {
        let (mut input, submitted, _hub) = widget(&["Chad", "Germany"]);
        let now = Instant::now();
        type_text(&mut input, "ger", now);
        assert_eq!(suggestion_names(&input), vec!["Chad", "Germany"]);

        input.handle_key(key(KeyCode::Enter), now);
        assert_eq!(*submitted.borrow(), vec!["Germany".to_string()]);
        assert_eq!(input.next_deadline(), None);
    }

    #[test]
    fn unknown_text_is_submitted_trimmed() {
        let (mut input, submitted, _hub) = widget(&["Chad"]);
        let now = settle(&mut input, "  Atlantis ", Instant::now());
        input.handle_key(key(KeyCode::Enter), now);
        assert_eq!(*submitted.borrow(), vec!["Atlantis".to_string()]);
    }

    #[test]
    fn blank_query_never_submits() {
        let (mut input, submitted, _hub) = widget(&[]);
        let now = Instant::now();
        input.handle_key(key(KeyCode::Enter), now);
        type_text(&mut input, "   ", now);
        input.tick(now + QUIET);
        input.handle_key(key(KeyCode::Enter), now + QUIET);
        assert!(!input.submit());
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn disabled_widget_never_submits() {
        let (mut input, submitted, _hub) = widget(&["Chad"]);
        let now = settle(&mut input, "chad", Instant::now());
        input.handle_key(key(KeyCode::Down), now);

        input.set_disabled(true);
        assert_eq!(input.phase(), InputPhase::Closed);
        assert!(!input.submit());
        assert_eq!(input.handle_key(key(KeyCode::Enter), now), GuessKeyResult::Ignored);
        assert!(!input.focus());
        assert!(submitted.borrow().is_empty());

        input.set_disabled(false);
        assert!(input.submit());
        assert_eq!(*submitted.borrow(), vec!["Chad".to_string()]);
    }

    #[test]
    fn outside_pointer_closes_and_keeps_text() {
        let (mut input, submitted, hub) = widget(&["Chad", "Chile"]);
        input.set_hit_areas(hit_areas());
        let now = settle(&mut input, "ch", Instant::now());
        assert!(input.is_list_visible());

        assert_eq!(hub.publish(PointerDown::new(60, 20)), 1);
        assert!(input.process_pointer_events());

        assert_eq!(input.phase(), InputPhase::Closed);
        assert_eq!(input.query(), "ch");
        assert!(!input.is_focused());
        assert!(submitted.borrow().is_empty());

        // Keys are ignored until focus comes back through the field.
        assert_eq!(
            input.handle_key(key(KeyCode::Char('x')), now),
            GuessKeyResult::Ignored
        );
        hub.publish(PointerDown::new(5, 1));
        assert!(input.process_pointer_events());
        assert!(input.is_focused());
        assert_eq!(input.phase(), InputPhase::OpenUnselected);
    }

    #[test]
    fn clicking_an_item_copies_it_without_submitting() {
        let (mut input, submitted, hub) = widget(&["Chad", "Chile", "China"]);
        input.set_hit_areas(hit_areas());
        settle(&mut input, "ch", Instant::now());

        hub.publish(PointerDown::new(4, 5));
        assert!(input.process_pointer_events());

        assert_eq!(input.query(), "Chile");
        assert_eq!(input.phase(), InputPhase::Closed);
        assert!(input.is_focused());
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn clicking_the_list_border_is_not_outside() {
        let (mut input, _, hub) = widget(&["Chad", "Chile"]);
        input.set_hit_areas(hit_areas());

        hub.publish(PointerDown::new(0, 3));
        assert!(!input.process_pointer_events());
        assert!(input.is_list_visible());
    }

    #[test]
    fn unmount_cancels_the_timer_and_releases_the_listener() {
        let (mut input, _, hub) = widget(&["Chad"]);
        let now = Instant::now();
        type_text(&mut input, "c", now);
        let count = input.recompute_count();
        assert_eq!(hub.listener_count(), 1);

        input.unmount();
        assert!(!input.is_mounted());
        assert_eq!(hub.listener_count(), 0);
        assert!(!input.tick(now + Duration::from_secs(1)));
        assert_eq!(input.recompute_count(), count);
        assert!(!input.process_pointer_events());
    }

    #[test]
    fn focus_after_unmount_does_nothing() {
        let (mut input, _, _hub) = widget(&["Chad"]);
        let count = input.recompute_count();

        input.unmount();
        assert!(!input.focus());
        assert!(!input.is_focused());
        assert_eq!(input.recompute_count(), count);
        assert_eq!(input.phase(), InputPhase::Closed);
    }

    #[test]
    fn paste_inserts_text_and_schedules_recompute() {
        let (mut input, _, _hub) = widget(&["New Zealand"]);
        let now = Instant::now();
        assert_eq!(
            input.handle_paste("new\nzea", now),
            GuessKeyResult::Consumed { redraw: true }
        );
        assert_eq!(input.query(), "newzea");
        assert!(input.next_deadline().is_some());
    }

    #[test]
    fn suggestion_cap_applies_to_typed_queries_only() {
        let policy = InputPolicy {
            max_suggestions: Some(1),
            ..InputPolicy::default()
        };
        let (mut input, _, _hub) = widget_with_policy(&["Chad", "Chile", "China"], policy);
        assert_eq!(input.suggestions().len(), 3);

        let now = settle(&mut input, "ch", Instant::now());
        assert_eq!(suggestion_names(&input), vec!["Chad"]);

        // Only the empty query browses; a blank one is an ordinary needle.
        input.handle_key(key(KeyCode::Backspace), now);
        input.handle_key(key(KeyCode::Backspace), now);
        settle(&mut input, " ", now);
        assert!(input.suggestions().is_empty());
        assert_eq!(input.phase(), InputPhase::Closed);
    }

    struct FailingMatcher;

    impl CandidateMatcher for FailingMatcher {
        fn select(&self, _query: &str, _candidates: &[Territory]) -> AppResult<Vec<usize>> {
            Err(AppError::filter("index unavailable"))
        }
    }

    #[test]
    fn matcher_failure_leaves_an_empty_closed_list() {
        let (input, _, _hub) = widget(&["Chad"]);
        let mut input = input.with_matcher(Box::new(FailingMatcher));
        input.focus();
        assert!(input.suggestions().is_empty());
        assert_eq!(input.phase(), InputPhase::Closed);
    }

    #[test]
    fn view_reflects_highlight_and_hides_items_when_closed() {
        let (mut input, _, _hub) = widget(&["Chad", "Chile"]);
        input.handle_key(key(KeyCode::Down), Instant::now());

        let view = input.view();
        assert_eq!(view.items.len(), 2);
        assert!(view.items[0].highlighted);
        assert_eq!(view.highlight, Some(0));

        input.handle_key(key(KeyCode::Esc), Instant::now());
        let view = input.view();
        assert!(view.items.is_empty());
        assert_eq!(view.highlight, None);
    }

    #[test]
    fn view_cursor_counts_characters_for_wide_input() {
        let (mut input, _, _hub) = widget(&["Chad"]);
        type_text(&mut input, "あい", Instant::now());
        assert_eq!(input.view().cursor, 2);

        input.handle_key(key(KeyCode::Left), Instant::now());
        assert_eq!(input.view().cursor, 1);
    }

    proptest! {
        #[test]
        fn highlight_stays_in_range_for_any_arrow_sequence(
            count in 0usize..6,
            moves in prop::collection::vec(any::<bool>(), 0..40),
        ) {
            let names: Vec<String> = (0..count).map(|idx| format!("Land {idx}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut input, _, _hub) = widget(&refs);
            let now = Instant::now();

            for down in moves {
                let code = if down { KeyCode::Down } else { KeyCode::Up };
                input.handle_key(key(code), now);
                match input.highlight() {
                    None => {}
                    Some(idx) => prop_assert!(idx < input.suggestions().len()),
                }
                if input.suggestions().is_empty() {
                    prop_assert!(!input.is_list_visible());
                }
            }
        }
    }
}
