//! Browser state and event handling.
//!
//! One [`App`] owns a [`ListView`] per screen (wallet, menu, templates) and a
//! [`SearchDispatcher`] for the active screen. Input syntax is
//! `filter_expr | text`:
//! - the text part (right of `|`, or the whole input without a pipe) is searched
//!   as the user types, debounced;
//! - the filter part (left of `|`) is parsed and applied when Enter is pressed.
//!
//! Debounced searches arrive over an mpsc channel owned by the active screen.
//! Switching screens flushes any pending search and replaces the dispatcher, so a
//! search typed on one screen never lands on another.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{
    RenderState, RowView, ScreenView, menu_detail, menu_row, render_ui, template_detail,
    template_row, transaction_detail, transaction_row,
};
use crate::clipboard::copy_ids;
use crate::config::Settings;
use crate::filters::{FilterCriteria, Filterable, parse_filter};
use crate::models::{CustomizationTemplate, Identifiable, MenuItem, Transaction};
use crate::search::{SearchDispatcher, SearchEvent};
use crate::selection::AppliedOrder;
use crate::sorting::{
    MenuItemSortKey, SortKey, SortState, Sortable, TemplateSortKey, TransactionSortKey,
};
use crate::store::{DataSource, Revision, Snapshot};
use crate::views::{ListView, ViewChange};

const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Minimum gap between two Enter presses that both apply the filter
const ENTER_DEBOUNCE_MS: u64 = 150;
const MAX_INPUT_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Transactions,
    Menu,
    Templates,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Transactions, Screen::Menu, Screen::Templates];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Transactions => "Wallet",
            Screen::Menu => "Menu",
            Screen::Templates => "Templates",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Transactions => 0,
            Screen::Menu => 1,
            Screen::Templates => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Screen::Transactions => Screen::Menu,
            Screen::Menu => Screen::Templates,
            Screen::Templates => Screen::Transactions,
        }
    }
}

/// Screen operations that do not depend on the record type
trait ScreenOps {
    fn visible_len(&self) -> usize;
    fn row_id(&self, index: usize) -> Option<&str>;
    fn criteria(&self) -> &FilterCriteria;
    fn apply_query(&mut self, query: &str);
    fn apply_criteria(&mut self, criteria: FilterCriteria);
    fn toggle_row(&mut self, id: &str) -> bool;
    fn select_visible(&mut self) -> usize;
    fn clear_selected(&mut self);
    fn selected(&self) -> &[String];
    fn next_sort_key(&mut self);
    fn reverse_sort(&mut self);
}

impl<T> ScreenOps for ListView<T>
where
    T: Filterable + Sortable + Identifiable + Clone,
    T::Key: SortKey,
{
    fn visible_len(&self) -> usize {
        self.visible().len()
    }

    fn row_id(&self, index: usize) -> Option<&str> {
        self.visible().get(index).map(Identifiable::id)
    }

    fn criteria(&self) -> &FilterCriteria {
        ListView::criteria(self)
    }

    fn apply_query(&mut self, query: &str) {
        self.set_query(query);
    }

    fn apply_criteria(&mut self, criteria: FilterCriteria) {
        self.set_criteria(criteria);
    }

    fn toggle_row(&mut self, id: &str) -> bool {
        self.toggle(id)
    }

    fn select_visible(&mut self) -> usize {
        self.select_all_visible()
    }

    fn clear_selected(&mut self) {
        self.clear_selection();
    }

    fn selected(&self) -> &[String] {
        self.selected_ids()
    }

    fn next_sort_key(&mut self) {
        let key = self.sort().key.next();
        self.select_sort_key(key);
    }

    fn reverse_sort(&mut self) {
        self.flip_direction();
    }
}

pub struct App<'a> {
    source: &'a dyn DataSource,
    revision: Option<Revision>,
    screen: Screen,
    transactions: ListView<Transaction>,
    menu: ListView<MenuItem>,
    templates: ListView<CustomizationTemplate>,
    /// Order in which selected templates are applied, kept in sync with the selection
    applied: Rc<RefCell<AppliedOrder>>,
    cursors: [usize; 3],
    inputs: [String; 3],
    /// Bare words from the last applied filter part, joined with every later search
    filter_words: [Option<String>; 3],
    search: SearchDispatcher,
    search_events: Receiver<SearchEvent>,
    search_delay: Duration,
    page_size: usize,
    filter_error: Option<String>,
    last_enter_time: Option<Instant>,
    status_message: Option<StatusMessage>,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<'a> App<'a> {
    pub fn new(source: &'a dyn DataSource, settings: &Settings) -> Result<Self> {
        let snapshot = source.load()?;
        let revision = source.revision().ok();

        let mut transactions =
            ListView::new(snapshot.transactions, SortState::new(TransactionSortKey::Date));
        let mut menu = ListView::new(snapshot.menu_items, SortState::new(MenuItemSortKey::Name));
        let mut templates =
            ListView::new(snapshot.templates, SortState::new(TemplateSortKey::UsageCount));

        log_changes(&mut transactions, Screen::Transactions);
        log_changes(&mut menu, Screen::Menu);
        log_changes(&mut templates, Screen::Templates);

        let applied = Rc::new(RefCell::new(AppliedOrder::new()));
        let sink = Rc::clone(&applied);
        templates.subscribe(move |change| {
            if let ViewChange::Selection(ids) = change {
                sink.borrow_mut().sync_with_ids(ids);
            }
        });

        let search_delay = settings.search_debounce();
        let (tx, search_events) = mpsc::channel();

        tracing::info!(source = %source.describe(), "Browser opened");

        Ok(Self {
            source,
            revision,
            screen: Screen::Transactions,
            transactions,
            menu,
            templates,
            applied,
            cursors: [0; 3],
            inputs: Default::default(),
            filter_words: Default::default(),
            search: SearchDispatcher::with_channel(search_delay, tx),
            search_events,
            search_delay,
            page_size: settings.page_size.max(1),
            filter_error: None,
            last_enter_time: None,
            status_message: None,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        })
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.tick();

            // Periodic redraw picks up resizes and the pending-search marker
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                let view = self.screen_view();
                let input = self.input();
                terminal.draw(|f| {
                    let state = RenderState {
                        screen: self.screen,
                        view: &view,
                        cursor: self.cursor(),
                        input,
                        search_pending: self.search.is_pending(),
                        filter_error: self.filter_error.as_deref(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Expire status messages and deliver any due debounced search
    fn tick(&mut self) {
        if self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
        if self.search.tick() {
            self.drain_search_events();
        }
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let duration_ms = match message_type {
            MessageType::Success => STATUS_SUCCESS_DURATION_MS,
            MessageType::Error => STATUS_ERROR_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn current(&self) -> &dyn ScreenOps {
        match self.screen {
            Screen::Transactions => &self.transactions,
            Screen::Menu => &self.menu,
            Screen::Templates => &self.templates,
        }
    }

    fn current_mut(&mut self) -> &mut dyn ScreenOps {
        match self.screen {
            Screen::Transactions => &mut self.transactions,
            Screen::Menu => &mut self.menu,
            Screen::Templates => &mut self.templates,
        }
    }

    fn cursor(&self) -> usize {
        self.cursors[self.screen.index()]
    }

    fn set_cursor(&mut self, cursor: usize) {
        self.cursors[self.screen.index()] = cursor;
        self.needs_redraw = true;
    }

    fn input(&self) -> &str {
        &self.inputs[self.screen.index()]
    }

    fn input_mut(&mut self) -> &mut String {
        &mut self.inputs[self.screen.index()]
    }

    fn cursor_id(&self) -> Option<String> {
        self.current().row_id(self.cursor()).map(str::to_string)
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.input().is_empty() && self.current().criteria().is_empty() {
                    self.should_quit = true;
                } else {
                    self.clear_search();
                }
            }
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-(self.page_size as isize)),
            Action::PageDown => self.move_cursor(self.page_size as isize),
            Action::NextScreen => self.switch_screen(self.screen.next()),
            Action::ApplyFilter => {
                let should_apply = self.last_enter_time.is_none_or(|last| {
                    last.elapsed() >= Duration::from_millis(ENTER_DEBOUNCE_MS)
                });
                if should_apply {
                    self.apply_input();
                    self.last_enter_time = Some(Instant::now());
                }
            }
            Action::ToggleSelection => {
                if let Some(id) = self.cursor_id() {
                    self.current_mut().toggle_row(&id);
                    self.needs_redraw = true;
                }
            }
            Action::SelectAllVisible => {
                let added = self.current_mut().select_visible();
                let total = self.current().selected().len();
                self.set_status(
                    format!("✓ Selected {} more ({} total)", added, total),
                    MessageType::Success,
                );
            }
            Action::ClearSelection => {
                self.current_mut().clear_selected();
                self.needs_redraw = true;
            }
            Action::CycleSortKey => {
                self.current_mut().next_sort_key();
                self.set_cursor(0);
            }
            Action::FlipSortDirection => {
                self.current_mut().reverse_sort();
                self.set_cursor(0);
            }
            Action::CopySelected => self.copy_selected(),
            Action::Refresh => self.refresh(),
            Action::MoveAppliedUp => self.move_applied(true),
            Action::MoveAppliedDown => self.move_applied(false),
            Action::UpdateSearch(c) => {
                if self.input().len() < MAX_INPUT_LEN {
                    self.input_mut().push(c);
                    self.on_input_changed();
                }
            }
            Action::DeleteChar => {
                if self.input_mut().pop().is_some() {
                    self.on_input_changed();
                }
            }
            Action::None => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let total = self.current().visible_len();
        if total == 0 {
            self.set_cursor(0);
            return;
        }

        let new_idx = (self.cursor() as isize + delta).max(0) as usize;
        let new_idx = new_idx.min(total - 1);
        if new_idx != self.cursor() {
            self.set_cursor(new_idx);
        }
    }

    fn on_input_changed(&mut self) {
        let text = split_input(self.input()).1.to_string();
        self.search.on_input(text);
        self.needs_redraw = true;
    }

    fn drain_search_events(&mut self) {
        while let Ok(event) = self.search_events.try_recv() {
            let text = match event {
                SearchEvent::Search(text) => text,
                SearchEvent::Cleared => String::new(),
            };
            let words = self.filter_words[self.screen.index()].as_deref();
            let query = join_query(words, &text).unwrap_or_default();
            self.current_mut().apply_query(&query);
            self.set_cursor(0);
        }
    }

    fn clear_search(&mut self) {
        self.input_mut().clear();
        self.filter_words[self.screen.index()] = None;
        self.search.clear();
        self.drain_search_events();
        self.current_mut().apply_criteria(FilterCriteria::default());
        self.filter_error = None;
        self.set_cursor(0);
    }

    /// Apply the whole input now: filter part parsed, text part searched
    fn apply_input(&mut self) {
        self.search.submit();
        self.drain_search_events();

        let (filter, text) = split_input(self.input());
        let text = text.to_string();

        let mut criteria = match filter {
            None => FilterCriteria::default(),
            Some(expr) => match parse_filter(expr) {
                Ok(criteria) => criteria,
                Err(e) => {
                    self.filter_error =
                        Some(format!("Parse error: {} | Try: type:tip min:5 | text", e));
                    self.needs_redraw = true;
                    return;
                }
            },
        };

        let words = criteria.query.take();
        criteria.query = join_query(words.as_deref(), &text);
        self.filter_words[self.screen.index()] = words;

        self.current_mut().apply_criteria(criteria);
        self.filter_error = None;
        self.set_cursor(0);
    }

    fn switch_screen(&mut self, screen: Screen) {
        if self.search.is_pending() {
            self.search.submit();
        }
        self.drain_search_events();

        // Dropping the old dispatcher tears down the previous screen's search
        let (tx, rx) = mpsc::channel();
        self.search = SearchDispatcher::with_channel(self.search_delay, tx);
        self.search_events = rx;

        self.screen = screen;
        self.filter_error = None;
        self.needs_redraw = true;
    }

    fn copy_selected(&mut self) {
        let ids = match self.screen {
            Screen::Templates => self.applied.borrow().ids().to_vec(),
            _ => self.current().selected().to_vec(),
        };

        match copy_ids(&ids) {
            Ok(count) => self.set_status(
                format!("✓ Copied {} ID{} to clipboard", count, if count == 1 { "" } else { "s" }),
                MessageType::Success,
            ),
            Err(e) => self.set_status(format!("✗ {}", e), MessageType::Error),
        }
    }

    fn move_applied(&mut self, up: bool) {
        if self.screen != Screen::Templates {
            return;
        }
        let Some(id) = self.cursor_id() else {
            return;
        };

        if self.applied.borrow().position(&id).is_none() {
            self.set_status("✗ Select the template before reordering", MessageType::Error);
            return;
        }
        let moved = if up {
            self.applied.borrow_mut().move_up(&id)
        } else {
            self.applied.borrow_mut().move_down(&id)
        };
        if moved {
            self.needs_redraw = true;
        }
    }

    /// Reload from the data source when its revision has changed
    fn refresh(&mut self) {
        let revision = match self.source.revision() {
            Ok(revision) => revision,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to check data revision");
                self.set_status(format!("✗ {:#}", e), MessageType::Error);
                return;
            }
        };
        if self.revision == Some(revision) {
            self.set_status("✓ Already up to date", MessageType::Success);
            return;
        }

        match self.source.load() {
            Ok(snapshot) => {
                let pruned = self.apply_snapshot(snapshot);
                self.revision = Some(revision);
                let message = if pruned > 0 {
                    format!("✓ Reloaded, {} selection(s) no longer exist", pruned)
                } else {
                    "✓ Reloaded".to_string()
                };
                self.set_status(message, MessageType::Success);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reload failed");
                self.set_status(format!("✗ {:#}", e), MessageType::Error);
            }
        }
    }

    /// Swap in new records everywhere. Returns how many selections were pruned.
    fn apply_snapshot(&mut self, snapshot: Snapshot) -> usize {
        let pruned = self.transactions.set_records(snapshot.transactions)
            + self.menu.set_records(snapshot.menu_items)
            + self.templates.set_records(snapshot.templates);

        let lens = [
            self.transactions.visible().len(),
            self.menu.visible().len(),
            self.templates.visible().len(),
        ];
        for (cursor, len) in self.cursors.iter_mut().zip(lens) {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
        self.needs_redraw = true;
        pruned
    }

    fn screen_view(&self) -> ScreenView {
        let cursor = self.cursor();
        match self.screen {
            Screen::Transactions => {
                build_view(&self.transactions, cursor, transaction_row, transaction_detail)
            }
            Screen::Menu => build_view(&self.menu, cursor, menu_row, |item| {
                menu_detail(item, self.templates.records())
            }),
            Screen::Templates => {
                let applied = self.applied.borrow();
                build_view(
                    &self.templates,
                    cursor,
                    |t| template_row(t, applied.position(&t.id)),
                    |t| template_detail(t, applied.position(&t.id)),
                )
            }
        }
    }
}

fn log_changes<T>(view: &mut ListView<T>, screen: Screen)
where
    T: Filterable + Sortable + Identifiable + Clone,
{
    view.subscribe(move |change| {
        tracing::debug!(screen = screen.title(), ?change, "View changed");
    });
}

fn build_view<T>(
    view: &ListView<T>,
    cursor: usize,
    row: impl Fn(&T) -> String,
    detail: impl Fn(&T) -> Vec<(String, String)>,
) -> ScreenView
where
    T: Filterable + Sortable + Identifiable + Clone,
    T::Key: SortKey,
{
    let sort = view.sort();
    ScreenView {
        rows: view
            .visible()
            .iter()
            .map(|record| RowView {
                id: record.id().to_string(),
                text: row(record),
                selected: view.is_selected(record.id()),
            })
            .collect(),
        detail: view.visible().get(cursor).map(detail).unwrap_or_default(),
        sort_label: format!("{} {}", sort.key.label(), sort.direction.arrow()),
        total: view.records().len(),
        selected: view.selected_ids().len(),
    }
}

/// Bare words from the filter part search alongside the typed text
fn join_query(words: Option<&str>, text: &str) -> Option<String> {
    let text = text.trim();
    match (words, text.is_empty()) {
        (Some(words), false) => Some(format!("{} {}", words, text)),
        (Some(words), true) => Some(words.to_string()),
        (None, false) => Some(text.to_string()),
        (None, true) => None,
    }
}

/// Split `filter | text`; without a pipe the whole input is text
fn split_input(input: &str) -> (Option<&str>, &str) {
    match input.split_once('|') {
        Some((filter, text)) => {
            let filter = filter.trim();
            (if filter.is_empty() { None } else { Some(filter) }, text.trim())
        }
        None => (None, input),
    }
}
