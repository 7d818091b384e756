//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Geolocation and address lookups run as tasks on the tokio runtime. Each
//! task reports back with one [`Outcome`] over an unbounded channel that the
//! event loop drains between frames, so all state mutation happens on the
//! UI thread.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Keymap},
    theme::Theme,
    widgets::{
        category_tree::{CategoryTree, CategoryTreeState},
        command_bar::{CommandBar, CommandBarState},
        detail::DetailPopup,
        help::HelpPopup,
        map_view::{self, MapView},
        query_bar::{QueryBar, QueryBarState},
        record_list::{RecordList, RecordListState},
        view_bar::{Status, ViewBar},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mof_core::{
    config::Config,
    export,
    view::{project_list, project_map, Detail, MapState, MapSurface},
    Coordinates, DataStore, Error, ViewMode,
};
use mof_sources::{AddressResolver, Geolocator};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, path::Path, sync::Arc, time::Duration};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Focus + background results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    /// The map or the list, whichever is on screen.
    View,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

/// Result of a background request, delivered to the event loop.
#[derive(Debug)]
pub enum Outcome {
    Located(mof_core::Result<Coordinates>),
    AddressResolved {
        query: String,
        result: mof_core::Result<Option<Coordinates>>,
    },
}

/// External collaborators and the runtime their requests run on.
pub struct Services {
    pub geolocator: Arc<dyn Geolocator>,
    pub resolver: Arc<dyn AddressResolver>,
    pub runtime: tokio::runtime::Handle,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: DataStore,
    pub map: MapState,
    pub tree: CategoryTreeState,
    pub list: RecordListState,
    pub query: QueryBarState,
    pub command_bar: CommandBarState,
    pub view: ViewMode,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub detail: Option<Detail>,
    pub status: Option<Status>,
    /// A geolocation request is in flight; further requests are ignored.
    pub locating: bool,
    /// An address lookup is in flight; further lookups are ignored.
    pub resolving: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub quit: bool,
    services: Services,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl AppState {
    /// Build the UI around an already-loaded store.
    pub fn new(store: DataStore, config: Config, theme: Theme, services: Services) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = Self {
            map: MapState::new(config.map.default_center(), config.map.default_zoom),
            tree: CategoryTreeState::from_categories(store.extract_categories()),
            list: RecordListState::default(),
            query: QueryBarState::default(),
            command_bar: CommandBarState::default(),
            view: config.ui.default_view,
            focus: Focus::Tree,
            prev_focus: Focus::Tree,
            detail: None,
            status: None,
            locating: false,
            resolving: false,
            show_help: false,
            theme,
            keymap: Keymap::from_config(&config.keybindings),
            config,
            quit: false,
            store,
            services,
            tx,
            rx,
        };
        state.sync_view();
        state
    }

    // -- Filtering -----------------------------------------------------------

    /// Mutate the filter state, then redraw the active view from the new
    /// filtered subset.
    pub fn apply(&mut self, f: impl FnOnce(&mut DataStore)) {
        f(&mut self.store);
        self.list.reset();
        self.sync_view();
    }

    pub fn reset_filters(&mut self) {
        tracing::debug!("filters reset");
        self.tree.clear_selection();
        self.query.clear();
        self.apply(DataStore::reset_filters);
    }

    /// Re-project the filtered subset onto the map when it is on screen.
    /// The list is projected at draw time.
    fn sync_view(&mut self) {
        if self.view == ViewMode::Map {
            project_map(self.store.filtered(), &mut self.map, self.config.map.fit_padding);
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        tracing::debug!(from = %self.view, to = %view, "view switched");
        self.view = view;
        self.sync_view();
    }

    // -- Detail --------------------------------------------------------------

    pub fn open_detail(&mut self, record_id: u32) {
        self.detail = self.store.find(record_id).map(Detail::from_record);
        tracing::debug!(record_id, found = self.detail.is_some(), "detail opened");
    }

    // -- Location ------------------------------------------------------------

    /// Ask the geolocation provider for the user's position. Ignored while a
    /// previous request is still in flight.
    pub fn request_location(&mut self) {
        if self.locating {
            tracing::debug!("geolocation already in flight");
            return;
        }
        self.locating = true;
        let geolocator = Arc::clone(&self.services.geolocator);
        let tx = self.tx.clone();
        self.services.runtime.spawn(async move {
            let result = geolocator.locate().await;
            let _ = tx.send(Outcome::Located(result));
        });
    }

    /// Resolve `text` to a position. Blank input and requests made while a
    /// lookup is in flight are ignored.
    pub fn request_address(&mut self, text: String) {
        let query = text.trim().to_string();
        if query.is_empty() || self.resolving {
            return;
        }
        tracing::debug!(%query, "address lookup requested");
        self.resolving = true;
        let resolver = Arc::clone(&self.services.resolver);
        let tx = self.tx.clone();
        self.services.runtime.spawn(async move {
            let result = resolver.resolve(&query).await;
            let _ = tx.send(Outcome::AddressResolved { query, result });
        });
    }

    /// Apply every outcome that has arrived since the last frame.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Located(result) => {
                self.locating = false;
                match result {
                    Ok(position) => self.move_user_to(position),
                    Err(e) => self.report(e),
                }
            }
            Outcome::AddressResolved { query, result } => {
                self.resolving = false;
                match result {
                    Ok(Some(position)) => self.move_user_to(position),
                    Ok(None) => self.report(Error::AddressNotFound(query)),
                    Err(e) => self.report(e),
                }
            }
        }
    }

    /// New user position: distances, nearest-first order, map centre, and the
    /// user marker all follow it.
    fn move_user_to(&mut self, position: Coordinates) {
        tracing::info!(lat = position.lat, lon = position.lon, "user position set");
        self.store.update_location(position);
        self.map.user = Some(position);
        self.map.set_view(position, self.config.map.user_zoom);
        self.status = Some(Status::Info("Sorted by distance from your position".to_string()));
        self.list.reset();
        self.sync_view();
    }

    fn report(&mut self, err: Error) {
        match err {
            Error::AddressNotFound(ref q) => tracing::debug!(query = %q, "address not found"),
            ref e => tracing::warn!(error = %e, "request failed"),
        }
        self.status = Some(Status::Error(err.user_message().to_string()));
    }

    // -- Export --------------------------------------------------------------

    /// Write the filtered subset as a JSON-LD `ItemList`. Returns the number
    /// of records written.
    pub fn export(&self, path: &Path) -> anyhow::Result<usize> {
        let filtered = self.store.filtered();
        let doc = export::item_list(filtered);
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        tracing::info!(path = %path.display(), count = filtered.len(), "exported");
        Ok(filtered.len())
    }

    // -- Events --------------------------------------------------------------

    pub fn handle(&mut self, event: AppEvent) {
        if !matches!(event, AppEvent::Resize(..)) {
            self.status = None;
        }

        // Detail popup is modal.
        if self.detail.is_some() {
            if matches!(event, AppEvent::Escape | AppEvent::Enter | AppEvent::Quit) {
                tracing::debug!("detail closed");
                self.detail = None;
            }
            return;
        }

        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape => {
                if self.focus == Focus::QueryBar {
                    self.focus = Focus::Tree;
                }
            }

            // Tab-cycle focus: Tree → View → QueryBar → Tree
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Tree => Focus::View,
                    Focus::View => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Tree,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => self.focus = Focus::QueryBar,
            AppEvent::ToggleView => self.set_view(self.view.toggled()),
            AppEvent::Geolocate => self.request_location(),
            AppEvent::ResetFilters => self.reset_filters(),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => match Command::parse(&self.command_bar.input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    if let Err(msg) = execute_command(self, cmd) {
                        self.status = Some(Status::Error(msg));
                    }
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                // Show the error; bar stays open
                Err(msg) => self.command_bar.error = Some(msg),
            },
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Tree => {
                if self.tree.handle(&event) {
                    let categories = self.tree.selected_categories();
                    tracing::debug!(?categories, "category filter changed");
                    self.apply(|store| store.set_categories(categories));
                }
            }
            Focus::View => match (self.view, event) {
                (ViewMode::Map, AppEvent::Enter) => {
                    if let Some(id) = self.map.selected().map(|m| m.record_id) {
                        self.open_detail(id);
                    }
                }
                (ViewMode::Map, other) => {
                    map_view::handle(&mut self.map, &other);
                }
                (ViewMode::List, AppEvent::Enter) => {
                    if let Some(id) = self.store.filtered().get(self.list.cursor).map(|r| r.id) {
                        self.open_detail(id);
                    }
                }
                (ViewMode::List, other) => {
                    self.list.handle(&other, self.store.filtered().len());
                }
            },
            Focus::QueryBar => {
                if event == AppEvent::Enter {
                    self.request_address(self.query.query.clone());
                } else if self.query.handle(&event) {
                    let text = self.query.query.clone();
                    self.apply(|store| store.set_search_query(text));
                }
            }
            Focus::Command => {} // handled before dispatch
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(store: DataStore, config: Config, theme: Theme, services: Services) -> Self {
        App {
            state: AppState::new(store, config, theme, services),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.drain_outcomes();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(&self.state.keymap, raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(&self.state.keymap, other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line view bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let pct = state.config.ui.category_pane_width_pct.min(80);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    let summary = state.store.results_summary();
    frame.render_widget(
        ViewBar::new(
            state.view,
            &summary,
            state.status.as_ref(),
            state.locating,
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        CategoryTree::new(&state.tree, state.focus == Focus::Tree, &state.theme),
        horiz[0],
    );

    let view_focused = state.focus == Focus::View;
    match state.view {
        ViewMode::Map => {
            frame.render_widget(MapView::new(&state.map, view_focused, &state.theme), horiz[1])
        }
        ViewMode::List => {
            let projection = project_list(state.store.filtered());
            frame.render_widget(
                RecordList::new(
                    &projection,
                    &state.list,
                    &state.store.criteria().search_query,
                    view_focused,
                    &state.theme,
                ),
                horiz[1],
            );
        }
    }

    let query_bar = QueryBar::new(
        &state.query,
        state.store.criteria(),
        state.focus == Focus::QueryBar,
        state.resolving,
        &state.theme,
    );
    let cursor = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);

    if let Some(ref detail) = state.detail {
        frame.render_widget(DetailPopup::new(detail, &state.theme), area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.keymap, &state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar && state.detail.is_none() {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
