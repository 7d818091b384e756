//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types. The
//! bindings marked * below are defaults and can be changed through [`Keymap`].
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab` *                 | `FocusNext`                |
//! | `/` *                   | `QueryFocus`               |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `v` *                   | `ToggleView`               |
//! | `L` *                   | `Geolocate`                |
//! | `r` *                   | `ResetFilters`             |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead. In insert mode:
//! - hjkl, q, v, L, r produce `Char` events
//! - Arrow keys still produce `Nav` for cursor movement
//! - Only `Ctrl+c`, `Escape`, `Enter`, `Tab`, and `Backspace` keep their
//!   special bindings

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use mof_core::config::KeybindingsConfig;

/// Cardinal direction for tree, list, and map-marker navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
///
/// Widgets receive `AppEvent` values: they never inspect crossterm types
/// directly. The App shell routes events to the focused widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    /// Transfer focus to the query bar.
    QueryFocus,
    /// Scroll the list up one page.
    ScrollUp,
    /// Scroll the list down one page.
    ScrollDown,
    /// Switch between the map and the list.
    ToggleView,
    /// Ask the geolocation provider for the user's position.
    Geolocate,
    /// Clear every filter.
    ResetFilters,
    /// Navigate within the focused pane.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm the active input, toggle a category, or open a detail view.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (detail popup, help popup, query bar focus).
    Escape,
}

/// User-configurable single-key bindings, from the `[keybindings]` section.
///
/// Each binding is either a single character or one of the names `Tab`,
/// `Enter`, `Esc`. Unparsable entries keep their default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    pub toggle_focus: KeyCode,
    pub query_focus: KeyCode,
    pub toggle_view: KeyCode,
    pub geolocate: KeyCode,
    pub reset_filters: KeyCode,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            toggle_focus: KeyCode::Tab,
            query_focus: KeyCode::Char('/'),
            toggle_view: KeyCode::Char('v'),
            geolocate: KeyCode::Char('L'),
            reset_filters: KeyCode::Char('r'),
        }
    }
}

impl Keymap {
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let d = Self::default();
        Self {
            toggle_focus: parse_key(&cfg.toggle_focus).unwrap_or(d.toggle_focus),
            query_focus: parse_key(&cfg.query_focus).unwrap_or(d.query_focus),
            toggle_view: parse_key(&cfg.toggle_view).unwrap_or(d.toggle_view),
            geolocate: parse_key(&cfg.geolocate).unwrap_or(d.geolocate),
            reset_filters: parse_key(&cfg.reset_filters).unwrap_or(d.reset_filters),
        }
    }

    /// How `code` is written in the help popup.
    pub fn label(code: KeyCode) -> String {
        match code {
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Char(c) => c.to_string(),
            other => format!("{other:?}"),
        }
    }

    /// The action bound to `key`, if any.
    fn action(&self, key: &KeyEvent) -> Option<AppEvent> {
        // Uppercase bindings: SHIFT may or may not be reported
        let plain = key.modifiers == KeyModifiers::NONE
            || (key.modifiers == KeyModifiers::SHIFT
                && matches!(key.code, KeyCode::Char(c) if c.is_uppercase() || !c.is_alphabetic()));
        if !plain {
            return None;
        }
        [
            (self.toggle_focus, AppEvent::FocusNext),
            (self.query_focus, AppEvent::QueryFocus),
            (self.toggle_view, AppEvent::ToggleView),
            (self.geolocate, AppEvent::Geolocate),
            (self.reset_filters, AppEvent::ResetFilters),
        ]
        .into_iter()
        .find(|(code, _)| *code == key.code)
        .map(|(_, ev)| ev)
    }
}

fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Tab" | "tab" => Some(KeyCode::Tab),
        "Enter" | "enter" => Some(KeyCode::Enter),
        "Esc" | "esc" => Some(KeyCode::Esc),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(keymap: &Keymap, event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => keymap.action(&key).or_else(|| map_key(key)),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
///
/// Letters that are shortcuts in normal mode are forwarded as
/// [`AppEvent::Char`] so the user can type freely. Arrow keys still produce
/// [`AppEvent::Nav`] so `←`/`→` move the text cursor.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Quit: q (normal mode) or Ctrl+c anywhere
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => {
            Some(AppEvent::Nav(Direction::Right))
        }

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        // Tab exits the text input (focus-cycle behaviour)
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
