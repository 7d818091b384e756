//! Ratatui widgets for the MOF Guide TUI.

pub mod category_tree;
pub mod command_bar;
pub mod detail;
pub mod help;
pub mod map_view;
pub mod query_bar;
pub mod record_list;
pub mod view_bar;
