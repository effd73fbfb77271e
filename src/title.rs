//! The short status line shown in place of a window title.

use crate::carousel::{Change, WindowChange};

pub const PLAYING: &str = "▶";
pub const PAUSED: &str = "⏸";

/// Play state and active caption text, derived from carousel changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleState {
    pub play_state: bool,
    pub active_text: String,
}

impl TitleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_window_change(&mut self, change: &WindowChange) {
        if let Some(active) = change.window.active() {
            self.active_text = active.caption.plain_text.clone();
        }
    }

    pub fn on_play_state_change(&mut self, playing: bool) {
        self.play_state = playing;
    }

    pub fn on_change(&mut self, change: &Change) {
        match change {
            Change::Window(window) => self.on_window_change(window),
            Change::ContentRefresh(caption) => self.active_text = caption.plain_text.clone(),
            Change::NoChange => {}
        }
    }

    pub fn render(&self, media_label: &str) -> String {
        let icon = if self.play_state { PLAYING } else { PAUSED };
        format!("{} | {} | {}", icon, media_label, self.active_text)
    }
}

/// Picks the label shown for the media: its metadata title when there is
/// one, otherwise the file name up to the first dot. At most `max_chars`
/// characters are kept.
pub fn media_label(metadata_title: Option<&str>, file_name: &str, max_chars: usize) -> String {
    let label = match metadata_title.map(str::trim) {
        Some(title) if !title.is_empty() => title,
        _ => file_name.split('.').next().unwrap_or_default(),
    };
    label.chars().take(max_chars).collect()
}
