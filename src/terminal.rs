//! A plain terminal renderer for the carousel.

use crate::carousel::{Renderer, WindowChange, ACTIVE_SLOT, WINDOW_SIZE};
use crate::markup;
use crate::serialiser::format_ts;
use crate::srt::Caption;

use std::io::{self, Write};

use colored::Colorize;

/// Keeps the five visible lines and prints them on request.
pub struct TerminalRenderer {
    lines: [Option<Caption>; WINDOW_SIZE],
    width: usize,
}

impl TerminalRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            lines: Default::default(),
            width: width.max(8),
        }
    }

    /// Width from `$COLUMNS`, falling back to 80.
    pub fn from_env() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(80);
        Self::new(width)
    }

    pub fn draw<W: Write>(&self, out: &mut W, title: &str, position: f64) -> io::Result<()> {
        writeln!(out, "{}  {}", format_ts(position).dimmed(), title)?;
        for (slot, line) in self.lines.iter().enumerate() {
            let text = line.as_ref().map(|c| self.line_text(c)).unwrap_or_default();
            let styled = match slot {
                ACTIVE_SLOT => format!("> {}", text).bold(),
                1 | 3 => format!("  {}", text).normal(),
                _ => format!("  {}", text).dimmed(),
            };
            writeln!(out, "{}", styled)?;
        }
        writeln!(out)?;
        out.flush()
    }

    fn line_text(&self, caption: &Caption) -> String {
        let mut text = markup::strip(&caption.text).replace('\n', " ");
        if !caption.speaker.is_empty() {
            text = format!("[{}]: {}", caption.speaker, text);
        }
        let budget = self.width - 2;
        if text.chars().count() > budget {
            let mut cut: String = text.chars().take(budget - 1).collect();
            cut.push('…');
            cut
        } else {
            text
        }
    }

    #[cfg(test)]
    fn line(&self, position: usize) -> Option<String> {
        self.lines[position].as_ref().map(|c| self.line_text(c))
    }
}

impl Renderer for TerminalRenderer {
    fn window_changed(&mut self, change: &WindowChange) {
        for (line, slot) in self.lines.iter_mut().zip(change.window.slots()) {
            *line = slot.as_ref().map(|s| s.caption.clone());
        }
    }

    fn content_refreshed(&mut self, caption: &Caption) {
        self.lines[ACTIVE_SLOT] = Some(caption.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselWindow;
    use crate::group::build_groups;

    fn caption(speaker: &str, text: &str) -> Caption {
        Caption {
            start: 0.0,
            end: 1.0,
            speaker: speaker.to_string(),
            text: text.to_string(),
            plain_text: markup::strip(text),
        }
    }

    #[test]
    fn test_lines_follow_changes() {
        let groups = build_groups(&[caption("S01", "<i>Hello</i>\nthere")]);
        let mut renderer = TerminalRenderer::new(80);
        renderer.window_changed(&WindowChange {
            window: CarouselWindow::around(&groups, 0),
            is_group_transition: true,
        });
        assert_eq!(renderer.line(ACTIVE_SLOT).unwrap(), "[S01]: Hello there");
        assert!(renderer.line(3).is_none());

        renderer.content_refreshed(&caption("", "Bye"));
        assert_eq!(renderer.line(ACTIVE_SLOT).unwrap(), "Bye");
    }

    #[test]
    fn test_long_lines_are_cut() {
        let renderer = TerminalRenderer::new(10);
        assert_eq!(renderer.line_text(&caption("", "abcdefghijkl")), "abcdefg…");
        assert_eq!(renderer.line_text(&caption("", "abcdefgh")), "abcdefgh");
    }

    #[test]
    fn test_draw_writes_title_and_five_lines() {
        colored::control::set_override(false);
        let renderer = TerminalRenderer::new(40);
        let mut out = Vec::new();
        renderer.draw(&mut out, "⏸ | song | ", 1.5).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "00:00:01,500  ⏸ | song | ");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[3], "> ");
    }
}
