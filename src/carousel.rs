//! The five-line carousel: which groups are visible around the one that is
//! currently playing, and when that changes.

use crate::group::{Group, Track};
use crate::srt::Caption;

use log::debug;

pub const WINDOW_SIZE: usize = 5;
pub const ACTIVE_SLOT: usize = 2;
const SLOTS_BEFORE: isize = ACTIVE_SLOT as isize;

/// One visible line: a group and the caption shown for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub group: usize,
    pub caption: Caption,
}

/// Slots 0 and 1 hold the previous groups, slot 2 the active group and
/// slots 3 and 4 the upcoming ones. A slot is empty past either end of the track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselWindow {
    slots: [Option<Slot>; WINDOW_SIZE],
}

impl CarouselWindow {
    /// The groups at `cursor - 2 ..= cursor + 2`, each shown by its first caption.
    pub fn around(groups: &[Group], cursor: isize) -> Self {
        let mut window = Self::default();
        for (position, slot) in window.slots.iter_mut().enumerate() {
            let index = cursor - SLOTS_BEFORE + position as isize;
            if index < 0 {
                continue;
            }
            *slot = groups.get(index as usize).map(|group| Slot {
                group: group.index,
                caption: group.first().clone(),
            });
        }
        window
    }

    /// Like [`CarouselWindow::around`], but a previous slot stays empty unless
    /// its group has finished by the time the active group starts. This keeps
    /// later lines out of the top of the carousel when resolution runs ahead of
    /// playback.
    pub fn for_transition(groups: &[Group], cursor: usize) -> Self {
        let mut window = Self::around(groups, cursor as isize);
        let active_start = match groups.get(cursor) {
            Some(group) => group.first().start,
            None => return window,
        };
        for slot in window.slots[..ACTIVE_SLOT].iter_mut() {
            let precedes = slot
                .as_ref()
                .map_or(false, |s| groups[s.group].last().end <= active_start);
            if !precedes {
                *slot = None;
            }
        }
        window
    }

    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Option<Slot>; WINDOW_SIZE] {
        &self.slots
    }

    pub fn active(&self) -> Option<&Slot> {
        self.slot(ACTIVE_SLOT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowChange {
    pub window: CarouselWindow,
    /// Set when the active group moved; the renderer rebuilds every line.
    pub is_group_transition: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Window(WindowChange),
    /// Same group, different caption: only the active line is redrawn.
    ContentRefresh(Caption),
    NoChange,
}

impl Change {
    pub fn apply_to<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        match self {
            Change::Window(change) => renderer.window_changed(change),
            Change::ContentRefresh(caption) => renderer.content_refreshed(caption),
            Change::NoChange => {}
        }
    }
}

/// Receives carousel updates and owns everything visual.
pub trait Renderer {
    fn window_changed(&mut self, change: &WindowChange);
    fn content_refreshed(&mut self, caption: &Caption);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cursor {
    Unset,
    /// Index of the active group.
    Tracking(usize),
}

/// Tracks the playback position against a track's groups.
#[derive(Debug)]
pub struct CarouselEngine {
    track: Track,
    cursor: Cursor,
    window: CarouselWindow,
}

impl CarouselEngine {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            cursor: Cursor::Unset,
            window: CarouselWindow::default(),
        }
    }

    /// Replaces the track. All state derived from the previous track is dropped.
    pub fn load(&mut self, track: Track) {
        self.track = track;
        self.cursor = Cursor::Unset;
        self.window = CarouselWindow::default();
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Index of the active group, `None` while unset.
    pub fn cursor(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Unset => None,
            Cursor::Tracking(group) => Some(group),
        }
    }

    /// The window as last reported to the renderer.
    pub fn window(&self) -> &CarouselWindow {
        &self.window
    }

    pub fn on_time_update(&mut self, time: f64) -> Change {
        let caption = match self.track.caption_at(time) {
            Some((_, caption)) => caption,
            None => return Change::NoChange,
        };
        let group = match self.track.resolve_group(caption) {
            Some(group) => group.index,
            None => return Change::NoChange,
        };

        match self.cursor {
            Cursor::Tracking(current) if current == group => {
                // Compared against what is on screen: a transition shows the
                // group's first member even when entered at a later one.
                let shown = self.window.slots[ACTIVE_SLOT].as_mut();
                match shown {
                    Some(active) if active.caption == *caption => Change::NoChange,
                    Some(active) => {
                        active.caption = caption.clone();
                        Change::ContentRefresh(caption.clone())
                    }
                    None => Change::NoChange,
                }
            }
            _ => {
                debug!("Carousel moved to group {} at {:.3}s", group, time);
                self.cursor = Cursor::Tracking(group);
                self.window = CarouselWindow::for_transition(self.track.groups(), group);
                Change::Window(WindowChange {
                    window: self.window.clone(),
                    is_group_transition: true,
                })
            }
        }
    }

    /// The current window for a full redraw, without a transition.
    pub fn snapshot(&self) -> Option<WindowChange> {
        match self.cursor {
            Cursor::Unset => None,
            Cursor::Tracking(_) => Some(WindowChange {
                window: self.window.clone(),
                is_group_transition: false,
            }),
        }
    }
}
