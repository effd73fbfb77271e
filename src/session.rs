//! One viewing session: the loaded media, the loaded track and the carousel
//! state that follows the media's clock.

use crate::carousel::{CarouselEngine, Change, Renderer};
use crate::clock::Clock;
use crate::config::Config;
use crate::group::Track;
use crate::parser::Parser;
use crate::title::{media_label, TitleState};

use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// `video/*` is video; anything else is played as audio.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Audio
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekCommand {
    Forward,
    Backward,
    NextCaption,
    PreviousCaption,
}

#[derive(Debug)]
pub struct Session {
    media_kind: Option<MediaKind>,
    media_label: String,
    track_loaded: bool,
    playing: bool,
    engine: CarouselEngine,
    title: TitleState,
    seek_step: f64,
    label_max_chars: usize,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            media_kind: None,
            media_label: String::new(),
            track_loaded: false,
            playing: false,
            engine: CarouselEngine::new(Track::default()),
            title: TitleState::new(),
            seek_step: config.seek_step_secs,
            label_max_chars: config.label_max_chars,
        }
    }

    /// Registers the media being played. Metadata titles are only used for
    /// audio; video is always labelled by its file name.
    pub fn load_media(&mut self, kind: MediaKind, file_name: &str, metadata_title: Option<&str>) {
        let title = match kind {
            MediaKind::Audio => metadata_title,
            MediaKind::Video => None,
        };
        self.media_label = media_label(title, file_name, self.label_max_chars);
        self.media_kind = Some(kind);
        info!("Loaded {:?} media '{}'", kind, self.media_label);
    }

    /// Overrides the label chosen by `load_media`, for any media kind. A blank
    /// label keeps the current one.
    pub fn set_media_label(&mut self, label: &str) {
        let label = label.trim();
        if !label.is_empty() {
            self.media_label = label.chars().take(self.label_max_chars).collect();
        }
    }

    /// Parses `raw` and replaces the current track. Returns the number of
    /// captions found.
    pub fn load_track(&mut self, raw: &str) -> usize {
        let captions = Parser::new().parse(raw);
        let count = captions.len();
        self.engine.load(Track::new(captions));
        self.title.active_text.clear();
        self.track_loaded = true;
        debug!("Track replaced, {} captions", count);
        count
    }

    /// Both media and a track are loaded.
    pub fn is_ready(&self) -> bool {
        self.media_kind.is_some() && self.track_loaded
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media_kind
    }

    pub fn track_loaded(&self) -> bool {
        self.track_loaded
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    pub fn title(&self) -> &TitleState {
        &self.title
    }

    pub fn title_line(&self) -> String {
        self.title.render(&self.media_label)
    }

    pub fn play(&mut self) {
        self.playing = true;
        self.title.on_play_state_change(true);
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.title.on_play_state_change(false);
    }

    /// A frame tick. Ticks are ignored while paused.
    pub fn tick<C, R>(&mut self, clock: &C, renderer: &mut R) -> Change
    where
        C: Clock + ?Sized,
        R: Renderer + ?Sized,
    {
        if !self.playing {
            return Change::NoChange;
        }
        self.time_changed(clock.current_time(), renderer)
    }

    /// The media reported a new position, whether playing or not.
    pub fn time_changed<R: Renderer + ?Sized>(&mut self, time: f64, renderer: &mut R) -> Change {
        let change = self.engine.on_time_update(time);
        self.title.on_change(&change);
        change.apply_to(renderer);
        change
    }

    /// Sends the current window again, e.g. after the renderer was resized.
    pub fn redraw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if let Some(snapshot) = self.engine.snapshot() {
            renderer.window_changed(&snapshot);
        }
    }

    /// Where a seek command starting from `current` should land, or `None`
    /// when there is nowhere to go. Nothing moves until media is loaded.
    pub fn seek_target(&self, current: f64, command: SeekCommand) -> Option<f64> {
        self.media_kind?;
        let captions = self.engine.track().captions();
        let window = self.engine.window();

        match command {
            SeekCommand::Forward => Some((current + self.seek_step).max(0.0)),
            SeekCommand::Backward => Some((current - self.seek_step).max(0.0)),
            SeekCommand::NextCaption => window
                .slot(3)
                .map(|slot| slot.caption.start)
                .or_else(|| captions.iter().find(|c| c.start > current).map(|c| c.start)),
            SeekCommand::PreviousCaption => window
                .slot(1)
                .map(|slot| slot.caption.start)
                .or_else(|| {
                    captions
                        .iter()
                        .rev()
                        .find(|c| c.start < current)
                        .map(|c| c.start)
                }),
        }
    }
}
