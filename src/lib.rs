//! Subtitle carousel
//!
//! Parses a time-coded subtitle track and keeps a five-line carousel (two
//! previous lines, the active line, two upcoming lines) in step with a media
//! clock.
//!
//! # Modules
//!
//! - `parser` - subtitle track text to captions
//! - `group` - runs of identical captions, and the `Track` holding both
//! - `carousel` - the engine deciding which lines are visible
//! - `title` - play state and active text for a status line
//! - `session` - media, track and carousel for one viewing session

pub mod carousel;
pub mod clock;
pub mod config;
pub mod error;
pub mod fit;
pub mod group;
pub mod markup;
pub mod parser;
pub mod serialiser;
pub mod session;
pub mod srt;
pub mod terminal;
pub mod title;

pub use carousel::{CarouselEngine, CarouselWindow, Change, Renderer, Slot, WindowChange};
pub use clock::{Clock, MediaClock};
pub use config::Config;
pub use error::CarouselError;
pub use group::{build_groups, Group, Track};
pub use parser::Parser;
pub use session::{MediaKind, SeekCommand, Session};
pub use srt::Caption;
pub use title::TitleState;
