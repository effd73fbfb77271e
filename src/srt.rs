/// A single timed line of a subtitle track.
///
/// Times are fractional seconds from the start of the media.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub start: f64,
    pub end: f64,
    /// Normalised speaker tag such as `S02`, or empty.
    pub speaker: String,
    /// Display text, may still contain markup.
    pub text: String,
    /// `text` without markup, only used for comparisons.
    pub plain_text: String,
}

impl Caption {
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}
