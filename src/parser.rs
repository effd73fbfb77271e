use crate::error::CarouselError;
use crate::markup;
use crate::srt::Caption;

use log::{debug, warn};
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{digit1, space0};
use nom::combinator::{all_consuming, map_res};
use nom::error::{ErrorKind, VerboseError};
use nom::sequence::{delimited, separated_pair};
use nom::{error_position, IResult};
use once_cell::sync::Lazy;
use regex::Regex;

static SPEAKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\[SPEAKER_(\d+)\]:\s*(.*)").expect("speaker pattern is valid")
});

/// Turns subtitle track text into captions, in the order the blocks appear.
///
/// Parsing never fails as a whole: a block that cannot be understood is
/// logged and skipped, and the blocks around it are still returned.
pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    pub fn parse(&mut self, input: &str) -> Vec<Caption> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let normalised = input.replace('\r', "");

        let mut captions = Vec::new();
        for (number, block) in blocks(&normalised).enumerate() {
            match caption(&block) {
                Ok(caption) => captions.push(caption),
                Err(err) => warn!("Skipping subtitle block {}: {}", number + 1, err),
            }
        }
        debug!("Parsed {} captions", captions.len());
        captions
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits the input into runs of non-empty lines.
fn blocks(input: &str) -> impl Iterator<Item = Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in input.split('\n') {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks.into_iter()
}

fn caption(lines: &[&str]) -> Result<Caption, CarouselError> {
    if lines.len() < 3 {
        return Err(CarouselError::MalformedBlock(format!(
            "expected at least 3 lines, found {}",
            lines.len()
        )));
    }

    let (start, end) = match time_line(lines[1]) {
        Ok((_, times)) => times,
        Err(_) => return Err(CarouselError::MalformedTimestamp(lines[1].to_string())),
    };
    if end < start {
        return Err(CarouselError::MalformedBlock(format!(
            "caption ends before it starts: '{}'",
            lines[1]
        )));
    }

    let payload = lines[2..].join("\n");
    let (speaker, text) = split_speaker(&payload);
    let plain_text = markup::strip(&text);

    Ok(Caption {
        start,
        end,
        speaker,
        text,
        plain_text,
    })
}

/// Separates a leading `[SPEAKER_<digits>]:` marker from the payload. The
/// text kept is the remainder of the marker's line.
fn split_speaker(payload: &str) -> (String, String) {
    match SPEAKER.captures(payload) {
        Some(caps) => (format!("S{}", &caps[1]), caps[2].trim().to_string()),
        None => (String::new(), payload.to_string()),
    }
}

fn time_line(input: &str) -> IResult<&str, (f64, f64), VerboseError<&str>> {
    all_consuming(delimited(
        space0,
        separated_pair(timestamp, delimited(space0, tag("-->"), space0), timestamp),
        space0,
    ))(input)
}

fn timestamp(input: &str) -> IResult<&str, f64, VerboseError<&str>> {
    let number = |s: &str| s.parse::<u64>();
    let take_ms = || map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), number);

    let (input, hours) = map_res(digit1, number)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = take_ms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = take_ms()(input)?;
    let (input, _) = tag(",")(input)?;
    // The millisecond field is read as a plain number, so `,5` is 5ms.
    let (input, millis) =
        map_res(take_while_m_n(1, 3, |c: char| c.is_ascii_digit()), number)(input)?;

    let whole = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds));
    match whole {
        Some(whole) => Ok((input, whole as f64 + millis as f64 / 1000.0)),
        None => Err(nom::Err::Error(error_position!(input, ErrorKind::TooLarge))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_read_ts {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                let (_, seconds) = timestamp(input).unwrap();

                assert_eq!(seconds, expected);
            }
        )*
        }
    }

    test_read_ts! {
        test_read_ts_0: ("00:00:01,200", 1.2),
        test_read_ts_1: ("00:00:01,500", 1.5),
        test_read_ts_2: ("00:00:01,002", 1.002),
        test_read_ts_3: ("00:00:03,250", 3.25),
        test_read_ts_4: ("1:1:1,200", 3661.2),
        test_read_ts_5: ("01:01:01,200", 3661.2),
        test_read_ts_6: ("100:00:00,000", 360_000.0),
        test_read_ts_7: ("00:00:00,5", 0.005),
    }

    macro_rules! test_bad_ts {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                assert!(time_line($value).is_err());
            }
        )*
        }
    }

    test_bad_ts! {
        test_bad_ts_letters: "00:0a:01,000 --> 00:00:02,000",
        test_bad_ts_missing_arrow: "00:00:01,000 00:00:02,000",
        test_bad_ts_dot_millis: "00:00:01.000 --> 00:00:02.000",
        test_bad_ts_missing_end: "00:00:01,000 -->",
        test_bad_ts_trailing_garbage: "00:00:01,000 --> 00:00:02,000 x",
        test_bad_ts_empty: "",
        test_bad_ts_hours_overflow: "18446744073709551:00:00,000 --> 18446744073709551:00:01,000",
        test_bad_ts_hours_too_long: "99999999999999999999:00:00,000 --> 00:00:01,000",
    }

    fn parse(input: &str) -> Vec<Caption> {
        Parser::new().parse(input)
    }

    #[test]
    fn test_single_block() {
        let subs = parse("1\n00:00:01,500 --> 00:00:03,250\nHello");
        assert_eq!(
            subs,
            vec![Caption {
                start: 1.5,
                end: 3.25,
                speaker: String::new(),
                text: "Hello".to_string(),
                plain_text: "Hello".to_string(),
            }]
        );
    }

    #[test]
    fn test_speaker_tag() {
        let subs = parse("1\n00:00:00,000 --> 00:00:01,000\n[SPEAKER_02]: Hi there");
        assert_eq!(subs[0].speaker, "S02");
        assert_eq!(subs[0].text, "Hi there");
    }

    #[test]
    fn test_speaker_tag_keeps_only_its_line() {
        let subs = parse("1\n00:00:00,000 --> 00:00:01,000\n[SPEAKER_1]:  first  \nsecond");
        assert_eq!(subs[0].speaker, "S1");
        assert_eq!(subs[0].text, "first");
        assert_eq!(subs[0].plain_text, "first");
    }

    #[test]
    fn test_speaker_tag_must_lead() {
        let subs = parse("1\n00:00:00,000 --> 00:00:01,000\nsaid [SPEAKER_02]: Hi");
        assert_eq!(subs[0].speaker, "");
        assert_eq!(subs[0].text, "said [SPEAKER_02]: Hi");
    }

    #[test]
    fn test_multiline_text_and_markup() {
        let subs = parse("7\n00:00:00,000 --> 00:00:01,000\n<i>Line one</i>\nline &amp; two");
        assert_eq!(subs[0].text, "<i>Line one</i>\nline &amp; two");
        assert_eq!(subs[0].plain_text, "Line one\nline & two");
    }

    #[test]
    fn test_short_block_is_skipped() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\nFirst\n\n\
                     2\n00:00:01,000 --> 00:00:02,000\n\n\
                     3\n00:00:02,000 --> 00:00:03,000\nThird";
        let subs = parse(input);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].text, "First");
        assert_eq!(subs[1].text, "Third");
    }

    #[test]
    fn test_bad_timestamp_block_is_skipped() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\nFirst\n\n\
                     2\nxx:00:01,000 --> 00:00:02,000\nBroken\n\n\
                     3\n00:00:02,000 --> 00:00:01,000\nBackwards\n\n\
                     4\n00:00:02,000 --> 00:00:03,000\nFourth";
        let subs = parse(input);
        let texts: Vec<&str> = subs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Fourth"]);
    }

    #[test]
    fn test_overflowing_hours_only_drop_their_block() {
        let input = "1\n18446744073709551:00:00,000 --> 18446744073709551:00:01,000\nBad\n\n\
                     2\n00:00:01,000 --> 00:00:02,000\nGood\n";
        let subs = parse(input);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].text, "Good");
        assert_eq!(subs[0].start, 1.0);
    }

    #[test]
    fn test_crlf_bom_and_extra_blank_lines() {
        let input = "\u{FEFF}1\r\n00:00:00,000 --> 00:00:01,000\r\nOne\r\n\r\n\r\n\
                     2\r\n00:00:01,000 --> 00:00:02,000\r\nTwo\r\n";
        let subs = parse(input);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].text, "Two");
        assert_eq!(subs[1].start, 1.0);
    }

    #[test]
    fn test_order_is_not_sorted() {
        let input = "1\n00:00:05,000 --> 00:00:06,000\nLate\n\n\
                     2\n00:00:01,000 --> 00:00:02,000\nEarly";
        let subs = parse(input);
        assert_eq!(subs[0].text, "Late");
        assert_eq!(subs[1].text, "Early");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("  \n\n\t\n").is_empty());
    }

    #[test]
    fn test_malformed_errors() {
        assert_eq!(
            caption(&["1", "00:00:01 --> 00:00:02", "x"]),
            Err(CarouselError::MalformedTimestamp(
                "00:00:01 --> 00:00:02".to_string()
            ))
        );
        assert!(matches!(
            caption(&["1", "00:00:01,000 --> 00:00:02,000"]),
            Err(CarouselError::MalformedBlock(_))
        ));
    }
}
