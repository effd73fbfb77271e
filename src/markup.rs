//! Reduction of caption markup to the text a viewer would actually see.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z/!][^>]*>").expect("tag pattern is valid"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|[A-Za-z]+);").expect("entity pattern is valid")
});

/// Strips tags such as `<i>` or `<font color="red">` and decodes entity
/// references. A `<` that does not open a tag is kept as text.
pub fn strip(text: &str) -> String {
    let untagged = TAG.replace_all(text, "");
    ENTITY
        .replace_all(&untagged, |caps: &Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse().ok(),
        };
        // NUL, surrogates and anything past U+10FFFF become the replacement
        // character.
        let c = code
            .filter(|&code| code != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}');
        return Some(c.to_string());
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some(c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_strip {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;
                assert_eq!(strip(input), expected);
            }
        )*
        }
    }

    test_strip! {
        test_strip_plain: ("Hello", "Hello"),
        test_strip_italic: ("<i>Hello</i>", "Hello"),
        test_strip_attributes: ("<font color=\"#ff0000\">Red</font> alert", "Red alert"),
        test_strip_nested: ("<b><i>deep</i></b>", "deep"),
        test_strip_multiline: ("<i>one</i>\ntwo", "one\ntwo"),
        test_strip_amp: ("Tom &amp; Jerry", "Tom & Jerry"),
        test_strip_lt_gt: ("&lt;i&gt; is a tag", "<i> is a tag"),
        test_strip_numeric: ("caf&#233;", "café"),
        test_strip_hex: ("&#x263A;", "☺"),
        test_strip_unknown_entity: ("&bogus; stays", "&bogus; stays"),
        test_strip_lone_angle: ("1 < 2", "1 < 2"),
        test_strip_nbsp: ("a&nbsp;b", "a\u{a0}b"),
        test_strip_null: ("a&#0;b", "a\u{FFFD}b"),
        test_strip_surrogate: ("&#xD800;", "\u{FFFD}"),
        test_strip_out_of_range: ("&#x110000;", "\u{FFFD}"),
        test_strip_too_many_digits: ("&#99999999999;", "\u{FFFD}"),
    }

    #[test]
    fn test_decoded_entity_is_not_treated_as_tag() {
        assert_eq!(strip("&lt;b&gt;bold&lt;/b&gt;"), "<b>bold</b>");
    }
}
