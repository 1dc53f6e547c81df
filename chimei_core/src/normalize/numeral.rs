//! Town-name specific steps: optional ōaza/aza markers and chōme-style
//! numbering.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::fragment::Fragment;

/// Counter words and separators accepted after a numeral. Folds the
/// variants the later steps would otherwise produce for `条` and `の`.
pub const COUNTER_PATTERN: &str =
    "((丁|町)目?|番(町|丁)|(條|条)|軒|線|[之ノの]町?|地割|[-－﹣−‐⁃‑‒–—﹘―⎯⏤ーｰ─━])";

const OAZA_PATTERN: &str = "(大?字)?";

static OAZA: Lazy<Option<Regex>> = Lazy::new(|| Regex::new("大?字").ok());

static NUMERAL_TOKEN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new("([壱一二三四五六七八九十]+)(丁目?|番[町丁]|条|軒|線|[のノ]町|地割)").ok()
});

/// Convert a kanji numeral (一 to 九, 十, 壱) to its value.
#[must_use]
pub fn kanji_to_number(kanji: &str) -> Option<u32> {
    if kanji.is_empty() {
        return None;
    }
    let mut total = 0;
    let mut current: Option<u32> = None;
    for c in kanji.chars() {
        if c == '十' {
            total += current.unwrap_or(1) * 10;
            current = None;
        } else {
            let digit = kanji_digit(c)?;
            current = Some(current.map_or(digit, |value| value * 10 + digit));
        }
    }
    Some(total + current.unwrap_or(0))
}

const fn kanji_digit(c: char) -> Option<u32> {
    match c {
        '壱' | '一' => Some(1),
        '二' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        '七' => Some(7),
        '八' => Some(8),
        '九' => Some(9),
        _ => None,
    }
}

/// `12` -> `１２`
#[must_use]
pub fn to_full_width(digits: &str) -> String {
    digits
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                char::from_u32(u32::from(c) + 0xFEE0).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// `大字` and `字` may be left out of an address.
pub fn make_oaza_optional(fragment: &mut Fragment) {
    if let Some(re) = OAZA.as_ref() {
        fragment.replace_all_with(re, OAZA_PATTERN);
    }
}

/// Rewrite every `<kanji numeral><counter>` token into a group that also
/// accepts Arabic numerals and separator characters.
pub fn normalize_numeral_tokens(fragment: &mut Fragment) {
    if let Some(re) = NUMERAL_TOKEN.as_ref() {
        fragment.replace_all(re, numeral_token_pattern);
    }
}

fn numeral_token_pattern(caps: &Captures<'_>) -> String {
    let kanji = caps.get(1).map_or("", |m| m.as_str());
    let mut alternatives = vec![super::to_name_pattern(kanji)];

    if kanji == "壱" {
        alternatives.extend(["一", "1", "１"].map(String::from));
    } else if let Some(number) = kanji_to_number(kanji) {
        let digits = number.to_string();
        let full_width = to_full_width(&digits);
        alternatives.push(digits);
        alternatives.push(full_width);
    }

    format!("({}){COUNTER_PATTERN}", alternatives.join("|"))
}
