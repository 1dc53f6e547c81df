//! Spelling variants that show up in place names.

use once_cell::sync::Lazy;
use regex::Regex;

use super::fragment::Fragment;
use super::kanji::kanji_forms;

#[derive(Debug, Clone, Copy)]
pub enum Variant {
    /// Interchangeable spellings of a whole word, emitted as `(a|b|...)`.
    Words(&'static [&'static str]),
    /// Interchangeable single characters, emitted as `[...]`.
    Chars(&'static str),
}

/// Applied top to bottom. Longer words come first so a character class
/// never splits a word that has to stay whole.
pub const IDIOMATIC_VARIANTS: &[Variant] = &[
    Variant::Words(&["三栄町", "四谷三栄町"]),
    Variant::Words(&["通り", "とおり"]),
    Variant::Words(&["埠頭", "ふ頭"]),
    Variant::Words(&["鬮野川", "くじ野川", "くじの川"]),
    Variant::Chars("之ノの"),
    Variant::Chars("ヶケが"),
    Variant::Chars("ヵカか力"),
    Variant::Chars("ッツっつ"),
    Variant::Chars("ニ二"),
    Variant::Chars("ハ八"),
    Variant::Words(&["大冝", "大宜"]),
    Variant::Words(&["穝", "さい"]),
    Variant::Words(&["杁", "えぶり"]),
    Variant::Words(&["薭", "稗", "ひえ", "ヒエ"]),
    Variant::Words(&["釜", "竈"]),
    Variant::Words(&["條", "条"]),
    Variant::Words(&["狛", "拍"]),
    Variant::Words(&["藪", "薮"]),
    Variant::Words(&["渕", "淵"]),
    Variant::Words(&["エ", "ヱ", "え"]),
    Variant::Words(&["曾", "曽"]),
];

impl Variant {
    /// The listed words followed by any further kanji forms of them, so a
    /// word claimed here still accepts every spelling the kanji table knows.
    fn spellings(words: &[&'static str]) -> Vec<&'static str> {
        let mut spellings: Vec<&'static str> = Vec::with_capacity(words.len());
        for &word in words {
            let forms = kanji_forms(word).unwrap_or(&[]);
            for form in std::iter::once(word).chain(forms.iter().copied()) {
                if !spellings.contains(&form) {
                    spellings.push(form);
                }
            }
        }
        spellings
    }

    fn matcher_source(self) -> String {
        match self {
            Self::Words(words) => Self::spellings(words)
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|"),
            Self::Chars(chars) => format!("[{chars}]"),
        }
    }

    fn group(self) -> String {
        match self {
            Self::Words(words) => format!("({})", Self::spellings(words).join("|")),
            Self::Chars(chars) => format!("[{chars}]"),
        }
    }
}

struct IdiomRule {
    matcher: Regex,
    group: String,
}

static IDIOM_RULES: Lazy<Vec<IdiomRule>> = Lazy::new(|| {
    IDIOMATIC_VARIANTS
        .iter()
        .filter_map(|&variant| {
            let matcher = Regex::new(&variant.matcher_source()).ok()?;
            Some(IdiomRule {
                matcher,
                group: variant.group(),
            })
        })
        .collect()
});

pub fn expand_idiomatic_variants(fragment: &mut Fragment) {
    for rule in IDIOM_RULES.iter() {
        fragment.replace_all_with(&rule.matcher, &rule.group);
    }
}
