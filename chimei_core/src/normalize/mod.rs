//! Name normalization.
//!
//! A name becomes a regex fragment by running a fixed sequence of
//! [`Step`]s over a [`Fragment`]. The order matters: each step only sees
//! text that earlier steps left as plain text.

mod fragment;
mod idiom;
mod kanji;
mod numeral;

pub use fragment::Fragment;
pub use idiom::{IDIOMATIC_VARIANTS, Variant, expand_idiomatic_variants};
pub use kanji::{JIS_KANJI_PAIRS, expand_kanji_variants, kanji_forms};
pub use numeral::{
    COUNTER_PATTERN, kanji_to_number, make_oaza_optional, normalize_numeral_tokens, to_full_width,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `大字`/`字` become optional.
    OptionalOaza,
    /// `<kanji numeral><counter>` tokens accept Arabic numerals and separators.
    NumeralTokens,
    /// Known spelling variants and kana/kanji lookalikes.
    IdiomaticVariants,
    /// JIS old/new kanji forms.
    KanjiVariants,
}

impl Step {
    pub fn apply(self, fragment: &mut Fragment) {
        match self {
            Self::OptionalOaza => make_oaza_optional(fragment),
            Self::NumeralTokens => normalize_numeral_tokens(fragment),
            Self::IdiomaticVariants => expand_idiomatic_variants(fragment),
            Self::KanjiVariants => expand_kanji_variants(fragment),
        }
    }
}

/// Steps for city names and other plain names.
pub const NAME_PIPELINE: &[Step] = &[Step::IdiomaticVariants, Step::KanjiVariants];

/// Steps for town names.
pub const TOWN_PIPELINE: &[Step] = &[
    Step::OptionalOaza,
    Step::NumeralTokens,
    Step::IdiomaticVariants,
    Step::KanjiVariants,
];

#[must_use]
pub fn run_pipeline(name: &str, steps: &[Step]) -> Fragment {
    let mut fragment = Fragment::new(name);
    for step in steps {
        step.apply(&mut fragment);
    }
    fragment
}

#[must_use]
pub fn to_name_pattern(name: &str) -> String {
    run_pipeline(name, NAME_PIPELINE).render()
}

#[must_use]
pub fn to_town_pattern(town: &str) -> String {
    run_pipeline(town, TOWN_PIPELINE).render()
}
