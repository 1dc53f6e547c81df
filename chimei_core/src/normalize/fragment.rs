//! Pattern text under construction.
//!
//! A fragment keeps the parts of a name that are still plain text apart
//! from the regex syntax already emitted for other parts. Substitutions
//! only ever look at plain text, so a later step cannot rewrite a
//! character that sits inside a group an earlier step produced.

use regex::{Captures, Regex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// Raw name text, escaped when rendered.
    Literal(String),
    /// Emitted regex syntax, rendered verbatim.
    Pattern(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pieces: Vec<Piece>,
}

impl Fragment {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut fragment = Self::default();
        fragment.push_literal(text);
        fragment
    }

    fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Piece::Literal(last)) = self.pieces.last_mut() {
            last.push_str(text);
        } else {
            self.pieces.push(Piece::Literal(text.to_string()));
        }
    }

    fn push_pattern(&mut self, pattern: String) {
        if !pattern.is_empty() {
            self.pieces.push(Piece::Pattern(pattern));
        }
    }

    /// Replace every match of `re` in the literal text with the regex
    /// syntax returned by `replacement`, scanning left to right.
    pub fn replace_all<F>(&mut self, re: &Regex, mut replacement: F)
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        let pieces = std::mem::take(&mut self.pieces);
        for piece in pieces {
            match piece {
                Piece::Literal(text) => {
                    let mut last = 0;
                    for caps in re.captures_iter(&text) {
                        let Some(m) = caps.get(0) else { continue };
                        if m.is_empty() {
                            continue;
                        }
                        self.push_literal(&text[last..m.start()]);
                        self.push_pattern(replacement(&caps));
                        last = m.end();
                    }
                    self.push_literal(&text[last..]);
                }
                pattern @ Piece::Pattern(_) => self.pieces.push(pattern),
            }
        }
    }

    /// Replace every match of `re` with a fixed piece of regex syntax.
    pub fn replace_all_with(&mut self, re: &Regex, replacement: &str) {
        self.replace_all(re, |_| replacement.to_string());
    }

    /// Make everything up to and including the first literal `marker`
    /// optional. The marker only counts when something precedes it.
    /// Returns whether a marker was found.
    pub fn make_optional_through(&mut self, marker: char) -> bool {
        let mut split = None;
        for (index, piece) in self.pieces.iter().enumerate() {
            let Piece::Literal(text) = piece else { continue };
            if let Some((offset, _)) = text
                .char_indices()
                .find(|&(offset, c)| c == marker && (offset > 0 || index > 0))
            {
                split = Some((index, offset + marker.len_utf8()));
                break;
            }
        }
        let Some((index, cut)) = split else {
            return false;
        };

        let mut tail = self.pieces.split_off(index);
        let Piece::Literal(text) = tail.remove(0) else {
            return false;
        };
        let mut head = Self {
            pieces: std::mem::take(&mut self.pieces),
        };
        head.push_literal(&text[..cut]);

        self.push_pattern(format!("({})?", head.render()));
        self.push_literal(&text[cut..]);
        for piece in tail {
            match piece {
                Piece::Literal(text) => self.push_literal(&text),
                Piece::Pattern(pattern) => self.push_pattern(pattern),
            }
        }
        true
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => regex::escape(text),
                Piece::Pattern(pattern) => pattern.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        let Ok(re) = Regex::new(pattern) else {
            panic!("bad test regex: {pattern}");
        };
        re
    }

    #[test]
    fn replaced_text_is_not_rescanned() {
        let mut fragment = Fragment::new("条町");
        fragment.replace_all_with(&re("条"), "(條|条)");
        fragment.replace_all_with(&re("條|条"), "(X)");
        assert_eq!(fragment.render(), "(條|条)町");
    }

    #[test]
    fn literal_text_is_escaped() {
        let fragment = Fragment::new("a.b(c)");
        assert_eq!(fragment.render(), r"a\.b\(c\)");
    }

    #[test]
    fn optional_prefix_through_marker() {
        let mut fragment = Fragment::new("西多摩郡瑞穂町");
        assert!(fragment.make_optional_through('郡'));
        assert_eq!(fragment.render(), "(西多摩郡)?瑞穂町");
    }

    #[test]
    fn optional_prefix_spans_earlier_patterns() {
        let mut fragment = Fragment::new("余市郡仁木町");
        fragment.replace_all_with(&re("余"), "(餘|余)");
        assert!(fragment.make_optional_through('郡'));
        assert_eq!(fragment.render(), "((餘|余)市郡)?仁木町");
    }

    #[test]
    fn leading_marker_alone_is_not_a_prefix() {
        let mut fragment = Fragment::new("郡上市");
        assert!(!fragment.make_optional_through('郡'));
        assert_eq!(fragment.render(), "郡上市");
    }
}
