//! Exact-match scanner over the static lexicon.

use std::sync::Arc;

use crate::annotation::Annotation;
use crate::lexicon::Lexicon;

/// Default confidence assigned to exact lexicon matches
pub const DEFAULT_MATCH_CONFIDENCE: f64 = 0.99;

/// Scans input text for literal occurrences of lexicon words
pub struct LexiconScanner {
    lexicon: Arc<Lexicon>,
    confidence: f64,
}

impl LexiconScanner {
    pub fn new(lexicon: Arc<Lexicon>, confidence: f64) -> Self {
        Self { lexicon, confidence }
    }

    /// Find every occurrence of every lexicon word in `text`.
    ///
    /// Offsets are character (code point) positions. For a given word,
    /// matches do not overlap: each search resumes at the previous match's
    /// end. Matches of different words are found independently and may
    /// overlap each other; no conflict resolution is applied.
    pub fn scan(&self, text: &str) -> Vec<Annotation> {
        let chars: Vec<char> = text.chars().collect();
        let mut items = Vec::new();

        for entry in self.lexicon.entries() {
            let word: Vec<char> = entry.word.chars().collect();
            if word.is_empty() || word.len() > chars.len() {
                continue;
            }

            let mut i = 0;
            while i + word.len() <= chars.len() {
                if chars[i..i + word.len()] == word[..] {
                    items.push(Annotation {
                        kind: entry.kind,
                        start: i,
                        end: i + word.len(),
                        span: entry.word.clone(),
                        suggestion: entry.suggestion.clone(),
                        note: entry.note.clone(),
                        confidence: self.confidence,
                    });
                    i += word.len();
                } else {
                    i += 1;
                }
            }
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Kind;
    use pretty_assertions::assert_eq;

    fn setup_scanner() -> LexiconScanner {
        LexiconScanner::new(Arc::new(Lexicon::builtin()), DEFAULT_MATCH_CONFIDENCE)
    }

    #[test]
    fn test_single_match_with_offsets() {
        let scanner = setup_scanner();
        let items = scanner.scan("오뎅 국물이 시원하다");

        assert_eq!(items.len(), 1);
        let ann = &items[0];
        assert_eq!(ann.kind, Kind::Loanword);
        assert_eq!(ann.start, 0);
        assert_eq!(ann.end, 2);
        assert_eq!(ann.span, "오뎅");
        assert_eq!(ann.suggestion, "어묵");
        assert_eq!(ann.confidence, 0.99);
    }

    #[test]
    fn test_repeated_word_non_overlapping() {
        let scanner = setup_scanner();
        let items = scanner.scan("오뎅 오뎅");

        assert_eq!(items.len(), 2);
        assert_eq!((items[0].start, items[0].end), (0, 2));
        assert_eq!((items[1].start, items[1].end), (3, 5));
    }

    #[test]
    fn test_no_match() {
        let scanner = setup_scanner();
        assert!(scanner.scan("오늘 날씨가 좋다").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let scanner = setup_scanner();
        assert!(scanner.scan("").is_empty());
    }

    #[test]
    fn test_offsets_are_character_based() {
        let scanner = setup_scanner();
        // Hangul syllables are multi-byte in UTF-8; offsets must count
        // code points, not bytes
        let text = "점심은 우동이다";
        let items = scanner.scan(text);

        assert_eq!(items.len(), 1);
        let ann = &items[0];
        let span: String = text
            .chars()
            .skip(ann.start)
            .take(ann.end - ann.start)
            .collect();
        assert_eq!(span, ann.span);
        assert_eq!(ann.start, 4);
    }

    #[test]
    fn test_overlapping_different_words_both_reported() {
        use crate::lexicon::LexiconEntry;

        // "다마" and "다마네기" overlap inside "다마네기"
        let lexicon = Lexicon::new(vec![
            LexiconEntry {
                word: "다마".to_string(),
                kind: Kind::Loanword,
                suggestion: String::new(),
                note: String::new(),
            },
            LexiconEntry {
                word: "다마네기".to_string(),
                kind: Kind::Loanword,
                suggestion: "양파".to_string(),
                note: String::new(),
            },
        ])
        .unwrap();
        let scanner = LexiconScanner::new(Arc::new(lexicon), 0.99);

        let items = scanner.scan("다마네기");
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|a| a.span == "다마"));
        assert!(items.iter().any(|a| a.span == "다마네기"));
    }

    #[test]
    fn test_exhaustive_matching_count() {
        let scanner = setup_scanner();
        let text = "우동 먹고 우동 먹고 또 우동";
        let items: Vec<_> = scanner
            .scan(text)
            .into_iter()
            .filter(|a| a.span == "우동")
            .collect();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_every_annotation_span_matches_text() {
        let scanner = setup_scanner();
        let text = "노가다 현장에서 함바 밥을 먹고 시마이했다";
        let chars: Vec<char> = text.chars().collect();

        let items = scanner.scan(text);
        assert!(!items.is_empty());
        for ann in &items {
            assert!(ann.end <= chars.len());
            let span: String = chars[ann.start..ann.end].iter().collect();
            assert_eq!(span, ann.span);
        }
    }

    #[test]
    fn test_configured_confidence_propagates() {
        let scanner = LexiconScanner::new(Arc::new(Lexicon::builtin()), 0.8);
        let items = scanner.scan("오뎅");
        assert_eq!(items[0].confidence, 0.8);
    }

    #[test]
    fn test_empty_suggestion_and_note_stay_empty_strings() {
        use crate::lexicon::LexiconEntry;

        let lexicon = Lexicon::new(vec![LexiconEntry {
            word: "가오".to_string(),
            kind: Kind::Loanword,
            suggestion: String::new(),
            note: String::new(),
        }])
        .unwrap();
        let scanner = LexiconScanner::new(Arc::new(lexicon), 0.99);

        let items = scanner.scan("가오 잡는다");
        assert_eq!(items[0].suggestion, "");
        assert_eq!(items[0].note, "");
    }
}
