//! Core annotation types shared by the lexicon scanner and the LLM annotator.

use serde::{Deserialize, Serialize};

/// Classification of a flagged expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Direct Japanese-origin vocabulary (오뎅, 노가다, ...)
    Loanword,
    /// Japanese-style calque or translationese (시말서, 거래선, ...)
    Translationese,
    /// Overly stiff administrative register
    Bureaucratese,
}

/// One flagged occurrence in the input text
///
/// `start`/`end` are character (code point) offsets into the checked text,
/// with `end` exclusive. `span` is the exact substring at `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// External field name is `type`; internal name avoids the keyword
    #[serde(rename = "type")]
    pub kind: Kind,
    pub start: usize,
    pub end: usize,
    pub span: String,
    pub suggestion: String,
    pub note: String,
    pub confidence: f64,
}

impl Annotation {
    /// Identity 4-tuple used for deduplication during merge
    pub fn key(&self) -> (Kind, usize, usize, &str) {
        (self.kind, self.start, self.end, &self.span)
    }

    /// Structural validation applied at the external-payload boundary.
    ///
    /// Offsets must form a non-empty range and confidence must be a finite
    /// number in [0, 1]. Span/offset agreement against the original text is
    /// a scanner guarantee, not re-checked for external candidates.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.start >= self.end {
            anyhow::bail!(
                "invalid annotation range: start {} >= end {}",
                self.start,
                self.end
            );
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            anyhow::bail!("confidence {} outside [0, 1]", self.confidence);
        }
        Ok(())
    }
}

/// Ordered annotation list returned to the caller, unique under the 4-tuple
/// `(kind, start, end, span)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub items: Vec<Annotation>,
}
