//! Validation of the external annotator payload and merge with scanner output.

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::annotation::{Annotation, AnnotationSet, Kind};

#[derive(Deserialize)]
struct AnnotatorPayload {
    // Absent `items` is tolerated and read as an empty list; anything else
    // malformed fails the whole batch
    #[serde(default)]
    items: Vec<Annotation>,
}

/// Parse and validate the raw annotator output.
///
/// The contract is strict: after trimming surrounding whitespace the output
/// must be a single JSON object. Explanatory prose or code fences around the
/// JSON are a contract violation and fail the request; there is no per-item
/// recovery, since silently dropping malformed items would mask annotator
/// bugs.
pub fn parse_candidates(raw: &str) -> Result<Vec<Annotation>> {
    let payload: AnnotatorPayload =
        serde_json::from_str(raw.trim()).context("annotator output is not valid JSON")?;

    for item in &payload.items {
        item.validate()
            .with_context(|| format!("invalid annotator item for span {:?}", item.span))?;
    }

    Ok(payload.items)
}

/// Merge scanner output with validated external candidates.
///
/// The result keeps `base` first, in its original order; candidates are
/// appended in received order unless an identical `(kind, start, end, span)`
/// tuple is already present. A duplicate candidate never replaces the base
/// item's suggestion, note or confidence.
pub fn merge(base: Vec<Annotation>, candidates: Vec<Annotation>) -> AnnotationSet {
    let mut seen: HashSet<(Kind, usize, usize, String)> = base
        .iter()
        .map(|a| (a.kind, a.start, a.end, a.span.clone()))
        .collect();

    let mut items = base;
    for candidate in candidates {
        let key = (
            candidate.kind,
            candidate.start,
            candidate.end,
            candidate.span.clone(),
        );
        if seen.insert(key) {
            items.push(candidate);
        }
    }

    AnnotationSet { items }
}
