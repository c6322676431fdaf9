//! Sunhwa - Korean Japanese-residue checker
//!
//! Detects Japanese-origin loanwords, translation calques and bureaucratic
//! register in Korean text by combining a static-lexicon scanner with an
//! external LLM annotator.

pub mod annotation;
pub mod checker;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod llm;
pub mod merger;
pub mod scanner;
