//! Depspan: path, subtree, and argument-span queries over dependency parses
//!
//! A thin convenience layer on top of an external dependency annotator.
//! The annotator does the linguistic work (tokenization, tagging,
//! parsing); this crate answers structural questions about the resulting
//! tree: label paths from the root, subtrees in surface order, subtree
//! membership of a word sequence, the root of a span, and subject/object
//! spans.

pub mod analyzer; // Sentence-level convenience layer
pub mod annotator; // External parser boundary and fixture annotator
pub mod conllu; // CoNLL-U parsing for pre-parsed fixtures
pub mod spans; // Tree walks: paths, subtrees, argument spans
pub mod tree; // Dependency tree data structures

// spaCy bridge (requires a Python environment)
#[cfg(feature = "spacy")]
pub mod spacy;

// Re-exports for convenience
pub use analyzer::Analyzer;
pub use annotator::{AnnotateError, Annotator, FixtureAnnotator};
pub use conllu::{ConlluError, ConlluReader};
pub use spans::{RoleSpans, argument_spans, contains_subtree, path_to, paths, subtree, subtrees};
pub use tree::{Tree, TreeError, Word, WordId};

#[cfg(feature = "spacy")]
pub use spacy::SpacyAnnotator;
