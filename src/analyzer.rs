//! Sentence-level convenience layer
//!
//! Pairs an annotator with the tree walks in `spans`. Every call performs
//! one blocking parse of its input and derives the requested view
//! synchronously; annotator failures propagate to the caller.

use crate::annotator::{AnnotateError, Annotator};
use crate::spans;
use crate::spans::RoleSpans;
use crate::tree::Word;

/// Structural queries over sentences, backed by an injected annotator
pub struct Analyzer<A: Annotator> {
    annotator: A,
}

impl<A: Annotator> Analyzer<A> {
    pub fn new(annotator: A) -> Self {
        Self { annotator }
    }

    /// Root-to-word label path for every word, indexed by position
    pub fn paths(&self, text: &str) -> Result<Vec<Vec<String>>, AnnotateError> {
        let tree = self.annotator.annotate(text)?;
        Ok(spans::paths(&tree))
    }

    /// Every word's subtree as a word list in surface order
    pub fn subtrees(&self, text: &str) -> Result<Vec<Vec<Word>>, AnnotateError> {
        let tree = self.annotator.annotate(text)?;
        Ok(spans::subtrees(&tree)
            .into_iter()
            .map(|ids| ids.into_iter().map(|id| tree.words[id].clone()).collect())
            .collect())
    }

    /// Whether `words` forms a subtree of the parsed sentence
    pub fn contains_subtree(&self, text: &str, words: &[&str]) -> Result<bool, AnnotateError> {
        let tree = self.annotator.annotate(text)?;
        Ok(spans::contains_subtree(&tree, words))
    }

    /// Root word of a span parsed independently as its own mini-sentence
    ///
    /// `None` means the parse produced no self-headed word, violating the
    /// one-root invariant; callers treat that as a logic error upstream.
    pub fn head(&self, span: &str) -> Result<Option<Word>, AnnotateError> {
        let tree = self.annotator.annotate(span)?;
        Ok(tree.root().cloned())
    }

    /// Subject, direct-object, and indirect-object spans of the sentence
    pub fn argument_spans(&self, text: &str) -> Result<RoleSpans<Word>, AnnotateError> {
        let tree = self.annotator.annotate(text)?;
        Ok(spans::argument_spans(&tree).resolve(&tree))
    }
}
