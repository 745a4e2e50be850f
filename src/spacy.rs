//! spaCy-backed annotator
//!
//! Drives a spaCy pipeline over PyO3. The pipeline is loaded once at
//! construction and the handle is reused for every subsequent call; there
//! is no teardown. Python-side failures propagate through `AnnotateError`
//! unhandled.

use crate::annotator::{AnnotateError, Annotator};
use crate::tree::{Tree, Word};
use pyo3::prelude::*;
use rustc_hash::FxHashMap;

/// Annotator backed by a loaded spaCy pipeline
pub struct SpacyAnnotator {
    nlp: Py<PyAny>,
}

impl SpacyAnnotator {
    /// Load a spaCy pipeline by name, e.g. `en_core_web_sm`
    ///
    /// The model must be installed in the Python environment; a missing
    /// model surfaces immediately as a Python error.
    pub fn load(model: &str) -> Result<Self, AnnotateError> {
        Python::attach(|py| {
            let spacy = py.import("spacy")?;
            let nlp = spacy.call_method1("load", (model,))?;
            Ok(Self { nlp: nlp.unbind() })
        })
    }
}

impl Annotator for SpacyAnnotator {
    fn annotate(&self, text: &str) -> Result<Tree, AnnotateError> {
        Python::attach(|py| {
            let doc = self.nlp.bind(py).call1((text,))?;

            let mut words = Vec::new();
            for (id, token) in doc.try_iter()?.enumerate() {
                let token = token?;
                let form: String = token.getattr("text")?.extract()?;
                let lemma: String = token.getattr("lemma_")?.extract()?;
                let upos: String = token.getattr("pos_")?.extract()?;
                let deprel: String = token.getattr("dep_")?.extract()?;
                // spaCy roots head themselves already; `i` is the sentence
                // position, which matches our WordId
                let head: usize = token.getattr("head")?.getattr("i")?.extract()?;

                words.push(Word::new(id, &form, &lemma, &upos, &deprel, head));
            }

            let tree = Tree::with_metadata(
                words,
                Some(text.to_string()),
                FxHashMap::default(),
            )?;
            Ok(tree)
        })
    }
}
