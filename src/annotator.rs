//! External annotator boundary
//!
//! The parser itself lives outside this crate: anything that turns a raw
//! sentence string into a `Tree` implements `Annotator`. Callers construct
//! and inject the instance they want instead of going through a
//! process-wide global, so tests can run against fixture parses.

use crate::conllu::{ConlluError, ConlluReader};
use crate::tree::{Tree, TreeError};
use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

/// Error from an annotator
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The fixture annotator holds no parse for the requested text
    #[error("no fixture parse for input: {0:?}")]
    MissingFixture(String),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Conllu(#[from] ConlluError),

    #[cfg(feature = "spacy")]
    #[error("spaCy pipeline error: {0}")]
    Python(#[from] pyo3::PyErr),
}

/// A dependency annotator: tokenizes, tags, and parses one sentence
///
/// Contract: the returned words are in surface order, each with a head
/// reference, and exactly one word heads itself (the root). Malformed
/// input is passed through; whatever the backing parser does with it is
/// inherited verbatim.
pub trait Annotator {
    fn annotate(&self, text: &str) -> Result<Tree, AnnotateError>;
}

/// Annotator serving pre-parsed trees, keyed by their `# text =` metadata
///
/// Built from CoNLL-U input; stands in for a live model in tests and
/// benches. Input with no stored parse is an error, not a silent default.
pub struct FixtureAnnotator {
    trees: FxHashMap<String, Tree>,
}

impl FixtureAnnotator {
    /// Load fixtures from an in-memory CoNLL-U string
    pub fn from_conllu_str(text: &str) -> Result<Self, AnnotateError> {
        Self::collect(ConlluReader::from_str(text))
    }

    /// Load fixtures from a CoNLL-U file
    pub fn from_file(path: &Path) -> Result<Self, AnnotateError> {
        Self::collect(ConlluReader::from_file(path)?)
    }

    fn collect<R: BufRead>(reader: ConlluReader<R>) -> Result<Self, AnnotateError> {
        let mut trees = FxHashMap::default();

        for result in reader {
            let tree = result?;
            // Sentences without a text comment cannot be looked up
            if let Some(text) = tree.sentence_text.clone() {
                trees.insert(text, tree);
            }
        }

        Ok(Self { trees })
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl Annotator for FixtureAnnotator {
    fn annotate(&self, text: &str) -> Result<Tree, AnnotateError> {
        self.trees
            .get(text)
            .cloned()
            .ok_or_else(|| AnnotateError::MissingFixture(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURES: &str = "# text = The dog runs.\n\
        1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_\n\
        2\tdog\tdog\tNOUN\tNN\t_\t3\tnsubj\t_\t_\n\
        3\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n\
        4\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_\n\n\
        # text = Cats sleep.\n\
        1\tCats\tcat\tNOUN\tNNS\t_\t2\tnsubj\t_\t_\n\
        2\tsleep\tsleep\tVERB\tVBP\t_\t0\troot\t_\t_\n\n";

    #[test]
    fn test_lookup_by_text() {
        let annotator = FixtureAnnotator::from_conllu_str(FIXTURES).unwrap();
        assert_eq!(annotator.len(), 2);

        let tree = annotator.annotate("Cats sleep.").unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root().unwrap().form, "sleep");
    }

    #[test]
    fn test_missing_fixture_is_an_error() {
        let annotator = FixtureAnnotator::from_conllu_str(FIXTURES).unwrap();

        let err = annotator.annotate("Dogs sleep.").unwrap_err();
        assert!(matches!(err, AnnotateError::MissingFixture(_)));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.conllu");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", FIXTURES).unwrap();

        let annotator = FixtureAnnotator::from_file(&path).unwrap();
        assert_eq!(annotator.len(), 2);
    }
}
