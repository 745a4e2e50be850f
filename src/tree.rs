//! Dependency tree data structures
//!
//! A `Tree` holds the words of one sentence in surface order. Every word
//! carries a head reference; the root's head is its own id, and that
//! self-loop is the sentinel marking the top of the tree.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Sentence-position index of a word (0-based)
pub type WordId = usize;

/// Error building a tree from annotated words
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("word {id}: head {head} out of range for sentence of length {len}")]
    HeadOutOfRange { id: WordId, head: WordId, len: usize },

    #[error("word at position {position} has id {id}; ids must be sentence positions")]
    IdMismatch { position: usize, id: WordId },
}

/// A word in a dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Sentence position, 0-based
    pub id: WordId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub deprel: String,
    /// Id of the syntactic head; equal to `id` for the root
    pub head: WordId,
}

impl Word {
    pub fn new(id: WordId, form: &str, lemma: &str, upos: &str, deprel: &str, head: WordId) -> Self {
        Self {
            id,
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            deprel: deprel.to_string(),
            head,
        }
    }

    /// True if this word heads itself (the dependency root)
    pub fn is_root(&self) -> bool {
        self.head == self.id
    }
}

/// A dependency tree (one sentence)
///
/// Words are immutable once the tree is built; child lists are precomputed
/// from the head references at construction time.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub words: Vec<Word>,
    children: Vec<Vec<WordId>>,
    pub sentence_text: Option<String>,
    pub metadata: FxHashMap<String, String>,
}

impl Tree {
    /// Build a tree from annotated words
    ///
    /// Validates that ids are sentence positions and heads are in range.
    /// The one-root invariant is deliberately not enforced here; `root()`
    /// reports its absence instead.
    pub fn from_words(words: Vec<Word>) -> Result<Self, TreeError> {
        Self::with_metadata(words, None, FxHashMap::default())
    }

    /// Build a tree carrying sentence text and metadata from the annotator
    pub fn with_metadata(
        words: Vec<Word>,
        sentence_text: Option<String>,
        metadata: FxHashMap<String, String>,
    ) -> Result<Self, TreeError> {
        let len = words.len();
        let mut children = vec![Vec::new(); len];

        for (position, word) in words.iter().enumerate() {
            if word.id != position {
                return Err(TreeError::IdMismatch {
                    position,
                    id: word.id,
                });
            }
            if word.head >= len {
                return Err(TreeError::HeadOutOfRange {
                    id: word.id,
                    head: word.head,
                    len,
                });
            }
            if !word.is_root() {
                children[word.head].push(word.id);
            }
        }

        Ok(Self {
            words,
            children,
            sentence_text,
            metadata,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get a word by sentence position
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id)
    }

    /// Direct dependents of a word, in surface order
    pub fn children(&self, id: WordId) -> &[WordId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The self-headed word anchoring the tree
    ///
    /// A well-formed parse has exactly one; `None` means the invariant was
    /// violated and is treated as a logic error by callers.
    pub fn root(&self) -> Option<&Word> {
        self.words.iter().find(|w| w.is_root())
    }

    /// Surface forms for a list of word ids
    pub fn forms(&self, ids: &[WordId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|&id| self.word(id))
            .map(|w| w.form.as_str())
            .collect()
    }
}
