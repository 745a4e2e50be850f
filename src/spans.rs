//! Tree walks over a parsed sentence
//!
//! Root-to-word label paths, subtree extraction, subtree membership, and
//! argument-span collection. Everything here is a pure function of the
//! tree; parsing happens upstream in the annotator.

use crate::tree::{Tree, Word, WordId};

/// Dependency labels from the root down to `id`, root label first
///
/// Walks head references upward until the self-loop, then reverses. The
/// root's own path is the single-element list of its label. The walk is
/// bounded by sentence length, so a head cycle in malformed input cannot
/// hang; out-of-range ids yield an empty path.
pub fn path_to(tree: &Tree, id: WordId) -> Vec<String> {
    let mut labels = Vec::new();
    let mut current = id;

    for _ in 0..tree.len() {
        let Some(word) = tree.word(current) else {
            break;
        };
        labels.push(word.deprel.clone());
        if word.is_root() {
            break;
        }
        current = word.head;
    }

    labels.reverse();
    labels
}

/// Root-to-word path for every word, indexed by sentence position
pub fn paths(tree: &Tree) -> Vec<Vec<String>> {
    (0..tree.len()).map(|id| path_to(tree, id)).collect()
}

/// Ids of `id` plus all its transitive dependents, in surface order
///
/// Like `path_to`, the walk tolerates head cycles in malformed input:
/// each word is visited at most once, so the DFS always terminates.
pub fn subtree(tree: &Tree, id: WordId) -> Vec<WordId> {
    if id >= tree.len() {
        return Vec::new();
    }

    let mut visited = vec![false; tree.len()];
    let mut ids = Vec::new();
    let mut stack = vec![id];
    while let Some(next) = stack.pop() {
        if visited[next] {
            continue;
        }
        visited[next] = true;
        ids.push(next);
        stack.extend_from_slice(tree.children(next));
    }

    ids.sort_unstable();
    ids
}

/// Subtree of every word, indexed by sentence position
pub fn subtrees(tree: &Tree) -> Vec<Vec<WordId>> {
    (0..tree.len()).map(|id| subtree(tree, id)).collect()
}

/// True iff `words` matches some word's subtree form-for-form, in order
///
/// Linear scan over all subtrees, each compared in O(length); sentences
/// are short, so no indexing is needed.
pub fn contains_subtree(tree: &Tree, words: &[&str]) -> bool {
    (0..tree.len()).any(|id| {
        let ids = subtree(tree, id);
        ids.len() == words.len()
            && ids
                .iter()
                .zip(words)
                .all(|(&wid, &w)| tree.words[wid].form == w)
    })
}

/// Subtree spans grouped by grammatical role
///
/// A sentence may contain several of each role (conjoined clauses, for
/// example), so every role holds a list of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSpans<T> {
    pub subjects: Vec<Vec<T>>,
    pub direct_objects: Vec<Vec<T>>,
    pub indirect_objects: Vec<Vec<T>>,
}

impl RoleSpans<WordId> {
    /// Resolve id spans to owned word spans
    pub fn resolve(&self, tree: &Tree) -> RoleSpans<Word> {
        let to_words = |spans: &Vec<Vec<WordId>>| {
            spans
                .iter()
                .map(|ids| {
                    ids.iter()
                        .filter_map(|&id| tree.word(id))
                        .cloned()
                        .collect()
                })
                .collect()
        };

        RoleSpans {
            subjects: to_words(&self.subjects),
            direct_objects: to_words(&self.direct_objects),
            indirect_objects: to_words(&self.indirect_objects),
        }
    }
}

/// Collect nominal-subject, direct-object, and indirect-object spans
///
/// `dative` counts as an indirect object; some spaCy versions label
/// indirect objects that way instead of `iobj`.
pub fn argument_spans(tree: &Tree) -> RoleSpans<WordId> {
    let mut spans = RoleSpans::default();

    for word in &tree.words {
        match word.deprel.as_str() {
            "nsubj" => spans.subjects.push(subtree(tree, word.id)),
            "dobj" => spans.direct_objects.push(subtree(tree, word.id)),
            "iobj" | "dative" => spans.indirect_objects.push(subtree(tree, word.id)),
            _ => {}
        }
    }

    spans
}
