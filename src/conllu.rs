//! CoNLL-U parsing
//!
//! Reads CoNLL-U sentences into `Tree` structures. This is how pre-parsed
//! fixtures get into the crate; multiword token ranges and empty nodes are
//! skipped.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::tree::{Tree, TreeError, Word, WordId};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use thiserror::Error;

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
pub enum ConlluError {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// CoNLL-U reader that iterates over sentences
pub struct ConlluReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl ConlluReader<BufReader<File>> {
    /// Create a reader from a file path
    pub fn from_file(path: &Path) -> Result<Self, ConlluError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_num: 0,
        })
    }
}

impl ConlluReader<BufReader<std::io::Cursor<String>>> {
    /// Create a reader from a string
    pub fn from_str(text: &str) -> Self {
        let cursor = std::io::Cursor::new(text.to_string());
        Self {
            lines: BufReader::new(cursor).lines(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for ConlluReader<R> {
    type Item = Result<Tree, ConlluError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token_lines = Vec::new();
        let mut metadata = FxHashMap::default();
        let mut sentence_text = None;

        // Read lines until a blank line (sentence boundary) or EOF
        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if token_lines.is_empty() {
                        return None;
                    }
                    // Last sentence without trailing blank line
                    break;
                }
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(line)) => {
                    let line = line.trim();

                    if line.is_empty() {
                        if !token_lines.is_empty() {
                            break;
                        }
                        // Skip leading blank lines
                        continue;
                    }

                    if let Some(comment) = line.strip_prefix('#') {
                        parse_comment(comment, &mut metadata, &mut sentence_text);
                        continue;
                    }

                    token_lines.push((self.line_num, line.to_string()));
                }
            }
        }

        Some(parse_sentence(token_lines, sentence_text, metadata))
    }
}

/// Parse a comment line; `text` goes to the sentence text, the rest to metadata
fn parse_comment(
    comment: &str,
    metadata: &mut FxHashMap<String, String>,
    sentence_text: &mut Option<String>,
) {
    let comment = comment.trim();

    if let Some(eq_pos) = comment.find('=') {
        let key = comment[..eq_pos].trim();
        let value = comment[eq_pos + 1..].trim();

        if key == "text" {
            *sentence_text = Some(value.to_string());
        } else {
            metadata.insert(key.to_string(), value.to_string());
        }
    }
}

/// Parse the accumulated token lines into a Tree
fn parse_sentence(
    lines: Vec<(usize, String)>,
    sentence_text: Option<String>,
    metadata: FxHashMap<String, String>,
) -> Result<Tree, ConlluError> {
    let mut words = Vec::new();

    for (line_num, line) in lines {
        if let Some(word) = parse_line(&line, line_num, words.len())? {
            words.push(word);
        }
    }

    Ok(Tree::with_metadata(words, sentence_text, metadata)?)
}

/// Parse a single CoNLL-U token line
///
/// Returns None for multiword token ranges (`1-2`) and empty nodes (`2.1`).
fn parse_line(line: &str, line_num: usize, word_id: WordId) -> Result<Option<Word>, ConlluError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 10 {
        return Err(ConlluError::Parse {
            line: line_num,
            message: format!("expected 10 fields, found {}", fields.len()),
        });
    }

    // Field 0: ID
    if fields[0].contains('-') || fields[0].contains('.') {
        return Ok(None);
    }
    let id: usize = fields[0].parse().map_err(|_| ConlluError::Parse {
        line: line_num,
        message: format!("invalid ID: {}", fields[0]),
    })?;
    // IDs are 1-indexed and must be contiguous, or the 1-indexed HEAD
    // fields would resolve to the wrong positions
    if id != word_id + 1 {
        return Err(ConlluError::Parse {
            line: line_num,
            message: format!("expected ID {}, found {}", word_id + 1, id),
        });
    }

    // Field 1: FORM
    let form = fields[1];

    // Field 2: LEMMA, defaulting to the form
    let lemma = if fields[2] == "_" { form } else { fields[2] };

    // Field 3: UPOS
    let upos = fields[3];

    // Field 6: HEAD, 1-indexed with 0 marking the root
    let head = parse_head(fields[6], line_num, word_id)?;

    // Field 7: DEPREL
    let deprel = fields[7];

    // Fields 4, 5, 8, 9 (XPOS, FEATS, DEPS, MISC) are not carried
    Ok(Some(Word::new(word_id, form, lemma, upos, deprel, head)))
}

/// Parse the HEAD field; `0` and `_` map to the root's self-loop
fn parse_head(s: &str, line_num: usize, word_id: WordId) -> Result<WordId, ConlluError> {
    if s == "0" || s == "_" {
        return Ok(word_id);
    }

    let head: usize = s.parse().map_err(|_| ConlluError::Parse {
        line: line_num,
        message: format!("invalid HEAD: {}", s),
    })?;

    if head == 0 {
        Ok(word_id)
    } else {
        // CoNLL-U heads are 1-indexed
        Ok(head - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_sentence() {
        let conllu = "# text = The dog runs.\n\
                      1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_\n\
                      2\tdog\tdog\tNOUN\tNN\t_\t3\tnsubj\t_\t_\n\
                      3\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\tSpaceAfter=No\n\
                      4\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_\n\n";

        let mut reader = ConlluReader::from_str(conllu);
        let tree = reader.next().unwrap().unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.sentence_text, Some("The dog runs.".to_string()));

        assert_eq!(tree.words[0].form, "The");
        assert_eq!(tree.words[0].lemma, "the");
        assert_eq!(tree.words[0].upos, "DET");
        assert_eq!(tree.words[0].deprel, "det");
        assert_eq!(tree.words[0].head, 1);

        // "runs" is the root and heads itself
        assert!(tree.words[2].is_root());
        assert_eq!(tree.root().unwrap().form, "runs");
        assert_eq!(tree.children(2), &[1, 3]);
    }

    #[test]
    fn test_lemma_defaults_to_form() {
        let conllu = "1\tdogs\t_\tNOUN\tNNS\t_\t0\troot\t_\t_\n\n";

        let tree = ConlluReader::from_str(conllu).next().unwrap().unwrap();
        assert_eq!(tree.words[0].lemma, "dogs");
    }

    #[test]
    fn test_metadata_comment() {
        let conllu = "# sent_id = s1\n\
                      # text = Hi.\n\
                      1\tHi\thi\tINTJ\tUH\t_\t0\troot\t_\t_\n\
                      2\t.\t.\tPUNCT\t.\t_\t1\tpunct\t_\t_\n\n";

        let tree = ConlluReader::from_str(conllu).next().unwrap().unwrap();
        assert_eq!(tree.metadata.get("sent_id").map(String::as_str), Some("s1"));
        assert_eq!(tree.sentence_text.as_deref(), Some("Hi."));
    }

    #[test]
    fn test_multiple_sentences() {
        let conllu = "1\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n\n\
                      1\tsleeps\tsleep\tVERB\tVBZ\t_\t0\troot\t_\t_\n\n";

        let trees: Vec<_> = ConlluReader::from_str(conllu)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].words[0].form, "runs");
        assert_eq!(trees[1].words[0].form, "sleeps");
    }

    #[test]
    fn test_skips_multiword_ranges() {
        let conllu = "1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_\n\
                      1\tdo\tdo\tAUX\tVBP\t_\t2\taux\t_\t_\n\
                      2\tn't\tnot\tPART\tRB\t_\t2\tneg\t_\t_\n\n";

        let tree = ConlluReader::from_str(conllu).next().unwrap().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.words[0].form, "do");
    }

    #[test]
    fn test_out_of_sequence_id() {
        // ID 3 where 2 is expected; HEADs would resolve to wrong positions
        let conllu = "1\tdogs\tdog\tNOUN\tNNS\t_\t3\tnsubj\t_\t_\n\
                      3\trun\trun\tVERB\tVBP\t_\t0\troot\t_\t_\n\n";

        let result = ConlluReader::from_str(conllu).next().unwrap();
        assert!(matches!(result, Err(ConlluError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_duplicate_id() {
        let conllu = "1\ta\ta\tX\tXX\t_\t0\troot\t_\t_\n\
                      1\tb\tb\tX\tXX\t_\t1\tdep\t_\t_\n\n";

        let result = ConlluReader::from_str(conllu).next().unwrap();
        assert!(matches!(result, Err(ConlluError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_wrong_field_count() {
        let conllu = "1\tdog\tdog\n\n";

        let result = ConlluReader::from_str(conllu).next().unwrap();
        assert!(matches!(result, Err(ConlluError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.conllu");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "1\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n\n").unwrap();

        let trees: Vec<_> = ConlluReader::from_file(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].words[0].form, "runs");
    }
}
