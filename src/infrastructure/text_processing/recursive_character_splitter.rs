use std::collections::VecDeque;

use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, DocumentId};

pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splits on the coarsest separator present, recursing into pieces that are
/// still too long, then greedily re-merges small pieces with a look-back
/// overlap. Lengths are measured in characters.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        Self::with_separators(
            chunk_size,
            chunk_overlap,
            DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn with_separators(
        chunk_size: usize,
        chunk_overlap: usize,
        separators: Vec<String>,
    ) -> Result<Self, TextSplitterError> {
        if chunk_size == 0 {
            return Err(TextSplitterError::InvalidConfiguration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap > chunk_size {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "chunk_overlap ({chunk_overlap}) is larger than chunk_size ({chunk_size})"
            )));
        }
        if separators.is_empty() {
            return Err(TextSplitterError::InvalidConfiguration(
                "at least one separator is required".to_string(),
            ));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators,
        })
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, 0, &self.separators)
            .into_iter()
            .map(|(_, chunk)| chunk)
            .collect()
    }

    /// Chunks paired with their character offset in `text`.
    pub fn split_with_offsets(&self, text: &str) -> Vec<(usize, String)> {
        let mut cursor = CharCursor::default();
        self.split_recursive(text, 0, &self.separators)
            .into_iter()
            .map(|(byte, chunk)| (cursor.advance_to(text, byte), chunk))
            .collect()
    }

    /// `base` is the byte position of `text` in the top-level input; returned
    /// offsets are byte positions in that input.
    fn split_recursive(
        &self,
        text: &str,
        base: usize,
        separators: &[String],
    ) -> Vec<(usize, String)> {
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];

        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = "";
                break;
            }
            if text.contains(candidate.as_str()) {
                separator = candidate;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut small: Vec<Piece> = Vec::new();

        for (start, piece) in split_keeping_separator(text, separator) {
            let piece = Piece {
                start: base + start,
                text: piece,
                len: char_len(piece),
            };

            if piece.len < self.chunk_size {
                small.push(piece);
                continue;
            }

            if !small.is_empty() {
                chunks.extend(self.merge_pieces(&small));
                small.clear();
            }

            if finer.is_empty() {
                chunks.extend(trimmed_at(piece.start, piece.text));
            } else {
                chunks.extend(self.split_recursive(piece.text, piece.start, finer));
            }
        }

        if !small.is_empty() {
            chunks.extend(self.merge_pieces(&small));
        }

        chunks
    }

    fn merge_pieces(&self, pieces: &[Piece]) -> Vec<(usize, String)> {
        let mut merged = Vec::new();
        let mut window: VecDeque<&Piece> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            if total + piece.len > self.chunk_size && !window.is_empty() {
                if let Some(doc) = join_window(&window) {
                    merged.push(doc);
                }
                while total > self.chunk_overlap
                    || (total + piece.len > self.chunk_size && total > 0)
                {
                    match window.pop_front() {
                        Some(dropped) => total -= dropped.len,
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            total += piece.len;
        }

        if let Some(doc) = join_window(&window) {
            merged.push(doc);
        }

        merged
    }
}

#[async_trait]
impl TextSplitter for RecursiveCharacterSplitter {
    async fn split(
        &self,
        text: &str,
        document_id: DocumentId,
        page: Option<u32>,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        Ok(self
            .split_with_offsets(text)
            .into_iter()
            .map(|(offset, chunk)| Chunk::new(chunk, document_id, page, offset))
            .collect())
    }
}

/// A contiguous slice of the input with its byte position and char length.
struct Piece<'a> {
    start: usize,
    text: &'a str,
    len: usize,
}

/// Each separator occurrence starts a new piece. Empty pieces are dropped; an
/// empty separator yields one piece per character. Pieces carry their byte
/// offset in `text`.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<(usize, &'a str)> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| (i, &text[i..i + c.len_utf8()]))
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, _) in text.match_indices(separator) {
        if i > start {
            pieces.push((start, &text[start..i]));
        }
        start = i;
    }
    if start < text.len() {
        pieces.push((start, &text[start..]));
    }
    pieces
}

/// Pieces in a window are adjacent, so their concatenation starts at the
/// first piece.
fn join_window(window: &VecDeque<&Piece>) -> Option<(usize, String)> {
    let start = window.front()?.start;
    let joined: String = window.iter().map(|piece| piece.text).collect();
    trimmed_at(start, &joined)
}

fn trimmed_at(start: usize, text: &str) -> Option<(usize, String)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let leading = text.len() - text.trim_start().len();
    Some((start + leading, trimmed.to_string()))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Converts increasing byte positions into character offsets without
/// rescanning from the start of the text.
#[derive(Default)]
struct CharCursor {
    byte: usize,
    chars: usize,
}

impl CharCursor {
    fn advance_to(&mut self, text: &str, byte: usize) -> usize {
        if byte >= self.byte {
            self.chars += text[self.byte..byte].chars().count();
        } else {
            self.chars = text[..byte].chars().count();
        }
        self.byte = byte;
        self.chars
    }
}
