use serde::{Deserialize, Serialize};

/// Average word length assumed when turning a character overlap budget into words.
const CHARS_PER_WORD: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
}

impl Chunk {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }
}

/// Splits a document into overlapping chunks along paragraph boundaries.
///
/// Paragraphs are separated by blank lines and accumulated until the next one
/// would push the buffer past `chunk_size` characters. When a chunk closes, the
/// next one is seeded with the last `overlap / 5` words of the closed chunk.
/// Any buffer longer than `1.5 * chunk_size` is closed immediately without
/// overlap seeding.
///
/// Chunks are best-effort sized: an overlap-seeded chunk may already exceed
/// `chunk_size` before the next check runs.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let paragraphs = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let overlap_words = overlap / CHARS_PER_WORD;
    let hard_limit = chunk_size as f64 * 1.5;

    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs {
        let current_len = current.chars().count();
        let would_exceed =
            current_len > 0 && current_len + paragraph.chars().count() > chunk_size;

        if would_exceed {
            chunks.push(Chunk::new(current.trim(), chunks.len()));

            let tail = overlap_tail(&current, overlap_words);
            current = if tail.is_empty() {
                paragraph.to_string()
            } else {
                format!("{tail} {paragraph}")
            };
        } else {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
        }

        if current.chars().count() as f64 > hard_limit {
            chunks.push(Chunk::new(current.trim(), chunks.len()));
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        chunks.push(Chunk::new(rest, chunks.len()));
    }

    chunks
}

/// Last `count` space-separated words of `text`.
fn overlap_tail(text: &str, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    let words: Vec<&str> = text.split(' ').collect();
    let start = words.len().saturating_sub(count);
    words[start..].join(" ")
}

/// Flattens markdown before chunking.
///
/// Strips leading heading markers (`#` to `######` followed by whitespace) and
/// collapses every whitespace run, newlines included, into a single space.
/// The result is a single line, so chunking it yields at most one paragraph.
pub fn clean_text(text: &str) -> String {
    let stripped = text
        .lines()
        .map(strip_heading_marker)
        .collect::<Vec<_>>()
        .join("\n");

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_heading_marker(line: &str) -> &str {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&hashes) {
        return line;
    }
    let rest = &line[hashes..];
    match rest.chars().next() {
        Some(c) if c.is_whitespace() => rest.trim_start(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("", 100, 10).is_empty());
        assert!(chunk_text("  \n\n \n\n\n  ", 100, 10).is_empty());
    }

    #[test]
    fn test_chunk_text_single_chunk() {
        let chunks = chunk_text("Hello world.\n\n\n\nThis is a test.", 100, 50);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Hello world.\n\nThis is a test.");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_chunk_text_seeds_overlap() {
        let content = "First paragraph here.\n\nSecond paragraph here.";
        let chunks = chunk_text(content, 30, 10);

        assert_eq!(
            texts(&chunks),
            vec![
                "First paragraph here.",
                "paragraph here. Second paragraph here."
            ]
        );
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_chunk_text_small_overlap_has_no_tail() {
        let content = "First paragraph here.\n\nSecond paragraph here.";
        let chunks = chunk_text(content, 30, 4);

        assert_eq!(
            texts(&chunks),
            vec!["First paragraph here.", "Second paragraph here."]
        );
    }

    #[test]
    fn test_chunk_text_force_splits_oversized_paragraph() {
        let content = "abcdefghijklmnopqrst\n\ntiny";
        let chunks = chunk_text(content, 10, 50);

        assert_eq!(texts(&chunks), vec!["abcdefghijklmnopqrst", "tiny"]);
    }

    #[test]
    fn test_chunk_text_allows_overlap_overshoot() {
        let content = "one two three four five\n\nsix";
        let chunks = chunk_text(content, 20, 50);

        assert_eq!(
            texts(&chunks),
            vec!["one two three four five", "one two three four five six"]
        );
        assert!(chunks[1].text.chars().count() > 20);
    }

    #[test]
    fn test_chunk_text_covers_paragraphs_in_order() {
        let paragraphs: Vec<String> = (0..40)
            .map(|i| format!("Paragraph {i} {}", "word ".repeat(i % 7).trim_end()))
            .collect();
        let content = paragraphs.join("\n\n");

        let chunks = chunk_text(&content, 80, 0);
        let rebuilt: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.text.split("\n\n").map(str::to_string))
            .collect();

        assert_eq!(
            rebuilt,
            paragraphs
                .iter()
                .map(|p| p.trim().to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_chunk_text_indices_are_contiguous() {
        let content = (0..25)
            .map(|i| format!("Section {i} explains a policy in several words."))
            .collect::<Vec<_>>()
            .join("\n\n");

        let chunks = chunk_text(&content, 120, 40);

        assert!(chunks.len() > 1);
        for (expected, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, expected);
            assert!(!chunk.text.is_empty());
            assert_eq!(chunk.text, chunk.text.trim());
        }
    }

    #[test]
    fn test_clean_text_flattens_markdown() {
        let content = "# Title\n\nSome   text\nhere\n\n\n\n## Sub heading\nmore";
        assert_eq!(clean_text(content), "Title Some text here Sub heading more");
    }

    #[test]
    fn test_clean_text_keeps_non_heading_hashes() {
        assert_eq!(clean_text("Issue #42 is open"), "Issue #42 is open");
        assert_eq!(clean_text("####### seven"), "####### seven");
        assert_eq!(clean_text("#tag line"), "#tag line");
    }
}
