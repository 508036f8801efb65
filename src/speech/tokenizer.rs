use lazy_static::lazy_static;
use regex::Regex;

/// Longest chunk the speech endpoint accepts, in characters.
pub const MAX_CHUNK_CHARS: usize = 100;

lazy_static! {
    static ref BOUNDARY_REGEX: Regex = Regex::new(
        r"(?x)
        [.,:](?:\s+|$)|                   # Sentence/clause end, not 3.14 or 1,000 or 12:30
        [?!？！¡¿()\[\]…‥،;—。，、：\n]   # Always a boundary
        "
    )
    .unwrap();
}

/// Split text into speakable chunks of at most `max_chars` characters.
///
/// Cuts after punctuation, splits over-long pieces on the last space that
/// fits, then packs neighbouring pieces back together while they fit. Pieces
/// without any alphanumeric character are dropped.
pub fn tokenize(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);

    let pieces = split_at_boundaries(text)
        .into_iter()
        .filter(|p| p.chars().any(|c| c.is_alphanumeric()))
        .flat_map(|p| split_long(p, max_chars));

    let mut chunks = Vec::new();
    let mut current = String::new();

    for piece in pieces {
        if current.is_empty() {
            current = piece;
        } else if current.chars().count() + 1 + piece.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(&piece);
        } else {
            chunks.push(std::mem::replace(&mut current, piece));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn split_at_boundaries(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last_end = 0;

    for m in BOUNDARY_REGEX.find_iter(text) {
        let piece = text[last_end..m.end()].trim();
        if !piece.is_empty() {
            pieces.push(piece);
        }
        last_end = m.end();
    }

    let rest = text[last_end..].trim();
    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}

fn split_long(piece: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = piece.trim();

    while rest.chars().count() > max_chars {
        // Byte offset of the first character past the limit
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        let cut = if rest[limit..].starts_with(char::is_whitespace) {
            limit
        } else {
            match rest[..limit].rfind(char::is_whitespace) {
                Some(i) if i > 0 => i,
                _ => limit,
            }
        };

        out.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }

    if !rest.is_empty() {
        out.push(rest.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(tokenize("Hello, world.", 100), vec!["Hello, world."]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("", 100).is_empty());
        assert!(tokenize("   \n ", 100).is_empty());
    }

    #[test]
    fn punctuation_only_yields_nothing() {
        assert!(tokenize("?! ... , ; ()", 100).is_empty());
    }

    #[test]
    fn prefers_sentence_boundaries() {
        let first = "a".repeat(60) + ".";
        let second = "b".repeat(60) + ".";
        let text = format!("{} {}", first, second);
        assert_eq!(tokenize(&text, 100), vec![first, second]);
    }

    #[test]
    fn keeps_decimals_and_thousands_together() {
        assert_eq!(tokenize("Pi is 3.14 and 1,000 is big", 100), vec!["Pi is 3.14 and 1,000 is big"]);
    }

    #[test]
    fn long_sentence_splits_on_spaces() {
        let words: Vec<String> = (0..60).map(|i| format!("word{}", i)).collect();
        let text = words.join(" ");

        let chunks = tokenize(&text, 100);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 100));
        assert_eq!(chunks.join(" "), text);
    }

    #[test]
    fn unbroken_text_is_hard_split() {
        let text = "x".repeat(250);
        let chunks = tokenize(&text, 100);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lengths, vec![100, 100, 50]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(150);
        let chunks = tokenize(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1].chars().count(), 50);
    }

    #[test]
    fn splits_on_cjk_punctuation() {
        let text = format!("{}。{}", "你".repeat(70), "好".repeat(70));
        let chunks = tokenize(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].ends_with('。'));
    }

    #[test]
    fn newlines_are_boundaries() {
        let text = format!("{}\n{}", "a".repeat(80), "b".repeat(80));
        assert_eq!(tokenize(&text, 100), vec!["a".repeat(80), "b".repeat(80)]);
    }
}
