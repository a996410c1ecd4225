//! Text chunking for bounded-size model requests.
//!
//! Local models degrade on long inputs, so source text is split into
//! chunks that stay under a configured character limit. Sentences are
//! kept together where possible; a sentence longer than the limit is
//! split at whitespace instead.

/// Split source text into chunks of at most `max_chars` characters.
///
/// Chunks are produced in source order. The only case where a chunk may
/// exceed the limit is a single word longer than the limit itself, which
/// is emitted as its own oversized chunk rather than truncated or dropped.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let normalized = text.replace('\n', " ");
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(&normalized) {
        if sentence.chars().count() > max_chars {
            // Sentence alone exceeds the limit, fall back to word boundaries
            for word in sentence.split_whitespace() {
                push_unit(&mut chunks, &mut current, word, max_chars);
            }
        } else {
            push_unit(&mut chunks, &mut current, sentence, max_chars);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Append a unit (sentence or word) to the current chunk, closing the
/// chunk first when the unit would not fit within the limit.
fn push_unit(chunks: &mut Vec<String>, current: &mut String, unit: &str, max_chars: usize) {
    let unit_len = unit.chars().count();
    let needed = if current.is_empty() {
        unit_len
    } else {
        current.chars().count() + 1 + unit_len
    };

    if needed > max_chars && !current.is_empty() {
        chunks.push(std::mem::take(current));
    }

    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(unit);

    // A single unit longer than the limit becomes its own chunk
    if current.chars().count() > max_chars {
        chunks.push(std::mem::take(current));
    }
}

/// Split text into sentences, keeping the terminating punctuation with
/// each sentence. A terminator only closes a sentence when followed by
/// whitespace, so decimals and abbreviations mid-token stay intact.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev_terminator = false;

    for (idx, ch) in text.char_indices() {
        if prev_terminator && ch.is_whitespace() {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = idx;
        }
        prev_terminator = matches!(ch, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    // 99 characters including the trailing period
    fn sentence() -> String {
        format!("{}.", "abcdefghij ".repeat(9).trim_end())
    }

    #[test]
    fn test_empty_input_produces_no_chunks() {
        assert!(split_text("", 500).is_empty());
        assert!(split_text("   \n  ", 500).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = split_text("Hello world. How are you?", 500);
        assert_eq!(chunks, vec!["Hello world. How are you?"]);
    }

    #[test]
    fn test_chunks_respect_limit() {
        let text = (0..40).map(|_| sentence()).collect::<Vec<_>>().join(" ");
        let chunks = split_text(&text, 500);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 500, "chunk too long: {}", chunk.len());
        }
    }

    #[test]
    fn test_1200_chars_with_limit_500_yields_three_chunks() {
        let text = (0..12).map(|_| sentence()).collect::<Vec<_>>().join(" ");
        assert_eq!(text.chars().count(), 12 * 99 + 11);

        let chunks = split_text(&text, 500);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 500);
        }
    }

    #[test]
    fn test_reassembly_preserves_content_and_order() {
        let text = "One two three. Four five six! Seven eight nine? Ten eleven twelve.";
        let chunks = split_text(text, 20);

        let original_words: Vec<&str> = text.split_whitespace().collect();
        let rejoined = chunks.join(" ");
        let rejoined_words: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original_words, rejoined_words);
    }

    #[test]
    fn test_never_splits_mid_word() {
        let text = "supercalifragilistic expialidocious pneumonoultramicroscopic words here";
        let chunks = split_text(text, 25);

        for chunk in &chunks {
            for word in chunk.split_whitespace() {
                assert!(text.contains(word), "word was cut: {}", word);
            }
        }
    }

    #[test]
    fn test_single_oversized_word_becomes_its_own_chunk() {
        let long_word = "x".repeat(60);
        let text = format!("short words here {} more short words", long_word);
        let chunks = split_text(&text, 20);

        let oversized: Vec<&String> = chunks.iter().filter(|c| c.chars().count() > 20).collect();
        assert_eq!(oversized.len(), 1);
        assert_eq!(oversized[0].as_str(), long_word);
    }

    #[test]
    fn test_long_sentence_splits_at_whitespace() {
        let text = "this is one very long sentence without any terminator that keeps going and going and going";
        let chunks = split_text(text, 30);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 30);
        }
    }
}
