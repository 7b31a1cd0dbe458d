//! Property tests for word chunking and sentence splitting.

use adk_docqa::{WordChunker, split_sentences};
use proptest::prelude::*;

fn arb_words() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z0-9]{1,8}", 0..1200)
}

fn arb_separator() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec![" ", "  ", "\n", "\t", " \n "])
}

/// *For any* text, chunking preserves word order and every chunk except the
/// last holds exactly `max_words` words.
mod prop_word_chunks {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn chunks_reconstruct_the_words(
            words in arb_words(),
            separator in arb_separator(),
            max_words in 1usize..600,
        ) {
            let text = words.join(separator);
            let chunks = WordChunker::new(max_words).chunk(&text);

            let rebuilt: Vec<&str> = chunks.iter().flat_map(|c| c.split(' ')).collect();
            let expected: Vec<&str> = text.split_whitespace().collect();
            if expected.is_empty() {
                prop_assert!(chunks.is_empty());
            } else {
                prop_assert_eq!(rebuilt, expected);
            }

            if let Some((last, full)) = chunks.split_last() {
                for chunk in full {
                    prop_assert_eq!(chunk.split(' ').count(), max_words);
                }
                let tail = last.split(' ').count();
                prop_assert!(tail >= 1 && tail <= max_words);
            }
        }
    }
}

/// *For any* text, kept sentences are long enough, in document order, and
/// their indices point back at the same piece of the full split.
mod prop_sentences {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn sentences_keep_their_positions(
            pieces in proptest::collection::vec("[a-z ]{0,20}", 0..12),
            min_chars in 0usize..15,
        ) {
            let text = pieces.join(". ");
            let all: Vec<&str> = text.split(". ").collect();
            let sentences = split_sentences(&text, min_chars);

            let mut last_index = None;
            for sentence in &sentences {
                prop_assert!(sentence.text.chars().count() >= min_chars);
                prop_assert_eq!(sentence.text, all[sentence.index].trim());
                prop_assert!(last_index.is_none_or(|i| i < sentence.index));
                last_index = Some(sentence.index);
            }
        }
    }
}

#[test]
fn default_chunker_uses_500_word_windows() {
    let text = vec!["w"; 1001].join(" ");
    let chunks = WordChunker::default().chunk(&text);
    let sizes: Vec<usize> = chunks.iter().map(|c| c.split(' ').count()).collect();
    assert_eq!(sizes, vec![500, 500, 1]);
}
