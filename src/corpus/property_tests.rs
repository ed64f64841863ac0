use proptest::prelude::*;
use super::parser::parse_lines;

// Lines that are either delimiters or short content fragments (never a bare ".")
fn corpus_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just(" . ".to_string()),
        "[a-z ]{0,6}",
        "[A-Za-z,;'!?]{1,8} ",
    ]
}

// Property test: quote count matches non-blank blocks closed by a delimiter, plus a
// non-blank trailing remainder
proptest! {
    #[test]
    fn quote_count_matches_non_blank_blocks(lines in proptest::collection::vec(corpus_line(), 0..40)) {
        let mut expected = 0usize;
        let mut block = String::new();
        for line in &lines {
            if line.trim() == "." {
                if !block.trim().is_empty() {
                    expected += 1;
                }
                block.clear();
            } else {
                block.push_str(line);
            }
        }
        if !block.trim().is_empty() {
            expected += 1;
        }

        let quotes = parse_lines(&lines);
        prop_assert_eq!(quotes.len(), expected);
    }
}

// Property test: with non-blank content between delimiters, every delimiter yields one quote
proptest! {
    #[test]
    fn one_quote_per_delimiter(blocks in proptest::collection::vec(proptest::collection::vec("[a-z]{1,5} ", 1..4), 0..10), tail in proptest::option::of("[a-z]{1,5}")) {
        let mut lines: Vec<String> = Vec::new();
        for block in &blocks {
            lines.extend(block.iter().cloned());
            lines.push(".".to_string());
        }
        if let Some(t) = &tail {
            lines.push(t.clone());
        }

        let quotes = parse_lines(&lines);
        prop_assert_eq!(quotes.len(), blocks.len() + usize::from(tail.is_some()));

        for (quote, block) in quotes.iter().zip(blocks.iter()) {
            prop_assert_eq!(quote, &block.concat());
        }
    }
}

// Property test: concatenating all quotes gives back every non-delimiter line in order
proptest! {
    #[test]
    fn content_is_preserved_verbatim(blocks in proptest::collection::vec("[a-z]{1,5} [a-z]{1,5} ", 1..10)) {
        let mut lines: Vec<String> = Vec::new();
        for block in &blocks {
            lines.push(block.clone());
            lines.push(".".to_string());
        }

        let quotes = parse_lines(&lines);
        prop_assert_eq!(quotes.concat(), blocks.concat());
    }
}
