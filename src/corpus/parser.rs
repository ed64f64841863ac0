//! Corpus Parser
//!
//! The corpus is a sequence of quote blocks. Each block spans one or more
//! lines and ends with a line holding a single `.`:
//!
//! ```text
//! "Laugh and the world laughs with you, snore and you
//! sleep alone." -- Anthony Burgess
//! .
//! "Roses are red, violets are blue, I'm schizophrenic,
//! and so am I."
//! -- Oscar Levant
//! ```
//!
//! Content lines are joined verbatim. The file is expected to carry a
//! trailing space on every line that ends mid-sentence, so no separator is
//! inserted between lines.

/// Line content (after trimming) that terminates a quote block
pub const DELIMITER: &str = ".";

/// Split corpus lines into quote texts, in corpus order.
///
/// A block is only emitted when it contains anything besides whitespace, so
/// consecutive delimiters (or a leading one) never yield empty quotes. This
/// also keeps a trailing block that lacks its final delimiter line.
pub fn parse_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut quotes = Vec::new();
    let mut current = String::new();

    for line in lines {
        let line = line.as_ref();
        if line.trim() == DELIMITER {
            let quote = std::mem::take(&mut current);
            if !quote.trim().is_empty() {
                quotes.push(quote);
            }
        } else {
            current.push_str(line);
        }
    }

    if !current.trim().is_empty() {
        quotes.push(current);
    }

    quotes
}
