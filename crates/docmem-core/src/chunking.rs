//! Text chunking: token-bounded lines, line-bounded paragraphs.
//!
//! Two passes over the extracted text:
//! 1. [`split_lines`] flattens the text into whitespace tokens and packs them
//!    into lines of at most `max_tokens_per_line` tokens.
//! 2. [`split_paragraphs`] groups consecutive lines into paragraphs of at
//!    most `max_lines_per_paragraph` lines.
//!
//! Both passes are deterministic and order-preserving, so the token sequence
//! of the input is reconstructible from the output.

/// Split text into lines of at most `max_tokens_per_line` whitespace tokens.
///
/// Tokens are never split; a single token always forms a line, even when it
/// alone would be "oversized" - the limit bounds token count, not characters.
/// A limit of zero is treated as 1; pipeline configuration rejects zero
/// limits up front, but the function stays total for direct callers.
pub fn split_lines(text: &str, max_tokens_per_line: usize) -> Vec<String> {
    let max_tokens_per_line = max_tokens_per_line.max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut tokens_in_line = 0;

    for token in text.split_whitespace() {
        if tokens_in_line == max_tokens_per_line {
            lines.push(std::mem::take(&mut current));
            tokens_in_line = 0;
        }
        if tokens_in_line > 0 {
            current.push(' ');
        }
        current.push_str(token);
        tokens_in_line += 1;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Group consecutive lines into paragraphs of at most
/// `max_lines_per_paragraph` lines, joined with a newline.
///
/// The final paragraph may contain fewer lines. Total lines consumed equals
/// total lines produced across the output. A limit of zero is treated as 1,
/// as in [`split_lines`].
pub fn split_paragraphs(lines: &[String], max_lines_per_paragraph: usize) -> Vec<String> {
    let max_lines_per_paragraph = max_lines_per_paragraph.max(1);

    lines
        .chunks(max_lines_per_paragraph)
        .map(|group| group.join("\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn short_text_is_one_line() {
        let lines = split_lines("one two three", 10);
        assert_eq!(lines, vec!["one two three"]);
    }

    #[test]
    fn lines_respect_token_limit() {
        let text = "a b c d e f g";
        let lines = split_lines(text, 3);
        assert_eq!(lines, vec!["a b c", "d e f", "g"]);
        for line in &lines {
            assert!(tokens(line).len() <= 3);
        }
    }

    #[test]
    fn token_sequence_is_reconstructed() {
        let text = "  The quick   brown fox\njumps over\tthe lazy dog  ";
        let lines = split_lines(text, 2);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| tokens(l)).collect();
        assert_eq!(rejoined, tokens(text));
    }

    #[test]
    fn oversized_token_still_forms_a_line() {
        // Limit bounds token count per line, not characters.
        let text = "short supercalifragilisticexpialidocious short";
        let lines = split_lines(text, 1);
        assert_eq!(
            lines,
            vec!["short", "supercalifragilisticexpialidocious", "short"]
        );
    }

    #[test]
    fn empty_text_yields_no_lines() {
        assert!(split_lines("", 10).is_empty());
        assert!(split_lines("   \n\t  ", 10).is_empty());
    }

    #[test]
    fn split_is_deterministic() {
        let text = "alpha beta gamma delta epsilon zeta";
        assert_eq!(split_lines(text, 4), split_lines(text, 4));
    }

    #[test]
    fn paragraphs_respect_line_limit() {
        let lines: Vec<String> = (0..5).map(|i| format!("line {i}")).collect();
        let paragraphs = split_paragraphs(&lines, 2);
        assert_eq!(paragraphs.len(), 3);

        let sizes: Vec<usize> = paragraphs.iter().map(|p| p.lines().count()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn paragraphs_preserve_line_order_and_count() {
        let lines: Vec<String> = (0..7).map(|i| format!("l{i}")).collect();
        let paragraphs = split_paragraphs(&lines, 3);

        let total: usize = paragraphs.iter().map(|p| p.lines().count()).sum();
        assert_eq!(total, lines.len());

        let flattened: Vec<&str> = paragraphs.iter().flat_map(|p| p.lines()).collect();
        let expected: Vec<&str> = lines.iter().map(String::as_str).collect();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn empty_line_sequence_yields_no_paragraphs() {
        assert!(split_paragraphs(&[], 4).is_empty());
    }

    #[test]
    fn zero_limit_behaves_as_one() {
        let text = "a b c";
        assert_eq!(split_lines(text, 0), split_lines(text, 1));

        let lines: Vec<String> = (0..3).map(|i| format!("l{i}")).collect();
        assert_eq!(split_paragraphs(&lines, 0), split_paragraphs(&lines, 1));
    }
}
