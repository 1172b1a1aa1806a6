//! Classification of physical lines from a CoNLL-X file

/// What a physical line means to the sentence reader
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawLine<'line> {
    /// Token line, stripped of surrounding whitespace
    Content(&'line str),

    /// End of the current sentence
    Boundary,

    /// Line that carries no data
    Ignored(IgnoreCause),
}

/// Reasons why a line can be ignored
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IgnoreCause {
    /// Line starts with `#`
    Comment,

    /// Line does not start with a numeric token ID
    NotAToken,
}

/// Classify a line, with its terminator already removed
///
/// Any line that starts with a space is a sentence boundary, whatever else it
/// contains. Some files of the corpus use such lines as sentence separators.
pub fn classify(line: &str) -> RawLine<'_> {
    if line.starts_with(' ') {
        return RawLine::Boundary;
    }
    if line.starts_with('#') {
        return RawLine::Ignored(IgnoreCause::Comment);
    }
    if line.is_empty() {
        return RawLine::Boundary;
    }
    match line.split_whitespace().next() {
        Some(id) if id.chars().all(is_digit) => RawLine::Content(line.trim()),
        _ => RawLine::Ignored(IgnoreCause::NotAToken),
    }
}

/// Truth that a character is a decimal or typographic digit
///
/// This accepts full-width digits like `１` and superscripts like `²`, but
/// not letter-like numbers such as Roman numerals or `〇`.
fn is_digit(c: char) -> bool {
    c.is_numeric() && !c.is_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lines() {
        assert_eq!(
            classify("1\tJohn\tjohn\tN\tN\t_\t2\tnsubj\t_\t_"),
            RawLine::Content("1\tJohn\tjohn\tN\tN\t_\t2\tnsubj\t_\t_")
        );
        assert_eq!(classify("12\tx\t"), RawLine::Content("12\tx"));
        assert_eq!(classify("\t3\ty"), RawLine::Content("3\ty"));
    }

    #[test]
    fn non_ascii_token_ids() {
        assert_eq!(
            classify("１\t我\t我\tPN\tPN\t_\t0\tHED\t_\t_"),
            RawLine::Content("１\t我\t我\tPN\tPN\t_\t0\tHED\t_\t_")
        );
        assert_eq!(classify("١٢\tx"), RawLine::Content("١٢\tx"));
        assert_eq!(classify("²\tx"), RawLine::Content("²\tx"));
        assert_eq!(
            classify("Ⅻ\tx"),
            RawLine::Ignored(IgnoreCause::NotAToken)
        );
        assert_eq!(
            classify("〇\tx"),
            RawLine::Ignored(IgnoreCause::NotAToken)
        );
        assert_eq!(
            classify("一\tx"),
            RawLine::Ignored(IgnoreCause::NotAToken)
        );
    }

    #[test]
    fn boundaries() {
        assert_eq!(classify(""), RawLine::Boundary);
        assert_eq!(classify(" "), RawLine::Boundary);
        assert_eq!(classify("  extra stuff"), RawLine::Boundary);
        assert_eq!(classify(" 1\tJohn"), RawLine::Boundary);
    }

    #[test]
    fn ignored_lines() {
        assert_eq!(
            classify("# sentence 1"),
            RawLine::Ignored(IgnoreCause::Comment)
        );
        assert_eq!(classify("#1\tx"), RawLine::Ignored(IgnoreCause::Comment));
        assert_eq!(
            classify("1-2\tdu\t_"),
            RawLine::Ignored(IgnoreCause::NotAToken)
        );
        assert_eq!(
            classify("-DOCSTART-"),
            RawLine::Ignored(IgnoreCause::NotAToken)
        );
        assert_eq!(classify("\t"), RawLine::Ignored(IgnoreCause::NotAToken));
    }
}
