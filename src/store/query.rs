//! Translation of user search text into FTS5 match expressions.

/// Builds an FTS5 `MATCH` expression from free-form search text.
///
/// Each whitespace-separated term becomes a quoted FTS5 string, so
/// operators and punctuation in user input are matched literally instead of
/// being parsed as query syntax. The final term gets a trailing `*` for
/// prefix matching, which lets partially typed words match. Terms are
/// implicitly AND-ed.
///
/// Returns `None` when the text contains no indexable characters.
pub fn match_expression(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect();

    if terms.is_empty() {
        return None;
    }

    Some(format!("{}*", terms.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_has_no_expression() {
        assert_eq!(match_expression(""), None);
        assert_eq!(match_expression("   \t\n"), None);
    }

    #[test]
    fn punctuation_only_query_has_no_expression() {
        assert_eq!(match_expression("!!! --- ..."), None);
    }

    #[test]
    fn single_term_gets_prefix_wildcard() {
        assert_eq!(match_expression("mil").as_deref(), Some("\"mil\"*"));
    }

    #[test]
    fn only_last_term_is_prefix() {
        assert_eq!(
            match_expression("buy mil").as_deref(),
            Some("\"buy\" \"mil\"*")
        );
    }

    #[test]
    fn operators_are_quoted() {
        assert_eq!(
            match_expression("milk OR eggs").as_deref(),
            Some("\"milk\" \"OR\" \"eggs\"*")
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(
            match_expression("say \"hi").as_deref(),
            Some("\"say\" \"\"\"hi\"*")
        );
    }

    #[test]
    fn punctuation_terms_are_dropped() {
        assert_eq!(match_expression("rust - cli").as_deref(), Some("\"rust\" \"cli\"*"));
    }
}
