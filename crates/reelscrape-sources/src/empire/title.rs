/// Title text split into the movie name and its parenthesized release date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub title: String,
    pub release_date: String,
}

/// Split listing headline text such as `"12) Parasite (2019)"` into title and
/// release date.
///
/// The rank prefix ends at the first `)`, or at `"<digits>. "` when the rank is
/// written with a period. The release date is whatever sits between the last
/// `(` and the last `)`, but only when that `(` comes after the rank prefix;
/// otherwise the whole remainder is the title and the date is empty.
///
/// Parentheses inside a title without a trailing year are still read as the
/// date: `"3. (500) Days of Summer"` yields an empty title and `"500"`.
pub fn parse_title(raw: &str) -> ParsedTitle {
    let text = raw.trim();

    let body_start = dotted_rank_len(text)
        .or_else(|| text.find(')').map(|i| i + 1))
        .unwrap_or(0);

    match (text.rfind('('), text.rfind(')')) {
        (Some(open), Some(close)) if open >= body_start => {
            // A stray "(" after the last ")" leaves an empty date
            let release_date = if close > open { text[open + 1..close].trim() } else { "" };
            ParsedTitle {
                title: text[body_start..open].trim().to_string(),
                release_date: release_date.to_string(),
            }
        }
        _ => ParsedTitle {
            title: text[body_start..].trim().to_string(),
            release_date: String::new(),
        },
    }
}

/// Byte length of a leading `"<digits>."` rank followed by whitespace.
fn dotted_rank_len(text: &str) -> Option<usize> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &text[digits..];
    let after_dot = rest.strip_prefix('.')?;
    if after_dot.starts_with(char::is_whitespace) {
        Some(digits + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> (String, String) {
        let parsed = parse_title(raw);
        (parsed.title, parsed.release_date)
    }

    #[test]
    fn test_dotted_rank_with_year() {
        assert_eq!(parse("12. Parasite (2019)"), ("Parasite".into(), "2019".into()));
    }

    #[test]
    fn test_parenthesized_title_start_is_read_as_date() {
        assert_eq!(parse("3. (500) Days of Summer"), ("".into(), "500".into()));
    }

    #[test]
    fn test_dotted_rank_without_year() {
        assert_eq!(parse("45. Nightcrawler"), ("Nightcrawler".into(), "".into()));
    }

    #[test]
    fn test_paren_rank_with_year() {
        assert_eq!(parse("1) The Godfather (1972)"), ("The Godfather".into(), "1972".into()));
    }

    #[test]
    fn test_paren_rank_without_year() {
        assert_eq!(parse("7) Jaws"), ("Jaws".into(), "".into()));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            parse("   3)   Heat    ( 1995 )  "),
            ("Heat".into(), "1995".into())
        );
    }

    #[test]
    fn test_open_paren_before_first_close_has_no_date() {
        assert_eq!(parse("(5) Alien"), ("Alien".into(), "".into()));
    }

    #[test]
    fn test_title_with_inner_parens_uses_last_pair() {
        assert_eq!(
            parse("20) Birdman (Or The Unexpected Virtue Of Ignorance) (2014)"),
            ("Birdman (Or The Unexpected Virtue Of Ignorance)".into(), "2014".into())
        );
    }

    #[test]
    fn test_no_rank_no_parens() {
        assert_eq!(parse("Nightcrawler"), ("Nightcrawler".into(), "".into()));
    }

    #[test]
    fn test_unclosed_trailing_paren() {
        assert_eq!(parse("9) Se7en (1995"), ("Se7en".into(), "".into()));
        assert_eq!(parse("Heat (1995"), ("Heat (1995".into(), "".into()));
    }

    #[test]
    fn test_number_without_space_is_not_a_rank() {
        assert_eq!(parse("2001.A Space Odyssey"), ("2001.A Space Odyssey".into(), "".into()));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        for raw in ["", ")", "(", "()", ")(", "1.", "1. ", "((()))", "é) ü (ß)"] {
            let _ = parse_title(raw);
        }
        assert_eq!(parse(""), ("".into(), "".into()));
        assert_eq!(parse("é) ü (ß)"), ("ü".into(), "ß".into()));
    }
}
