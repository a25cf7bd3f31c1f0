//! Search support: search-text assembly and Soundex codes.
//!
//! Every person row carries a `search_text` column (lower-cased name and
//! place tokens) and a `soundex` column (codes of the name tokens), both
//! maintained by the projection. Queries match tokens against these columns
//! so both backends search the same way.

/// American Soundex code of one word, e.g. `soundex("Robert") == "R163"`.
/// Returns `None` for input without an ASCII letter.
pub fn soundex(word: &str) -> Option<String> {
    fn digit(c: u8) -> u8 {
        match c {
            b'b' | b'f' | b'p' | b'v' => b'1',
            b'c' | b'g' | b'j' | b'k' | b'q' | b's' | b'x' | b'z' => b'2',
            b'd' | b't' => b'3',
            b'l' => b'4',
            b'm' | b'n' => b'5',
            b'r' => b'6',
            _ => 0,
        }
    }

    let letters: Vec<u8> = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase() as u8)
        .collect();
    let first = *letters.first()?;

    let mut code = String::new();
    code.push(first.to_ascii_uppercase() as char);

    let mut last_digit = digit(first);
    for &c in &letters[1..] {
        let d = digit(c);
        // h and w are transparent: a consonant on each side of them counts
        // as adjacent. Vowels reset the run.
        if c == b'h' || c == b'w' {
            continue;
        }
        if d == 0 {
            last_digit = 0;
            continue;
        }
        if d != last_digit {
            code.push(d as char);
            if code.len() == 4 {
                break;
            }
        }
        last_digit = d;
    }

    while code.len() < 4 {
        code.push('0');
    }
    Some(code)
}

/// Space-separated Soundex codes for every token of a phrase.
pub fn soundex_codes(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .filter_map(soundex)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assemble the lower-cased search text for a person row from its name and
/// place parts.
pub fn build_search_text<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for part in parts {
        for token in part.split_whitespace() {
            let token = token.to_lowercase();
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soundex_reference_values() {
        assert_eq!(soundex("Robert").as_deref(), Some("R163"));
        assert_eq!(soundex("Rupert").as_deref(), Some("R163"));
        assert_eq!(soundex("Ashcraft").as_deref(), Some("A261"));
        assert_eq!(soundex("Tymczak").as_deref(), Some("T522"));
        assert_eq!(soundex("Pfister").as_deref(), Some("P236"));
        assert_eq!(soundex("Honeyman").as_deref(), Some("H555"));
    }

    #[test]
    fn test_soundex_empty_input() {
        assert_eq!(soundex(""), None);
        assert_eq!(soundex("123"), None);
    }

    #[test]
    fn test_build_search_text_dedups_tokens() {
        let text = build_search_text(["John Doe", "Doe Farm, Springfield"]);
        assert_eq!(text, "john doe farm, springfield");
    }
}
