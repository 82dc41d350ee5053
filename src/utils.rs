pub fn trim_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Drops ANSI escape sequences and control characters from a single line of model output.
pub fn strip_controls_and_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // ANSI escape sequence (ESC … letter)
            '\x1b' => {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }

            // Tabs separate words in some model output
            '\t' => out.push(' '),

            c if c.is_control() => {}

            c => out.push(c),
        }
    }

    out.trim().to_string()
}

/// Removes a surrounding markdown code fence (```` ```json … ``` ````), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_controls_and_escapes() {
        let input = "\x1b[1mHello\x1b[0m";
        let expected = "Hello";
        assert_eq!(strip_controls_and_escapes(input), expected);
        assert_eq!(strip_controls_and_escapes("Notes:\tformal\r"), "Notes: formal");
    }

    #[test]
    fn test_trim_line() {
        assert_eq!(trim_line("  hola  "), Some("hola"));
        assert_eq!(trim_line(" \t "), None);
    }

    #[test]
    fn test_pluralize_single() {
        assert_eq!(pluralize("card", 1), "1 card");
        assert_eq!(pluralize("block", 1), "1 block");
    }

    #[test]
    fn test_pluralize_multiple() {
        assert_eq!(pluralize("card", 2), "2 cards");
        assert_eq!(pluralize("card", 5), "5 cards");
        assert_eq!(pluralize("expression", 3), "3 expressions");
    }

    #[test]
    fn test_pluralize_zero() {
        assert_eq!(pluralize("card", 0), "0 cards");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"cards\": []}\n```"), "{\"cards\": []}");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  plain text "), "plain text");
        assert_eq!(strip_code_fence("```unterminated"), "```unterminated");
    }
}
