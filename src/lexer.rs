//! Shell-style word splitting.
//!
//! - Whitespace separates words.
//! - Single quotes keep everything literally up to the closing quote.
//! - Double quotes keep everything except `\"` and `\\`, which are unescaped.
//! - A bare backslash takes the next character literally.
//! - `''` and `""` produce an empty word.

use crate::error::ShellError;

pub fn tokenize(input: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // quotes can make a word that is empty but still present
    let mut in_word = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            match ch {
                '"' => in_double = false,
                '\\' => match chars.peek() {
                    Some(&next) if next == '"' || next == '\\' => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                },
                _ => current.push(ch),
            }
        } else {
            match ch {
                '\'' => {
                    in_single = true;
                    in_word = true;
                }
                '"' => {
                    in_double = true;
                    in_word = true;
                }
                '\\' => {
                    match chars.next() {
                        Some(next) => current.push(next),
                        None => return Err(ShellError::Tokenize("no escaped character".to_string())),
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        tokens.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(ch);
                    in_word = true;
                }
            }
        }
    }

    if in_single {
        return Err(ShellError::Tokenize("no closing quotation (')".to_string()));
    }
    if in_double {
        return Err(ShellError::Tokenize("no closing quotation (\")".to_string()));
    }
    if in_word {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        tokenize(input).unwrap()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(words("ls  /etc\t"), vec!["ls", "/etc"]);
        assert!(words("   ").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn test_quotes() {
        assert_eq!(words("rev 'hello world'"), vec!["rev", "hello world"]);
        assert_eq!(words(r#"cat "my file""#), vec!["cat", "my file"]);
        assert_eq!(words(r#"rev a"b c"d"#), vec!["rev", "ab cd"]);
        assert_eq!(words(r#"rev 'it\s'"#), vec!["rev", r"it\s"]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(words(r"cd my\ dir"), vec!["cd", "my dir"]);
        assert_eq!(words(r#"rev "say \"hi\"""#), vec!["rev", r#"say "hi""#]);
        assert_eq!(words(r#"rev "a\nb""#), vec!["rev", r"a\nb"]);
    }

    #[test]
    fn test_empty_quoted_word() {
        assert_eq!(words("cat ''"), vec!["cat", ""]);
        assert_eq!(words(r#"rev """#), vec!["rev", ""]);
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(tokenize("rev 'oops"), Err(ShellError::Tokenize(_))));
        assert!(matches!(tokenize("rev \"oops"), Err(ShellError::Tokenize(_))));
        assert!(matches!(tokenize("rev oops\\"), Err(ShellError::Tokenize(_))));
    }
}
