//! Condition lexer
//!
//! Splits a raw condition string into tokens:
//! - `(` and `)` are boundaries wherever they appear, so `(A)AND(B)` and
//!   `( A ) AND ( B )` produce the same token kinds
//! - double-quoted strings keep their quotes; `\"` and `\\` escape
//! - symbolic operators use longest match (`~/` before `~`, `!=` before `!`)
//! - bare words become numbers, keyword operators or identifiers
//!
//! A string that is still open at a newline or at the end of the input is not
//! closed for the caller. It is emitted as an invalid `StringLiteral` holding
//! the raw fragment, and the token classifier reports it.

use proxylint_core::ast::operator::SYMBOLS;
use proxylint_core::{LexError, OperatorKind, Token, TokenKind};

/// Condition lexer
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
    error: Option<LexError>,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
            error: None,
        }
    }

    /// Tokenize a condition, failing on unrecoverable input
    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Self::new(input);
        lexer.scan();
        match lexer.error {
            Some(error) => {
                log::debug!("Lexing '{}' failed: {}", input, error);
                Err(error)
            }
            None => {
                log::trace!("Lexed {} tokens from '{}'", lexer.tokens.len(), input);
                Ok(lexer.tokens)
            }
        }
    }

    /// Tokenize a condition without ever failing.
    ///
    /// Input that `tokenize` rejects still yields its tokens, with the
    /// offending fragment marked invalid.
    pub fn tokenize_lenient(input: &str) -> Vec<Token> {
        let mut lexer = Self::new(input);
        lexer.scan();
        lexer.tokens
    }

    fn scan(&mut self) {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];

            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '(' || c == ')' {
                self.tokens
                    .push(Token::new(TokenKind::Boundary, c.to_string(), self.pos));
                self.pos += 1;
            } else if c == '"' {
                self.scan_string();
            } else if let Some(symbol) = self.match_symbol(self.pos) {
                self.tokens
                    .push(Token::new(TokenKind::Operator, symbol, self.pos));
                self.pos += symbol.chars().count();
            } else {
                self.scan_word();
            }
        }
    }

    /// Symbolic operator starting at `at`, if any
    fn match_symbol(&self, at: usize) -> Option<&'static str> {
        SYMBOLS
            .iter()
            .map(|(symbol, _)| *symbol)
            .find(|symbol| {
                symbol
                    .chars()
                    .enumerate()
                    .all(|(i, ch)| self.chars.get(at + i) == Some(&ch))
            })
    }

    fn scan_string(&mut self) {
        let start = self.pos;
        let mut text = String::from('"');
        let mut i = start + 1;

        loop {
            let Some(&ch) = self.chars.get(i) else {
                self.push_unterminated(text, start);
                self.pos = i;
                return;
            };

            match ch {
                '\\' => match self.chars.get(i + 1) {
                    Some(&escaped) => {
                        text.push('\\');
                        text.push(escaped);
                        i += 2;
                    }
                    None => {
                        text.push('\\');
                        self.error = Some(LexError::new(i, "Unterminated escape sequence"));
                        self.push_unterminated(text, start);
                        self.pos = i + 1;
                        return;
                    }
                },
                '"' => {
                    text.push('"');
                    self.tokens
                        .push(Token::new(TokenKind::StringLiteral, text, start));
                    self.pos = i + 1;
                    return;
                }
                '\n' | '\r' => {
                    self.push_unterminated(text, start);
                    self.pos = i;
                    return;
                }
                _ => {
                    text.push(ch);
                    i += 1;
                }
            }
        }
    }

    fn push_unterminated(&mut self, text: String, start: usize) {
        let fragment = text.trim_end().to_string();
        log::trace!("Unterminated string '{}' at position {}", fragment, start);
        self.tokens
            .push(Token::invalid(TokenKind::StringLiteral, fragment, start));
    }

    fn scan_word(&mut self) {
        let start = self.pos;
        let mut i = start;
        let mut has_quote = false;

        while let Some(&ch) = self.chars.get(i) {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            if ch == '"' {
                has_quote = true;
            } else if i > start && self.match_symbol(i).is_some() {
                break;
            }
            i += 1;
        }

        let text: String = self.chars[start..i].iter().collect();
        self.pos = i;

        let token = if has_quote {
            Token::invalid(TokenKind::Identifier, text, start)
        } else if is_number(&text) {
            Token::new(TokenKind::NumberLiteral, text, start)
        } else if OperatorKind::from_keyword(&text).is_some() {
            Token::new(TokenKind::Keyword, text, start)
        } else {
            Token::new(TokenKind::Identifier, text, start)
        };
        self.tokens.push(token);
    }
}

/// Optional sign, digits, optional fraction
fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    match parts.next() {
        Some(fraction) => is_digits(whole) && is_digits(fraction),
        None => is_digits(whole),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Lexer::tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_simple_comparison() {
        assert_eq!(
            kinds(r#"request.verb = "GET""#),
            vec![
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::StringLiteral
            ]
        );
        assert_eq!(texts(r#"request.verb = "GET""#), vec!["request.verb", "=", "\"GET\""]);
    }

    #[test]
    fn test_boundaries_without_whitespace() {
        let tight = kinds(r#"(true)AND(request.verb="GET")"#);
        let spaced = kinds(r#"( true ) AND ( request.verb = "GET" )"#);
        assert_eq!(tight, spaced);
        assert_eq!(
            texts(r#"(true)AND(request.verb="GET")"#),
            vec!["(", "true", ")", "AND", "(", "request.verb", "=", "\"GET\"", ")"]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let tokens = Lexer::tokenize("a and b OR c Not d").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
        assert_eq!(tokens[3].kind, TokenKind::Keyword);
        assert_eq!(tokens[5].kind, TokenKind::Keyword);
        assert_eq!(tokens[5].operator(), Some(OperatorKind::Not));
    }

    #[test]
    fn test_keyword_before_parenthesis() {
        let tokens = Lexer::tokenize(r#"NOT(a = "x")"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].text, "(");
    }

    #[test]
    fn test_longest_match_symbols() {
        assert_eq!(texts("a ~/ \"/x\""), vec!["a", "~/", "\"/x\""]);
        assert_eq!(texts("a ~~ \"x\""), vec!["a", "~~", "\"x\""]);
        assert_eq!(texts("a ~ \"x\""), vec!["a", "~", "\"x\""]);
        assert_eq!(texts("a!=b"), vec!["a", "!=", "b"]);
        assert_eq!(texts("a>=1"), vec!["a", ">=", "1"]);
        assert_eq!(texts("!a"), vec!["!", "a"]);
    }

    #[test]
    fn test_header_names_keep_hyphens() {
        let tokens = Lexer::tokenize(r#"request.header.X-Api-Key = "k""#).unwrap();
        assert_eq!(tokens[0].text, "request.header.X-Api-Key");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("a > 5"),
            vec![
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::NumberLiteral
            ]
        );
        assert_eq!(Lexer::tokenize("a < -2.5").unwrap()[2].kind, TokenKind::NumberLiteral);
        assert_eq!(Lexer::tokenize("a = 2xx").unwrap()[2].kind, TokenKind::Identifier);
        assert!(is_number("404"));
        assert!(is_number("+1.5"));
        assert!(!is_number("1."));
        assert!(!is_number("-"));
        assert!(!is_number("1.2.3"));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let tokens = Lexer::tokenize(r#"a = "say \"hi\"""#).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, r#""say \"hi\"""#);
        assert!(tokens[2].valid);
    }

    #[test]
    fn test_unterminated_string_is_not_balanced() {
        let tokens = Lexer::tokenize(r#"proxy.pathsuffix MatchesPath "OPTIONS"#).unwrap();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::StringLiteral);
        assert_eq!(last.text, "\"OPTIONS");
        assert!(!last.valid);
        assert_eq!(last.position, 29);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = Lexer::tokenize("a = \"x\nand b = c").unwrap();
        assert_eq!(tokens[2].text, "\"x");
        assert!(!tokens[2].valid);
        assert_eq!(tokens[3].text, "and");
    }

    #[test]
    fn test_stray_quote_in_bare_word() {
        let tokens = Lexer::tokenize(r#"request.verb = GET""#).unwrap();
        assert_eq!(tokens[2].text, "GET\"");
        assert!(!tokens[2].valid);
    }

    #[test]
    fn test_unterminated_escape_is_an_error() {
        let error = Lexer::tokenize(r#"a = "x\"#).unwrap_err();
        assert_eq!(error.position, 6);

        let tokens = Lexer::tokenize_lenient(r#"a = "x\"#);
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[2].valid);
    }

    #[test]
    fn test_positions_are_character_offsets() {
        let tokens = Lexer::tokenize(r#""é" = a"#).unwrap();
        assert_eq!(tokens[1].position, 4);
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn test_empty_input() {
        assert!(Lexer::tokenize("").unwrap().is_empty());
        assert!(Lexer::tokenize("   ").unwrap().is_empty());
    }
}
