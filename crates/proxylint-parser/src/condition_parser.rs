//! Condition parser
//!
//! Recursive-descent parser over the lexer's tokens. Precedence, lowest first:
//!
//! ```text
//! condition  := or
//! or         := and ( OR and )*
//! and        := unary ( AND unary )*
//! unary      := NOT unary | primary
//! primary    := '(' or ')' | operand [ COMPARISON operand ]
//! ```
//!
//! Chains of the same logical operator at one level become a single n-ary
//! node; a parenthesized group always stays a nested node.
//!
//! Operand shapes are checked while building, so every tree that leaves the
//! parser has the right arity and operand kinds:
//! - relational operators take a variable on the left and a number or
//!   variable on the right; a quoted right side is rejected
//! - string match operators take a variable on the left and a quoted
//!   pattern on the right
//! - equality operators accept any operands but at least one must be a variable

use crate::lexer::Lexer;
use proxylint_core::{Expected, Node, OperatorKind, ParseError, Result, Token, TokenKind};

/// Deepest nesting of groups and negations accepted
pub const MAX_NESTING_DEPTH: usize = 128;

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Condition parser
pub struct ConditionParser {
    tokens: Vec<Token>,
    pos: usize,
    /// Offset reported for errors at the end of the input
    end: usize,
    depth: usize,
}

impl ConditionParser {
    /// Parse a condition string into an AST
    pub fn parse(input: &str) -> Result<Node> {
        let tokens = Lexer::tokenize(input)?;
        let end = input.chars().count();

        match Self::parse_tokens(tokens, end) {
            Ok(node) => {
                log::trace!("Parsed '{}' into {} nodes", input, node.size());
                Ok(node)
            }
            Err(error) => {
                log::debug!("Failed to parse condition '{}': {}", input, error);
                Err(error.into())
            }
        }
    }

    /// Parse an already lexed token stream.
    ///
    /// `end` is the character length of the source, used as the position of
    /// errors that occur at the end of the input.
    pub fn parse_tokens(tokens: Vec<Token>, end: usize) -> ParseResult<Node> {
        let mut parser = Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        };
        parser.parse_condition()
    }

    fn parse_condition(&mut self) -> ParseResult<Node> {
        if self.tokens.is_empty() {
            return Err(ParseError::end_of_input(self.end, Expected::Expression));
        }

        let node = self.parse_or()?;

        if let Some(token) = self.peek() {
            return Err(Self::unexpected(token, Expected::LogicalOperator));
        }
        Ok(node)
    }

    fn parse_or(&mut self) -> ParseResult<Node> {
        let mut operands = vec![self.parse_and()?];
        while self.eat_operator(OperatorKind::Or) {
            operands.push(self.parse_and()?);
        }

        if operands.len() == 1 {
            Ok(operands.remove(0))
        } else {
            Ok(Node::or(operands))
        }
    }

    fn parse_and(&mut self) -> ParseResult<Node> {
        let mut operands = vec![self.parse_unary()?];
        while self.eat_operator(OperatorKind::And) {
            operands.push(self.parse_unary()?);
        }

        if operands.len() == 1 {
            Ok(operands.remove(0))
        } else {
            Ok(Node::and(operands))
        }
    }

    fn parse_unary(&mut self) -> ParseResult<Node> {
        let token = match self.peek() {
            Some(token) if token.operator() == Some(OperatorKind::Not) => token.clone(),
            _ => return self.parse_primary(),
        };

        self.descend(&token)?;
        self.advance();
        let operand = self.parse_unary()?;
        self.depth -= 1;

        Ok(Node::not(operand))
    }

    fn parse_primary(&mut self) -> ParseResult<Node> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(ParseError::end_of_input(self.end, Expected::Expression)),
        };

        if token.is_open() {
            self.descend(&token)?;
            self.advance();
            let inner = self.parse_or()?;
            self.expect_close()?;
            self.depth -= 1;
            return Ok(inner);
        }

        if !token.is_constant() {
            return Err(Self::unexpected(&token, Expected::Expression));
        }
        if !token.valid {
            return Err(Self::unexpected(&token, Expected::Operand));
        }
        self.advance();

        let operator = match self.peek().and_then(Token::operator) {
            Some(op) if op.is_comparison() => op,
            _ => return self.bare_operand(token),
        };
        self.advance();

        let right = self.expect_operand(operator)?;
        Self::check_shape(&token, operator, &right)?;

        Ok(Node::binary(
            Node::leaf(token.text),
            operator,
            Node::leaf(right.text),
        ))
    }

    /// An operand standing alone as a condition, e.g. `(true)`
    fn bare_operand(&self, token: Token) -> ParseResult<Node> {
        if token.kind == TokenKind::Identifier {
            return Ok(Node::leaf(token.text));
        }

        Err(match self.peek() {
            Some(next) => Self::unexpected(next, Expected::ComparisonOperator),
            None => ParseError::end_of_input(self.end, Expected::ComparisonOperator),
        })
    }

    fn expect_operand(&mut self, operator: OperatorKind) -> ParseResult<Token> {
        let expected = if operator.is_relational() {
            Expected::NumericOperand
        } else if operator.is_string_match() {
            Expected::StringLiteral
        } else {
            Expected::Operand
        };

        match self.peek() {
            Some(token) if token.is_constant() && token.valid => {
                let token = token.clone();
                self.advance();
                Ok(token)
            }
            Some(token) => Err(Self::unexpected(token, expected)),
            None => Err(ParseError::end_of_input(self.end, expected)),
        }
    }

    fn check_shape(left: &Token, operator: OperatorKind, right: &Token) -> ParseResult<()> {
        let is_variable = |token: &Token| token.kind == TokenKind::Identifier;

        match operator {
            OperatorKind::GreaterThan
            | OperatorKind::GreaterThanOrEquals
            | OperatorKind::LesserThan
            | OperatorKind::LesserThanOrEquals => {
                if !is_variable(left) {
                    return Err(Self::unexpected(left, Expected::Variable));
                }
                if right.kind == TokenKind::StringLiteral {
                    return Err(Self::unexpected(right, Expected::NumericOperand));
                }
            }
            OperatorKind::StartsWith
            | OperatorKind::Matches
            | OperatorKind::MatchesPath
            | OperatorKind::JavaRegex => {
                if !is_variable(left) {
                    return Err(Self::unexpected(left, Expected::Variable));
                }
                if right.kind != TokenKind::StringLiteral {
                    return Err(Self::unexpected(right, Expected::StringLiteral));
                }
            }
            OperatorKind::Equals | OperatorKind::NotEquals | OperatorKind::EqualsCaseInsensitive => {
                if !is_variable(left) && !is_variable(right) {
                    return Err(Self::unexpected(right, Expected::Variable));
                }
            }
            OperatorKind::And | OperatorKind::Or | OperatorKind::Not => {}
        }
        Ok(())
    }

    fn expect_close(&mut self) -> ParseResult<()> {
        match self.peek() {
            Some(token) if token.is_close() => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(Self::unexpected(token, Expected::ClosingParenthesis)),
            None => Err(ParseError::end_of_input(
                self.end,
                Expected::ClosingParenthesis,
            )),
        }
    }

    fn descend(&mut self, token: &Token) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Self::unexpected(token, Expected::ShallowerNesting));
        }
        Ok(())
    }

    fn eat_operator(&mut self, operator: OperatorKind) -> bool {
        if self.peek().and_then(Token::operator) == Some(operator) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn unexpected(token: &Token, expected: Expected) -> ParseError {
        ParseError::unexpected(&token.text, token.position, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxylint_core::{ConditionError, Found};

    fn parse_error(input: &str) -> ParseError {
        match ConditionParser::parse(input) {
            Err(ConditionError::Parse(error)) => error,
            other => panic!("Expected parse error for '{}', got {:?}", input, other),
        }
    }

    fn eq(left: &str, right: &str) -> Node {
        Node::binary(Node::leaf(left), OperatorKind::Equals, Node::leaf(right))
    }

    #[test]
    fn test_parse_simple_equals() {
        let node = ConditionParser::parse(r#"request.verb = "GET""#).unwrap();
        assert_eq!(node, eq("request.verb", "\"GET\""));
    }

    #[test]
    fn test_word_and_symbol_spellings_agree() {
        let word = ConditionParser::parse(r#"request.verb Equals "GET""#).unwrap();
        let symbol = ConditionParser::parse(r#"request.verb == "GET""#).unwrap();
        assert_eq!(word, symbol);
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let node = ConditionParser::parse("a or b and c").unwrap();
        assert_eq!(
            node,
            Node::or(vec![
                Node::leaf("a"),
                Node::and(vec![Node::leaf("b"), Node::leaf("c")]),
            ])
        );
    }

    #[test]
    fn test_chains_become_one_node() {
        let node = ConditionParser::parse("a and b and c").unwrap();
        assert_eq!(
            node,
            Node::and(vec![Node::leaf("a"), Node::leaf("b"), Node::leaf("c")])
        );
    }

    #[test]
    fn test_groups_stay_nested() {
        let node = ConditionParser::parse("(a and b) and c").unwrap();
        assert_eq!(
            node,
            Node::and(vec![
                Node::and(vec![Node::leaf("a"), Node::leaf("b")]),
                Node::leaf("c"),
            ])
        );
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let node = ConditionParser::parse(r#"not a = "x""#).unwrap();
        assert_eq!(node, Node::not(eq("a", "\"x\"")));
    }

    #[test]
    fn test_leading_not_with_and_without_space() {
        let tight = ConditionParser::parse(r#"NOT(a = "x")"#).unwrap();
        let spaced = ConditionParser::parse(r#"not (a = "x")"#).unwrap();
        let bang = ConditionParser::parse(r#"!(a = "x")"#).unwrap();
        assert_eq!(tight, spaced);
        assert_eq!(tight, bang);
    }

    #[test]
    fn test_parenthesis_adjacency() {
        let tight = ConditionParser::parse(r#"(true)AND(request.verb = "GET")"#).unwrap();
        let spaced = ConditionParser::parse(r#"(true) AND (request.verb = "GET")"#).unwrap();
        assert_eq!(tight, spaced);
        assert_eq!(
            tight,
            Node::and(vec![Node::leaf("true"), eq("request.verb", "\"GET\"")])
        );
    }

    #[test]
    fn test_relational_rejects_quoted_right_side() {
        let error = parse_error(r#"A > "c""#);
        assert_eq!(error.position, 4);
        assert_eq!(error.expected, Expected::NumericOperand);
        assert_eq!(
            error.to_string(),
            "Unrecognized token '\"c\"' at position 4. Expecting: NUMERIC_OPERAND"
        );
    }

    #[test]
    fn test_relational_requires_variable_on_left() {
        let error = parse_error("5 < a");
        assert_eq!(error.position, 0);
        assert_eq!(error.expected, Expected::Variable);
    }

    #[test]
    fn test_relational_accepts_number_or_variable() {
        assert!(ConditionParser::parse("response.status.code >= 400").is_ok());
        assert!(ConditionParser::parse("a <= b").is_ok());
        assert!(ConditionParser::parse("a GreaterThan 1").is_ok());
    }

    #[test]
    fn test_equality_needs_a_variable() {
        let error = parse_error("1 = 1");
        assert_eq!(error.position, 4);
        assert_eq!(error.expected, Expected::Variable);

        assert!(parse_error(r#""a" = "b""#).expected == Expected::Variable);
        assert!(ConditionParser::parse(r#""GET" = request.verb"#).is_ok());
        assert!(ConditionParser::parse("response.status.code = 200").is_ok());
    }

    #[test]
    fn test_string_match_shapes() {
        assert!(ConditionParser::parse(r#"proxy.pathsuffix MatchesPath "/users/*""#).is_ok());
        assert!(ConditionParser::parse(r#"proxy.pathsuffix ~/ "/users/**""#).is_ok());
        assert!(ConditionParser::parse(r#"request.path ~~ "/v[0-9]+/.*""#).is_ok());

        let error = parse_error("proxy.pathsuffix MatchesPath users");
        assert_eq!(error.expected, Expected::StringLiteral);

        let error = parse_error(r#""x" StartsWith "y""#);
        assert_eq!(error.expected, Expected::Variable);
    }

    #[test]
    fn test_unclosed_group() {
        let error = parse_error(r#"(a = "x""#);
        assert_eq!(error.found, Found::EndOfInput);
        assert_eq!(error.position, 8);
        assert_eq!(error.expected, Expected::ClosingParenthesis);
    }

    #[test]
    fn test_trailing_token_expects_logical_operator() {
        let error = parse_error(r#"a = "x" b = "y""#);
        assert_eq!(error.position, 8);
        assert_eq!(error.expected, Expected::LogicalOperator);
        assert_eq!(
            error.to_string(),
            "Unrecognized token 'b' at position 8. Expecting: LOGICAL_OPERATOR"
        );
    }

    #[test]
    fn test_unterminated_string_fails_to_parse() {
        let error = parse_error(r#"proxy.pathsuffix MatchesPath "OPTIONS"#);
        assert_eq!(error.position, 29);
        assert_eq!(error.expected, Expected::StringLiteral);
    }

    #[test]
    fn test_empty_condition() {
        let error = parse_error("   ");
        assert_eq!(error.found, Found::EndOfInput);
        assert_eq!(error.expected, Expected::Expression);
    }

    #[test]
    fn test_dangling_operators() {
        assert_eq!(parse_error("a and").expected, Expected::Expression);
        assert_eq!(parse_error("a =").expected, Expected::Operand);
        assert_eq!(parse_error("and a").expected, Expected::Expression);
        assert_eq!(parse_error(r#""x""#).expected, Expected::ComparisonOperator);
    }

    #[test]
    fn test_lex_error_propagates() {
        let result = ConditionParser::parse(r#"a = "x\"#);
        assert!(matches!(result, Err(ConditionError::Lex(_))));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}a{}", "(".repeat(depth), ")".repeat(depth));

        let error = parse_error(&nested(MAX_NESTING_DEPTH + 1));
        assert_eq!(error.expected, Expected::ShallowerNesting);

        assert!(ConditionParser::parse(&nested(MAX_NESTING_DEPTH)).is_ok());
    }
}
