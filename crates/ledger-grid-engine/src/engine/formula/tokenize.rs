//! Lexer for substituted arithmetic expressions.

use super::FormulaError;
use crate::engine::numeric::NumericLocaleParser;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Op(char),
    /// Prefix negation of the following group.
    Neg,
    LParen,
    RParen,
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%')
}

/// Split an expression into tokens.
///
/// A `+`/`-` in operand position (start, after an operator or `(`) is a sign:
/// it is folded into the following number literal, or becomes [`Token::Neg`]
/// in front of a parenthesised group.
pub fn tokenize(expr: &str, parser: &NumericLocaleParser) -> Result<Vec<Token>, FormulaError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let expects_operand = matches!(
            tokens.last(),
            None | Some(Token::Op(_)) | Some(Token::Neg) | Some(Token::LParen)
        );

        if is_number_char(c) {
            let (value, next) = lex_number(&chars, i, parser)?;
            tokens.push(Token::Number(value));
            i = next;
        } else if (c == '-' || c == '+') && expects_operand {
            let negative = c == '-';
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            match chars.get(j) {
                Some(d) if is_number_char(*d) => {
                    let (value, next) = lex_number(&chars, j, parser)?;
                    tokens.push(Token::Number(if negative { -value } else { value }));
                    i = next;
                }
                Some('(') => {
                    if negative {
                        tokens.push(Token::Neg);
                    }
                    i = j;
                }
                _ => return Err(FormulaError::Malformed),
            }
        } else if is_operator(c) {
            tokens.push(Token::Op(c));
            i += 1;
        } else if c == '(' {
            tokens.push(Token::LParen);
            i += 1;
        } else if c == ')' {
            tokens.push(Token::RParen);
            i += 1;
        } else {
            return Err(FormulaError::Malformed);
        }
    }

    Ok(tokens)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

/// Read a number literal (digits and separators) with the locale parser.
fn lex_number(
    chars: &[char],
    start: usize,
    parser: &NumericLocaleParser,
) -> Result<(f64, usize), FormulaError> {
    let mut end = start;
    while end < chars.len() && is_number_char(chars[end]) {
        end += 1;
    }
    let literal: String = chars[start..end].iter().collect();
    let value = parser.parse(&literal).ok_or(FormulaError::Malformed)?;
    Ok((value, end))
}

#[cfg(test)]
mod tests {
    use super::{Token, tokenize};
    use crate::engine::formula::FormulaError;
    use crate::engine::numeric::{NumericLocale, NumericLocaleParser};

    fn vi() -> NumericLocaleParser {
        NumericLocaleParser::new(NumericLocale::Vi)
    }

    #[test]
    fn test_tokenize_binary_expression() {
        assert_eq!(
            tokenize("2 + 3*4", &vi()).unwrap(),
            vec![
                Token::Number(2.0),
                Token::Op('+'),
                Token::Number(3.0),
                Token::Op('*'),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_unary_sign_folds_into_number() {
        assert_eq!(
            tokenize("-2 - -3", &vi()).unwrap(),
            vec![Token::Number(-2.0), Token::Op('-'), Token::Number(-3.0)]
        );
        assert_eq!(
            tokenize("(+1.5)", &vi()).unwrap(),
            vec![Token::LParen, Token::Number(1.5), Token::RParen]
        );
    }

    #[test]
    fn test_unary_minus_before_group() {
        assert_eq!(
            tokenize("-(1)", &vi()).unwrap(),
            vec![Token::Neg, Token::LParen, Token::Number(1.0), Token::RParen]
        );
        assert_eq!(
            tokenize("8/-(-4)", &vi()).unwrap(),
            vec![
                Token::Number(8.0),
                Token::Op('/'),
                Token::Neg,
                Token::LParen,
                Token::Number(-4.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_characters() {
        assert_eq!(tokenize("2 ^ 3", &vi()), Err(FormulaError::Malformed));
        assert_eq!(tokenize("1.2.3", &vi()), Err(FormulaError::Malformed));
        assert_eq!(tokenize("SUM", &vi()), Err(FormulaError::Malformed));
        assert_eq!(tokenize("--1", &vi()), Err(FormulaError::Malformed));
    }

    #[test]
    fn test_literals_follow_the_locale() {
        assert_eq!(tokenize("1,5", &vi()).unwrap(), vec![Token::Number(1.5)]);
        assert_eq!(tokenize("1.500", &vi()).unwrap(), vec![Token::Number(1500.0)]);
        let en = NumericLocaleParser::new(NumericLocale::En);
        assert_eq!(tokenize("1.5", &en).unwrap(), vec![Token::Number(1.5)]);
        assert_eq!(tokenize("1,500", &en).unwrap(), vec![Token::Number(1500.0)]);
    }
}
