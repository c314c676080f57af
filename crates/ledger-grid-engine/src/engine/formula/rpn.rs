//! Shunting-yard conversion to reverse Polish notation and stack evaluation.

use super::FormulaError;
use super::tokenize::Token;

/// Negation binds tighter than every binary operator.
const NEG_PRECEDENCE: u8 = 3;

fn precedence(op: char) -> u8 {
    match op {
        '*' | '/' | '%' => 2,
        _ => 1,
    }
}

/// Reorder infix tokens into RPN. Binary operators are left-associative;
/// prefix negation applies to the group that follows it.
pub fn to_rpn(tokens: Vec<Token>) -> Result<Vec<Token>, FormulaError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Op(op) => {
                while let Some(top) = stack.last() {
                    let top_precedence = match top {
                        Token::Op(top) => precedence(*top),
                        Token::Neg => NEG_PRECEDENCE,
                        _ => break,
                    };
                    if top_precedence < precedence(op) {
                        break;
                    }
                    if let Some(popped) = stack.pop() {
                        output.push(popped);
                    }
                }
                stack.push(Token::Op(op));
            }
            Token::Neg | Token::LParen => stack.push(token),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(t) => output.push(t),
                    None => return Err(FormulaError::Malformed),
                }
            },
        }
    }

    while let Some(token) = stack.pop() {
        if token == Token::LParen {
            return Err(FormulaError::Malformed);
        }
        output.push(token);
    }

    Ok(output)
}

/// Evaluate RPN tokens.
pub fn eval_rpn(tokens: &[Token]) -> Result<f64, FormulaError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Neg => {
                let operand = stack.pop().ok_or(FormulaError::Malformed)?;
                stack.push(-operand);
            }
            Token::Op(op) => {
                let rhs = stack.pop().ok_or(FormulaError::Malformed)?;
                let lhs = stack.pop().ok_or(FormulaError::Malformed)?;
                let value = match op {
                    '+' => lhs + rhs,
                    '-' => lhs - rhs,
                    '*' => lhs * rhs,
                    '/' | '%' if rhs == 0.0 => return Err(FormulaError::DivZero),
                    '/' => lhs / rhs,
                    '%' => lhs % rhs,
                    _ => return Err(FormulaError::Malformed),
                };
                stack.push(value);
            }
            Token::LParen | Token::RParen => return Err(FormulaError::Malformed),
        }
    }

    match stack.as_slice() {
        [value] if value.is_finite() => Ok(*value),
        _ => Err(FormulaError::Malformed),
    }
}
