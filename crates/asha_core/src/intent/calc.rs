//! Restricted arithmetic evaluation.
//!
//! # Responsibility
//! - Sanitize free-form expressions down to a closed numeric grammar.
//! - Evaluate with a hand-written recursive-descent parser.
//! - Recognize single worded-math phrases ("5 plus 3").
//!
//! # Invariants
//! - The evaluator has no access to ambient names, I/O or side effects;
//!   every character outside the numeric grammar is discarded before
//!   parsing. This is a security boundary, not a convenience.
//! - `%` is a literal "divide by 100" substitution; only bare `N%` forms
//!   are supported.
//! - Worded math handles exactly one `a OP b` pattern per utterance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WORDED_MATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.?\d*)\s*(plus|minus|times|multiplied by|divided by|into|x)\s*(\d+\.?\d*)")
        .expect("valid worded math regex")
});

/// Evaluation failure kinds surfaced to the user as correction prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    /// Nothing numeric survived sanitization.
    EmptyExpression,
    /// The residue does not parse, divides by zero, or overflows.
    InvalidExpression,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyExpression => write!(f, "empty arithmetic expression"),
            Self::InvalidExpression => write!(f, "invalid arithmetic expression"),
        }
    }
}

impl Error for CalcError {}

/// Evaluates a free-form arithmetic expression.
///
/// Pipeline: glyph normalization (`^`→`**`, `×`→`*`, `÷`→`/`), character
/// whitelist, `%`→`/100` substitution, then recursive-descent parsing over
/// `+ - * / **`, parentheses and decimals.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let normalized = expression
        .replace('^', "**")
        .replace('×', "*")
        .replace('÷', "/");
    let kept: String = normalized
        .chars()
        .filter(|c| matches!(c, '0'..='9' | '+' | '-' | '*' | '/' | '.' | '(' | ')' | '%') || c.is_whitespace())
        .collect();
    let residue = kept.replace('%', "/100");
    if residue.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let tokens = tokenize(&residue)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(CalcError::InvalidExpression);
    }
    if !value.is_finite() {
        return Err(CalcError::InvalidExpression);
    }
    Ok(value)
}

/// Formats a result without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Worded binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOp {
    Plus,
    Minus,
    Times,
    DividedBy,
}

/// One recognized `a OP b` phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct WordedMath {
    pub a: f64,
    pub op: WordOp,
    /// Operator exactly as spoken, echoed back in the response.
    pub op_text: String,
    pub b: f64,
}

impl WordedMath {
    /// Computes the result; `None` means division by zero, which the
    /// handler renders as a textual "undefined" rather than an error.
    pub fn compute(&self) -> Option<f64> {
        match self.op {
            WordOp::Plus => Some(self.a + self.b),
            WordOp::Minus => Some(self.a - self.b),
            WordOp::Times => Some(self.a * self.b),
            WordOp::DividedBy => {
                if self.b == 0.0 {
                    None
                } else {
                    Some(self.a / self.b)
                }
            }
        }
    }
}

/// Recognizes the first worded-math phrase in a lower-cased utterance.
pub fn worded_math(lower: &str) -> Option<WordedMath> {
    let captures = WORDED_MATH_RE.captures(lower)?;
    let a: f64 = captures.get(1)?.as_str().parse().ok()?;
    let op_text = captures.get(2)?.as_str().to_string();
    let b: f64 = captures.get(3)?.as_str().parse().ok()?;
    let op = match op_text.as_str() {
        "plus" => WordOp::Plus,
        "minus" => WordOp::Minus,
        "times" | "multiplied by" | "into" | "x" => WordOp::Times,
        "divided by" => WordOp::DividedBy,
        _ => return None,
    };
    Some(WordedMath { a, op, op_text, b })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Pow,
    LParen,
    RParen,
}

fn tokenize(residue: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = residue.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && matches!(chars[i], '0'..='9' | '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidExpression)?;
                tokens.push(Token::Num(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Pow);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ => return Err(CalcError::InvalidExpression),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.power()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.pos += 1;
                    value *= self.power()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.power()?;
                    if divisor == 0.0 {
                        return Err(CalcError::InvalidExpression);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // `**` is right-associative and binds tighter than `*`/`/`.
    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.unary()?;
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            let exponent = self.power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.advance() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expr()?;
                if self.advance() != Some(Token::RParen) {
                    return Err(CalcError::InvalidExpression);
                }
                Ok(value)
            }
            _ => Err(CalcError::InvalidExpression),
        }
    }
}
