//! Plural rule expressions and pluralizable keys
//!
//! A catalog configures a single rule such as `n != 1`. The rule is compiled
//! by a small recursive-descent parser into an expression tree and evaluated
//! over the count; nothing in the rule is ever executed as code. The grammar:
//!
//! ```text
//! expr    := or ( '?' expr ':' expr )?
//! or      := and ( '||' and )*
//! and     := cmp ( '&&' cmp )*
//! cmp     := sum ( ( '==' | '!=' | '===' | '!==' | '<' | '<=' | '>' | '>=' ) sum )*
//! sum     := product ( ( '+' | '-' ) product )*
//! product := unary ( ( '*' | '/' | '%' ) unary )*
//! unary   := ( '!' | '-' ) unary | atom
//! atom    := number | 'n' | 'true' | 'false' | '(' expr ')'
//! ```
//!
//! Evaluation follows JavaScript number semantics, so `NaN` compares unequal
//! to everything and an absent count never aborts a lookup.

use crate::error::RuleError;
use crate::params::Params;
use crate::options::DEFAULT_PLURAL_RULE;
use std::fmt;

/// Nesting limit for sub-expressions, counting chained operators
pub const MAX_RULE_DEPTH: usize = 64;

/// A lookup key: a plain message id or a pluralizable set of candidates
///
/// A pluralizable key lists the candidate ids in variant order, followed
/// (at the configured plural argument index) by the name of the parameter
/// holding the count: `["item", "items", "count"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey<'a> {
    /// A single message id
    Single(&'a str),
    /// Candidate ids selected by the plural rule
    Plural(Vec<&'a str>),
}

impl<'a> From<&'a str> for LookupKey<'a> {
    fn from(key: &'a str) -> Self {
        Self::Single(key)
    }
}

impl<'a> From<&'a String> for LookupKey<'a> {
    fn from(key: &'a String) -> Self {
        Self::Single(key)
    }
}

impl<'a> From<&'a [&'a str]> for LookupKey<'a> {
    fn from(candidates: &'a [&'a str]) -> Self {
        Self::Plural(candidates.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for LookupKey<'a> {
    fn from(candidates: [&'a str; N]) -> Self {
        Self::Plural(candidates.to_vec())
    }
}

impl<'a> From<&'a [String]> for LookupKey<'a> {
    fn from(candidates: &'a [String]) -> Self {
        Self::Plural(candidates.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for LookupKey<'a> {
    fn from(candidates: &'a Vec<String>) -> Self {
        Self::from(candidates.as_slice())
    }
}

/// Outcome of evaluating a rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleValue {
    /// A numeric result
    Number(f64),
    /// A boolean result
    Bool(bool),
}

impl RuleValue {
    fn to_number(self) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::Bool(b) => f64::from(u8::from(b)),
        }
    }

    fn is_truthy(self) -> bool {
        match self {
            Self::Number(n) => n != 0.0 && !n.is_nan(),
            Self::Bool(b) => b,
        }
    }

    /// The candidate index this value selects, if it names one
    #[must_use]
    pub fn as_index(self) -> Option<usize> {
        let n = self.to_number();
        if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
            Some(n as usize)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Bool(bool),
    Count,
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, n: f64) -> RuleValue {
        match self {
            Self::Number(value) => RuleValue::Number(*value),
            Self::Bool(value) => RuleValue::Bool(*value),
            Self::Count => RuleValue::Number(n),
            Self::Unary(UnaryOp::Not, operand) => RuleValue::Bool(!operand.eval(n).is_truthy()),
            Self::Unary(UnaryOp::Neg, operand) => RuleValue::Number(-operand.eval(n).to_number()),
            Self::Binary(BinaryOp::Or, left, right) => {
                let left = left.eval(n);
                if left.is_truthy() {
                    left
                } else {
                    right.eval(n)
                }
            }
            Self::Binary(BinaryOp::And, left, right) => {
                let left = left.eval(n);
                if left.is_truthy() {
                    right.eval(n)
                } else {
                    left
                }
            }
            Self::Binary(op, left, right) => apply(*op, left.eval(n), right.eval(n)),
            Self::Conditional(condition, then, otherwise) => {
                if condition.eval(n).is_truthy() {
                    then.eval(n)
                } else {
                    otherwise.eval(n)
                }
            }
        }
    }
}

#[allow(clippy::float_cmp)]
fn apply(op: BinaryOp, left: RuleValue, right: RuleValue) -> RuleValue {
    let strict_eq = || match (left, right) {
        (RuleValue::Number(a), RuleValue::Number(b)) => a == b,
        (RuleValue::Bool(a), RuleValue::Bool(b)) => a == b,
        _ => false,
    };
    let (a, b) = (left.to_number(), right.to_number());

    match op {
        BinaryOp::Eq => RuleValue::Bool(a == b),
        BinaryOp::Ne => RuleValue::Bool(a != b),
        BinaryOp::StrictEq => RuleValue::Bool(strict_eq()),
        BinaryOp::StrictNe => RuleValue::Bool(!strict_eq()),
        BinaryOp::Lt => RuleValue::Bool(a < b),
        BinaryOp::Le => RuleValue::Bool(a <= b),
        BinaryOp::Gt => RuleValue::Bool(a > b),
        BinaryOp::Ge => RuleValue::Bool(a >= b),
        BinaryOp::Add => RuleValue::Number(a + b),
        BinaryOp::Sub => RuleValue::Number(a - b),
        BinaryOp::Mul => RuleValue::Number(a * b),
        BinaryOp::Div => RuleValue::Number(a / b),
        BinaryOp::Rem => RuleValue::Number(a % b),
        BinaryOp::Or | BinaryOp::And => unreachable!("short-circuit operators are evaluated lazily"),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Count,
    Bool(bool),
    LParen,
    RParen,
    Question,
    Colon,
    Not,
    Op(BinaryOp),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Count => f.write_str("n"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Question => f.write_str("?"),
            Self::Colon => f.write_str(":"),
            Self::Not => f.write_str("!"),
            Self::Op(op) => f.write_str(match op {
                BinaryOp::Or => "||",
                BinaryOp::And => "&&",
                BinaryOp::Eq => "==",
                BinaryOp::Ne => "!=",
                BinaryOp::StrictEq => "===",
                BinaryOp::StrictNe => "!==",
                BinaryOp::Lt => "<",
                BinaryOp::Le => "<=",
                BinaryOp::Gt => ">",
                BinaryOp::Ge => ">=",
                BinaryOp::Add => "+",
                BinaryOp::Sub => "-",
                BinaryOp::Mul => "*",
                BinaryOp::Div => "/",
                BinaryOp::Rem => "%",
            }),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, RuleError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let rest = &source[pos..];
        let c = bytes[pos];

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)) {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
                .unwrap_or(rest.len());
            let text = &rest[..len];
            let value = text.parse::<f64>().map_err(|_| RuleError::InvalidNumber {
                text: text.to_string(),
                offset: start,
            })?;
            tokens.push((Token::Number(value), start));
            pos += len;
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'))
                .unwrap_or(rest.len());
            let token = match &rest[..len] {
                "n" => Token::Count,
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                other => {
                    return Err(RuleError::UnknownIdentifier {
                        name: other.to_string(),
                        offset: start,
                    })
                }
            };
            tokens.push((token, start));
            pos += len;
            continue;
        }

        let (token, len) = if rest.starts_with("===") {
            (Token::Op(BinaryOp::StrictEq), 3)
        } else if rest.starts_with("!==") {
            (Token::Op(BinaryOp::StrictNe), 3)
        } else if rest.starts_with("==") {
            (Token::Op(BinaryOp::Eq), 2)
        } else if rest.starts_with("!=") {
            (Token::Op(BinaryOp::Ne), 2)
        } else if rest.starts_with("<=") {
            (Token::Op(BinaryOp::Le), 2)
        } else if rest.starts_with(">=") {
            (Token::Op(BinaryOp::Ge), 2)
        } else if rest.starts_with("&&") {
            (Token::Op(BinaryOp::And), 2)
        } else if rest.starts_with("||") {
            (Token::Op(BinaryOp::Or), 2)
        } else {
            let token = match c {
                b'<' => Token::Op(BinaryOp::Lt),
                b'>' => Token::Op(BinaryOp::Gt),
                b'+' => Token::Op(BinaryOp::Add),
                b'-' => Token::Op(BinaryOp::Sub),
                b'*' => Token::Op(BinaryOp::Mul),
                b'/' => Token::Op(BinaryOp::Div),
                b'%' => Token::Op(BinaryOp::Rem),
                b'!' => Token::Not,
                b'(' => Token::LParen,
                b')' => Token::RParen,
                b'?' => Token::Question,
                b':' => Token::Colon,
                _ => {
                    let ch = rest.chars().next().unwrap_or_default();
                    return Err(RuleError::UnexpectedChar { ch, offset: start });
                }
            };
            (token, 1)
        };
        tokens.push((token, start));
        pos += len;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        self.pos += 1;
        token
    }

    fn unexpected(&self) -> RuleError {
        match self.tokens.get(self.pos) {
            Some((token, offset)) => RuleError::UnexpectedToken {
                found: token.to_string(),
                offset: *offset,
            },
            None => RuleError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), RuleError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn descend(&mut self) -> Result<(), RuleError> {
        self.depth += 1;
        if self.depth > MAX_RULE_DEPTH {
            Err(RuleError::TooDeep {
                limit: MAX_RULE_DEPTH,
            })
        } else {
            Ok(())
        }
    }

    fn expr(&mut self) -> Result<Expr, RuleError> {
        self.descend()?;
        let condition = self.binary_level(0)?;
        let expr = if self.peek() == Some(&Token::Question) {
            self.pos += 1;
            let then = self.expr()?;
            self.expect(&Token::Colon)?;
            let otherwise = self.expr()?;
            Expr::Conditional(Box::new(condition), Box::new(then), Box::new(otherwise))
        } else {
            condition
        };
        self.depth -= 1;
        Ok(expr)
    }

    /// Binary operators by ascending precedence.
    const LEVELS: [&'static [BinaryOp]; 5] = [
        &[BinaryOp::Or],
        &[BinaryOp::And],
        &[
            BinaryOp::Eq,
            BinaryOp::Ne,
            BinaryOp::StrictEq,
            BinaryOp::StrictNe,
            BinaryOp::Lt,
            BinaryOp::Le,
            BinaryOp::Gt,
            BinaryOp::Ge,
        ],
        &[BinaryOp::Add, BinaryOp::Sub],
        &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Rem],
    ];

    fn binary_level(&mut self, level: usize) -> Result<Expr, RuleError> {
        if level == Self::LEVELS.len() {
            return self.unary();
        }

        let mut left = self.binary_level(level + 1)?;
        let mut chained = 0;
        while let Some(Token::Op(op)) = self.peek() {
            let op = *op;
            if !Self::LEVELS[level].contains(&op) {
                break;
            }
            self.pos += 1;
            // Each operator deepens the left-leaning tree by one.
            self.descend()?;
            chained += 1;
            let right = self.binary_level(level + 1)?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        self.depth -= chained;
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, RuleError> {
        let op = match self.peek() {
            Some(Token::Not) => UnaryOp::Not,
            Some(Token::Op(BinaryOp::Sub)) => UnaryOp::Neg,
            _ => return self.atom(),
        };
        self.pos += 1;
        self.descend()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn atom(&mut self) -> Result<Expr, RuleError> {
        let error = self.unexpected();
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Bool(value)) => Ok(Expr::Bool(value)),
            Some(Token::Count) => Ok(Expr::Count),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            _ => Err(error),
        }
    }
}

/// A compiled plural rule
#[derive(Debug, Clone, PartialEq)]
pub struct PluralRule {
    source: String,
    expr: Expr,
}

impl Default for PluralRule {
    fn default() -> Self {
        Self {
            source: DEFAULT_PLURAL_RULE.to_string(),
            expr: Expr::Binary(
                BinaryOp::Ne,
                Box::new(Expr::Count),
                Box::new(Expr::Number(1.0)),
            ),
        }
    }
}

impl PluralRule {
    /// Compile a rule expression over the count variable `n`
    pub fn parse(source: &str) -> Result<Self, RuleError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.expr()?;
        if parser.pos < parser.tokens.len() {
            return Err(parser.unexpected());
        }

        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Evaluate the rule for count `n`
    #[must_use]
    pub fn evaluate(&self, n: f64) -> RuleValue {
        self.expr.eval(n)
    }

    /// The candidate index selected for count `n`
    #[must_use]
    pub fn select_index(&self, n: f64) -> Option<usize> {
        self.evaluate(n).as_index()
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// The candidate chosen from a pluralizable key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluralSelection<'a> {
    /// The concrete message id to look up
    pub key: &'a str,
    /// The variant index, reused to address list-valued messages
    pub index: usize,
}

/// Pick the candidate for a pluralizable key.
///
/// The count is read from the parameter named at `arg_index` within the
/// candidates. A missing name, parameter or parameter set counts as `NaN`.
/// When the rule selects an index the key does not have, the first candidate
/// is used; an empty key selects the empty id.
pub fn select_candidate<'a, C>(
    rule: &PluralRule,
    candidates: &[&'a str],
    arg_index: Option<usize>,
    params: Option<&Params<C>>,
) -> PluralSelection<'a> {
    let count = arg_index
        .and_then(|index| candidates.get(index))
        .and_then(|name| params.and_then(|params| params.get(name)))
        .map_or(f64::NAN, |value| value.as_number());

    match rule
        .select_index(count)
        .and_then(|index| candidates.get(index).map(|key| (index, *key)))
    {
        Some((index, key)) => PluralSelection { key, index },
        None => PluralSelection {
            key: candidates.first().copied().unwrap_or_default(),
            index: 0,
        },
    }
}
