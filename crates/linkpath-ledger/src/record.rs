use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Column names of a ledger file, in order.
pub const HEADERS: [&str; 4] = ["operator", "int1", "int2", "answer"];

/// Arithmetic operation on two integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    /// Comma separated list of accepted operator names.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Operator::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Apply the operator to `a` and `b`.
    ///
    /// Division yields an integer when `b` divides `a` exactly and a
    /// fraction otherwise.
    pub fn apply(&self, a: i64, b: i64) -> LedgerResult<Answer> {
        let overflow = || LedgerError::Overflow(format!("{a} {} {b}", self.as_str()));
        match self {
            Operator::Add => a.checked_add(b).map(Answer::Integer).ok_or_else(overflow),
            Operator::Subtract => a.checked_sub(b).map(Answer::Integer).ok_or_else(overflow),
            Operator::Multiply => a.checked_mul(b).map(Answer::Integer).ok_or_else(overflow),
            Operator::Divide => {
                if b == 0 {
                    return Err(LedgerError::DivisionByZero);
                }
                match a.checked_rem(b) {
                    Some(0) => a.checked_div(b).map(Answer::Integer).ok_or_else(overflow),
                    Some(_) => Ok(Answer::Fraction(a as f64 / b as f64)),
                    None => Err(overflow()),
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| LedgerError::InvalidOperator(s.to_string()))
    }
}

/// Result of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Integer(i64),
    Fraction(f64),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Integer(n) => write!(f, "{n}"),
            // Keep a decimal point so the text form never reads back as an integer.
            Answer::Fraction(x) if x.fract() == 0.0 => write!(f, "{x:.1}"),
            Answer::Fraction(x) => write!(f, "{x}"),
        }
    }
}

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Answer::Integer(n));
        }
        s.parse::<f64>()
            .map(Answer::Fraction)
            .map_err(|_| format!("answer `{s}` is not a number"))
    }
}

/// One ledger row: an operation, its operands and its answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticRecord {
    pub operator: Operator,
    pub int1: i64,
    pub int2: i64,
    pub answer: Answer,
}

impl ArithmeticRecord {
    /// Build a record whose answer is computed from the operands.
    pub fn compute(operator: Operator, int1: i64, int2: i64) -> LedgerResult<Self> {
        let answer = operator.apply(int1, int2)?;
        Ok(Self {
            operator,
            int1,
            int2,
            answer,
        })
    }

    /// Build a record with a caller supplied answer. Not checked until
    /// [`validate`](Self::validate).
    pub fn new(operator: Operator, int1: i64, int2: i64, answer: Answer) -> Self {
        Self {
            operator,
            int1,
            int2,
            answer,
        }
    }

    /// Check the stored answer against a fresh computation.
    pub fn validate(&self) -> LedgerResult<()> {
        let expected = self.operator.apply(self.int1, self.int2)?;
        if expected != self.answer {
            return Err(LedgerError::Validation(format!(
                "{} {} {} should be {expected}, found {}",
                self.int1, self.operator, self.int2, self.answer
            )));
        }
        Ok(())
    }

    /// CSV fields in [`HEADERS`] order.
    pub fn to_fields(&self) -> [String; 4] {
        [
            self.operator.to_string(),
            self.int1.to_string(),
            self.int2.to_string(),
            self.answer.to_string(),
        ]
    }

    /// Parse CSV fields in [`HEADERS`] order.
    pub fn parse_fields(fields: &[&str]) -> Result<Self, String> {
        let [operator, int1, int2, answer] = fields else {
            return Err(format!("expected {} fields, found {}", HEADERS.len(), fields.len()));
        };
        let operator = operator.parse::<Operator>().map_err(|e| e.to_string())?;
        let int1 = int1
            .parse::<i64>()
            .map_err(|_| format!("int1 `{int1}` is not an integer"))?;
        let int2 = int2
            .parse::<i64>()
            .map_err(|_| format!("int2 `{int2}` is not an integer"))?;
        let answer = answer.parse::<Answer>()?;
        Ok(Self::new(operator, int1, int2, answer))
    }
}

impl fmt::Display for ArithmeticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.int1, self.operator, self.int2, self.answer
        )
    }
}
