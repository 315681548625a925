//! Equation generation
//!
//! Each difficulty tier has its own operand ranges and operation mix. Every
//! path builds its operands so the answer is an exact integer: dividends are
//! constructed as divisor × quotient and subtrahends never exceed minuends.

use std::fmt;

use rand::Rng;

use super::tier::DifficultyTier;

/// Chance a Hard equation is a two-step "a × b ± c" problem
pub const COMPLEX_CHANCE: f64 = 0.4;

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
    ];

    /// Display glyph
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "×",
            Operation::Div => "÷",
        }
    }

    pub fn apply(&self, lhs: i32, rhs: i32) -> i32 {
        match self {
            Operation::Add => lhs + rhs,
            Operation::Sub => lhs - rhs,
            Operation::Mul => lhs * rhs,
            Operation::Div => lhs / rhs,
        }
    }
}

/// A target equation. Immutable once generated; replaced on regeneration.
///
/// Only `simple` and `complex` build one, so there is always exactly one more
/// operand than operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    operands: Vec<i32>,
    operations: Vec<Operation>,
    answer: i32,
    is_complex: bool,
}

impl Equation {
    /// Two operands, one operation
    pub fn simple(lhs: i32, op: Operation, rhs: i32) -> Self {
        Self {
            operands: vec![lhs, rhs],
            operations: vec![op],
            answer: op.apply(lhs, rhs),
            is_complex: false,
        }
    }

    /// Three operands, two operations, evaluated left to right
    pub fn complex(a: i32, op1: Operation, b: i32, op2: Operation, c: i32) -> Self {
        Self {
            operands: vec![a, b, c],
            operations: vec![op1, op2],
            answer: op2.apply(op1.apply(a, b), c),
            is_complex: true,
        }
    }

    pub fn operands(&self) -> &[i32] {
        &self.operands
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn answer(&self) -> i32 {
        self.answer
    }

    pub fn is_complex(&self) -> bool {
        self.is_complex
    }

    pub fn is_correct(&self, value: i32) -> bool {
        value == self.answer
    }

    /// Re-evaluate operands left to right
    pub fn evaluate(&self) -> i32 {
        self.operations
            .iter()
            .zip(&self.operands[1..])
            .fold(self.operands[0], |acc, (op, &rhs)| op.apply(acc, rhs))
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operands[0])?;
        for (op, rhs) in self.operations.iter().zip(&self.operands[1..]) {
            write!(f, " {} {}", op.symbol(), rhs)?;
        }
        f.write_str(" = ?")
    }
}

/// Generate a new equation for the given tier.
///
/// `level` is accepted for callers that track it but does not change the
/// ranges; only the tier does.
pub fn generate<R: Rng + ?Sized>(tier: DifficultyTier, _level: u32, rng: &mut R) -> Equation {
    match tier {
        DifficultyTier::Easy => generate_easy(rng),
        DifficultyTier::Medium => generate_medium(rng),
        DifficultyTier::Hard => generate_hard(rng),
    }
}

fn pick_operation<R: Rng + ?Sized>(rng: &mut R) -> Operation {
    Operation::ALL[rng.random_range(0..Operation::ALL.len())]
}

/// Minuend in `minuend_range`, subtrahend in `[min_sub, minuend - 1]`
fn subtraction<R: Rng + ?Sized>(
    rng: &mut R,
    minuend_range: std::ops::RangeInclusive<i32>,
    min_sub: i32,
) -> Equation {
    let minuend = rng.random_range(minuend_range);
    let subtrahend = rng.random_range(min_sub..minuend);
    Equation::simple(minuend, Operation::Sub, subtrahend)
}

/// Dividend built as divisor × quotient so the answer is exact
fn division<R: Rng + ?Sized>(
    rng: &mut R,
    divisor_range: std::ops::RangeInclusive<i32>,
    quotient_range: std::ops::RangeInclusive<i32>,
) -> Equation {
    let divisor = rng.random_range(divisor_range);
    let quotient = rng.random_range(quotient_range);
    Equation::simple(divisor * quotient, Operation::Div, divisor)
}

fn generate_easy<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    if rng.random_bool(0.5) {
        let a = rng.random_range(1..=10);
        let b = rng.random_range(1..=10);
        Equation::simple(a, Operation::Add, b)
    } else {
        subtraction(rng, 10..=19, 1)
    }
}

fn generate_medium<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    match pick_operation(rng) {
        Operation::Add => {
            let a = rng.random_range(1..=20);
            let b = rng.random_range(1..=20);
            Equation::simple(a, Operation::Add, b)
        }
        Operation::Sub => subtraction(rng, 10..=29, 1),
        Operation::Mul => {
            let a = rng.random_range(1..=12);
            let b = rng.random_range(1..=12);
            Equation::simple(a, Operation::Mul, b)
        }
        Operation::Div => division(rng, 2..=13, 2..=13),
    }
}

fn generate_hard<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    if rng.random_bool(COMPLEX_CHANCE) {
        return generate_hard_complex(rng);
    }

    match pick_operation(rng) {
        Operation::Add => {
            let a = rng.random_range(20..=100);
            let b = rng.random_range(20..=100);
            Equation::simple(a, Operation::Add, b)
        }
        Operation::Sub => subtraction(rng, 50..=130, 20),
        Operation::Mul => {
            let a = rng.random_range(1..=20);
            let b = rng.random_range(1..=20);
            Equation::simple(a, Operation::Mul, b)
        }
        Operation::Div => division(rng, 5..=19, 5..=29),
    }
}

/// "a × b + c" or "a × b - c"
fn generate_hard_complex<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    let a = rng.random_range(6..=15);
    let b = rng.random_range(6..=15);
    let product = a * b;

    if rng.random_bool(0.5) {
        let c = rng.random_range(5..=50);
        Equation::complex(a, Operation::Mul, b, Operation::Add, c)
    } else {
        let max_sub = (product - 5).min(50);
        let c = if max_sub > 0 {
            rng.random_range(5..=max_sub.max(5))
        } else {
            rng.random_range(1..=20)
        };
        Equation::complex(a, Operation::Mul, b, Operation::Sub, c)
    }
}
