//! Textual parsing (component B, the other half of which — formatting — lives
//! directly on [`Number`] in `number.rs`).

use crate::error::ParseError;
use crate::number::{digit_value, Digit, Sign};
use crate::Number;

impl Number {
    /// Parses a signed fixed-point literal: an optional leading `+`/`-`, a
    /// run of base-digit glyphs (`0-9A-Z`, unknown characters permissively
    /// read as digit value 0 — see SPEC_FULL.md §9), and at most one `.`.
    ///
    /// Returns [`ParseError::Empty`] if the input has no digit characters at
    /// all, and [`ParseError::MultipleRadixPoints`] if more than one `.`
    /// appears.
    pub fn parse(text: &str) -> Result<Number, ParseError> {
        let mut sign = Sign::Pos;
        let mut digits: Vec<Digit> = Vec::with_capacity(text.len());
        let mut point_at: Option<usize> = None;
        let mut saw_point = false;

        for &b in text.as_bytes() {
            match b {
                b'.' => {
                    if saw_point {
                        return Err(ParseError::MultipleRadixPoints);
                    }
                    saw_point = true;
                    point_at = Some(digits.len());
                }
                b'+' => sign = Sign::Pos,
                b'-' => sign = Sign::Neg,
                c => digits.push(digit_value(c)),
            }
        }

        if digits.is_empty() {
            return Err(ParseError::Empty);
        }

        let lp = point_at.unwrap_or(digits.len());
        let rp = digits.len() - lp;
        Ok(Number::from_digits(digits, sign, lp, rp))
    }
}
