//! The divisive kernel (component E): Knuth Algorithm D long division, and
//! modulo built on top of it. See SPEC_FULL.md §4.E.

use docext::docext;

use crate::error::ArithError;
use crate::number::{Digit, Sign};
use crate::Number;

/// Divides `num` by `den` in `base`, producing a quotient with `scale`
/// fractional digits.
///
/// Implements Knuth's Algorithm D: the numerator is rescaled so that an
/// integer long division directly yields `scale` fractional quotient digits,
/// then [`long_divide`] does the digit-by-digit work.
pub fn div(num: &Number, den: &Number, base: u32, scale: usize) -> Result<Number, ArithError> {
    if den.is_zero() {
        return Err(ArithError::DivideByZero);
    }
    if num.is_zero() {
        let mut zero = Number::zero();
        if scale > 0 {
            zero.pad_fraction(scale);
        }
        return Ok(zero);
    }

    let sign = num.sign().xor(den.sign());

    let shift = den.rp() as isize + scale as isize - num.rp() as isize;
    let mut numerator_digits: Vec<Digit> = num.digits().to_vec();
    if shift > 0 {
        numerator_digits.extend(std::iter::repeat(0).take(shift as usize));
    } else if shift < 0 {
        let drop = (-shift) as usize;
        let new_len = numerator_digits.len().saturating_sub(drop);
        numerator_digits.truncate(new_len);
    }
    let denominator_digits: Vec<Digit> = den.digits().to_vec();

    let (quotient_digits, _remainder) = long_divide(&numerator_digits, &denominator_digits, base)?;

    let rp = scale.min(quotient_digits.len());
    let lp = quotient_digits.len() - rp;
    let mut q = Number::from_digits(quotient_digits, Sign::Pos, lp, rp);
    if scale > q.rp() {
        q.pad_fraction(scale - q.rp());
    }
    if !q.is_zero() {
        q.sign = sign;
    }
    Ok(q)
}

/// Computes `a mod b` in `base`: `a - floor(a / b) * b`, carrying the sign of
/// `a` (or zero).
///
/// The intermediate quotient is computed to `newscale = max(a.len(), b.len() +
/// scale)` fractional digits, enough that multiplying it back out by `b`
/// cannot lose precision relative to `a`; see SPEC_FULL.md §4.E.
pub fn rem(a: &Number, b: &Number, base: u32, scale: usize) -> Result<Number, ArithError> {
    if b.is_zero() {
        return Err(ArithError::DivideByZero);
    }
    if a.is_zero() {
        let mut zero = Number::zero();
        if scale > 0 {
            zero.pad_fraction(scale);
        }
        return Ok(zero);
    }
    let newscale = a.len().max(b.len() + scale);
    let q = div(a, b, base, newscale)?;
    let product = crate::mul::mul(&q, b, base, scale.max(a.rp()));
    Ok(crate::add_sub::sub(a, &product, base))
}

/// Long-divides the most-significant-first integer digit sequence `num` by
/// `den`, both taken as plain non-negative integers, returning
/// `(quotient_digits, remainder_digits)` most-significant first.
///
/// Single-digit divisors take a fast linear pass. Multi-digit divisors use
/// Knuth's normalize-estimate-correct scheme: the divisor is scaled so its
/// leading digit is at least $\lfloor B/2 \rfloor$, and each quotient digit
/// $\hat{q}$ is estimated from the divisor's top two digits,
/// $\hat{q} = \lfloor (u_j B + u_{j+1}) / v_1 \rfloor$, then refined downward
/// while $\hat{q} v_2 > (\hat{r} B + u_{j+2})$, where $\hat{r}$ is the
/// estimate's running remainder. This bounds $\hat{q}$'s error against the
/// true digit to at most one too high, caught and corrected by the one
/// possible add-back below.
#[docext]
fn long_divide(num: &[Digit], den: &[Digit], base: u32) -> Result<(Vec<Digit>, Vec<Digit>), ArithError> {
    let den = trim_leading(den);
    if den.iter().all(|&d| d == 0) {
        return Err(ArithError::DivideByZero);
    }
    let num = trim_leading(num);

    if den.len() == 1 {
        return Ok(divide_by_single_digit(num, den[0], base));
    }

    if compare_digits(num, den) == std::cmp::Ordering::Less {
        return Ok((vec![0], num.to_vec()));
    }

    let base_u = base as u64;
    let norm = base_u / (den[0] as u64 + 1);
    let den_norm = normalize(den, norm, base);
    let mut num_norm = normalize(num, norm, base);
    if num_norm.len() == num.len() {
        num_norm.insert(0, 0);
    }

    let n = den_norm.len();
    let m = num_norm.len() - n;
    let mut quotient = vec![0 as Digit; m];

    for j in 0..m {
        let top2 = num_norm[j] as u64 * base_u + num_norm[j + 1] as u64;
        let mut qhat = top2 / den_norm[0] as u64;
        let mut rhat = top2 % den_norm[0] as u64;

        while qhat >= base_u
            || (n > 1 && qhat * den_norm[1] as u64 > rhat * base_u + num_norm[j + 2] as u64)
        {
            qhat -= 1;
            rhat += den_norm[0] as u64;
            if rhat >= base_u {
                break;
            }
        }

        let borrowed = multiply_and_subtract(&mut num_norm[j..=j + n], &den_norm, qhat, base);
        if borrowed {
            qhat -= 1;
            add_back(&mut num_norm[j..=j + n], &den_norm, base);
        }
        quotient[j] = qhat as Digit;
    }

    let remainder = denormalize(&num_norm[m..], norm, base);
    Ok((trim_leading(&quotient).to_vec(), remainder))
}

fn divide_by_single_digit(num: &[Digit], d: Digit, base: u32) -> (Vec<Digit>, Vec<Digit>) {
    let base = base as u64;
    let d = d as u64;
    let mut quotient = Vec::with_capacity(num.len());
    let mut rem = 0u64;
    for &digit in num {
        let cur = rem * base + digit as u64;
        quotient.push((cur / d) as Digit);
        rem = cur % d;
    }
    (trim_leading(&quotient).to_vec(), vec![rem as Digit])
}

/// Scales `digits` up by `factor` (a single-digit multiply-and-carry pass),
/// used to bring the divisor's leading digit up to at least `base / 2`.
fn normalize(digits: &[Digit], factor: u64, base: u32) -> Vec<Digit> {
    if factor <= 1 {
        return digits.to_vec();
    }
    let base = base as u64;
    let mut out = Vec::with_capacity(digits.len() + 1);
    let mut carry = 0u64;
    for &d in digits.iter().rev() {
        let prod = d as u64 * factor + carry;
        out.push((prod % base) as Digit);
        carry = prod / base;
    }
    if carry > 0 {
        out.push(carry as Digit);
    }
    out.reverse();
    out
}

fn denormalize(digits: &[Digit], factor: u64, base: u32) -> Vec<Digit> {
    if factor <= 1 {
        return digits.to_vec();
    }
    divide_by_single_digit(digits, factor as Digit, base).0
}

/// Subtracts `qhat * den` from `window` (which holds one extra leading digit
/// beyond `den`'s width) in place, returning `true` if the subtraction
/// borrowed past the top — meaning `qhat` was one too big.
fn multiply_and_subtract(window: &mut [Digit], den: &[Digit], qhat: u64, base: u32) -> bool {
    let base = base as i64;
    let n = den.len();
    let mut borrow = 0i64;
    let mut carry = 0i64;
    for i in (0..n).rev() {
        let prod = qhat as i64 * den[i] as i64 + carry;
        carry = prod / base;
        let mut diff = window[i + 1] as i64 - (prod % base) - borrow;
        if diff < 0 {
            diff += base;
            borrow = 1;
        } else {
            borrow = 0;
        }
        window[i + 1] = diff as Digit;
    }
    let diff = window[0] as i64 - carry - borrow;
    window[0] = diff.rem_euclid(base) as Digit;
    diff < 0
}

/// Adds `den` back into `window` in place, undoing one subtraction too many
/// after a `qhat` over-estimate.
fn add_back(window: &mut [Digit], den: &[Digit], base: u32) {
    let base = base as i64;
    let n = den.len();
    let mut carry = 0i64;
    for i in (0..n).rev() {
        let sum = window[i + 1] as i64 + den[i] as i64 + carry;
        window[i + 1] = (sum % base) as Digit;
        carry = sum / base;
    }
    window[0] = ((window[0] as i64 + carry) % base) as Digit;
}

fn trim_leading(digits: &[Digit]) -> &[Digit] {
    let mut i = 0;
    while i + 1 < digits.len() && digits[i] == 0 {
        i += 1;
    }
    &digits[i..]
}

fn compare_digits(a: &[Digit], b: &[Digit]) -> std::cmp::Ordering {
    let a = trim_leading(a);
    let b = trim_leading(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
