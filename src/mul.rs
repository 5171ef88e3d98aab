//! The multiplicative kernel (component D): long multiplication with a
//! Karatsuba fast path for large operands. See SPEC_FULL.md §4.D.

use docext::docext;

use crate::number::{Digit, Sign};
use crate::Number;

/// Below this many digits in the larger operand, long multiplication beats
/// Karatsuba's overhead (the extra additions and allocations outweigh the
/// savings from fewer single-digit products). Picked to match the order of
/// magnitude the source's Karatsuba threshold uses; see SPEC_FULL.md §4.D.
pub(crate) const KARATSUBA_THRESHOLD: usize = 32;

/// Multiplies `a` and `b` in the given `base`.
///
/// The result's fractional width is `rp_c = min(rp_a + rp_b, max(scale,
/// max(rp_a, rp_b)))` (SPEC_FULL.md §4.D): `scale` only ever narrows the
/// exact product's fraction down, never pads it out past what the product
/// naturally has.
#[must_use]
pub fn mul(a: &Number, b: &Number, base: u32, scale: usize) -> Number {
    let exact_rp = a.rp() + b.rp();
    let target_rp = exact_rp.min(scale.max(a.rp()).max(b.rp()));

    if a.is_zero() || b.is_zero() {
        let mut zero = Number::zero();
        if target_rp > 0 {
            zero.pad_fraction(target_rp);
        }
        return zero;
    }
    let sign = a.sign().xor(b.sign());
    let mut product = if a.len().max(b.len()) >= KARATSUBA_THRESHOLD {
        karatsuba_mul(a, b, base)
    } else {
        mul_core(a, b, base)
    };
    product.sign = sign;
    // Both `mul_core` and `karatsuba_mul` return the raw digit sequence of the
    // exact integer product of `a`'s and `b`'s digit arrays; the true radix
    // point sits `a.rp() + b.rp()` digits in regardless of how either kernel
    // tracked `rp` internally (`karatsuba_mul` recurses treating every
    // sub-number as a plain integer), so it is set here rather than trusted
    // from the kernel's return value.
    product.rp = exact_rp.min(product.digits.len());
    product.lp = product.digits.len() - product.rp;
    if exact_rp > target_rp {
        let drop = exact_rp - target_rp;
        product.shift_left_fraction(drop);
    }
    product.remove_leading_zeros();
    product
}

/// Schoolbook long multiplication of the magnitudes of `a` and `b`. The
/// fractional width of the result is exactly `a.rp() + b.rp()` (the caller is
/// responsible for rescaling to the requested output `scale`).
#[must_use]
pub fn mul_core(a: &Number, b: &Number, base: u32) -> Number {
    let base = base as u64;
    let ad = a.digits();
    let bd = b.digits();
    let mut acc = vec![0u64; ad.len() + bd.len()];

    for (i, &da) in ad.iter().rev().enumerate() {
        if da == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &db) in bd.iter().rev().enumerate() {
            let idx = acc.len() - 1 - (i + j);
            let prod = acc[idx] + da as u64 * db as u64 + carry;
            acc[idx] = prod % base;
            carry = prod / base;
        }
        let mut k = acc.len() - 1 - (i + bd.len());
        while carry > 0 {
            let sum = acc[k] + carry;
            acc[k] = sum % base;
            carry = sum / base;
            if k == 0 {
                break;
            }
            k -= 1;
        }
    }

    let digits: Vec<Digit> = acc.into_iter().map(|d| d as Digit).collect();
    let rp = a.rp() + b.rp();
    let lp = digits.len() - rp;
    Number::from_digits(digits, Sign::Pos, lp, rp)
}

/// Multiplies the magnitudes of `a` and `b` using the divide-and-conquer
/// Karatsuba identity on the integer digit sequences, falling back to
/// [`mul_core`] once either half drops below [`KARATSUBA_THRESHOLD`].
///
/// Splits each operand's digit sequence at its midpoint into a high half $H$
/// and low half $L$, such that the operand equals $H \cdot B^m + L$ for a
/// split point $m$. Writing $a = H_a B^m + L_a$ and $b = H_b B^m + L_b$, the
/// product expands to
/// $ab = H_a H_b B^{2m} + (H_a L_b + L_a H_b) B^m + L_a L_b$,
/// which naively needs four sub-products. Karatsuba's identity replaces the
/// middle term with one product instead of two:
/// $H_a L_b + L_a H_b = (H_a + L_a)(H_b + L_b) - H_a H_b - L_a L_b$,
/// so computing $z_2 = H_a H_b$, $z_0 = L_a L_b$, and
/// $z_1 = (H_a + L_a)(H_b + L_b) - z_2 - z_0$ gives the same result, $z_2 B^{2m}
/// + z_1 B^m + z_0$, from three recursive multiplications instead of four.
#[docext]
#[must_use]
pub fn karatsuba_mul(a: &Number, b: &Number, base: u32) -> Number {
    let n = a.len().max(b.len());
    if n < KARATSUBA_THRESHOLD {
        return mul_core(a, b, base);
    }
    let m = n / 2;

    let (a_hi, a_lo) = split_integer(a, m);
    let (b_hi, b_lo) = split_integer(b, m);

    let z2 = karatsuba_mul(&a_hi, &b_hi, base);
    let z0 = karatsuba_mul(&a_lo, &b_lo, base);

    let a_sum = crate::add_sub::add_magnitudes(&a_hi, &a_lo, base);
    let b_sum = crate::add_sub::add_magnitudes(&b_hi, &b_lo, base);
    let cross = karatsuba_mul(&a_sum, &b_sum, base);
    let z1 = crate::add_sub::sub_magnitudes(&cross, &crate::add_sub::add_magnitudes(&z2, &z0, base), base);

    let mut high = z2;
    high.shift_right_digits(2 * m);
    let mut mid = z1;
    mid.shift_right_digits(m);

    let sum = crate::add_sub::add_magnitudes(&high, &mid, base);
    crate::add_sub::add_magnitudes(&sum, &z0, base)
}

/// Splits `n`'s integer digits at `m` digits from the least-significant end,
/// returning `(high, low)` such that `n == high * base^m + low`. Both halves
/// are treated as pure integers (fractional digits are dropped; Karatsuba
/// only ever recurses on the integer parts that were padded up to a common
/// width by the caller in [`mul`]).
fn split_integer(n: &Number, m: usize) -> (Number, Number) {
    let digits = n.digits();
    let total = digits.len();
    if total <= m {
        return (Number::zero(), Number::from_digits(digits.to_vec(), Sign::Pos, total, 0));
    }
    let split_at = total - m;
    let hi = digits[..split_at].to_vec();
    let lo = digits[split_at..].to_vec();
    (
        Number::from_digits(hi, Sign::Pos, split_at, 0),
        Number::from_digits(lo, Sign::Pos, m, 0),
    )
}

/// Multiplies `n`'s magnitude by a single digit `d` in `base`. The base case
/// used by [`mul_core`]'s inner loop when a caller wants just one row of the
/// product without building the full accumulator.
#[must_use]
pub(crate) fn mul_by_digit(n: &Number, d: Digit, base: u32) -> Number {
    let base = base as u64;
    let mut acc = Vec::with_capacity(n.len() + 1);
    let mut carry = 0u64;
    for &digit in n.digits().iter().rev() {
        let prod = digit as u64 * d as u64 + carry;
        acc.push((prod % base) as Digit);
        carry = prod / base;
    }
    while carry > 0 {
        acc.push((carry % base) as Digit);
        carry /= base;
    }
    acc.reverse();
    let rp = n.rp();
    let lp = acc.len() - rp;
    Number::from_digits(acc, Sign::Pos, lp, rp)
}

impl Number {
    /// Drops the `n` least-significant (fractional) digits, narrowing `rp`.
    /// Crate-internal: used by [`mul`] to truncate a product's exact
    /// fractional width down to a requested output scale.
    pub(crate) fn shift_left_fraction(&mut self, n: usize) {
        let n = n.min(self.rp);
        self.digits.truncate(self.digits.len() - n);
        self.rp -= n;
        if self.digits.is_empty() {
            self.digits.push(0);
            self.lp = 1;
            self.rp = 0;
        }
    }
}
