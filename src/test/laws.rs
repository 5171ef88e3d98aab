//! Randomized algebraic law tests (L1-L9).

use rand::Rng;

use crate::{add, compare, convert, div, mul, rem, sub, Number};

/// Generates a random signed fixed-point literal with up to `int_digits`
/// integer digits and up to `frac_digits` fractional digits.
fn random_number(int_digits: usize, frac_digits: usize) -> Number {
    let mut rng = rand::thread_rng();
    let mut s = String::new();
    if rng.gen_bool(0.3) {
        s.push('-');
    }
    let lead = rng.gen_range(1..=int_digits.max(1));
    for _ in 0..lead {
        s.push((b'0' + rng.gen_range(0..10)) as char);
    }
    if frac_digits > 0 && rng.gen_bool(0.7) {
        s.push('.');
        let trail = rng.gen_range(1..=frac_digits);
        for _ in 0..trail {
            s.push((b'0' + rng.gen_range(0..10)) as char);
        }
    }
    Number::parse(&s).unwrap()
}

const TRIALS: usize = 200;

#[test]
fn l1_add_is_commutative() {
    for _ in 0..TRIALS {
        let a = random_number(6, 6);
        let b = random_number(6, 6);
        assert_eq!(add(&a, &b, 10), add(&b, &a, 10));
    }
}

#[test]
fn l2_add_zero_is_identity() {
    for _ in 0..TRIALS {
        let a = random_number(6, 6);
        assert_eq!(add(&a, &Number::zero(), 10), a);
    }
}

#[test]
fn l3_sub_self_is_zero() {
    for _ in 0..TRIALS {
        let a = random_number(6, 6);
        assert!(sub(&a, &a, 10).is_zero());
    }
}

#[test]
fn l4_mul_is_commutative() {
    for _ in 0..TRIALS {
        let a = random_number(5, 3);
        let b = random_number(5, 3);
        assert_eq!(mul(&a, &b, 10, 8), mul(&b, &a, 10, 8));
    }
}

#[test]
fn l5_mul_one_is_identity() {
    let one = Number::parse("1").unwrap();
    for _ in 0..TRIALS {
        let a = random_number(6, 4);
        let scale = a.rp();
        assert_eq!(mul(&a, &one, 10, scale), a);
    }
}

#[test]
fn l6_div_mod_reconstructs_dividend() {
    for _ in 0..TRIALS {
        let a = random_number(6, 0);
        let mut b = random_number(4, 0);
        if b.is_zero() {
            b = Number::parse("1").unwrap();
        }
        let q = div(&a, &b, 10, 0).unwrap();
        let r = rem(&a, &b, 10, 0).unwrap();
        let reconstructed = add(&mul(&q, &b, 10, 0), &r, 10);
        assert_eq!(reconstructed, a);
    }
}

#[test]
fn l7_compare_is_antisymmetric_and_transitive() {
    for _ in 0..TRIALS {
        let a = random_number(6, 6);
        let b = random_number(6, 6);
        let c = random_number(6, 6);
        assert_eq!(compare(&a, &b, 10).reverse(), compare(&b, &a, 10));
        if compare(&a, &b, 10) != std::cmp::Ordering::Greater
            && compare(&b, &c, 10) != std::cmp::Ordering::Greater
        {
            assert_ne!(compare(&a, &c, 10), std::cmp::Ordering::Greater);
        }
    }
}

#[test]
fn l8_convert_round_trips_exactly_representable_integers() {
    for _ in 0..TRIALS {
        let a = random_number(5, 0);
        if a.sign() == crate::Sign::Neg {
            continue;
        }
        let hex = convert(&a, 10, 16);
        let back = convert(&hex, 16, 10);
        assert_eq!(back, a);
    }
}

#[test]
fn l9_aliasing_same_operand_twice_matches_clone() {
    for _ in 0..TRIALS {
        let a = random_number(6, 4);
        let cloned = a.clone();
        assert_eq!(add(&a, &a, 10), add(&a, &cloned, 10));
        assert_eq!(mul(&a, &a, 10, 8), mul(&a, &cloned, 10, 8));
        assert_eq!(sub(&a, &a, 10), sub(&a, &cloned, 10));
    }
}
