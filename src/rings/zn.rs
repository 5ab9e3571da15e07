use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::coefficient::Coefficient;

///
/// An element of the prime field `Z/pZ` for a prime `p` that is known at compile time.
/// Elements are stored by their representative in `[0, p)`.
///
/// Primality of `P` is checked (by trial division) during compilation, once for every modulus
/// that is used. `P` must be less than `2^32`, so that products of representatives fit into `u64`.
///
/// # Example
/// ```
/// # use factorized_poly::rings::zn::*;
/// # use factorized_poly::coefficient::*;
/// let a = Fp::<7>::new(3);
/// let b = Fp::<7>::new(5);
/// assert_eq!(Fp::<7>::new(1), a * b);
/// assert_eq!(Some(Fp::<7>::new(2)), Fp::<7>::new(1).checked_div(&Fp::<7>::new(4)));
/// ```
/// A composite modulus is rejected.
/// ```compile_fail
/// # use factorized_poly::rings::zn::*;
/// let _ = Fp::<6>::new(1);
/// ```
///
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fp<const P: u64> {
    value: u64
}

const fn is_prime(p: u64) -> bool {
    if p < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= p {
        if p % d == 0 {
            return false;
        }
        d += 1;
    }
    return true;
}

impl<const P: u64> Fp<P> {

    const VALID_MODULUS: () = assert!(P < (1 << 32) && is_prime(P), "modulus is not a prime below 2^32");

    pub fn new(value: u64) -> Self {
        let () = Self::VALID_MODULUS;
        Fp { value: value % P }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    fn invert(&self) -> Option<Self> {
        if self.value == 0 {
            return None;
        }
        // Fermat's little theorem
        Some(Coefficient::pow(self, (P - 2) as usize))
    }
}

impl<const P: u64> Debug for Fp<P> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mod {}", self.value, P)
    }
}

impl<const P: u64> Display for Fp<P> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const P: u64> Add for Fp<P> {

    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Fp { value: (self.value + rhs.value) % P }
    }
}

impl<const P: u64> Sub for Fp<P> {

    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Fp { value: (self.value + P - rhs.value) % P }
    }
}

impl<const P: u64> Mul for Fp<P> {

    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Fp { value: (self.value * rhs.value) % P }
    }
}

impl<const P: u64> Neg for Fp<P> {

    type Output = Self;

    fn neg(self) -> Self {
        Fp { value: (P - self.value) % P }
    }
}

impl<const P: u64> Zero for Fp<P> {

    fn zero() -> Self {
        Fp::new(0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl<const P: u64> One for Fp<P> {

    fn one() -> Self {
        Fp::new(1)
    }
}

impl<const P: u64> Coefficient for Fp<P> {

    const IS_FIELD: bool = true;

    fn characteristic() -> u64 {
        P
    }

    fn from_int(value: i64) -> Self {
        let reduced = value.rem_euclid(P as i64) as u64;
        Fp::new(reduced)
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        rhs.invert().map(|inv| *self * inv)
    }
}

#[cfg(test)]
use crate::coefficient::generic_tests;

#[test]
fn test_coefficient_axioms() {
    generic_tests::test_coefficient_axioms((0..7).map(Fp::<7>::new));
    generic_tests::test_coefficient_axioms((0..5).map(|x| Fp::<65537>::new(x * 1000)));
}

#[test]
fn test_from_int() {
    assert_eq!(Fp::<5>::new(3), Fp::<5>::from_int(-2));
    assert_eq!(Fp::<5>::new(2), Fp::<5>::from_int(12));
    assert_eq!(5, Fp::<5>::characteristic());
}

#[test]
fn test_is_prime() {
    assert!(!is_prime(0));
    assert!(!is_prime(1));
    assert!(is_prime(2));
    assert!(!is_prime(6));
    assert!(!is_prime(65535));
    assert!(is_prime(65537));
    assert!(is_prime(4294967291));
    assert!(!is_prime(4294967295));
}

#[test]
fn test_large_modulus() {
    const P: u64 = 4294967291;
    let a = Fp::<P>::new(P - 1);
    assert_eq!(Fp::<P>::one(), a * a);
    assert_eq!(Some(a), Fp::<P>::one().checked_div(&a));
    assert_eq!(Fp::<P>::zero(), Fp::<P>::new(P));
}
