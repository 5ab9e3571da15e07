use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

///
/// Basic trait for the coefficients of polynomials. This describes a commutative ring
/// with exact arithmetic, which is possibly a field.
///
/// Whether the ring is a field is not encoded in the type system, but exposed as the
/// capability marker [`Coefficient::IS_FIELD`]. Algorithms that behave differently over
/// fields and over general rings (e.g. polynomial division) branch on this marker, and
/// operations that only make sense over fields (e.g. making a polynomial monic) assert it.
///
/// The ordering required by [`Ord`] only has to be a total order that is compatible with
/// equality, it need not be compatible with the arithmetic. Coefficient rings whose ordering
/// is compatible with the arithmetic additionally implement [`OrderedCoefficient`].
///
pub trait Coefficient: Clone + Eq + Ord + Hash + Debug + Display + Zero + One
    + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    ///
    /// Whether every nonzero element has a multiplicative inverse.
    ///
    const IS_FIELD: bool;

    ///
    /// Returns the characteristic of the ring, where `0` stands for characteristic zero.
    ///
    fn characteristic() -> u64;

    fn from_int(value: i64) -> Self;

    ///
    /// Computes some `q` with `self = q * rhs`, if it exists. If `IS_FIELD` holds, this
    /// returns `Some` for every nonzero `rhs`.
    ///
    fn checked_div(&self, rhs: &Self) -> Option<Self>;

    ///
    /// Divides by `rhs`, assuming that the division is exact.
    ///
    fn div_exact(&self, rhs: &Self) -> Self {
        assert!(!rhs.is_zero(), "division by zero");
        match self.checked_div(rhs) {
            Some(result) => result,
            None => panic!("{} is not divisible by {}", self, rhs)
        }
    }

    fn pow(&self, exp: usize) -> Self {
        let mut result = Self::one();
        let mut power = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result * power.clone();
            }
            e >>= 1;
            if e > 0 {
                power = power.clone() * power;
            }
        }
        return result;
    }
}

///
/// Trait for coefficient rings with a total ordering that is compatible with addition
/// and multiplication in the usual sense, i.e. subrings of the real numbers.
///
pub trait OrderedCoefficient: Coefficient {

    fn is_neg(&self) -> bool {
        *self < Self::zero()
    }

    fn is_pos(&self) -> bool {
        *self > Self::zero()
    }

    fn abs(&self) -> Self {
        if self.is_neg() {
            -self.clone()
        } else {
            self.clone()
        }
    }
}

///
/// Trait for the field of rationals, or more generally, any ordered subfield of the
/// rationals in which every element can be written as a fraction of two integers.
///
/// The gcd and lcm of two rationals are defined componentwise, i.e.
/// `gcd(a/b, c/d) = gcd(a, c) / lcm(b, d)` and `lcm(a/b, c/d) = lcm(a, c) / gcd(b, d)`
/// for reduced fractions. In particular, the gcd of two rationals is always nonnegative,
/// and `a/b` divided by `gcd(a/b, c/d)` is an integer.
///
pub trait RationalCoefficient: OrderedCoefficient {

    ///
    /// The numerator of the reduced fraction representing this element. The sign of the
    /// element is carried by the numerator.
    ///
    fn numerator(&self) -> BigInt;

    ///
    /// The (always positive) denominator of the reduced fraction representing this element.
    ///
    fn denominator(&self) -> BigInt;

    fn from_fraction(num: BigInt, den: BigInt) -> Self;

    fn from_integer(value: BigInt) -> Self {
        Self::from_fraction(value, BigInt::one())
    }

    fn is_integral(&self) -> bool {
        self.denominator().is_one()
    }

    fn gcd(&self, rhs: &Self) -> Self {
        Self::from_fraction(
            Integer::gcd(&self.numerator(), &rhs.numerator()),
            Integer::lcm(&self.denominator(), &rhs.denominator())
        )
    }

    fn lcm(&self, rhs: &Self) -> Self {
        Self::from_fraction(
            Integer::lcm(&self.numerator(), &rhs.numerator()),
            Integer::gcd(&self.denominator(), &rhs.denominator())
        )
    }
}

///
/// Trait for rings of integers, i.e. non-field coefficient rings with a gcd and a
/// remainder operation.
///
pub trait IntegerCoefficient: OrderedCoefficient {

    ///
    /// The nonnegative greatest common divisor.
    ///
    fn gcd(&self, rhs: &Self) -> Self;

    ///
    /// The nonnegative least common multiple.
    ///
    fn lcm(&self, rhs: &Self) -> Self;

    ///
    /// Computes the remainder of `self` modulo `modulus`. The result has the sign of
    /// `self`, i.e. this is `|self| mod |modulus|`, negated if `self` is negative.
    ///
    fn modulo(&self, modulus: &Self) -> Self;
}

///
/// Returns all positive divisors of the given integer, in ascending order. Zero has
/// no divisors in this sense, so an empty list is returned.
///
pub fn positive_divisors(n: &BigInt) -> Vec<BigInt> {
    let n = Signed::abs(n);
    if n.is_zero() {
        return Vec::new();
    }
    let mut lower = Vec::new();
    let mut upper = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= n {
        if (&n % &d).is_zero() {
            let other = &n / &d;
            if other != d {
                upper.push(other);
            }
            lower.push(d.clone());
        }
        d += 1;
    }
    lower.extend(upper.into_iter().rev());
    return lower;
}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::*;

    pub fn test_coefficient_axioms<C: Coefficient, I: Iterator<Item = C>>(edge_case_elements: I) {
        let elements = edge_case_elements.collect::<Vec<_>>();
        let zero = C::zero();
        let one = C::one();
        assert!(zero != one || C::characteristic() == 1);
        assert_eq!(C::from_int(2), one.clone() + one.clone());
        assert_eq!(C::from_int(-1), -one.clone());

        for a in &elements {
            assert_eq!(*a, a.clone() + zero.clone());
            assert_eq!(*a, a.clone() * one.clone());
            assert_eq!(zero, a.clone() - a.clone());
            assert_eq!(zero, a.clone() * zero.clone());
            assert_eq!(a.clone() * a.clone(), a.pow(2));
            assert_eq!(one, a.pow(0));
            for b in &elements {
                assert_eq!(a.clone() + b.clone(), b.clone() + a.clone());
                assert_eq!(a.clone() * b.clone(), b.clone() * a.clone());
                if !b.is_zero() {
                    if let Some(quo) = (a.clone() * b.clone()).checked_div(b) {
                        assert_eq!(a.clone() * b.clone(), quo * b.clone());
                    } else {
                        panic!("{} * {} is not divisible by {}", a, b, b);
                    }
                    if C::IS_FIELD {
                        assert!(a.checked_div(b).is_some());
                    }
                }
                for c in &elements {
                    assert_eq!(a.clone() * (b.clone() + c.clone()), a.clone() * b.clone() + a.clone() * c.clone());
                    assert_eq!((a.clone() + b.clone()) + c.clone(), a.clone() + (b.clone() + c.clone()));
                }
            }
        }
    }

    pub fn test_ordered_coefficient_axioms<C: OrderedCoefficient, I: Iterator<Item = C>>(edge_case_elements: I) {
        let elements = edge_case_elements.collect::<Vec<_>>();
        for a in &elements {
            assert!(!a.abs().is_neg());
            assert_eq!(a.abs(), (-a.clone()).abs());
            assert!(a.is_zero() || a.is_neg() != a.is_pos());
            for b in &elements {
                if a < b {
                    for c in &elements {
                        assert!(a.clone() + c.clone() < b.clone() + c.clone());
                        if c.is_pos() {
                            assert!(a.clone() * c.clone() < b.clone() * c.clone());
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_positive_divisors() {
    let divisors = |n: i64| positive_divisors(&BigInt::from(n)).into_iter().map(|d| i64::try_from(d).unwrap()).collect::<Vec<_>>();
    assert_eq!(vec![1, 2, 3, 4, 6, 12], divisors(12));
    assert_eq!(vec![1, 2, 3, 4, 6, 12], divisors(-12));
    assert_eq!(vec![1, 3, 9], divisors(9));
    assert_eq!(vec![1], divisors(1));
    assert_eq!(Vec::<i64>::new(), divisors(0));
    assert_eq!(vec![1, 97], divisors(97));
}
