use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::coefficient::*;

impl Coefficient for BigRational {

    const IS_FIELD: bool = true;

    fn characteristic() -> u64 {
        0
    }

    fn from_int(value: i64) -> Self {
        BigRational::from_integer(BigInt::from(value))
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            None
        } else {
            Some(self / rhs)
        }
    }
}

impl OrderedCoefficient for BigRational {

    fn is_neg(&self) -> bool {
        Signed::is_negative(self)
    }

    fn is_pos(&self) -> bool {
        Signed::is_positive(self)
    }

    fn abs(&self) -> Self {
        Signed::abs(self)
    }
}

impl RationalCoefficient for BigRational {

    fn numerator(&self) -> BigInt {
        self.numer().clone()
    }

    fn denominator(&self) -> BigInt {
        self.denom().clone()
    }

    fn from_fraction(num: BigInt, den: BigInt) -> Self {
        assert!(!den.is_zero(), "denominator must be nonzero");
        BigRational::new(num, den)
    }

    fn is_integral(&self) -> bool {
        self.denom().is_one()
    }
}

///
/// Shorthand for creating the rational `num/den`, mainly used in tests and examples.
///
pub fn rational(num: i64, den: i64) -> BigRational {
    <BigRational as RationalCoefficient>::from_fraction(BigInt::from(num), BigInt::from(den))
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn edge_case_elements() -> impl Iterator<Item = BigRational> {
    (-3..4).flat_map(|x| (1..4).map(move |y| rational(x, y)))
}

#[test]
fn test_coefficient_axioms() {
    LogAlgorithmSubscriber::init_test();
    let half = rational(1, 2);
    assert_eq!(BigRational::one(), half.clone() + half.clone());
    generic_tests::test_coefficient_axioms(edge_case_elements());
    generic_tests::test_ordered_coefficient_axioms(edge_case_elements());
}

#[test]
fn test_rational_gcd_lcm() {
    LogAlgorithmSubscriber::init_test();
    assert_eq!(rational(1, 6), RationalCoefficient::gcd(&rational(1, 2), &rational(2, 3)));
    assert_eq!(rational(2, 1), RationalCoefficient::lcm(&rational(1, 2), &rational(2, 3)));
    assert_eq!(rational(2, 1), RationalCoefficient::gcd(&rational(4, 1), &rational(-6, 1)));
    assert_eq!(rational(3, 4), RationalCoefficient::gcd(&rational(0, 1), &rational(3, 4)));
    assert!(RationalCoefficient::gcd(&rational(-3, 5), &rational(9, 10)).is_pos());
}

#[test]
fn test_numerator_denominator() {
    LogAlgorithmSubscriber::init_test();
    let value = rational(6, -4);
    assert_eq!(BigInt::from(-3), value.numerator());
    assert_eq!(BigInt::from(2), value.denominator());
    assert!(!value.is_integral());
    assert!(rational(8, 4).is_integral());
    assert_eq!(rational(9, 4), Coefficient::pow(&rational(-3, 2), 2));
}
