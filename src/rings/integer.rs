use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::coefficient::*;

impl Coefficient for BigInt {

    const IS_FIELD: bool = false;

    fn characteristic() -> u64 {
        0
    }

    fn from_int(value: i64) -> Self {
        BigInt::from(value)
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let (quo, rem) = self.div_rem(rhs);
        if rem.is_zero() {
            Some(quo)
        } else {
            None
        }
    }
}

impl OrderedCoefficient for BigInt {

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

impl IntegerCoefficient for BigInt {

    fn gcd(&self, rhs: &Self) -> Self {
        Integer::gcd(self, rhs)
    }

    fn lcm(&self, rhs: &Self) -> Self {
        Integer::lcm(self, rhs)
    }

    fn modulo(&self, modulus: &Self) -> Self {
        assert!(!modulus.is_zero(), "modulus must be nonzero");
        let result = Signed::abs(self).mod_floor(&Signed::abs(modulus));
        if Signed::is_negative(self) {
            -result
        } else {
            result
        }
    }
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[test]
fn test_coefficient_axioms() {
    LogAlgorithmSubscriber::init_test();
    generic_tests::test_coefficient_axioms((-6..7).map(BigInt::from));
    generic_tests::test_ordered_coefficient_axioms((-6..7).map(BigInt::from));
}

#[test]
fn test_checked_div() {
    LogAlgorithmSubscriber::init_test();
    assert_eq!(Some(BigInt::from(-3)), Coefficient::checked_div(&BigInt::from(12), &BigInt::from(-4)));
    assert_eq!(None, Coefficient::checked_div(&BigInt::from(12), &BigInt::from(5)));
    assert_eq!(None, Coefficient::checked_div(&BigInt::from(12), &BigInt::from(0)));
}

#[test]
fn test_modulo_keeps_sign_of_dividend() {
    LogAlgorithmSubscriber::init_test();
    let modulo = |a: i64, m: i64| IntegerCoefficient::modulo(&BigInt::from(a), &BigInt::from(m));
    assert_eq!(BigInt::from(2), modulo(7, 5));
    assert_eq!(BigInt::from(-2), modulo(-7, 5));
    assert_eq!(BigInt::from(2), modulo(7, -5));
    assert_eq!(BigInt::from(0), modulo(-10, 5));
}
