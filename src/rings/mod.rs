
///
/// Implementation of the coefficient traits for the rational numbers, as given by
/// [`num_rational::BigRational`].
///
pub mod rational;
///
/// Implementation of the coefficient traits for the integers, as given by
/// [`num_bigint::BigInt`].
///
pub mod integer;
///
/// Contains [`zn::Fp`], the prime field `Z/pZ` for a prime `p` known at compile time.
///
pub mod zn;
///
/// Contains [`poly::UnivariatePolynomial`], dense univariate polynomials over some
/// coefficient ring.
///
pub mod poly;
