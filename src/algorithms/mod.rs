///
/// Contains [`poly_div::poly_div_rem()`] and [`poly_div::poly_reduce()`], for division
/// with remainder of univariate polynomials.
///
pub mod poly_div;
///
/// Contains the Extended Euclidean Algorithm for univariate polynomials over fields,
/// and the euclidean gcd.
///
pub mod eea;
///
/// Contains Yun's algorithm for computing the square-free factorization of a univariate
/// polynomial.
///
pub mod poly_squarefree;
///
/// Contains [`poly_factor::poly_factor()`], which splits off the linear factors of a
/// polynomial over the rationals and computes the square-free factorization of the rest.
///
pub mod poly_factor;
