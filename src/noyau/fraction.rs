// src/noyau/fraction.rs
//
// Exposant fractionnaire -> p/q (rationnel réduit).
// L'exposant est d'abord ramené à 3 décimales (arrondi demi-bas) :
// 0.5 -> 500/1000 -> 1/2 ; 0.333 -> 333/1000.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_rational::BigRational;

use super::contexte::{parties, pow10};

/// Décimales conservées pour un exposant fractionnaire.
const DECIMALES_EXPOSANT: i64 = 3;

/// Vrai si `n` a une partie fractionnaire non nulle.
pub fn est_fraction(n: &BigDecimal) -> bool {
    !n.is_integer()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fraction(BigRational);

impl Fraction {
    pub fn depuis_decimal(n: &BigDecimal) -> Self {
        let n = n.with_scale_round(DECIMALES_EXPOSANT, RoundingMode::HalfDown);
        let (u, s) = parties(&n);
        Fraction(BigRational::new(u, pow10(s as u64)))
    }

    pub fn numerateur(&self) -> &BigInt {
        self.0.numer()
    }

    /// Toujours > 0.
    pub fn denominateur(&self) -> &BigInt {
        self.0.denom()
    }
}
