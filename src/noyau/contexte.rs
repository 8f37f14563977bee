// src/noyau/contexte.rs
//
// Contexte de précision + divisions arrondies (sans flottants).
// ---------------------------------------------------------------
// Un décimal = mantisse BigInt + échelle (valeur = mantisse × 10^-échelle).
// Les arrondis passent par bigdecimal (RoundingMode) ; seule la division
// est faite ici, sur la décomposition, avec un chiffre collant.
//
// Trois niveaux de précision coexistent dans le noyau :
// - 8 chiffres après la virgule (arrondi général)
// - 6 chiffres significatifs (sin, cos)
// - 20 chiffres significatifs (exp, ln, racines)

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use std::num::NonZeroU64;

/// Échelle d'arrondi générale (chiffres après la virgule).
pub const ECHELLE_ARRONDI: i64 = 8;

/// Précision standard (chiffres significatifs) : tan, log en base 2/10.
pub const PRECISION_STANDARD: u64 = 8;

/// Précision d'affichage de sin/cos. Volontairement plus basse que tan.
pub const PRECISION_TRIG: u64 = 6;

/// Précision des calculs intermédiaires (exp, ln, décomposition des puissances).
pub const PRECISION_HAUTE: u64 = 20;

/// Nombre de chiffres significatifs à conserver + mode d'arrondi.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contexte {
    pub precision: u64,
    pub arrondi: RoundingMode,
}

impl Contexte {
    pub const STANDARD: Contexte = Contexte::new(PRECISION_STANDARD);
    pub const TRIG: Contexte = Contexte::new(PRECISION_TRIG);
    pub const HAUTE: Contexte = Contexte::new(PRECISION_HAUTE);

    /// Arrondi demi-haut par défaut.
    pub const fn new(precision: u64) -> Self {
        Self {
            precision,
            arrondi: RoundingMode::HalfUp,
        }
    }

    /// Même contexte, quelques chiffres de plus (calculs intermédiaires).
    pub const fn elargi(self, chiffres: u64) -> Self {
        Self {
            precision: self.precision + chiffres,
            ..self
        }
    }

    /// Limite le nombre de chiffres significatifs (valeur inchangée si déjà assez courte).
    pub fn arrondir(&self, x: &BigDecimal) -> BigDecimal {
        if x.digits() <= self.precision {
            return x.clone();
        }
        let precision = NonZeroU64::new(self.precision).unwrap_or(NonZeroU64::MIN);
        let r = x.with_precision_round(precision, self.arrondi);

        // 9.995 -> 10.00 : un chiffre de trop, le dernier est un zéro
        if r.digits() > self.precision {
            let (_, s) = parties(&r);
            return r.with_scale_round(s - 1, RoundingMode::Down);
        }
        r
    }
}

/* ------------------------ Outils entiers ------------------------ */

pub(crate) fn pow10(n: u64) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Nombre de chiffres décimaux de |n| (0 compte pour 1 chiffre).
/// Pour les entiers scalés des séries ; un BigDecimal a `digits()`.
pub(crate) fn nb_chiffres(n: &BigInt) -> u64 {
    if n.is_zero() {
        return 1;
    }
    n.magnitude().to_str_radix(10).len() as u64
}

/* ------------------------ Décomposition décimale ------------------------ */

pub(crate) fn parties(x: &BigDecimal) -> (BigInt, i64) {
    x.as_bigint_and_exponent()
}

/// Partie entière (troncature vers zéro).
pub(crate) fn partie_entiere(x: &BigDecimal) -> BigInt {
    x.with_scale_round(0, RoundingMode::Down)
        .into_bigint_and_exponent()
        .0
}

/// Retire les zéros de fin après la virgule ("0.12500000" -> "0.125", "2.000" -> "2").
/// Les zéros de la partie entière restent : 100 ne devient pas 1E+2.
pub(crate) fn sans_zeros(x: &BigDecimal) -> BigDecimal {
    let n = x.normalized();
    if parties(&n).1 < 0 {
        n.with_scale(0)
    } else {
        n
    }
}

/* ------------------------ Divisions ------------------------ */

/// a / b tronqué à `echelle` décimales ; si un reste subsiste, un chiffre
/// collant (±1) est ajouté à l'échelle suivante. Tout arrondi à une échelle
/// strictement inférieure est alors exact, demis compris.
fn quotient_collant(a: &BigDecimal, b: &BigDecimal, echelle: i64) -> BigDecimal {
    let (ua, sa) = parties(a);
    let (ub, sb) = parties(b);

    let k = echelle + sb - sa;
    let (n, d) = if k >= 0 {
        (ua * pow10(k as u64), ub)
    } else {
        (ua, ub * pow10(k.unsigned_abs()))
    };

    let q = &n / &d;
    if (&n % &d).is_zero() {
        return BigDecimal::new(q, echelle);
    }
    let collant = if n.is_negative() != d.is_negative() {
        q * 10u32 - 1u32
    } else {
        q * 10u32 + 1u32
    };
    BigDecimal::new(collant, echelle + 1)
}

/// a / b avec `echelle` chiffres après la virgule (b non nul).
pub fn diviser_echelle(
    a: &BigDecimal,
    b: &BigDecimal,
    echelle: i64,
    mode: RoundingMode,
) -> BigDecimal {
    quotient_collant(a, b, echelle + 1).with_scale_round(echelle, mode)
}

/// a / b avec `ctx.precision` chiffres significatifs (b non nul).
pub fn diviser_precision(a: &BigDecimal, b: &BigDecimal, ctx: Contexte) -> BigDecimal {
    let (ua, sa) = parties(a);
    let (ub, sb) = parties(b);
    if ua.is_zero() {
        return BigDecimal::zero();
    }

    // quotient tronqué avec au moins precision+2 chiffres
    let k = ctx.precision as i64 + 3 + nb_chiffres(&ub) as i64 - nb_chiffres(&ua) as i64;
    ctx.arrondir(&quotient_collant(a, b, k - sb + sa))
}
