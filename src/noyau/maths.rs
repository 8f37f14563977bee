// src/noyau/maths.rs
//
// Bibliothèque de fonctions à précision arbitraire (pures, sans état).
// Toutes prennent et rendent des BigDecimal ; les cas hors domaine
// renvoient une ErreurCalcul, jamais une valeur inventée.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::num::NonZeroU32;

use super::constantes::{limite_factorielle, ln10_scaled, ln2_scaled};
use super::contexte::{
    diviser_echelle, diviser_precision, parties, partie_entiere, pow10, sans_zeros, Contexte,
    ECHELLE_ARRONDI, PRECISION_HAUTE,
};
use super::erreur::{ErreurCalcul, Resultat};
use super::fraction::{est_fraction, Fraction};
use super::serie::{echelle_exp, evaluer_adaptatif, exp_scaled, ln_scaled, vers_scaled};

/* ------------------------ exp / ln / log ------------------------ */

/// e^x, 20 chiffres significatifs.
pub fn exp(x: &BigDecimal) -> BigDecimal {
    exp_contexte(x, Contexte::HAUTE)
}

fn exp_contexte(x: &BigDecimal, ctx: Contexte) -> BigDecimal {
    if x.is_zero() {
        return BigDecimal::one();
    }
    if x.is_negative() {
        // e^-x = 1 / e^x, quelques chiffres de plus avant la division
        let inverse = exp_contexte(&-x, ctx.elargi(5));
        return diviser_precision(&BigDecimal::one(), &inverse, ctx);
    }

    let w = echelle_exp(x, ctx.precision);
    let v = exp_scaled(&vers_scaled(x, w), w);
    ctx.arrondir(&BigDecimal::new(v, w as i64))
}

fn verifier_log(x: &BigDecimal) -> Resultat<()> {
    match x.sign() {
        Sign::Minus => Err(ErreurCalcul::NegativeLogArgument),
        Sign::NoSign => Err(ErreurCalcul::ZeroLogArgument),
        Sign::Plus => Ok(()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Base {
    E,
    Deux,
    Dix,
}

/// log_base(x), x > 0 déjà vérifié.
fn log_contexte(x: &BigDecimal, base: Base, ctx: Contexte) -> BigDecimal {
    if x.is_one() {
        return BigDecimal::zero();
    }
    let v = evaluer_adaptatif(ctx.precision, |w| {
        let ln_x = ln_scaled(x, w);
        match base {
            Base::E => ln_x,
            Base::Deux => (ln_x * pow10(w)) / ln2_scaled(w),
            Base::Dix => (ln_x * pow10(w)) / ln10_scaled(w),
        }
    });
    ctx.arrondir(&v)
}

/// ln(x), 20 chiffres significatifs.
pub fn ln(x: &BigDecimal) -> Resultat<BigDecimal> {
    verifier_log(x)?;
    Ok(log_contexte(x, Base::E, Contexte::HAUTE))
}

/// log10(x), 20 chiffres significatifs.
pub fn log10(x: &BigDecimal) -> Resultat<BigDecimal> {
    verifier_log(x)?;
    Ok(log_contexte(x, Base::Dix, Contexte::HAUTE))
}

/// log2(x), 20 chiffres significatifs.
pub fn log2(x: &BigDecimal) -> Resultat<BigDecimal> {
    verifier_log(x)?;
    Ok(log_contexte(x, Base::Deux, Contexte::HAUTE))
}

/// log en base quelconque.
/// Bases 10 et 2 : routine dédiée à 8 chiffres ; sinon log2(x)/log2(base)
/// à 20 chiffres, quotient arrondi à 8 décimales (demi-pair).
pub fn log_base(x: &BigDecimal, base: &BigDecimal) -> Resultat<BigDecimal> {
    verifier_log(x)?;
    if *base == BigDecimal::from(10) {
        return Ok(log_contexte(x, Base::Dix, Contexte::STANDARD));
    }
    if *base == BigDecimal::from(2) {
        return Ok(log_contexte(x, Base::Deux, Contexte::STANDARD));
    }

    verifier_log(base)?;
    if base.is_one() {
        return Err(ErreurCalcul::Undefined);
    }

    let log_x = log_contexte(x, Base::Deux, Contexte::HAUTE);
    let log_b = log_contexte(base, Base::Deux, Contexte::HAUTE);
    Ok(diviser_echelle(
        &log_x,
        &log_b,
        ECHELLE_ARRONDI,
        RoundingMode::HalfEven,
    ))
}

/* ------------------------ abs / division ------------------------ */

/// Valeur absolue explicite (changement de signe si négatif).
pub fn abs(x: &BigDecimal) -> BigDecimal {
    if x.is_negative() {
        -x
    } else {
        x.clone()
    }
}

/// a / b à 8 décimales (demi-pair), zéros de fin retirés.
pub fn diviser(a: &BigDecimal, b: &BigDecimal) -> Resultat<BigDecimal> {
    if b.is_zero() {
        return Err(ErreurCalcul::DivisionByZero);
    }
    Ok(sans_zeros(&diviser_echelle(
        a,
        b,
        ECHELLE_ARRONDI,
        RoundingMode::HalfEven,
    )))
}

/* ------------------------ Factorielle ------------------------ */

/// a·(a-pas)·(a-2·pas)·… tant que le facteur reste >= 1.
/// pas = 1 : produit équilibré sur [1, a] (partie entière de a).
pub fn factorielle(a: &BigDecimal, pas: NonZeroU32) -> Resultat<BigDecimal> {
    if a > limite_factorielle() {
        return Err(ErreurCalcul::FactorialLimitExceeded);
    }
    if a.is_zero() {
        return Ok(BigDecimal::one());
    }

    if pas.get() == 1 {
        if let Some(n) = partie_entiere(a).to_i64() {
            return Ok(BigDecimal::from(produit_arbre(1, n)));
        }
    }

    let un = BigDecimal::one();
    let pas = BigDecimal::from(pas.get());
    let mut x = a.clone();
    let mut acc = BigDecimal::one();
    while x >= un {
        acc = acc * &x;
        x = x - &pas;
    }
    Ok(acc)
}

/// Produit l·(l+1)·…·r, découpé en deux moitiés récursivement.
fn produit_arbre(l: i64, r: i64) -> BigInt {
    if l > r {
        return BigInt::one();
    }
    if l == r {
        return BigInt::from(l);
    }
    if r - l == 1 {
        return BigInt::from(l) * BigInt::from(r);
    }
    let m = l + (r - l) / 2;
    produit_arbre(l, m) * produit_arbre(m + 1, r)
}

/* ------------------------ floor / ceil / round ------------------------ */

/// (partie entière, partie fractionnaire, échelle) ; None si aucun chiffre après la virgule.
fn decomposer(x: &BigDecimal) -> Option<(BigInt, BigInt, u64)> {
    let (u, s) = parties(x);
    if s <= 0 {
        return None;
    }
    let s = s as u64;
    let diviseur = pow10(s);
    Some((&u / &diviseur, &u % &diviseur, s))
}

/// sign(x)·(|entier| + 1)
fn magnitude_plus_un(entier: &BigInt, negatif: bool) -> BigDecimal {
    let m = entier.abs() + 1u32;
    BigDecimal::from(if negatif { -m } else { m })
}

/// Partie entière ; pour un négatif non entier, on s'éloigne de zéro (-2.5 -> -3).
pub fn floor(x: &BigDecimal) -> BigDecimal {
    match decomposer(x) {
        None => x.clone(),
        Some((entier, frac, _)) => {
            if x.is_negative() && !frac.is_zero() {
                magnitude_plus_un(&entier, true)
            } else {
                BigDecimal::from(entier)
            }
        }
    }
}

/// Partie fractionnaire nulle -> partie entière ; sinon sign(x)·(|entier|+1).
pub fn ceil(x: &BigDecimal) -> BigDecimal {
    match decomposer(x) {
        None => x.clone(),
        Some((entier, frac, _)) => {
            if frac.is_zero() {
                BigDecimal::from(entier)
            } else {
                magnitude_plus_un(&entier, x.is_negative())
            }
        }
    }
}

/// Regarde seulement la première décimale : 0-4 -> troncature, 5-9 -> sign(x)·(|entier|+1).
pub fn round(x: &BigDecimal) -> BigDecimal {
    match decomposer(x) {
        None => x.clone(),
        Some((entier, frac, s)) => {
            let premiere = frac.abs() / pow10(s - 1);
            if premiere < BigInt::from(5) {
                BigDecimal::from(entier)
            } else {
                magnitude_plus_un(&entier, x.is_negative())
            }
        }
    }
}

/* ------------------------ Racines / puissances ------------------------ */

fn est_pair(n: &BigDecimal) -> bool {
    n.is_integer() && (partie_entiere(n) % 2u32).is_zero()
}

/// Racine n-ième : exp(ln(a)/n), quotient à 20 décimales (demi-pair).
pub fn racine(a: &BigDecimal, n: &BigDecimal) -> Resultat<BigDecimal> {
    if a.is_zero() {
        return Ok(BigDecimal::zero());
    }
    if a.is_negative() {
        // 0 est pair : racine(-8, 0) tombe ici
        if est_pair(n) {
            return Err(ErreurCalcul::EvenRootOfNegative);
        }
        if n.is_integer() {
            // degré impair : -racine(|a|)
            return racine(&-a, n).map(|r| -r);
        }
    }
    if n.is_zero() {
        return Err(ErreurCalcul::Undefined);
    }

    let log = ln(a)?;
    let quotient = diviser_echelle(&log, n, PRECISION_HAUTE as i64, RoundingMode::HalfEven);
    Ok(exp(&quotient))
}

/// √a
pub fn sqrt(a: &BigDecimal) -> Resultat<BigDecimal> {
    racine(a, &BigDecimal::from(2))
}

/// a^n.
/// - 0^n : NaN (n < 0), indéfini (n = 0), 0 (n > 0)
/// - n < 0 : 1 / a^(-n) à 8 décimales, zéros de fin retirés
/// - n fractionnaire : p/q (3 décimales) puis racine q-ième de a^p
/// - n entier : exponentiation rapide
pub fn pow(a: &BigDecimal, n: &BigDecimal) -> Resultat<BigDecimal> {
    if a.is_zero() {
        return match n.sign() {
            Sign::Minus => Err(ErreurCalcul::NaN),
            Sign::NoSign => Err(ErreurCalcul::Undefined),
            Sign::Plus => Ok(BigDecimal::zero()),
        };
    }
    if n.is_negative() {
        let resultat = pow(a, &-n)?;
        return diviser(&BigDecimal::one(), &resultat);
    }
    if est_fraction(n) {
        let fraction = Fraction::depuis_decimal(n);
        let base = puissance_entiere(a, fraction.numerateur());
        return racine(&base, &BigDecimal::from(fraction.denominateur().clone()));
    }
    Ok(puissance_entiere(a, &partie_entiere(n)))
}

/// a^n, n entier >= 0 : n impair -> a^(n-1)·a ; n pair -> (a^(n/2))².
fn puissance_entiere(a: &BigDecimal, n: &BigInt) -> BigDecimal {
    if n.is_zero() {
        return BigDecimal::one();
    }
    if !(n % 2u32).is_zero() {
        return puissance_entiere(a, &(n - 1u32)) * a;
    }
    let b = puissance_entiere(a, &(n / 2u32));
    &b * &b
}

/// a^n par exp(n·ln a), sans décomposition en fraction.
pub fn pow_par_exp(a: &BigDecimal, n: &BigDecimal) -> Resultat<BigDecimal> {
    let log = ln(a)?;
    Ok(exp(&(n * &log)))
}
