// src/noyau/constantes.rs
//
// Constantes du noyau.
// - E, PI (20 chiffres), FI (approximation 1.618, gardée telle quelle)
// - π / ln2 / ln10 en entier scalé (×10^digits), calculés une fois par précision

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use super::contexte::pow10;

/* ------------------------ Constantes publiques ------------------------ */

/// e = 2.7182818284590452354
pub fn e() -> &'static BigDecimal {
    static E: OnceLock<BigDecimal> = OnceLock::new();
    E.get_or_init(|| BigDecimal::new(BigInt::from(27_182_818_284_590_452_354u128), 19))
}

/// π = 3.14159265358979323846
pub fn pi() -> &'static BigDecimal {
    static PI: OnceLock<BigDecimal> = OnceLock::new();
    PI.get_or_init(|| BigDecimal::new(BigInt::from(314_159_265_358_979_323_846u128), 20))
}

/// Nombre d'or tronqué : 1.618 (pas (1+√5)/2).
pub fn fi() -> &'static BigDecimal {
    static FI: OnceLock<BigDecimal> = OnceLock::new();
    FI.get_or_init(|| BigDecimal::new(BigInt::from(1618), 3))
}

/// Borne supérieure acceptée par la factorielle.
pub fn limite_factorielle() -> &'static BigDecimal {
    static LIMITE: OnceLock<BigDecimal> = OnceLock::new();
    LIMITE.get_or_init(|| BigDecimal::from(100_000))
}

/* ------------------------ Séries arctan / atanh ------------------------ */

/// arctan(1/q) (ou atanh(1/q) si `alterne == false`) en entier scalé (troncature) :
/// z - z^3/3 + z^5/5 - ...
fn arc_inv_q_scaled(q: i64, scale: &BigInt, alterne: bool) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut sign_pos = true;

    // q^(2k+1)
    let mut q_pow = q.clone();
    let mut sum = BigInt::zero();

    loop {
        let denom = BigInt::from((2 * k + 1) as i64);
        let d = &q_pow * &denom;

        let term = scale / &d;
        if term.is_zero() {
            break;
        }

        if sign_pos {
            sum += &term;
        } else {
            sum -= &term;
        }

        q_pow *= &q;
        q_pow *= &q;

        if alterne {
            sign_pos = !sign_pos;
        }
        k += 1;
    }

    sum
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Serie {
    Pi,
    Ln2,
    Ln10,
}

fn serie_compute(serie: Serie, digits: u64) -> BigInt {
    // extra pour amortir les erreurs de troncature
    let extra = 10u64;
    let scale = pow10(digits + extra);

    let v = match serie {
        // Machin : π = 16*atan(1/5) - 4*atan(1/239)
        Serie::Pi => {
            BigInt::from(16) * arc_inv_q_scaled(5, &scale, true)
                - BigInt::from(4) * arc_inv_q_scaled(239, &scale, true)
        }
        // ln2 = 2*atanh(1/3)
        Serie::Ln2 => BigInt::from(2) * arc_inv_q_scaled(3, &scale, false),
        // ln10 = 3*ln2 + ln(5/4) = 6*atanh(1/3) + 2*atanh(1/9)
        Serie::Ln10 => {
            BigInt::from(6) * arc_inv_q_scaled(3, &scale, false)
                + BigInt::from(2) * arc_inv_q_scaled(9, &scale, false)
        }
    };

    // retire les digits extra
    v / pow10(extra)
}

static SERIE_CACHE: OnceLock<Mutex<HashMap<(Serie, u64), BigInt>>> = OnceLock::new();

fn serie_cached(serie: Serie, digits: u64) -> BigInt {
    let m = SERIE_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // le cache ne contient que des valeurs complètes : un verrou empoisonné reste lisible
    let mut guard = m.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(v) = guard.get(&(serie, digits)) {
        return v.clone();
    }

    let v = serie_compute(serie, digits);
    guard.insert((serie, digits), v.clone());
    v
}

/// π × 10^digits (tronqué).
pub(crate) fn pi_scaled(digits: u64) -> BigInt {
    serie_cached(Serie::Pi, digits)
}

/// ln(2) × 10^digits (tronqué).
pub(crate) fn ln2_scaled(digits: u64) -> BigInt {
    serie_cached(Serie::Ln2, digits)
}

/// ln(10) × 10^digits (tronqué).
pub(crate) fn ln10_scaled(digits: u64) -> BigInt {
    serie_cached(Serie::Ln10, digits)
}
