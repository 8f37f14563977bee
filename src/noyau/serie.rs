// src/noyau/serie.rs
//
// Noyau "entier scalé" : une valeur v est portée par un BigInt n tel que
// v ≈ n / 10^w (troncature). Séries de Taylor / atanh sur ces entiers,
// puis conversion en BigDecimal au dernier moment.
//
// - exp : réduction x/2^m, Taylor, puis m élévations au carré
// - ln  : x = y·10^k, y ramené dans [0.75, 1.5) par doublements, 2·atanh((y-1)/(y+1))
// - sin/cos : réduction modulo 2π (π de Machin), Taylor

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::Zero;

use super::constantes::{ln10_scaled, ln2_scaled, pi_scaled};
use super::contexte::{nb_chiffres, partie_entiere, parties, pow10};

/// Chiffres de garde ajoutés à l'échelle de travail.
const GARDE: u64 = 10;

/// Chiffres significatifs exigés au-delà de la précision demandée.
const MARGE_SIGNIFICATIVE: u64 = 5;

const MAX_TENTATIVES: usize = 8;

/// x -> entier scalé à l'échelle w (troncature).
pub(crate) fn vers_scaled(x: &BigDecimal, w: u64) -> BigInt {
    x.with_scale_round(w as i64, RoundingMode::Down)
        .into_bigint_and_exponent()
        .0
}

/// Évalue `f(w)` en augmentant w jusqu'à obtenir `precision` chiffres significatifs sûrs.
/// Une valeur nulle double l'échelle ; après MAX_TENTATIVES elle est acceptée telle quelle.
pub(crate) fn evaluer_adaptatif<F>(precision: u64, mut f: F) -> BigDecimal
where
    F: FnMut(u64) -> BigInt,
{
    let voulu = precision + MARGE_SIGNIFICATIVE;
    let mut w = precision + GARDE;
    let mut v = BigInt::zero();

    for _ in 0..MAX_TENTATIVES {
        v = f(w);
        if v.is_zero() {
            w *= 2;
            continue;
        }
        let chiffres = nb_chiffres(&v);
        if chiffres >= voulu {
            return BigDecimal::new(v, w as i64);
        }
        w += voulu - chiffres + GARDE;
    }

    BigDecimal::new(v, w as i64)
}

/* ------------------------ exp ------------------------ */

/// Échelle suffisante pour exp(x), x >= 0, à `precision` chiffres.
pub(crate) fn echelle_exp(x: &BigDecimal, precision: u64) -> u64 {
    let m = m_reduction(&partie_entiere(x));
    precision + GARDE + u64::from(m) / 3 + 1
}

fn m_reduction(entier: &BigInt) -> u32 {
    entier.magnitude().bits() as u32 + 1
}

/// exp(x) en entier scalé, x >= 0 (entier scalé à l'échelle w).
pub(crate) fn exp_scaled(x: &BigInt, w: u64) -> BigInt {
    let un = pow10(w);
    let m = m_reduction(&(x / &un));

    // r = x / 2^m < 1/2
    let r: BigInt = x >> m;

    let mut somme = un.clone();
    let mut terme = un.clone();
    let mut k: u32 = 1;
    loop {
        terme = (terme * &r) / (&un * k);
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        k += 1;
    }

    for _ in 0..m {
        somme = (&somme * &somme) / &un;
    }
    somme
}

/* ------------------------ ln ------------------------ */

/// atanh(z) en entier scalé, |z| < 1 (z scalé à l'échelle w).
fn atanh_scaled(z: &BigInt, un: &BigInt) -> BigInt {
    let z2 = (z * z) / un;

    let mut puissance = z.clone();
    let mut somme = BigInt::zero();
    let mut k: u32 = 0;
    loop {
        let terme = &puissance / (2 * k + 1);
        if terme.is_zero() {
            break;
        }
        somme += terme;
        puissance = (puissance * &z2) / un;
        k += 1;
    }
    somme
}

/// ln(x) en entier scalé à l'échelle w, x > 0.
pub(crate) fn ln_scaled(x: &BigDecimal, w: u64) -> BigInt {
    let (u, s) = parties(x);

    // x = y · 10^k, y ∈ [0.1, 1)
    let chiffres = nb_chiffres(&u);
    let k = chiffres as i64 - s;

    // marge pour les multiplications par ln2 / ln10
    let w_int = w + GARDE;
    let un = pow10(w_int);
    let mut y = (u * &un) / pow10(chiffres);

    // y ∈ [0.75, 1.5)
    let seuil = (&un * 3u32) / 4u32;
    let mut doublements: u32 = 0;
    while y < seuil {
        y *= 2u32;
        doublements += 1;
    }

    let z = ((&y - &un) * &un) / (&y + &un);
    let ln_y = atanh_scaled(&z, &un) * 2u32;

    let total = ln_y - ln2_scaled(w_int) * doublements + ln10_scaled(w_int) * k;
    total / pow10(GARDE)
}

/* ------------------------ sin / cos ------------------------ */

/// (sin x, cos x) en entiers scalés à l'échelle w (x en radians, scalé).
pub(crate) fn sin_cos_scaled(x: &BigInt, w: u64) -> (BigInt, BigInt) {
    let un_w = pow10(w);

    // réduction modulo 2π : chiffres en plus selon la taille de x
    let extra = nb_chiffres(&(x / &un_w)) + GARDE;
    let w_int = w + extra;
    let un = pow10(w_int);

    let pi = pi_scaled(w_int);
    let deux_pi: BigInt = &pi * 2u32;

    let xs = x * pow10(extra);
    let mut r = &xs - (&xs / &deux_pi) * &deux_pi;
    if r > pi {
        r -= &deux_pi;
    } else if r < -&pi {
        r += &deux_pi;
    }

    let r2 = (&r * &r) / &un;

    // sin : r - r^3/3! + ...
    let mut somme_sin = r.clone();
    let mut terme = r.clone();
    let mut k: u32 = 1;
    loop {
        terme = -(terme * &r2) / (&un * ((2 * k) * (2 * k + 1)));
        if terme.is_zero() {
            break;
        }
        somme_sin += &terme;
        k += 1;
    }

    // cos : 1 - r^2/2! + ...
    let mut somme_cos = un.clone();
    let mut terme = un.clone();
    let mut k: u32 = 1;
    loop {
        terme = -(terme * &r2) / (&un * ((2 * k - 1) * (2 * k)));
        if terme.is_zero() {
            break;
        }
        somme_cos += &terme;
        k += 1;
    }

    let reduire = pow10(extra);
    (somme_sin / &reduire, somme_cos / &reduire)
}
