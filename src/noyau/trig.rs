// src/noyau/trig.rs
//
// Trigonométrie en degrés pour sin/cos/tan
// -----------------------------------------
// - conversion degrés -> radians : x·PI/180 à 8 décimales (demi-pair)
// - sin/cos : 6 chiffres significatifs (précision d'affichage, voulue)
// - tan     : 8 chiffres significatifs ; tan(90) est indéfini

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::Zero;

use super::constantes::pi;
use super::contexte::{diviser_echelle, nb_chiffres, pow10, Contexte, ECHELLE_ARRONDI};
use super::erreur::{ErreurCalcul, Resultat};
use super::serie::{evaluer_adaptatif, sin_cos_scaled, vers_scaled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    /// Précision du résultat (chiffres significatifs).
    pub fn contexte(self) -> Contexte {
        match self {
            TrigFn::Sin | TrigFn::Cos => Contexte::TRIG,
            TrigFn::Tan => Contexte::STANDARD,
        }
    }
}

/// Degrés -> radians, 8 décimales.
pub fn en_radians(degres: &BigDecimal) -> BigDecimal {
    diviser_echelle(
        &(degres * pi()),
        &BigDecimal::from(180),
        ECHELLE_ARRONDI,
        RoundingMode::HalfEven,
    )
}

/// Évalue f sur un angle en radians, à la précision `ctx`.
pub fn trig_radians(x: &BigDecimal, f: TrigFn, ctx: Contexte) -> BigDecimal {
    if x.is_zero() {
        return match f {
            TrigFn::Cos => BigDecimal::from(1),
            TrigFn::Sin | TrigFn::Tan => BigDecimal::zero(),
        };
    }

    let v = evaluer_adaptatif(ctx.precision, |w| {
        let (s, c) = sin_cos_scaled(&vers_scaled(x, w), w);
        match f {
            TrigFn::Sin => s,
            TrigFn::Cos => c,
            TrigFn::Tan => {
                // cos trop petit à cette échelle : valeur nulle => on élargit w
                if nb_chiffres(&c) < ctx.precision + 5 || c.is_zero() {
                    BigInt::zero()
                } else {
                    (s * pow10(w)) / c
                }
            }
        }
    });
    ctx.arrondir(&v)
}

/// sin/cos/tan d'un angle en degrés.
pub fn trig_degres(degres: &BigDecimal, f: TrigFn) -> Resultat<BigDecimal> {
    if f == TrigFn::Tan && *degres == BigDecimal::from(90) {
        return Err(ErreurCalcul::TangentOfNinety);
    }
    Ok(trig_radians(&en_radians(degres), f, f.contexte()))
}

pub fn sin(degres: &BigDecimal) -> BigDecimal {
    trig_radians(&en_radians(degres), TrigFn::Sin, TrigFn::Sin.contexte())
}

pub fn cos(degres: &BigDecimal) -> BigDecimal {
    trig_radians(&en_radians(degres), TrigFn::Cos, TrigFn::Cos.contexte())
}

pub fn tan(degres: &BigDecimal) -> Resultat<BigDecimal> {
    trig_degres(degres, TrigFn::Tan)
}
