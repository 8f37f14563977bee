// src/noyau/test_utils.rs
//
// Outils partagés par les tests du noyau.

use bigdecimal::BigDecimal;
use std::str::FromStr;

pub fn d(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap_or_else(|e| panic!("décimal invalide {s:?}: {e}"))
}

/// |val - attendu| < 10^-chiffres
pub fn assert_proche(val: &BigDecimal, attendu: &str, chiffres: i64) {
    let ecart = (val.clone() - d(attendu)).abs();
    let tolerance = BigDecimal::new(1.into(), chiffres);
    if ecart >= tolerance {
        panic!("valeurs non proches (tolérance 1e-{chiffres}):\nobtenu  = {val}\nattendu = {attendu}");
    }
}

/// Mantisse et échelle, pour vérifier la forme exacte d'un résultat.
pub fn forme(val: &BigDecimal) -> (String, i64) {
    let (u, s) = val.as_bigint_and_exponent();
    (u.to_string(), s)
}
