//! Noyau décimal à précision arbitraire
//!
//! Organisation interne :
//! - erreur.rs     : erreurs de domaine (ErreurCalcul)
//! - contexte.rs   : précisions, modes d'arrondi, divisions arrondies
//! - constantes.rs : e, π, φ + séries en cache (π, ln2, ln10)
//! - serie.rs      : noyaux exp / ln / sin / cos en entier scalé
//! - fraction.rs   : exposant décimal -> p/q
//! - trig.rs       : sin / cos / tan en degrés
//! - maths.rs      : exp, ln, log, racines, puissances, factorielle, arrondis
//! - noeud.rs      : arbre d'expression
//! - eval.rs       : évaluation + démarche

pub mod constantes;
pub mod contexte;
pub mod erreur;
pub mod eval;
pub mod fraction;
pub mod maths;
pub mod noeud;
pub(crate) mod serie;
pub mod trig;

#[cfg(test)]
mod test_utils;


#[cfg(test)]
mod tests_fuzz;

// API publique minimale
pub use erreur::{ErreurCalcul, Resultat};
pub use eval::{evaluer, evaluer_avec_demarche, Demarche};
pub use noeud::{Constante, Fonction, Noeud, OpBinaire, TypeCrochet};
