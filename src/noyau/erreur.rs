// src/noyau/erreur.rs
//
// Erreurs de domaine du noyau.
// Chaque erreur est locale et immédiate : aucune valeur "sentinelle" n'est
// jamais renvoyée à la place (pas de NaN numérique, pas d'infini).

use thiserror::Error;

pub type Resultat<T> = std::result::Result<T, ErreurCalcul>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("logarithme d'un nombre négatif")]
    NegativeLogArgument,

    #[error("logarithme de zéro")]
    ZeroLogArgument,

    #[error("tangente de 90° indéfinie")]
    TangentOfNinety,

    #[error("factorielle : limite dépassée (> 100000)")]
    FactorialLimitExceeded,

    #[error("racine de degré pair d'un nombre négatif")]
    EvenRootOfNegative,

    /// ex: 0^(-1)
    #[error("NaN")]
    NaN,

    /// ex: 0^0
    #[error("indéfini")]
    Undefined,

    #[error("division par zéro")]
    DivisionByZero,

    #[error("arbre trop profond")]
    TreeTooDeep,
}
