// src/lib.rs
//
// Calculatrice décimale : bibliothèque mathématique à précision arbitraire
// et évaluation d'arbres d'expression (pas de parseur ici).

pub mod noyau;

pub use noyau::{
    evaluer, evaluer_avec_demarche, Constante, Demarche, ErreurCalcul, Fonction, Noeud, OpBinaire,
    Resultat, TypeCrochet,
};
