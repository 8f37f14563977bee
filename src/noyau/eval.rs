//! Noyau : évaluation d'un arbre (parcours ascendant)
//!
//! garde-fou de profondeur -> parcours postfixe (pile explicite) -> bibliothèque maths
//!
//! Chaque noeud composé ajoute une ligne à la démarche : "<noeud> = <valeur>".
//! Les erreurs remontent telles quelles, sans valeur partielle.

use bigdecimal::BigDecimal;

use std::fmt;

use super::erreur::{ErreurCalcul, Resultat};
use super::maths;
use super::noeud::{Fonction, Noeud, OpBinaire, TypeCrochet};
use super::trig;

/// Profondeur maximale acceptée. Le parcours est itératif : la borne protège
/// surtout la libération récursive des Box et la taille des lignes de démarche.
pub const MAX_PROFONDEUR: usize = 2048;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub etapes: Vec<String>,
}

impl fmt::Display for Demarche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ligne) in self.etapes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{ligne}")?;
        }
        Ok(())
    }
}

/// API publique : valeur de l'arbre (aucun texte produit).
pub fn evaluer(noeud: &Noeud) -> Resultat<BigDecimal> {
    verifier_profondeur(noeud)?;
    evaluer_pile(noeud, None)
}

/// Valeur + démarche (une ligne par noeud composé, dans l'ordre d'évaluation).
pub fn evaluer_avec_demarche(noeud: &Noeud) -> Resultat<(BigDecimal, Demarche)> {
    verifier_profondeur(noeud)?;
    let mut demarche = Demarche::default();
    let v = evaluer_pile(noeud, Some(&mut demarche))?;
    Ok((v, demarche))
}

fn verifier_profondeur(noeud: &Noeud) -> Resultat<()> {
    if profondeur(noeud) > MAX_PROFONDEUR {
        return Err(ErreurCalcul::TreeTooDeep);
    }
    Ok(())
}

/// Profondeur de l'arbre (une feuille seule = 1).
pub fn profondeur(noeud: &Noeud) -> usize {
    let mut pile: Vec<(&Noeud, usize)> = Vec::with_capacity(64);
    pile.push((noeud, 1));

    let mut max = 0;
    while let Some((n, p)) = pile.pop() {
        max = max.max(p);
        if max > MAX_PROFONDEUR {
            // inutile d'aller plus loin
            return max;
        }
        for enfant in n.enfants() {
            pile.push((enfant, p + 1));
        }
    }
    max
}

/* ------------------------ Parcours postfixe (pile explicite) ------------------------ */

enum Tache<'a> {
    Visiter(&'a Noeud),
    Appliquer(&'a Noeud),
}

/// Feuilles et crochets neutres n'ajoutent pas de ligne.
fn produit_ligne(noeud: &Noeud) -> bool {
    match noeud {
        Noeud::Nombre(_) | Noeud::Constante(_) => false,
        Noeud::Crochets(genre, _) => *genre == TypeCrochet::ValeurAbsolue,
        _ => true,
    }
}

/// Enfants évalués de gauche à droite ; la première erreur arrête tout.
/// Les textes des sous-arbres ne sont construits que si une démarche est demandée.
fn evaluer_pile(racine: &Noeud, mut demarche: Option<&mut Demarche>) -> Resultat<BigDecimal> {
    let mut pile = vec![Tache::Visiter(racine)];
    let mut valeurs: Vec<BigDecimal> = Vec::new();
    let mut textes: Vec<String> = Vec::new();

    while let Some(tache) = pile.pop() {
        match tache {
            Tache::Visiter(n) => {
                pile.push(Tache::Appliquer(n));
                for enfant in n.enfants().into_iter().rev() {
                    pile.push(Tache::Visiter(enfant));
                }
            }
            Tache::Appliquer(n) => {
                let arite = n.enfants().len();
                let arguments = valeurs.split_off(valeurs.len().saturating_sub(arite));
                let v = appliquer(n, &arguments)?;

                if let Some(d) = demarche.as_deref_mut() {
                    let debut = textes.len().saturating_sub(arite);
                    let texte = n.assembler(&textes[debut..]);
                    textes.truncate(debut);
                    if produit_ligne(n) {
                        d.etapes.push(format!("{texte} = {v}"));
                    }
                    textes.push(texte);
                }
                valeurs.push(v);
            }
        }
    }

    // une valeur exactement par arbre bien formé
    valeurs.pop().ok_or(ErreurCalcul::Undefined)
}

fn appliquer(noeud: &Noeud, arguments: &[BigDecimal]) -> Resultat<BigDecimal> {
    match (noeud, arguments) {
        (Noeud::Nombre(v), []) => Ok(v.clone()),
        (Noeud::Constante(c), []) => Ok(c.valeur().clone()),
        (Noeud::Crochets(genre, _), [x]) => match genre {
            TypeCrochet::ValeurAbsolue => Ok(maths::abs(x)),
            TypeCrochet::Parentheses | TypeCrochet::Crochets | TypeCrochet::Accolades => {
                Ok(x.clone())
            }
        },
        (Noeud::Neg(_), [x]) => Ok(-x),
        (Noeud::Binaire(op, _, _), [a, b]) => appliquer_binaire(*op, a, b),
        (Noeud::Fonction(f, _), [x]) => appliquer_fonction(*f, x),
        (Noeud::Factorielle(pas, _), [x]) => maths::factorielle(x, *pas),
        // arité incohérente : impossible avec enfants()
        _ => Err(ErreurCalcul::Undefined),
    }
}

fn appliquer_binaire(op: OpBinaire, a: &BigDecimal, b: &BigDecimal) -> Resultat<BigDecimal> {
    match op {
        OpBinaire::Add => Ok(a + b),
        OpBinaire::Sub => Ok(a - b),
        OpBinaire::Mul => Ok(a * b),
        OpBinaire::Div => maths::diviser(a, b),
        OpBinaire::Pow => maths::pow(a, b),
        OpBinaire::Racine => maths::racine(a, b),
        OpBinaire::LogBase => maths::log_base(a, b),
    }
}

fn appliquer_fonction(f: Fonction, x: &BigDecimal) -> Resultat<BigDecimal> {
    match f {
        Fonction::Sin => Ok(trig::sin(x)),
        Fonction::Cos => Ok(trig::cos(x)),
        Fonction::Tan => trig::tan(x),
        Fonction::Exp => Ok(maths::exp(x)),
        Fonction::Ln => maths::ln(x),
        Fonction::Log10 => maths::log10(x),
        Fonction::Abs => Ok(maths::abs(x)),
        Fonction::Sqrt => maths::sqrt(x),
        Fonction::Floor => Ok(maths::floor(x)),
        Fonction::Ceil => Ok(maths::ceil(x)),
        Fonction::Round => Ok(maths::round(x)),
    }
}
