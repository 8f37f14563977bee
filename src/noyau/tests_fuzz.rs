//! Tests fuzz : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l'évaluateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - opérations coûteuses (pow, racine, exp, factorielle) seulement sur des feuilles
//! - toute erreur de domaine est acceptée, jamais TreeTooDeep

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::erreur::ErreurCalcul;
use super::eval::{evaluer, evaluer_avec_demarche, MAX_PROFONDEUR};
use super::noeud::{Constante, Fonction, Noeud, OpBinaire, TypeCrochet};
use super::trig;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'arbres (bornée) ------------------------ */

/// Décimal dans [-9.9, 9.9], une décimale au plus.
fn gen_decimal(rng: &mut Rng) -> BigDecimal {
    let u = rng.pick(100) as i64;
    let u = if rng.pick(4) == 0 { -u } else { u };
    if rng.coin() {
        BigDecimal::new(BigInt::from(u), 1)
    } else {
        BigDecimal::from(u % 10)
    }
}

fn gen_feuille(rng: &mut Rng) -> Noeud {
    match rng.pick(6) {
        0 => Noeud::constante(Constante::Pi),
        1 => Noeud::constante(Constante::E),
        2 => Noeud::constante(Constante::Fi),
        _ => Noeud::nombre(gen_decimal(rng)),
    }
}

fn gen_crochet(rng: &mut Rng) -> TypeCrochet {
    TypeCrochet::TOUS[rng.pick(4) as usize]
}

fn gen_noeud(rng: &mut Rng, depth: usize) -> Noeud {
    if depth == 0 {
        return gen_feuille(rng);
    }

    match rng.pick(14) {
        0 => gen_feuille(rng),
        1 => Noeud::binaire(
            OpBinaire::Add,
            gen_noeud(rng, depth - 1),
            gen_noeud(rng, depth - 1),
        ),
        2 => Noeud::binaire(
            OpBinaire::Sub,
            gen_noeud(rng, depth - 1),
            gen_noeud(rng, depth - 1),
        ),
        3 => Noeud::binaire(
            OpBinaire::Mul,
            gen_noeud(rng, depth - 1),
            gen_noeud(rng, depth - 1),
        ),
        4 => Noeud::binaire(
            OpBinaire::Div,
            gen_noeud(rng, depth - 1),
            gen_noeud(rng, depth - 1),
        ),
        5 => Noeud::crochets(gen_crochet(rng), gen_noeud(rng, depth - 1)),
        6 => Noeud::neg(gen_noeud(rng, depth - 1)),
        7 => {
            let f = [Fonction::Sin, Fonction::Cos, Fonction::Tan][rng.pick(3) as usize];
            Noeud::fonction(f, gen_noeud(rng, depth - 1))
        }
        8 => {
            let f = [Fonction::Ln, Fonction::Log10, Fonction::Abs, Fonction::Sqrt]
                [rng.pick(4) as usize];
            Noeud::fonction(f, gen_noeud(rng, depth - 1))
        }
        9 => {
            let f = [Fonction::Floor, Fonction::Ceil, Fonction::Round][rng.pick(3) as usize];
            Noeud::fonction(f, gen_noeud(rng, depth - 1))
        }
        10 => Noeud::binaire(
            OpBinaire::LogBase,
            gen_noeud(rng, depth - 1),
            gen_feuille(rng),
        ),
        // coûteux : feuilles seulement
        11 => Noeud::binaire(OpBinaire::Pow, gen_feuille(rng), gen_feuille(rng)),
        12 => {
            if rng.coin() {
                Noeud::binaire(OpBinaire::Racine, gen_feuille(rng), gen_feuille(rng))
            } else {
                Noeud::fonction(Fonction::Exp, gen_feuille(rng))
            }
        }
        _ => {
            let pas = NonZeroU32::new(1 + rng.pick(3)).unwrap_or(NonZeroU32::MIN);
            Noeud::factorielle(pas, gen_feuille(rng))
        }
    }
}

/// Lignes de démarche attendues : une par noeud composé, sauf crochets neutres.
fn lignes_attendues(n: &Noeud) -> usize {
    let propre = match n {
        Noeud::Nombre(_) | Noeud::Constante(_) => 0,
        Noeud::Crochets(t, _) if *t != TypeCrochet::ValeurAbsolue => 0,
        _ => 1,
    };
    propre + n.enfants().into_iter().map(lignes_attendues).sum::<usize>()
}

fn is_erreur_attendue(e: ErreurCalcul) -> bool {
    !matches!(e, ErreurCalcul::TreeTooDeep)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_determinisme_et_demarche() {
    let t0 = Instant::now();
    let max = Duration::from_secs(20);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let noeud = gen_noeud(&mut rng, 4);

        match evaluer_avec_demarche(&noeud) {
            Ok((v, demarche)) => {
                assert_eq!(
                    demarche.etapes.len(),
                    lignes_attendues(&noeud),
                    "noeud={noeud}"
                );
                // même arbre => même valeur
                assert_eq!(evaluer(&noeud), Ok(v), "noeud={noeud}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(is_erreur_attendue(e), "erreur non attendue: noeud={noeud} err={e}");
                assert_eq!(evaluer(&noeud), Err(e), "noeud={noeud}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne balaye rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop sage");
}

#[test]
fn fuzz_sin_cos_bornes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let un = BigDecimal::from(1);
    let moins_un = BigDecimal::from(-1);

    for _ in 0..80 {
        budget(t0, max);

        // angles jusqu'à quelques milliers de degrés
        let angle = gen_decimal(&mut rng) * BigDecimal::from(1 + rng.pick(500));
        for v in [trig::sin(&angle), trig::cos(&angle)] {
            assert!(v <= un && v >= moins_un, "angle={angle} v={v}");
        }
    }
}

#[test]
fn fuzz_arbre_equilibre_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // 1024 feuilles 0.5 en somme équilibrée : profondeur 11
    let mut items: Vec<Noeud> = (0..1024)
        .map(|_| Noeud::nombre(BigDecimal::new(BigInt::from(5), 1)))
        .collect();
    while items.len() > 1 {
        let mut next = Vec::with_capacity(items.len() / 2 + 1);
        let mut it = items.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => next.push(Noeud::binaire(OpBinaire::Add, a, b)),
                None => next.push(a),
            }
        }
        items = next;
    }
    let noeud = items.pop().unwrap_or_else(|| Noeud::nombre(BigDecimal::from(0)));
    budget(t0, max);

    assert_eq!(evaluer(&noeud), Ok(BigDecimal::from(512)));
}

#[test]
fn fuzz_peigne_trop_profond() {
    // peigne gauche : profondeur MAX_PROFONDEUR + 1, refusé avant toute descente
    let mut noeud = Noeud::nombre(BigDecimal::from(1));
    for _ in 0..MAX_PROFONDEUR {
        noeud = Noeud::binaire(OpBinaire::Add, noeud, Noeud::nombre(BigDecimal::from(1)));
    }
    assert_eq!(evaluer(&noeud), Err(ErreurCalcul::TreeTooDeep));
}
