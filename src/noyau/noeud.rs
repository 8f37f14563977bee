// src/noyau/noeud.rs
//
// Arbre d'expression (immuable une fois construit).
// - Nombre    : littéral décimal
// - Crochets  : sous-arbre écrit entre ( ), [ ], { } ou | |
// - Constante : e, π, φ
// - Neg / Binaire / Fonction / Factorielle : noeuds d'opérateurs
//
// Pas de validation ici au-delà du typage : la légalité d'un crochet à
// une position donnée relève du parseur.

use bigdecimal::BigDecimal;
use num_traits::Signed;

use std::fmt;
use std::num::NonZeroU32;

use super::constantes::{e, fi, pi};

/// Genre de crochet, avec un code entier stable partagé avec le parseur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCrochet {
    Parentheses = 0,
    Crochets = 1,
    Accolades = 2,
    ValeurAbsolue = 3,
}

impl TypeCrochet {
    pub const TOUS: [TypeCrochet; 4] = [
        TypeCrochet::Parentheses,
        TypeCrochet::Crochets,
        TypeCrochet::Accolades,
        TypeCrochet::ValeurAbsolue,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Code inconnu => None (le parseur ne doit pas en produire).
    pub fn depuis_code(code: i32) -> Option<Self> {
        Self::TOUS.into_iter().find(|t| t.code() == code)
    }

    fn symboles(self) -> (char, char) {
        match self {
            TypeCrochet::Parentheses => ('(', ')'),
            TypeCrochet::Crochets => ('[', ']'),
            TypeCrochet::Accolades => ('{', '}'),
            TypeCrochet::ValeurAbsolue => ('|', '|'),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constante {
    E,
    Pi,
    Fi,
}

impl Constante {
    pub fn valeur(self) -> &'static BigDecimal {
        match self {
            Constante::E => e(),
            Constante::Pi => pi(),
            Constante::Fi => fi(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// racine(a, n)
    Racine,
    /// log(x, base)
    LogBase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Log10,
    Abs,
    Sqrt,
    Floor,
    Ceil,
    Round,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Exp => "exp",
            Fonction::Ln => "ln",
            Fonction::Log10 => "log",
            Fonction::Abs => "abs",
            Fonction::Sqrt => "sqrt",
            Fonction::Floor => "floor",
            Fonction::Ceil => "ceil",
            Fonction::Round => "round",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Noeud {
    Nombre(BigDecimal),
    Constante(Constante),
    Crochets(TypeCrochet, Box<Noeud>),
    Neg(Box<Noeud>),
    Binaire(OpBinaire, Box<Noeud>, Box<Noeud>),
    Fonction(Fonction, Box<Noeud>),
    Factorielle(NonZeroU32, Box<Noeud>),
}

impl Noeud {
    /* --- constructeurs --- */

    pub fn nombre(valeur: BigDecimal) -> Self {
        Noeud::Nombre(valeur)
    }

    pub fn constante(c: Constante) -> Self {
        Noeud::Constante(c)
    }

    pub fn crochets(genre: TypeCrochet, enfant: Noeud) -> Self {
        Noeud::Crochets(genre, Box::new(enfant))
    }

    pub fn neg(enfant: Noeud) -> Self {
        Noeud::Neg(Box::new(enfant))
    }

    pub fn binaire(op: OpBinaire, gauche: Noeud, droite: Noeud) -> Self {
        Noeud::Binaire(op, Box::new(gauche), Box::new(droite))
    }

    pub fn fonction(f: Fonction, argument: Noeud) -> Self {
        Noeud::Fonction(f, Box::new(argument))
    }

    pub fn factorielle(pas: NonZeroU32, enfant: Noeud) -> Self {
        Noeud::Factorielle(pas, Box::new(enfant))
    }

    /* --- accesseurs (lecture seule) --- */

    /// Valeur d'un littéral ; None pour tout autre noeud.
    pub fn valeur(&self) -> Option<&BigDecimal> {
        match self {
            Noeud::Nombre(v) => Some(v),
            _ => None,
        }
    }

    /// Genre de crochet ; None si le noeud n'est pas entre crochets.
    pub fn type_crochet(&self) -> Option<TypeCrochet> {
        match self {
            Noeud::Crochets(t, _) => Some(*t),
            _ => None,
        }
    }

    /// Sous-arbres directs, de gauche à droite.
    pub fn enfants(&self) -> Vec<&Noeud> {
        match self {
            Noeud::Nombre(_) | Noeud::Constante(_) => Vec::new(),
            Noeud::Crochets(_, x)
            | Noeud::Neg(x)
            | Noeud::Fonction(_, x)
            | Noeud::Factorielle(_, x) => vec![x.as_ref()],
            Noeud::Binaire(_, a, b) => vec![a.as_ref(), b.as_ref()],
        }
    }

    pub fn est_feuille(&self) -> bool {
        matches!(self, Noeud::Nombre(_) | Noeud::Constante(_))
    }
}

/* ------------------------ Affichage debug (parenthésé) ------------------------ */

impl fmt::Display for Constante {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constante::E => write!(f, "e"),
            Constante::Pi => write!(f, "π"),
            Constante::Fi => write!(f, "φ"),
        }
    }
}

/// Tâche du parcours postfixe (pile explicite, pas de récursion).
enum Tache<'a> {
    Visiter(&'a Noeud),
    Assembler(&'a Noeud),
}

impl Noeud {
    /// Lisible sans parenthèses autour quand il sert d'opérande à ^, ! ou au - unaire.
    fn est_atome(&self) -> bool {
        match self {
            Noeud::Nombre(v) => !v.is_negative(),
            Noeud::Constante(_) | Noeud::Crochets(..) | Noeud::Fonction(..) => true,
            // + - * / s'entourent déjà ; root(..) et log(..) s'écrivent comme des fonctions
            Noeud::Binaire(op, ..) => *op != OpBinaire::Pow,
            Noeud::Neg(_) | Noeud::Factorielle(..) => false,
        }
    }

    /// Texte du noeud à partir des textes de ses enfants (ordre de `enfants()`).
    pub(crate) fn assembler(&self, textes: &[String]) -> String {
        let t = move |i: usize| textes.get(i).map(String::as_str).unwrap_or_default();
        let operande = |enfant: &Noeud, i: usize| {
            if enfant.est_atome() {
                t(i).to_string()
            } else {
                format!("({})", t(i))
            }
        };

        match self {
            Noeud::Nombre(v) => v.to_string(),
            Noeud::Constante(c) => c.to_string(),
            Noeud::Crochets(genre, _) => {
                let (o, c) = genre.symboles();
                format!("{o}{}{c}", t(0))
            }
            Noeud::Neg(x) => format!("-{}", operande(x, 0)),
            Noeud::Binaire(op, a, b) => match op {
                OpBinaire::Add => format!("({}+{})", t(0), t(1)),
                OpBinaire::Sub => format!("({}-{})", t(0), t(1)),
                OpBinaire::Mul => format!("({}*{})", t(0), t(1)),
                OpBinaire::Div => format!("({}/{})", t(0), t(1)),
                OpBinaire::Pow => format!("{}^{}", operande(a, 0), operande(b, 1)),
                OpBinaire::Racine => format!("root({}, {})", t(0), t(1)),
                OpBinaire::LogBase => format!("log({}, {})", t(0), t(1)),
            },
            Noeud::Fonction(func, _) => format!("{}({})", func.nom(), t(0)),
            Noeud::Factorielle(pas, x) => {
                if pas.get() == 1 {
                    format!("{}!", operande(x, 0))
                } else {
                    format!("{}!{pas}", operande(x, 0))
                }
            }
        }
    }

    /// Rendu complet, itératif : la profondeur de l'arbre ne touche pas la pile d'appels.
    pub fn rendu(&self) -> String {
        let mut pile = vec![Tache::Visiter(self)];
        let mut textes: Vec<String> = Vec::new();

        while let Some(tache) = pile.pop() {
            match tache {
                Tache::Visiter(n) => {
                    pile.push(Tache::Assembler(n));
                    for enfant in n.enfants().into_iter().rev() {
                        pile.push(Tache::Visiter(enfant));
                    }
                }
                Tache::Assembler(n) => {
                    let debut = textes.len().saturating_sub(n.enfants().len());
                    let texte = n.assembler(&textes[debut..]);
                    textes.truncate(debut);
                    textes.push(texte);
                }
            }
        }
        textes.pop().unwrap_or_default()
    }
}

impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendu())
    }
}
