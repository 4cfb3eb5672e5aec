// src/noyau/expr.rs
//
// Arbre syntaxique (ensemble fermé de noeuds).
// - Nombre  : littéral
// - Ident   : nom résolu dans la table des constantes
// - Binaire : + - * / % **
// - Unaire  : - +
// - Appel   : nom(args...), arguments positionnels seulement
//
// IMPORTANT (SAFE):
// - aucun autre noeud n’existe : pas d’affectation, d’attribut, d’indexation.
// - l’arbre appartient à l’appel d’évaluation qui l’a construit.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Plus,
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Mod => "%",
            OpBinaire::Pow => "**",
        }
    }
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Neg => "-",
            OpUnaire::Plus => "+",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Ident(String),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Unaire(OpUnaire, Box<Expr>),
    Appel(String, Vec<Expr>),
}

impl Expr {
    pub fn binaire(op: OpBinaire, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn unaire(op: OpUnaire, x: Expr) -> Expr {
        Expr::Unaire(op, Box::new(x))
    }
}

/// Forme entièrement parenthésée (journal, tests de précédence).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(v) => write!(f, "{v}"),
            Expr::Ident(s) => write!(f, "{s}"),
            Expr::Binaire(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
            Expr::Unaire(op, x) => write!(f, "({}{x})", op.symbole()),
            Expr::Appel(nom, args) => {
                write!(f, "{nom}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
