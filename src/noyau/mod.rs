//! Noyau d’évaluation
//!
//! Organisation interne :
//! - pretraitement.rs : réécritures textuelles (symboles, × implicite, degrés, équilibrage)
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + construction Expr
//! - expr.rs          : arbre syntaxique (ensemble fermé de noeuds)
//! - tables.rs        : constantes + fonctions (fixes)
//! - eval.rs          : pipeline complet + évaluation récursive
//! - format.rs        : affichage 8 chiffres (côté appelant)
//!
//! SAFE : aucune délégation à un évaluateur générique ; seul l’arbre fermé est exécuté.

pub mod angle;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod pretraitement;
pub mod rpn;
pub mod tables;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use angle::AngleMode;
pub use erreur::{EvalError, EvalResult};
pub use eval::evaluate;
pub use format::{format_resultat, MARQUEUR_ERREUR};
