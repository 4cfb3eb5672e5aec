//! Noyau — évaluation (pipeline réel)
//!
//! texte brut -> prétraitement (symboles, × implicite, degrés, équilibrage)
//!            -> jetons -> RPN -> Expr -> évaluation récursive (f64)
//!
//! Règles d’évaluation :
//! - opérandes gauche puis droite, arguments de gauche à droite
//! - `/` et `%` par zéro : DivisionByZero (vérifié, jamais d’inf/NaN silencieux)
//! - toute valeur non finie issue d’opérandes finis : DomainError
//!   (invariant : chaque noeud évalué est fini)

use tracing::debug;

use super::angle::AngleMode;
use super::erreur::{EvalError, EvalResult};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::format::format_resultat;
use super::jetons::{format_tokens, tokenize};
use super::pretraitement::pretraiter;
use super::rpn::{format_rpn, from_rpn, to_rpn};
use super::tables::Tables;

/// API publique : évalue une expression saisie au pavé.
///
/// Sans état : lit seulement les tables du processus, utilisable depuis plusieurs
/// threads sans coordination.
pub fn evaluate(brut: &str, mode: AngleMode) -> EvalResult<f64> {
    evaluate_with(brut, mode, Tables::standard())
}

/// Même pipeline, tables fournies.
pub(crate) fn evaluate_with(brut: &str, mode: AngleMode, tables: &Tables) -> EvalResult<f64> {
    // 1) Texte
    let texte = pretraiter(brut, mode)?;
    debug!(brut, texte = %texte, mode = ?mode, "prétraitement");

    // 2) Jetons
    let jetons = tokenize(&texte)?;

    // 3) RPN
    let rpn = to_rpn(&jetons)?;
    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_rpn(&rpn),
        "analyse"
    );

    // 4) AST
    let arbre = from_rpn(&rpn)?;

    // 5) Valeur
    let v = eval_expr(&arbre, tables)?;
    debug!(arbre = %arbre, valeur = v, "évaluation");
    Ok(v)
}

/// Évaluation récursive d’un arbre.
pub fn eval_expr(expr: &Expr, tables: &Tables) -> EvalResult<f64> {
    match expr {
        Expr::Nombre(v) => Ok(*v),

        Expr::Ident(nom) => tables
            .constante(nom)
            .ok_or_else(|| EvalError::UnknownIdentifier(nom.clone())),

        Expr::Binaire(op, a, b) => {
            let x = eval_expr(a, tables)?;
            let y = eval_expr(b, tables)?;
            appliquer_binaire(*op, x, y)
        }

        Expr::Unaire(op, a) => {
            let x = eval_expr(a, tables)?;
            Ok(match op {
                OpUnaire::Neg => -x,
                OpUnaire::Plus => x,
            })
        }

        Expr::Appel(nom, args) => {
            let valeurs = args
                .iter()
                .map(|a| eval_expr(a, tables))
                .collect::<EvalResult<Vec<f64>>>()?;

            let f = tables
                .fonction(nom)
                .ok_or_else(|| EvalError::UnknownFunction(nom.clone()))?;
            if valeurs.len() != f.arite {
                return Err(EvalError::ArityError {
                    function: nom.clone(),
                    expected: f.arite,
                    found: valeurs.len(),
                });
            }

            fini((f.calcul)(&valeurs), || format!("{nom}({})", joindre(&valeurs)))
        }
    }
}

fn appliquer_binaire(op: OpBinaire, x: f64, y: f64) -> EvalResult<f64> {
    let r = match op {
        OpBinaire::Add => x + y,
        OpBinaire::Sub => x - y,
        OpBinaire::Mul => x * y,
        OpBinaire::Div => {
            if y == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            x / y
        }
        OpBinaire::Mod => {
            if y == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            modulo_plancher(x, y)
        }
        OpBinaire::Pow => {
            if x == 0.0 && y < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            x.powf(y)
        }
    };
    fini(r, || {
        format!(
            "{} {} {}",
            format_resultat(x),
            op.symbole(),
            format_resultat(y)
        )
    })
}

/// Modulo « plancher » : le reste a le signe du diviseur (-7 % 3 = 2).
fn modulo_plancher(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r != 0.0 && (r < 0.0) != (y < 0.0) {
        r + y
    } else {
        r
    }
}

fn fini(v: f64, contexte: impl FnOnce() -> String) -> EvalResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalError::domaine(contexte()))
    }
}

fn joindre(valeurs: &[f64]) -> String {
    valeurs
        .iter()
        .map(|v| format_resultat(*v))
        .collect::<Vec<_>>()
        .join(", ")
}
