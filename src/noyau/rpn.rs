// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) suivi de '(' => appel de fonction (arité comptée par virgules)
// - Ident(name) seul        => identifiant (constante)
// - '+' / '-' quand on attend une valeur => opérateur unaire
// - Précédences : + - (1) < * / % (2) < unaire (3) < ** (4)
//   ** est associatif à droite ; -2**2 = -(2**2) et 2**-1 = 2**(-1)
//
// La grammaire est fermée : toute adjacence non prévue (deux valeurs de suite,
// opérateur sans opérande, parenthèses vides, virgule hors appel, ')' en trop)
// est une erreur de syntaxe.

use super::erreur::{EvalError, EvalResult};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::Tok;

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Ident(String),
    Binaire(OpBinaire),
    Unaire(OpUnaire),
    Appel(String, usize),
}

/// Pile d’opérateurs (shunting-yard).
enum Pile {
    Binaire(OpBinaire),
    Unaire(OpUnaire),
    Groupe,
    Appel { nom: String, args: usize },
}

const PRECEDENCE_UNAIRE: u8 = 3;

fn precedence(op: OpBinaire) -> u8 {
    match op {
        OpBinaire::Add | OpBinaire::Sub => 1,
        OpBinaire::Mul | OpBinaire::Div | OpBinaire::Mod => 2,
        OpBinaire::Pow => 4,
    }
}

fn op_binaire(t: &Tok) -> Option<OpBinaire> {
    match t {
        Tok::Plus => Some(OpBinaire::Add),
        Tok::Minus => Some(OpBinaire::Sub),
        Tok::Star => Some(OpBinaire::Mul),
        Tok::Slash => Some(OpBinaire::Div),
        Tok::Percent => Some(OpBinaire::Mod),
        Tok::Pow => Some(OpBinaire::Pow),
        _ => None,
    }
}

/// Sort vers `out` les opérateurs du sommet jusqu’à une parenthèse (exclue)
/// et renvoie cette parenthèse (groupe ou appel), retirée de la pile.
fn depiler_jusqu_a_parenthese(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) -> EvalResult<Pile> {
    while let Some(top) = ops.pop() {
        match top {
            Pile::Binaire(op) => out.push(Rpn::Binaire(op)),
            Pile::Unaire(op) => out.push(Rpn::Unaire(op)),
            Pile::Groupe | Pile::Appel { .. } => return Ok(top),
        }
    }
    Err(EvalError::syntaxe("parenthèse fermante en trop"))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [Ident("pi"), Num(2), Binaire(Div), Appel("sin", 1)]
pub fn to_rpn(tokens: &[Tok]) -> EvalResult<Vec<Rpn>> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // true quand le prochain jeton doit commencer un opérande
    let mut attend_valeur = true;
    // true juste après le '(' d’un appel (autorise f())
    let mut appel_ouvert = false;

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        let vient_d_ouvrir = appel_ouvert;
        appel_ouvert = false;

        match tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(EvalError::syntaxe(format!("nombre inattendu: {v}")));
                }
                out.push(Rpn::Num(*v));
                attend_valeur = false;
            }

            Tok::Ident(nom) => {
                if !attend_valeur {
                    return Err(EvalError::syntaxe(format!("identifiant inattendu: {nom}")));
                }
                if tokens.get(i + 1) == Some(&Tok::LPar) {
                    // appel : la '(' est consommée avec le nom
                    ops.push(Pile::Appel {
                        nom: nom.clone(),
                        args: 0,
                    });
                    i += 1;
                    appel_ouvert = true;
                } else {
                    out.push(Rpn::Ident(nom.clone()));
                    attend_valeur = false;
                }
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(EvalError::syntaxe("'(' inattendue"));
                }
                ops.push(Pile::Groupe);
            }

            Tok::RPar => {
                let ouvrante = depiler_jusqu_a_parenthese(&mut ops, &mut out)?;
                match ouvrante {
                    Pile::Appel { nom, args } => {
                        let n = if !attend_valeur {
                            args + 1
                        } else if vient_d_ouvrir {
                            0
                        } else {
                            return Err(EvalError::syntaxe(format!(
                                "argument manquant dans l’appel à {nom}"
                            )));
                        };
                        out.push(Rpn::Appel(nom, n));
                    }
                    _ => {
                        if attend_valeur {
                            return Err(EvalError::syntaxe("parenthèses vides ou incomplètes"));
                        }
                    }
                }
                attend_valeur = false;
            }

            Tok::Comma => {
                if attend_valeur {
                    return Err(EvalError::syntaxe("argument manquant avant ','"));
                }
                loop {
                    match ops.last_mut() {
                        Some(Pile::Appel { args, .. }) => {
                            *args += 1;
                            break;
                        }
                        Some(Pile::Binaire(op)) => {
                            out.push(Rpn::Binaire(*op));
                            ops.pop();
                        }
                        Some(Pile::Unaire(op)) => {
                            out.push(Rpn::Unaire(*op));
                            ops.pop();
                        }
                        Some(Pile::Groupe) | None => {
                            return Err(EvalError::syntaxe("virgule hors d’un appel"));
                        }
                    }
                }
                attend_valeur = true;
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                let op = if matches!(tok, Tok::Minus) {
                    OpUnaire::Neg
                } else {
                    OpUnaire::Plus
                };
                // préfixe : ne dépile rien
                ops.push(Pile::Unaire(op));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Pow => {
                let op = match op_binaire(tok) {
                    Some(op) if !attend_valeur => op,
                    _ => {
                        return Err(EvalError::syntaxe("opérateur sans opérande gauche"));
                    }
                };
                let p_tok = precedence(op);

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou un appel
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    let p_top = match top {
                        Pile::Binaire(o) => precedence(*o),
                        Pile::Unaire(_) => PRECEDENCE_UNAIRE,
                        Pile::Groupe | Pile::Appel { .. } => break,
                    };
                    let doit_pop = if op == OpBinaire::Pow {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    match ops.pop() {
                        Some(Pile::Binaire(o)) => out.push(Rpn::Binaire(o)),
                        Some(Pile::Unaire(o)) => out.push(Rpn::Unaire(o)),
                        _ => break,
                    }
                }

                ops.push(Pile::Binaire(op));
                attend_valeur = true;
            }
        }

        i += 1;
    }

    if attend_valeur {
        return Err(EvalError::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Pile::Binaire(o) => out.push(Rpn::Binaire(o)),
            Pile::Unaire(o) => out.push(Rpn::Unaire(o)),
            Pile::Groupe | Pile::Appel { .. } => {
                return Err(EvalError::syntaxe("parenthèses non fermées"));
            }
        }
    }

    Ok(out)
}

/// Profondeur maximale d’un arbre (évaluation, affichage et libération sont récursifs).
pub const PROFONDEUR_MAX: usize = 512;

/// Construit une Expr à partir d’une RPN.
///
/// Un arbre plus profond que `PROFONDEUR_MAX` est refusé avant d’exister.
pub fn from_rpn(rpn: &[Rpn]) -> EvalResult<Expr> {
    let invalide = || EvalError::syntaxe("expression invalide");
    // (noeud, profondeur du sous-arbre)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let borner = |p: usize| {
        if p > PROFONDEUR_MAX {
            Err(EvalError::syntaxe("expression trop profonde"))
        } else {
            Ok(p)
        }
    };

    for item in rpn {
        match item {
            Rpn::Num(v) => st.push((Expr::Nombre(*v), 1)),
            Rpn::Ident(nom) => st.push((Expr::Ident(nom.clone()), 1)),

            Rpn::Binaire(op) => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let p = borner(pa.max(pb) + 1)?;
                st.push((Expr::binaire(*op, a, b), p));
            }

            Rpn::Unaire(op) => {
                let (x, px) = st.pop().ok_or_else(invalide)?;
                let p = borner(px + 1)?;
                st.push((Expr::unaire(*op, x), p));
            }

            Rpn::Appel(nom, n) => {
                if st.len() < *n {
                    return Err(invalide());
                }
                let args = st.split_off(st.len() - n);
                let p = borner(args.iter().map(|(_, p)| *p).max().unwrap_or(0) + 1)?;
                let args = args.into_iter().map(|(e, _)| e).collect();
                st.push((Expr::Appel(nom.clone(), args), p));
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}

/// Jetons -> arbre.
pub fn parse(tokens: &[Tok]) -> EvalResult<Expr> {
    from_rpn(&to_rpn(tokens)?)
}

/// Format utilitaire (journal) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Ident(nom) => nom.clone(),
            Rpn::Binaire(op) => op.symbole().to_string(),
            Rpn::Unaire(OpUnaire::Neg) => "neg".to_string(),
            Rpn::Unaire(OpUnaire::Plus) => "pos".to_string(),
            Rpn::Appel(nom, n) => format!("{nom}/{n}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
