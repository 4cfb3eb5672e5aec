// src/noyau/pretraitement.rs
//
// Prétraitement textuel (avant jetons)
// ------------------------------------
// Étapes indépendantes, une seule passe chacune, dans cet ordre :
//   1) trim + refus de l’entrée vide
//   2) symboles : π -> pi, ^ -> **, √ -> sqrt
//   3) multiplication implicite : 5pi -> 5*pi, 2(3) -> 2*(3), )(  -> )*(
//   4) mode degrés : sin(X) -> sin(radians(X))
//   5) équilibrage : ajoute les ')' manquantes en fin (jamais de retrait)
//
// Règles :
// - 'e' minuscule = constante e, toujours.
// - 'E' majuscule = exposant d’un littéral (1.5E+10), jamais touché ici.

use lazy_static::lazy_static;
use regex::Regex;

use super::angle::AngleMode;
use super::erreur::{EvalError, EvalResult};

lazy_static! {
    /// Chiffre suivi de pi, e ou '('.
    static ref CHIFFRE_PUIS_FACTEUR: Regex = Regex::new(r"(\d)(pi|e|\()").unwrap();

    /// ')' suivie d’un chiffre ou de '('.
    static ref FERMANTE_PUIS_FACTEUR: Regex = Regex::new(r"(\))(\d|\()").unwrap();

    /// Appel trig candidat ; la frontière gauche est vérifiée à la main (pas de lookbehind).
    static ref APPEL_TRIG: Regex = Regex::new(r"(sin|cos|tan)\s*\(").unwrap();
}

/// Pipeline complet : texte brut -> texte prêt pour `tokenize`.
pub fn pretraiter(brut: &str, mode: AngleMode) -> EvalResult<String> {
    let s = brut.trim();
    if s.is_empty() {
        return Err(EvalError::Empty);
    }

    let s = normaliser_symboles(s);
    let s = multiplication_implicite(&s);
    let s = match mode {
        AngleMode::Degrees => reecrire_degres(&s),
        AngleMode::Radians => s,
    };
    Ok(equilibrer_parentheses(&s))
}

/// Étape 2 : symboles du pavé vers leur forme texte.
pub fn normaliser_symboles(s: &str) -> String {
    s.replace('π', "pi").replace('^', "**").replace('√', "sqrt")
}

/// Étape 3 : insère '*' là où l’adjacence l’implique.
///
/// Une passe gauche -> droite sans chevauchement par règle, (a) puis (b).
/// Les deux motifs ne peuvent pas se chevaucher entre eux-mêmes, donc les chaînes
/// `2(3)(4)` sont entièrement résolues.
pub fn multiplication_implicite(s: &str) -> String {
    let s = CHIFFRE_PUIS_FACTEUR.replace_all(s, "${1}*${2}");
    FERMANTE_PUIS_FACTEUR
        .replace_all(&s, "${1}*${2}")
        .into_owned()
}

/// Étape 4 : enveloppe l’argument de chaque appel sin/cos/tan dans `radians(...)`.
///
/// - frontière : pas de lettre ni '_' juste avant le nom (asin, acos, atan intacts)
/// - la ')' ajoutée se place devant la fermante de l’appel ; si l’appel n’est
///   jamais fermé, elle est laissée à `equilibrer_parentheses`
/// - un appel sans argument (`sin()`, `sin(` en fin de texte) n’est pas enveloppé
pub fn reecrire_degres(s: &str) -> String {
    // (position, rang) : à position égale, "radians(" passe avant ")"
    let mut insertions: Vec<(usize, u8, &str)> = Vec::new();

    for m in APPEL_TRIG.find_iter(s) {
        let precedent = s[..m.start()].chars().next_back();
        if let Some(c) = precedent {
            if c.is_ascii_alphabetic() || c == '_' {
                continue;
            }
        }

        let ouvrante = m.end();
        let fermante = fermante_associee(s, ouvrante);

        // argument vide : rien à convertir, l’erreur d’arité reste sur l’appel
        let argument = &s[ouvrante..fermante.unwrap_or(s.len())];
        if argument.trim().is_empty() {
            continue;
        }

        insertions.push((ouvrante, 0, "radians("));
        if let Some(fermante) = fermante {
            insertions.push((fermante, 1, ")"));
        }
    }

    if insertions.is_empty() {
        return s.to_string();
    }
    insertions.sort_by_key(|&(pos, rang, _)| (pos, rang));

    let mut out = String::with_capacity(s.len() + insertions.len() * 8);
    let mut curseur = 0;
    for (pos, _, txt) in insertions {
        out.push_str(&s[curseur..pos]);
        out.push_str(txt);
        curseur = pos;
    }
    out.push_str(&s[curseur..]);
    out
}

/// Index de la ')' qui ferme la '(' située juste avant `debut`.
fn fermante_associee(s: &str, debut: usize) -> Option<usize> {
    let mut profondeur = 1usize;
    for (i, b) in s.bytes().enumerate().skip(debut) {
        match b {
            b'(' => profondeur += 1,
            b')' => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Étape 5 : complète les ')' manquantes. Un excès de ')' est laissé tel quel
/// (erreur de syntaxe plus loin).
pub fn equilibrer_parentheses(s: &str) -> String {
    let ouvrantes = s.matches('(').count();
    let fermantes = s.matches(')').count();

    let mut out = s.to_string();
    if ouvrantes > fermantes {
        out.push_str(&")".repeat(ouvrantes - fermantes));
    }
    out
}
