// src/noyau/jetons.rs

use super::erreur::{EvalError, EvalResult};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions : le parse (RPN) décide selon la '(' qui suit.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow, // ** (ou ^ brut)

    LPar,
    RPar,
    Comma,
}

/// Tokenize une chaîne (déjà prétraitée) en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.) avec exposant majuscule (1.5E+10)
/// - opérateurs + - * / % ** (et ^ brut)
/// - parenthèses ( ) et virgule d’arguments
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée : la recherche est exacte)
///
/// Refuse:
/// - accès à un attribut (pi.real) et chaînes littérales -> UnsupportedConstruct
/// - tout autre caractère (=, <, [, ;, #, ...) -> SyntaxError
pub fn tokenize(s: &str) -> EvalResult<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Comma);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Pow);
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '"' | '\'' => {
                return Err(EvalError::UnsupportedConstruct("chaîne littérale".into()));
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word));
            continue;
        }

        // Nombre : chiffres [. chiffres] [E [+-] chiffres], ou .chiffres
        let debut_nombre = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()));
        if debut_nombre {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            if let Some(fin) = longueur_exposant(&chars, i) {
                i = fin;
            }

            let txt: String = chars[start..i].iter().collect();
            let v: f64 = txt
                .parse()
                .map_err(|_| EvalError::syntaxe(format!("nombre invalide: {txt}")))?;
            if !v.is_finite() {
                return Err(EvalError::domaine(format!("littéral trop grand: {txt}")));
            }
            out.push(Tok::Num(v));
            continue;
        }

        if c == '.' {
            let suivant = chars.get(i + 1);
            if suivant.is_some_and(|d| d.is_ascii_alphabetic() || *d == '_') {
                return Err(EvalError::UnsupportedConstruct("accès à un attribut".into()));
            }
        }

        return Err(EvalError::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Si un exposant `E[+-]chiffres` commence en `i`, renvoie l’index juste après.
fn longueur_exposant(chars: &[char], i: usize) -> Option<usize> {
    if chars.get(i) != Some(&'E') {
        return None;
    }
    let mut j = i + 1;
    if matches!(chars.get(j), Some('+') | Some('-')) {
        j += 1;
    }
    if !chars.get(j).is_some_and(|d| d.is_ascii_digit()) {
        return None;
    }
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    Some(j)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Pow => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
