// src/noyau/format.rs
//
// Affichage d’un résultat (côté appelant, le noyau rend un f64 brut).
// Convention : 8 chiffres significatifs, zéros finaux retirés,
// notation scientifique hors de [1E-4, 1E8) avec un 'E' majuscule
// (le 'e' minuscule est la constante : la sortie reste ré-évaluable).

/// Chiffres significatifs affichés.
pub const CHIFFRES_SIGNIFICATIFS: usize = 8;

/// Marqueur affiché à la place du résultat quand l’évaluation échoue.
pub const MARQUEUR_ERREUR: &str = "Error";

/// Formate une valeur façon `%.8G`.
pub fn format_resultat(v: f64) -> String {
    if !v.is_finite() {
        return MARQUEUR_ERREUR.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // arrondi à 8 chiffres significatifs d’abord : l’exposant peut en changer (99999999.9 -> 1E+08)
    let sci = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, v);
    let (mantisse, exposant) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..CHIFFRES_SIGNIFICATIFS as i32).contains(&exposant) {
        let decimales = (CHIFFRES_SIGNIFICATIFS as i32 - 1 - exposant) as usize;
        let fixe = format!("{v:.decimales$}");
        retirer_zeros(&fixe).to_string()
    } else {
        let signe = if exposant < 0 { '-' } else { '+' };
        format!("{}E{signe}{:02}", retirer_zeros(mantisse), exposant.abs())
    }
}

/// "1.2300" -> "1.23", "5.000" -> "5", "120" -> "120"
fn retirer_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
