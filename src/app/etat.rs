//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : tenir le tampon d’expression, le mode d’angle, la mémoire et
//! l’historique, et traduire chaque touche du pavé en modification de l’état.
//!
//! Contrats :
//! - L’évaluation passe uniquement par `noyau::evaluate` (aucun calcul ici).
//! - Toute erreur s’affiche `"Error"` ; l’erreur réelle est gardée et journalisée.
//! - L’historique ne reçoit que les succès.

use tracing::{debug, warn};

use super::historique::Historique;
use crate::noyau::{evaluate, format_resultat, AngleMode, EvalError, MARQUEUR_ERREUR};

/// Tampon affiché au démarrage et après AC.
const TAMPON_VIDE: &str = "0";

/// Une touche du pavé.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Touche {
    /// AC : tout effacer.
    Ac,
    /// DEL : retirer le dernier caractère.
    Del,
    /// MS : mémoriser le tampon s’il est un nombre.
    Ms,
    /// MR : rappeler la mémoire.
    Mr,
    /// `=`
    Egal,
    /// Chiffres, opérateurs, constantes, fonctions (libellé du bouton).
    Saisie(String),
}

impl Touche {
    /// Libellé du bouton -> touche.
    pub fn depuis_libelle(libelle: &str) -> Self {
        match libelle {
            "AC" => Touche::Ac,
            "DEL" => Touche::Del,
            "MS" => Touche::Ms,
            "MR" => Touche::Mr,
            "=" => Touche::Egal,
            autre => Touche::Saisie(autre.to_string()),
        }
    }
}

/// Texte réellement inséré pour une touche de saisie.
fn texte_insere(libelle: &str) -> String {
    match libelle {
        "√" => "sqrt(".to_string(),
        "sin" | "cos" | "tan" => format!("{libelle}("),
        autre => autre.to_string(),
    }
}

#[derive(Clone, Debug)]
pub struct Calculatrice<H: Historique> {
    // --- entrée utilisateur ---
    pub expression: String,

    // --- paramètres ---
    pub mode: AngleMode,

    // --- MS / MR ---
    pub memoire: f64,

    // dernière erreur (l’écran n’affiche que "Error")
    pub derniere_erreur: Option<EvalError>,

    historique: H,
}

impl<H: Historique> Calculatrice<H> {
    pub fn new(mode: AngleMode, historique: H) -> Self {
        Self {
            expression: TAMPON_VIDE.to_string(),
            mode,
            memoire: 0.0,
            derniere_erreur: None,
            historique,
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    pub fn appuyer(&mut self, touche: Touche) {
        debug!(?touche, tampon = %self.expression, "touche");
        match touche {
            Touche::Ac => self.expression = TAMPON_VIDE.to_string(),
            Touche::Del => {
                self.expression.pop();
                if self.expression.is_empty() {
                    self.expression = TAMPON_VIDE.to_string();
                }
            }
            Touche::Ms => {
                // un tampon qui n’est pas un nombre est ignoré
                if let Ok(v) = self.expression.trim().parse::<f64>() {
                    if v.is_finite() {
                        self.memoire = v;
                    }
                }
            }
            Touche::Mr => {
                let rappel = format_resultat(self.memoire);
                if self.expression == TAMPON_VIDE {
                    self.expression = rappel;
                } else {
                    self.expression.push_str(&rappel);
                }
            }
            Touche::Egal => self.calculer(),
            Touche::Saisie(libelle) => {
                let texte = texte_insere(&libelle);
                let remplace = (self.expression == TAMPON_VIDE
                    || self.expression == MARQUEUR_ERREUR)
                    && libelle != "."
                    && libelle != "%";
                if remplace {
                    self.expression = texte;
                } else {
                    self.expression.push_str(&texte);
                }
            }
        }
    }

    /// Remplace le tampon (saisie clavier directe).
    pub fn remplacer(&mut self, texte: &str) {
        let texte = texte.trim();
        self.expression = if texte.is_empty() {
            TAMPON_VIDE.to_string()
        } else {
            texte.to_string()
        };
    }

    /// `=` : évalue le tampon dans le mode courant.
    pub fn calculer(&mut self) {
        match evaluate(&self.expression, self.mode) {
            Ok(v) => {
                let affiche = format_resultat(v);
                self.historique
                    .record(format!("{} = {}", self.expression, affiche));
                self.expression = affiche;
                self.derniere_erreur = None;
            }
            Err(e) => {
                warn!(expression = %self.expression, erreur = %e, "évaluation refusée");
                self.expression = MARQUEUR_ERREUR.to_string();
                self.derniere_erreur = Some(e);
            }
        }
    }

    /* ------------------------ Mode d’angle ------------------------ */

    pub fn basculer_mode(&mut self) {
        self.mode = self.mode.basculer();
    }

    pub fn libelle_mode(&self) -> &'static str {
        self.mode.libelle()
    }

    /* ------------------------ Historique ------------------------ */

    /// Au plus `limite` entrées, la plus récente d’abord.
    pub fn journal(&self, limite: usize) -> Vec<String> {
        self.historique.recent_entries(limite)
    }
}
