// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + historique.rs)
// - Ré-exporter Calculatrice / Touche / Historique (pour main.rs)
//
// Important:
// - Aucun rendu ici : l’écran et le pavé sont fournis par l’appelant.

pub mod etat;
pub mod historique;

// Ré-export pratique : `use calculatrice_sci::app::Calculatrice;`
pub use etat::{Calculatrice, Touche};
pub use historique::{Historique, HistoriqueMemoire};
