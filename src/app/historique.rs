//! src/app/historique.rs
//!
//! Historique des calculs réussis.
//!
//! Une entrée = `"<expression> = <affichage>"`. L’appelant n’enregistre
//! qu’en cas de succès ; le noyau n’en sait rien.

/// Stockage d’historique (mémoire, fichier, base...).
pub trait Historique {
    /// Ajoute une entrée en fin d’historique.
    fn record(&mut self, entree: String);

    /// Au plus `limite` entrées, la plus récente d’abord.
    fn recent_entries(&self, limite: usize) -> Vec<String>;
}

/// Historique en mémoire : ajout seul, ordre d’insertion.
#[derive(Clone, Debug, Default)]
pub struct HistoriqueMemoire {
    entrees: Vec<String>,
}

impl HistoriqueMemoire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}

impl Historique for HistoriqueMemoire {
    fn record(&mut self, entree: String) {
        self.entrees.push(entree);
    }

    fn recent_entries(&self, limite: usize) -> Vec<String> {
        self.entrees.iter().rev().take(limite).cloned().collect()
    }
}
