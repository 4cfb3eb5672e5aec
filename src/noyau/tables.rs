//! Tables fixes : constantes et fonctions.
//!
//! Construites une seule fois (statique paresseuse), jamais modifiées ensuite.

use std::collections::HashMap;
use std::f64::consts;

use lazy_static::lazy_static;

/// Fonction numérique de la table : arité fixe, arguments déjà évalués.
#[derive(Clone, Copy, Debug)]
pub struct Fonction {
    pub arite: usize,
    pub calcul: fn(&[f64]) -> f64,
}

impl Fonction {
    pub const fn unaire(calcul: fn(&[f64]) -> f64) -> Self {
        Self { arite: 1, calcul }
    }
}

#[derive(Clone, Debug)]
pub struct Tables {
    constantes: HashMap<&'static str, f64>,
    fonctions: HashMap<&'static str, Fonction>,
}

lazy_static! {
    static ref STANDARD: Tables = Tables::construire();
}

impl Tables {
    /// Tables du processus : pi, e et les dix fonctions du pavé.
    pub fn standard() -> &'static Tables {
        &STANDARD
    }

    fn construire() -> Tables {
        let constantes = HashMap::from([("pi", consts::PI), ("e", consts::E)]);

        let fonctions = HashMap::from([
            ("sin", Fonction::unaire(|a| a[0].sin())),
            ("cos", Fonction::unaire(|a| a[0].cos())),
            ("tan", Fonction::unaire(|a| a[0].tan())),
            ("asin", Fonction::unaire(|a| a[0].asin())),
            ("acos", Fonction::unaire(|a| a[0].acos())),
            ("atan", Fonction::unaire(|a| a[0].atan())),
            ("log", Fonction::unaire(|a| a[0].log10())),
            ("ln", Fonction::unaire(|a| a[0].ln())),
            ("sqrt", Fonction::unaire(|a| a[0].sqrt())),
            ("radians", Fonction::unaire(|a| a[0].to_radians())),
        ]);

        Tables {
            constantes,
            fonctions,
        }
    }

    pub fn constante(&self, nom: &str) -> Option<f64> {
        self.constantes.get(nom).copied()
    }

    pub fn fonction(&self, nom: &str) -> Option<&Fonction> {
        self.fonctions.get(nom)
    }

    /// Copie enrichie d’une fonction (doublures de test).
    #[cfg(test)]
    pub(crate) fn avec_fonction(mut self, nom: &'static str, f: Fonction) -> Self {
        self.fonctions.insert(nom, f);
        self
    }
}
