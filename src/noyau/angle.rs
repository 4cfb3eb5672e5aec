// src/noyau/angle.rs

use serde::{Deserialize, Serialize};

/// Unité des arguments de sin/cos/tan.
///
/// En `Degrees`, le prétraitement enveloppe l’argument dans `radians(...)` :
/// la table des fonctions reçoit toujours des radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn basculer(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    /// Libellé court affiché par l’appelant.
    pub fn libelle(self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }
}

impl std::str::FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            autre => Err(format!("mode d’angle inconnu: {autre:?}")),
        }
    }
}
