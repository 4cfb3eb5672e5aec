// src/config.rs
//
// Configuration : défauts <- fichier TOML <- variables d’environnement.
//
// Fichier (toutes les clés optionnelles) :
//   angle_mode = "degrees"   # ou "radians"
//   history_limit = 50

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::noyau::AngleMode;

/// Entrées d’historique affichées par défaut (vue HISTORY).
pub const LIMITE_HISTORIQUE_DEFAUT: usize = 50;

const DOSSIER_CONFIG: &str = "calculatrice-sci";
const FICHIER_CONFIG: &str = "config.toml";

const ENV_MODE: &str = "CALC_ANGLE_MODE";
const ENV_LIMITE: &str = "CALC_HISTORY_LIMIT";

/// Configuration complète après fusion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mode_angle: AngleMode,
    pub limite_historique: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode_angle: AngleMode::Degrees,
            limite_historique: LIMITE_HISTORIQUE_DEFAUT,
        }
    }
}

impl Config {
    /// Chemin explicite : le fichier doit exister.
    /// Sinon : fichier par défaut s’il existe, défauts sinon.
    pub fn charger(chemin: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(chemin) = chemin {
            config.fusionner(lire_brut(chemin)?);
        } else if let Some(chemin) = chemin_par_defaut() {
            if let Some(brut) = lire_brut_si_present(&chemin)? {
                config.fusionner(brut);
            }
        }

        config.appliquer_env(|cle| std::env::var(cle).ok());

        info!(
            mode = config.mode_angle.libelle(),
            limite = config.limite_historique,
            "configuration chargée"
        );
        Ok(config)
    }

    fn fusionner(&mut self, brut: ConfigBrute) {
        if let Some(mode) = brut.angle_mode {
            self.mode_angle = mode;
        }
        if let Some(limite) = brut.history_limit {
            self.limite_historique = limite;
        }
    }

    /// Variables d’environnement (valeur invalide : ignorée avec un avertissement).
    fn appliquer_env(&mut self, lire: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = lire(ENV_MODE).filter(|v| !v.trim().is_empty()) {
            match mode.parse::<AngleMode>() {
                Ok(m) => self.mode_angle = m,
                Err(e) => warn!("{ENV_MODE} ignorée: {e}"),
            }
        }
        if let Some(limite) = lire(ENV_LIMITE).filter(|v| !v.trim().is_empty()) {
            match limite.trim().parse::<usize>() {
                Ok(n) => self.limite_historique = n,
                Err(e) => warn!("{ENV_LIMITE} ignorée: {limite:?} ({e})"),
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigBrute {
    angle_mode: Option<AngleMode>,
    history_limit: Option<usize>,
}

fn lire_brut(chemin: &Path) -> Result<ConfigBrute> {
    debug!("lecture de la configuration {}", chemin.display());
    let contenu = fs::read_to_string(chemin)
        .with_context(|| format!("lecture de {}", chemin.display()))?;
    let brut: ConfigBrute = toml::from_str(&contenu)
        .with_context(|| format!("analyse de {}", chemin.display()))?;
    Ok(brut)
}

fn lire_brut_si_present(chemin: &Path) -> Result<Option<ConfigBrute>> {
    if chemin.exists() {
        lire_brut(chemin).map(Some)
    } else {
        debug!("{} absent : défauts", chemin.display());
        Ok(None)
    }
}

/// `<config_dir>/calculatrice-sci/config.toml`
pub fn chemin_par_defaut() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(DOSSIER_CONFIG).join(FICHIER_CONFIG))
}
