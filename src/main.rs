// src/main.rs
//
// Calculatrice scientifique — point d’entrée en ligne de commande
// ----------------------------------------------------------------
// - `calculatrice-sci 2+3 "sin(90)"` : évalue chaque expression puis quitte
// - `calculatrice-sci`               : boucle interactive sur stdin
//
// Journalisation sur stderr : RUST_LOG, sinon CALC_LOG, sinon "warn".

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculatrice_sci::app::{Calculatrice, Historique, HistoriqueMemoire, Touche};
use calculatrice_sci::config::Config;
use calculatrice_sci::noyau::{AngleMode, MARQUEUR_ERREUR};

#[derive(Parser, Debug)]
#[command(
    name = "calculatrice-sci",
    version,
    about = "Calculatrice scientifique (degrés/radians, × implicite, parenthèses auto)"
)]
struct Cli {
    /// Angles en radians
    #[arg(long, conflicts_with = "deg")]
    rad: bool,

    /// Angles en degrés
    #[arg(long)]
    deg: bool,

    /// Fichier de configuration TOML
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Expressions à évaluer (boucle interactive si absent), `-5+2` compris
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    exprs: Vec<String>,
}

impl Cli {
    fn mode(&self, defaut: AngleMode) -> AngleMode {
        if self.rad {
            AngleMode::Radians
        } else if self.deg {
            AngleMode::Degrees
        } else {
            defaut
        }
    }
}

fn installer_journal() {
    let filtre = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("CALC_LOG"))
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    installer_journal();

    let config = Config::charger(cli.config.as_deref())?;
    let mut calc = Calculatrice::new(cli.mode(config.mode_angle), HistoriqueMemoire::new());

    let stdout = io::stdout();
    let mut sortie = stdout.lock();

    if !cli.exprs.is_empty() {
        let mut echec = false;
        for expr in &cli.exprs {
            calc.remplacer(expr);
            calc.calculer();
            writeln!(sortie, "{}", calc.expression)?;
            echec |= calc.expression == MARQUEUR_ERREUR;
        }
        return Ok(if echec {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let stdin = io::stdin();
    for ligne in stdin.lock().lines() {
        let ligne = ligne.context("lecture de stdin")?;
        if !executer_ligne(&mut calc, &ligne, config.limite_historique, &mut sortie)? {
            break;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Une ligne de la boucle interactive. `false` : quitter.
fn executer_ligne<H: Historique>(
    calc: &mut Calculatrice<H>,
    ligne: &str,
    limite_defaut: usize,
    sortie: &mut impl Write,
) -> Result<bool> {
    let ligne = ligne.trim();
    if ligne.is_empty() {
        return Ok(true);
    }

    if let Some(commande) = ligne.strip_prefix(':') {
        let mut mots = commande.split_whitespace();
        match mots.next().unwrap_or("") {
            "q" | "quit" => return Ok(false),
            "deg" => calc.mode = AngleMode::Degrees,
            "rad" => calc.mode = AngleMode::Radians,
            "mode" => calc.basculer_mode(),
            "ms" => calc.appuyer(Touche::Ms),
            "mr" => calc.appuyer(Touche::Mr),
            "ac" => calc.appuyer(Touche::Ac),
            "hist" => {
                let limite = mots
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .unwrap_or(limite_defaut);
                for entree in calc.journal(limite) {
                    writeln!(sortie, "{entree}")?;
                }
                return Ok(true);
            }
            autre => {
                writeln!(sortie, "commande inconnue : :{autre}")?;
                return Ok(true);
            }
        }
        writeln!(sortie, "[{}] {}", calc.libelle_mode(), calc.expression)?;
        return Ok(true);
    }

    calc.remplacer(ligne);
    calc.appuyer(Touche::Egal);
    writeln!(sortie, "[{}] {}", calc.libelle_mode(), calc.expression)?;
    Ok(true)
}
