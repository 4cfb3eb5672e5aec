//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur doit être une EvalError (jamais de panique), et un succès est fini
//! - invariant clé : l’affichage d’un succès se ré-évalue en lui-même

use std::time::{Duration, Instant};

use super::{evaluate, format_resultat, AngleMode, EvalError};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Erreurs *normales* pour une expression bien formée : le domaine numérique.
fn is_erreur_numerique(e: &EvalError) -> bool {
    matches!(e, EvalError::DivisionByZero | EvalError::DomainError(_))
}

fn check_idempotence(expr: &str, v: f64, mode: AngleMode) {
    assert!(v.is_finite(), "succès non fini: expr={expr:?} v={v}");
    let affiche = format_resultat(v);
    let v2 = evaluate(&affiche, mode)
        .unwrap_or_else(|e| panic!("affichage non ré-évaluable: {affiche:?} (expr={expr:?}) err={e}"));
    assert_eq!(format_resultat(v2), affiche, "expr={expr:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(100);
    match rng.pick(4) {
        0 => format!("{entier}.{}", rng.pick(1000)),
        1 => "0".to_string(),
        _ => format!("{entier}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => format!("{}pi", 1 + rng.pick(9)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    const FONCTIONS: [&str; 10] = [
        "sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "sqrt", "radians",
    ];

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        // exposant borné pour rester loin du débordement systématique
        6 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        7 => format!("-{}", gen_expr(rng, depth - 1)),
        // multiplication implicite
        8 => format!("{}({})", 1 + rng.pick(9), gen_expr(rng, depth - 1)),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Saisie "au hasard" sur l’alphabet du pavé (souvent mal formée).
fn gen_touches(rng: &mut Rng, n: usize) -> String {
    const TOUCHES: [&str; 27] = [
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "^", "%", "(",
        ")", "π", "e", "√", "sin(", "cos(", "tan(", "sqrt(", " ",
    ];
    let mut s = String::new();
    for _ in 0..n {
        s.push_str(TOUCHES[rng.pick(TOUCHES.len() as u32) as usize]);
    }
    s
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_idempotence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if rng.coin() {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        };

        let r1 = evaluate(&expr, mode);
        let r2 = evaluate(&expr, mode);
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");

        match r1 {
            Ok(v) => {
                check_idempotence(&expr, v, mode);
                seen_ok += 1;
            }
            Err(e) => {
                // expressions bien formées : seules les erreurs numériques sont admises
                assert!(
                    is_erreur_numerique(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_saisie_au_hasard_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = 1 + rng.pick(12) as usize;
        let saisie = gen_touches(&mut rng, n);

        // toute issue est acceptable, sauf la panique ou un succès non fini
        if let Ok(v) = evaluate(&saisie, AngleMode::Degrees) {
            check_idempotence(&saisie, v, AngleMode::Degrees);
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = evaluate(&expr, AngleMode::Radians).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(format_resultat(v), "400");
}
