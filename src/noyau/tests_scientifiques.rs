//! Tests scientifiques (campagne) : propriétés du pavé + invariants + limites contrôlées.
//!
//! But : vérifier les promesses du noyau telles que l’appelant les voit.
//! - cas du pavé (5pi, sin(90) en degrés, 2(3+1), (2+3, ...)
//! - idempotence : ré-évaluer l’affichage d’un succès redonne le même affichage
//! - identités trig numériques (tolérance), symétries, périodicité en degrés
//! - stress borné (profondeur, longueur) sous budget temps

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::{evaluate, format_resultat, AngleMode, EvalError};

const DEG: AngleMode = AngleMode::Degrees;
const RAD: AngleMode = AngleMode::Radians;

fn eval_ok(expr: &str, mode: AngleMode) -> f64 {
    evaluate(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: AngleMode, attendu: f64) {
    let v = eval_ok(expr, mode);
    assert!(
        (v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0),
        "expr={expr:?} v={v} attendu={attendu}"
    );
}

fn assert_affiche(expr: &str, mode: AngleMode, attendu: &str) {
    let v = eval_ok(expr, mode);
    assert_eq!(format_resultat(v), attendu, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Cas du pavé ------------------------ */

#[test]
fn sci_cas_du_pave() {
    assert_eq!(evaluate("", DEG), Err(EvalError::Empty));
    assert_affiche("2+3", DEG, "5");
    assert_proche("5pi", DEG, 5.0 * PI);
    assert_affiche("sin(90)", DEG, "1");
    assert_affiche("sin(pi/2)", RAD, "1");
    assert_affiche("2(3+1)", DEG, "8");
    assert_affiche("(2+3", DEG, "5");
    assert_eq!(evaluate("1/0", DEG), Err(EvalError::DivisionByZero));
    assert!(matches!(evaluate("asin(2)", DEG), Err(EvalError::DomainError(_))));
    assert_eq!(
        evaluate("foo(1)", DEG),
        Err(EvalError::UnknownFunction("foo".into()))
    );
    assert_eq!(
        evaluate("x+1", DEG),
        Err(EvalError::UnknownIdentifier("x".into()))
    );
}

#[test]
fn sci_sequences_de_touches() {
    // ce que le pavé produit réellement (sin/cos/tan insèrent "nom(")
    assert_affiche("sin(30", DEG, "0.5");
    assert_affiche("cos(60)+sin(30)", DEG, "1");
    assert_affiche("√(2)^2", DEG, "2");
    assert_affiche("2π", RAD, "6.2831853");
    assert_affiche("2e", RAD, "5.4365637");
    assert_affiche("10%4", RAD, "2");

    // chiffre collé à une fonction : pas de × implicite, refusé
    assert!(matches!(evaluate("2sqrt(9", DEG), Err(EvalError::SyntaxError(_))));
}

/* ------------------------ Idempotence de l’affichage ------------------------ */

#[test]
fn sci_idempotence_affichage() {
    for expr in [
        "2+3",
        "1/3",
        "-7/9",
        "5pi",
        "sin(45)",
        "2^40",
        "1/2^20",
        "-(10^12)/7",
        "e^-12",
        "0.1+0.2",
        "99999999.9",
        "sqrt(2)",
    ] {
        let affiche = format_resultat(eval_ok(expr, DEG));
        let reaffiche = format_resultat(eval_ok(&affiche, DEG));
        assert_eq!(affiche, reaffiche, "expr={expr:?}");

        // nombre pur : valeur stable
        assert_eq!(eval_ok(&affiche, DEG), eval_ok(&affiche, RAD), "expr={expr:?}");
    }
}

/* ------------------------ Identités trig (numériques) ------------------------ */

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x)
    assert_proche("sin(-30)+sin(30)", DEG, 0.0);
    // cos(-x) = cos(x)
    assert_proche("cos(-60)-cos(60)", DEG, 0.0);
    // sin² + cos² = 1
    assert_proche("sin(37)^2+cos(37)^2", DEG, 1.0);
    assert_proche("sin(1.2)^2+cos(1.2)^2", RAD, 1.0);
}

#[test]
fn sci_periodicite_degres() {
    assert_proche("sin(390)-sin(30)", DEG, 0.0);
    assert_proche("cos(420)", DEG, 0.5);
    assert_proche("tan(225)", DEG, 1.0);
}

#[test]
fn sci_degres_contre_radians() {
    // même angle, deux modes
    let d = eval_ok("sin(57)", DEG);
    let r = eval_ok("sin(radians(57))", RAD);
    assert_eq!(d, r);
}

#[test]
fn sci_constantes() {
    assert_proche("pi", RAD, PI);
    assert_proche("e", RAD, E);
    assert_proche("ln(e^3)", RAD, 3.0);
    assert_proche("log(10^5)", RAD, 5.0);
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 60 niveaux, fermés par l’équilibrage
    let mut expr = String::new();
    for _ in 0..60 {
        expr.push_str("(1+");
        budget(t0, max);
    }
    expr.push('1');

    assert_affiche(&expr, RAD, "61");
}

#[test]
fn sci_stress_profondeur_sqrt() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt((sqrt(...))^2) : valeur stable, profondeur 60
    let mut expr = "4".to_string();
    for k in 0..60 {
        expr = if k % 2 == 0 {
            format!("sqrt({expr})")
        } else {
            format!("({expr})^2")
        };
        budget(t0, max);
    }

    assert_proche(&expr, RAD, 4.0);
}

#[test]
fn sci_stress_taille_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    // 80*(1/2)=40
    assert_affiche(&expr, RAD, "40");
}

#[test]
fn sci_stress_degres_imbriques() {
    // sin(sin(sin(...))) en degrés : chaque niveau reçoit radians(...)
    let mut expr = "90".to_string();
    for _ in 0..20 {
        expr = format!("sin({expr})");
    }
    let v = eval_ok(&expr, DEG);
    assert!(v > 0.0 && v < 1.0, "v={v}");
}
