//! Erreurs d’évaluation du noyau.
//!
//! Toutes locales, jamais fatales : l’appelant les ramène à l’état "Error".
//! Les variantes restent distinctes pour que tests et journal puissent les discriminer.

use thiserror::Error;

/// Résultat du noyau.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Entrée vide (après trim).
    #[error("entrée vide")]
    Empty,

    /// Texte hors grammaire (affectation, liste, comparaison, `)` en trop, ...).
    #[error("erreur de syntaxe : {0}")]
    SyntaxError(String),

    /// Identifiant absent de la table des constantes.
    #[error("identifiant inconnu : {0}")]
    UnknownIdentifier(String),

    /// Appel d’une fonction absente de la table.
    #[error("fonction inconnue : {0}")]
    UnknownFunction(String),

    #[error("{function} attend {expected} argument(s), reçu {found}")]
    ArityError {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("division par zéro")]
    DivisionByZero,

    /// Résultat non fini à partir d’opérandes finis (asin(2), log(0), débordement...).
    #[error("hors domaine : {0}")]
    DomainError(String),

    /// Construction reconnue mais refusée (accès à un attribut, chaîne littérale).
    #[error("construction non supportée : {0}")]
    UnsupportedConstruct(String),
}

impl EvalError {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        EvalError::SyntaxError(msg.into())
    }

    pub(crate) fn domaine(ctx: impl Into<String>) -> Self {
        EvalError::DomainError(ctx.into())
    }
}
