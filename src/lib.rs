//! Calculatrice scientifique : noyau d’évaluation + état du pavé + configuration.

pub mod app;
pub mod config;
pub mod noyau;
