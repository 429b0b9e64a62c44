//! Synchronizes SendGrid single send metadata and statistics into an
//! Airtable table, one row per send.

pub mod airtable;
pub mod domain;
pub mod errors;
pub mod models;
pub mod sendgrid;
pub mod settings;
pub mod sync;
