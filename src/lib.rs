//! Score F1 season and race-weekend predictions against championship standings.
//!
//! The [`scoring`] module is a pure engine: it resolves free-text predicted
//! names against a standings table and produces closest-position and
//! correct-guess scores. The other modules fetch standings, persist
//! predictions and render results for the command line.

pub mod config;
pub mod fetch;
pub mod output;
pub mod predictions;
pub mod scoring;
pub mod standings;
