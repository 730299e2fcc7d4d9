//! Place data core.
//!
//! Turns the raw text that place records arrive with into structured data:
//! OpenStreetMap-style opening hours become display-ready weekday groups,
//! and candidate records from different sources are reconciled by fuzzy
//! name matching or address scoring.

pub mod cache;
pub mod config;
pub mod hours;
pub mod matching;
pub mod sources;
pub mod web;
