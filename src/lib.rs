//! Core of the Gantt viewer: API-shaped task models, the chart preparation
//! pipeline, payload/CSV ingestion, and preference persistence. The egui
//! shell lives in the binary.

pub mod chart;
pub mod io;
pub mod model;
pub mod prefs;
