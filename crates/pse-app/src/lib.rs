//! Shared application service layer for the PSE flow calculator.
//!
//! Both front ends (CLI and web) go through this crate: it parses form inputs
//! with their unit tags, runs the flow solver, and manages saved calculations.

pub mod calc_service;
pub mod catalog;
pub mod config;
pub mod error;
pub mod record_service;

pub use calc_service::{
    FlowReport, FlowRequest, OrificeConversion, OrificeConvertRequest, OrificeSize, ReleaseInputs,
    RequiredAreaReport, RequiredAreaRequest, UnitValue, calculate, convert_orifice, required_area,
};
pub use catalog::{
    CD_PRESETS, CdPreset, HOLE_SIZE_PRESETS, HoleSize, HoleSizePreset, UnitCatalog, unit_catalog,
};
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};
pub use record_service::{
    DeleteOutcome, SaveOutcome, SaveRequest, SavedCalculation, build_draft, delete_calculation,
    find_calculation, save_calculation, view_calculation,
};
