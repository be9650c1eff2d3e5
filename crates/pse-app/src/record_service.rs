//! Saving, viewing and deleting calculations.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use pse_gas::AreaUnit;
use pse_records::{CalculationDraft, CalculationRecord, RecordId, RecordStore, WriteOutcome};

use crate::calc_service::{FlowRequest, OrificeSize};
use crate::error::{AppError, AppResult};

/// Form contents submitted with "save".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub calculation_title: String,
    #[serde(flatten)]
    pub flow: FlowRequest,
    /// Area unit stored when the orifice was entered as a diameter (default mm²)
    #[serde(default)]
    pub area_unit: Option<String>,
}

/// Outcome of a mutation that always succeeds in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    pub record: CalculationRecord,
    /// Set when the record is kept for this session only
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteOutcome {
    /// Every record that carried the id, in their former order
    pub removed: Vec<CalculationRecord>,
    pub warning: Option<String>,
}

/// A saved record turned back into an editable calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedCalculation {
    pub id: RecordId,
    pub timestamp: String,
    pub user_name: String,
    pub calculation_title: String,
    pub request: FlowRequest,
}

impl From<&CalculationRecord> for SavedCalculation {
    fn from(record: &CalculationRecord) -> Self {
        Self {
            id: record.id.clone(),
            timestamp: record.timestamp.clone(),
            user_name: record.inputs.user_name.clone(),
            calculation_title: record.inputs.calculation_title.clone(),
            request: FlowRequest::from(&record.inputs),
        }
    }
}

fn durability_warning<T>(outcome: &WriteOutcome<T>) -> Option<String> {
    outcome
        .persist_error
        .as_ref()
        .map(|err| format!("change kept for this session only, file not written: {err}"))
}

/// Validate a save request and build the draft the store will persist.
pub fn build_draft(request: &SaveRequest) -> AppResult<CalculationDraft> {
    let user_name = request.user_name.trim();
    let title = request.calculation_title.trim();
    if user_name.is_empty() || title.is_empty() {
        return Err(AppError::Validation(
            "user name and calculation title are required".to_string(),
        ));
    }

    let (area, area_unit) = match &request.flow.orifice {
        OrificeSize::Area { value, unit } => {
            let unit: AreaUnit = unit.parse()?;
            (*value, unit)
        }
        diameter @ OrificeSize::Diameter { .. } => {
            let unit: AreaUnit = match &request.area_unit {
                Some(tag) => tag.parse()?,
                None => AreaUnit::SquareMillimeter,
            };
            (diameter.area_in(unit)?, unit)
        }
    };

    let release = &request.flow.release;
    Ok(CalculationDraft {
        user_name: user_name.to_string(),
        calculation_title: title.to_string(),
        gas: release.gas.clone(),
        release_type: release.release_type,
        site: release.site,
        p0: release.p0,
        p0_unit: release.p0_unit.clone(),
        p2: release.p2,
        p2_unit: release.p2_unit.clone(),
        t0: release.t0,
        t0_unit: release.t0_unit.clone(),
        area,
        area_unit: area_unit.tag().to_string(),
        duration: release.duration,
        duration_unit: release.duration_unit.clone(),
        cd: release.cd,
    })
}

/// Validate and append a calculation. Nothing is stored when validation fails.
pub fn save_calculation(store: &mut RecordStore, request: &SaveRequest) -> AppResult<SaveOutcome> {
    let draft = build_draft(request)?;
    let outcome = store.append(draft);
    let warning = durability_warning(&outcome);
    if warning.is_some() {
        warn!(id = %outcome.value.id, "calculation not persisted");
    }
    Ok(SaveOutcome {
        record: outcome.value,
        warning,
    })
}

pub fn find_calculation<'a>(store: &'a RecordStore, id: &str) -> AppResult<&'a CalculationRecord> {
    store
        .list()
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::RecordNotFound(id.to_string()))
}

/// Load a saved record back into the calculator.
pub fn view_calculation(store: &RecordStore, id: &str) -> AppResult<SavedCalculation> {
    let record = find_calculation(store, id)?;
    info!(id, title = %record.inputs.calculation_title, "viewing calculation");
    Ok(SavedCalculation::from(record))
}

/// Delete a record by id. The store treats unknown ids as a no-op; here they are reported.
pub fn delete_calculation(store: &mut RecordStore, id: &str) -> AppResult<DeleteOutcome> {
    let outcome = store.remove(id);
    let warning = durability_warning(&outcome);
    if outcome.value.is_empty() {
        return Err(AppError::RecordNotFound(id.to_string()));
    }
    Ok(DeleteOutcome {
        removed: outcome.value,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user: &str, title: &str) -> SaveRequest {
        SaveRequest {
            user_name: user.to_string(),
            calculation_title: title.to_string(),
            ..SaveRequest::default()
        }
    }

    #[test]
    fn blank_name_or_title_is_rejected() {
        assert!(matches!(
            build_draft(&request("  ", "Flange leak")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            build_draft(&request("Sam", "")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn names_are_trimmed() {
        let draft = build_draft(&request(" Sam ", " Flange leak\n")).unwrap();
        assert_eq!(draft.user_name, "Sam");
        assert_eq!(draft.calculation_title, "Flange leak");
    }

    #[test]
    fn diameter_is_stored_as_area() {
        let mut req = request("Sam", "Valve");
        req.flow.orifice = OrificeSize::Diameter {
            value: 2.0,
            unit: "mm".to_string(),
        };
        req.area_unit = Some("cm²".to_string());
        let draft = build_draft(&req).unwrap();
        assert_eq!(draft.area_unit, "cm²");
        assert!((draft.area - std::f64::consts::PI / 100.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_area_unit_is_rejected() {
        let mut req = request("Sam", "Valve");
        req.flow.orifice = OrificeSize::Area {
            value: 1.0,
            unit: "acre".to_string(),
        };
        assert!(matches!(build_draft(&req), Err(AppError::Gas(_))));
    }
}
