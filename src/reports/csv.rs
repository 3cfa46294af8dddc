use crate::errors::ApiError;
use crate::models::reglementation::RegulationAudit;
use crate::reports::{row_values, COLUMNS};

/// Rapport CSV (séparateur `;`, attendu par Excel en locale française)
pub fn render(records: &[RegulationAudit]) -> Result<Vec<u8>, ApiError> {
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|error| ApiError::Export(error.to_string()))?;
    for record in records {
        writer
            .write_record(row_values(record))
            .map_err(|error| ApiError::Export(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| ApiError::Export(error.to_string()))
}
