use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::analyse::{ConformityBucket, FeasibilityLabel, PriorityLabel, Statistics};
use crate::errors::ApiError;
use crate::models::reglementation::RegulationAudit;
use crate::reports::{row_values, COLUMNS};

impl From<XlsxError> for ApiError {
    fn from(error: XlsxError) -> Self {
        ApiError::Export(error.to_string())
    }
}

/// Classeur avec une feuille de détail et une feuille de synthèse
pub fn render(records: &[RegulationAudit], stats: &Statistics) -> Result<Vec<u8>, ApiError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Audit")?;

        for (col, title) in (0u16..).zip(COLUMNS) {
            sheet.write_string_with_format(0, col, title, &bold)?;
            sheet.set_column_width(col, 18.0)?;
        }
        for (row, record) in (1u32..).zip(records) {
            for (col, value) in (0u16..).zip(row_values(record)) {
                sheet.write_string(row, col, value)?;
            }
        }
        sheet.set_freeze_panes(1, 0)?;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Synthèse")?;
        sheet.set_column_width(0, 28.0)?;

        let mut row = 0u32;
        let mut line = |label: &str, value: f64| -> Result<(), XlsxError> {
            sheet.write_string(row, 0, label)?;
            sheet.write_number(row, 1, value)?;
            row += 1;
            Ok(())
        };

        line("Total", stats.total as f64)?;
        let conformity = &stats.conformity;
        line(ConformityBucket::Conforme.label(), conformity.conforme as f64)?;
        line(ConformityBucket::NonConforme.label(), conformity.non_conforme as f64)?;
        line(ConformityBucket::NonApplicable.label(), conformity.non_applicable as f64)?;
        line(ConformityBucket::EnAttente.label(), conformity.en_attente as f64)?;
        line("Échéances dépassées", stats.overdue as f64)?;
        line("Taux de conformité (%)", f64::from(stats.conformity_rate))?;
        line("Taux de complétion (%)", f64::from(stats.completion_rate))?;
        for label in PriorityLabel::ALL {
            let count = stats.by_priority.get(&label).copied().unwrap_or_default();
            line(&format!("Priorité : {}", label.label()), count as f64)?;
        }
        for label in FeasibilityLabel::ALL {
            let count = stats.by_feasibility.get(&label).copied().unwrap_or_default();
            line(&format!("Faisabilité : {}", label.label()), count as f64)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
