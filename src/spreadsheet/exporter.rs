//! Spreadsheet exporter: record store → roster worksheet (.xlsx).

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::calculation::Entitlement;
use crate::error::{EngineError, EngineResult};
use crate::models::VacationRecord;
use crate::store::{RecordOrder, RecordStore};

/// Column headers and widths of the exported worksheet, in order.
pub const EXPORT_COLUMNS: [(&str, f64); 8] = [
    ("ID", 6.0),
    ("RH", 20.0),
    ("Funcionário", 20.0),
    ("Salário", 15.0),
    ("Faltas", 10.0),
    ("Dias de Férias", 15.0),
    ("Valor das Férias", 20.0),
    ("Data de Cadastro", 22.0),
];

/// Writes the full roster to a workbook.
///
/// Entitled days and values are recomputed from each record; nothing derived
/// is copied from storage.
pub struct SpreadsheetExporter {
    store: Arc<dyn RecordStore>,
    sheet_name: String,
}

impl SpreadsheetExporter {
    /// Creates an exporter writing to a worksheet named `sheet_name`.
    pub fn new(store: Arc<dyn RecordStore>, sheet_name: impl Into<String>) -> Self {
        Self {
            store,
            sheet_name: sheet_name.into(),
        }
    }

    /// Exports every record, newest first, and returns the workbook bytes.
    pub fn export_roster(&self) -> EngineResult<Vec<u8>> {
        let records = self.store.find_all(RecordOrder::NewestFirst)?;
        let rows = records
            .iter()
            .map(|record| record.entitlement().map(|entitlement| (record, entitlement)))
            .collect::<EngineResult<Vec<_>>>()?;
        let bytes = self.write_workbook(&rows).map_err(render_error)?;
        info!(
            records = records.len(),
            bytes = bytes.len(),
            "Roster workbook exported"
        );
        Ok(bytes)
    }

    fn write_workbook(
        &self,
        rows: &[(&VacationRecord, Entitlement)],
    ) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = Format::new().set_bold();
        let money_format = Format::new().set_num_format("0.00");

        for (col, (header, width)) in EXPORT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, *width)?;
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
        }

        for (index, (record, entitlement)) in rows.iter().enumerate() {
            write_record_row(
                worksheet,
                index as u32 + 1,
                record,
                entitlement,
                &money_format,
            )?;
        }

        workbook.save_to_buffer()
    }
}

fn write_record_row(
    worksheet: &mut Worksheet,
    row: u32,
    record: &VacationRecord,
    entitlement: &Entitlement,
    money_format: &Format,
) -> Result<(), XlsxError> {
    worksheet.write_number(row, 0, record.id.0 as f64)?;
    worksheet.write_string(row, 1, &record.hr_representative)?;
    worksheet.write_string(row, 2, &record.employee_name)?;
    worksheet.write_number_with_format(row, 3, money(record.salary), money_format)?;
    worksheet.write_number(row, 4, f64::from(record.absence_count))?;
    worksheet.write_number(row, 5, f64::from(entitlement.entitled_days))?;
    worksheet.write_number_with_format(row, 6, money(entitlement.value), money_format)?;
    worksheet.write_string(row, 7, record.created_at_display())?;
    Ok(())
}

fn money(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

fn render_error(err: XlsxError) -> EngineError {
    EngineError::Render {
        message: format!("failed to write workbook: {err}"),
    }
}
