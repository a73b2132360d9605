//! Spreadsheet importer: roster worksheet (.xlsx) → new vacation records.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculation::{MAX_SALARY, round_money};
use crate::error::{EngineError, EngineResult};
use crate::models::{RecordId, VacationDraft};
use crate::store::RecordStore;

/// Leading columns read from each row: id (ignored), HR representative,
/// employee, salary.
const IMPORT_COLUMNS: u32 = 4;
const COL_HR_REPRESENTATIVE: usize = 1;
const COL_EMPLOYEE_NAME: usize = 2;
const COL_SALARY: usize = 3;

/// Why a worksheet row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRejection {
    /// The HR representative cell is empty.
    MissingHrRepresentative,
    /// The employee cell is empty.
    MissingEmployeeName,
    /// The salary cell is empty.
    MissingSalary,
    /// The salary cell does not hold a number.
    InvalidSalary {
        /// The cell content as read.
        value: String,
    },
    /// The salary is zero or negative.
    NonPositiveSalary,
    /// The salary is above the largest accepted amount.
    SalaryTooLarge {
        /// The salary as read.
        value: String,
    },
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHrRepresentative => write!(f, "missing HR representative"),
            Self::MissingEmployeeName => write!(f, "missing employee name"),
            Self::MissingSalary => write!(f, "missing salary"),
            Self::InvalidSalary { value } => write!(f, "salary '{value}' is not a number"),
            Self::NonPositiveSalary => write!(f, "salary must be greater than zero"),
            Self::SalaryTooLarge { value } => {
                write!(f, "salary {value} is above the maximum of {MAX_SALARY}")
            }
        }
    }
}

/// A skipped worksheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// 1-based worksheet row number, as shown by spreadsheet applications.
    pub row: u32,
    /// Why the row was skipped.
    pub reason: RowRejection,
}

/// The rows of a roster worksheet, partitioned into drafts and rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSheet {
    /// Drafts built from valid rows, in worksheet order.
    pub accepted: Vec<VacationDraft>,
    /// Rows skipped by validation, in worksheet order.
    pub rejected: Vec<RejectedRow>,
}

/// The result of a completed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Drafts built from valid rows, in worksheet order.
    pub accepted: Vec<VacationDraft>,
    /// Rows skipped by validation.
    pub rejected: Vec<RejectedRow>,
    /// Ids of the records created, in worksheet order.
    pub created: Vec<RecordId>,
}

impl ImportSummary {
    /// Number of rows skipped by validation.
    pub fn rejected_row_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Removes an uploaded file when dropped, on every exit path.
struct UploadGuard<'a> {
    path: &'a Path,
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        match fs::remove_file(self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Uploaded workbook removed"),
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to remove uploaded workbook"
            ),
        }
    }
}

/// Bulk importer for roster worksheets.
///
/// Imported rows carry no absence data, so every draft starts with zero
/// absences and the full entitlement.
pub struct SpreadsheetImporter {
    store: Arc<dyn RecordStore>,
    sheet_name: String,
}

impl SpreadsheetImporter {
    /// Creates an importer reading the worksheet named `sheet_name`.
    pub fn new(store: Arc<dyn RecordStore>, sheet_name: impl Into<String>) -> Self {
        Self {
            store,
            sheet_name: sheet_name.into(),
        }
    }

    /// Imports the uploaded workbook at `path` into the record store.
    ///
    /// The file is deleted afterwards whether or not the import succeeds.
    ///
    /// # Errors
    ///
    /// - `FileFormat` when the workbook cannot be read or lacks the roster
    ///   sheet; nothing is created.
    /// - `PartialImport` when the store fails part way; records created
    ///   before the failure remain.
    pub fn import_file(&self, path: &Path) -> EngineResult<ImportSummary> {
        let _guard = UploadGuard { path };
        info!(path = %path.display(), sheet = %self.sheet_name, "Importing roster workbook");

        let parsed = read_roster_sheet(path, &self.sheet_name)?;
        for rejected in &parsed.rejected {
            debug!(row = rejected.row, reason = %rejected.reason, "Worksheet row rejected");
        }

        let rejected_count = parsed.rejected.len();
        let bulk = if parsed.accepted.is_empty() {
            None
        } else {
            Some(self.store.create_many(parsed.accepted.clone()))
        };

        let created: Vec<RecordId> = bulk
            .as_ref()
            .map(|b| b.created.iter().map(|r| r.id).collect())
            .unwrap_or_default();

        if let Some(failure) = bulk.and_then(|b| b.failure) {
            warn!(
                created = created.len(),
                accepted = parsed.accepted.len(),
                rejected = rejected_count,
                error = %failure,
                "Roster import stopped by store failure"
            );
            return Err(EngineError::PartialImport {
                created: created.len(),
                rejected: rejected_count,
                message: failure.to_string(),
            });
        }

        info!(
            accepted = parsed.accepted.len(),
            rejected = rejected_count,
            created = created.len(),
            "Roster import completed"
        );

        Ok(ImportSummary {
            accepted: parsed.accepted,
            rejected: parsed.rejected,
            created,
        })
    }
}

/// Reads and validates the roster worksheet without touching any store.
///
/// The first worksheet row is the header. Rows whose four leading cells are
/// all empty are ignored; any other row is either accepted as a draft or
/// reported as rejected.
pub fn read_roster_sheet(path: &Path, sheet_name: &str) -> EngineResult<ParsedSheet> {
    let path_str = path.display().to_string();
    let file_format = |message: String| EngineError::FileFormat {
        path: path_str.clone(),
        message,
    };

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| file_format(format!("failed to open workbook: {e}")))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(file_format(format!("sheet '{sheet_name}' not found")));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| file_format(format!("failed to read sheet '{sheet_name}': {e}")))?;

    Ok(parse_rows(&range))
}

fn parse_rows(range: &Range<Data>) -> ParsedSheet {
    let mut parsed = ParsedSheet::default();
    let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
        return parsed;
    };

    // Positions are absolute so an empty id column does not shift the others.
    for row in start_row.max(1)..=end_row {
        let cells: Vec<Option<&Data>> = (0..IMPORT_COLUMNS)
            .map(|col| range.get_value((row, col)))
            .collect();

        if cells.iter().all(|cell| is_blank(*cell)) {
            continue;
        }

        match parse_row(&cells) {
            Ok(draft) => parsed.accepted.push(draft),
            Err(reason) => parsed.rejected.push(RejectedRow {
                row: row + 1,
                reason,
            }),
        }
    }

    parsed
}

fn parse_row(cells: &[Option<&Data>]) -> Result<VacationDraft, RowRejection> {
    let hr_representative =
        cell_text(cells[COL_HR_REPRESENTATIVE]).ok_or(RowRejection::MissingHrRepresentative)?;
    let employee_name =
        cell_text(cells[COL_EMPLOYEE_NAME]).ok_or(RowRejection::MissingEmployeeName)?;
    let salary = cell_salary(cells[COL_SALARY])?;

    Ok(VacationDraft::new(hr_representative, employee_name, salary, 0))
}

fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn cell_salary(cell: Option<&Data>) -> Result<Decimal, RowRejection> {
    if is_blank(cell) {
        return Err(RowRejection::MissingSalary);
    }
    let salary = match cell {
        Some(Data::Int(i)) => Decimal::from(*i),
        // Shortest round-trip text keeps the value the sheet displays.
        Some(Data::Float(f)) => parse_salary_text(&f.to_string())?,
        Some(Data::String(s)) => parse_salary_text(s)?,
        Some(other) => {
            return Err(RowRejection::InvalidSalary {
                value: other.to_string(),
            });
        }
        None => return Err(RowRejection::MissingSalary),
    };

    let salary = round_money(salary);
    if salary <= Decimal::ZERO {
        return Err(RowRejection::NonPositiveSalary);
    }
    if salary > MAX_SALARY {
        return Err(RowRejection::SalaryTooLarge {
            value: salary.to_string(),
        });
    }
    Ok(salary)
}

fn parse_salary_text(text: &str) -> Result<Decimal, RowRejection> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    let normalized = if digits.contains(',') && !digits.contains('.') {
        digits.replace(',', ".")
    } else {
        digits.to_string()
    };
    Decimal::from_str(&normalized).map_err(|_| RowRejection::InvalidSalary {
        value: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VacationRecord;
    use crate::store::{InMemoryRecordStore, RecordOrder, StoreError};
    use rust_xlsxwriter::Workbook;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const SHEET: &str = "Férias Legais";

    enum Cell {
        Text(&'static str),
        Number(f64),
        Blank,
    }

    fn write_workbook(dir: &TempDir, sheet: &str, rows: &[Vec<Cell>]) -> PathBuf {
        let path = dir.path().join("upload.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (header_col, header) in ["ID", "RH", "Funcionário", "Salário"].iter().enumerate() {
            worksheet.write_string(0, header_col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32 + 1, c as u16);
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    fn valid_row(name: &'static str, salary: f64) -> Vec<Cell> {
        vec![Cell::Blank, Cell::Text("Carla"), Cell::Text(name), Cell::Number(salary)]
    }

    #[test]
    fn test_five_valid_two_missing_salary() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            valid_row("Ana", 3000.0),
            valid_row("Bruno", 2500.5),
            vec![Cell::Number(9.0), Cell::Text("Carla"), Cell::Text("Davi")],
            valid_row("Elisa", 1800.0),
            valid_row("Fábio", 4200.75),
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Text("Gil"), Cell::Text("  ")],
            valid_row("Helena", 1500.0),
        ];
        let path = write_workbook(&dir, SHEET, &rows);

        let store = Arc::new(InMemoryRecordStore::new());
        let importer = SpreadsheetImporter::new(store.clone(), SHEET);
        let summary = importer.import_file(&path).unwrap();

        assert_eq!(summary.accepted.len(), 5);
        assert_eq!(summary.rejected_row_count(), 2);
        assert_eq!(summary.rejected[0].row, 4);
        assert_eq!(summary.rejected[0].reason, RowRejection::MissingSalary);
        assert_eq!(summary.rejected[1].row, 7);
        assert_eq!(summary.created.len(), 5);

        let records = store.find_all(RecordOrder::OldestFirst).unwrap();
        assert_eq!(records.len(), 5);
        for record in &records {
            assert_eq!(record.absence_count, 0);
            assert_eq!(record.entitled_days, 30);
        }
        let names: Vec<&str> = records.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Elisa", "Fábio", "Helena"]);
        assert_eq!(records[1].salary, Decimal::from_str("2500.5").unwrap());

        assert!(!path.exists(), "uploaded file should be removed");
    }

    #[test]
    fn test_missing_sheet_is_file_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, "Other", &[valid_row("Ana", 3000.0)]);

        let store = Arc::new(InMemoryRecordStore::new());
        let importer = SpreadsheetImporter::new(store.clone(), SHEET);
        let result = importer.import_file(&path);

        assert!(matches!(result, Err(EngineError::FileFormat { .. })));
        assert!(store.find_all(RecordOrder::NewestFirst).unwrap().is_empty());
        assert!(!path.exists(), "uploaded file should be removed on failure");
    }

    #[test]
    fn test_unreadable_file_is_file_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        fs::write(&path, b"plain text, not a zip archive").unwrap();

        let store = Arc::new(InMemoryRecordStore::new());
        let importer = SpreadsheetImporter::new(store, SHEET);
        assert!(matches!(
            importer.import_file(&path),
            Err(EngineError::FileFormat { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_row_rejection_reasons() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            vec![Cell::Blank, Cell::Blank, Cell::Text("Ana"), Cell::Number(1000.0)],
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Blank, Cell::Number(1000.0)],
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Text("Bia"), Cell::Text("mil")],
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Text("Caio"), Cell::Number(-5.0)],
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Text("Duda"), Cell::Text("1234,56")],
        ];
        let path = write_workbook(&dir, SHEET, &rows);

        let parsed = read_roster_sheet(&path, SHEET).unwrap();
        let reasons: Vec<RowRejection> = parsed.rejected.into_iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RowRejection::MissingHrRepresentative,
                RowRejection::MissingEmployeeName,
                RowRejection::InvalidSalary {
                    value: "mil".to_string()
                },
                RowRejection::NonPositiveSalary,
            ]
        );
        assert_eq!(parsed.accepted.len(), 1);
        assert_eq!(parsed.accepted[0].salary, Decimal::from_str("1234.56").unwrap());
    }

    #[test]
    fn test_oversized_salary_is_rejected_and_roster_stays_readable() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            vec![
                Cell::Blank,
                Cell::Text("Carla"),
                Cell::Text("Ana"),
                Cell::Text("79228162514264337593543950335"),
            ],
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Text("Bia"), Cell::Number(100_000_000.0)],
            vec![Cell::Blank, Cell::Text("Carla"), Cell::Text("Caio"), Cell::Text("99999999.99")],
        ];
        let path = write_workbook(&dir, SHEET, &rows);

        let store = Arc::new(InMemoryRecordStore::new());
        let importer = SpreadsheetImporter::new(store.clone(), SHEET);
        let summary = importer.import_file(&path).unwrap();

        let reasons: Vec<RowRejection> = summary.rejected.into_iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RowRejection::SalaryTooLarge {
                    value: "79228162514264337593543950335".to_string()
                },
                RowRejection::SalaryTooLarge {
                    value: "100000000".to_string()
                },
            ]
        );
        assert_eq!(summary.created.len(), 1);

        let records = store.find_all(RecordOrder::NewestFirst).unwrap();
        assert_eq!(records[0].salary, MAX_SALARY);
        assert!(records[0].entitlement().is_ok());
    }

    #[test]
    fn test_blank_rows_are_ignored() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            valid_row("Ana", 3000.0),
            vec![Cell::Blank, Cell::Blank, Cell::Blank, Cell::Blank],
            vec![],
            valid_row("Bruno", 2000.0),
        ];
        let path = write_workbook(&dir, SHEET, &rows);

        let parsed = read_roster_sheet(&path, SHEET).unwrap();
        assert_eq!(parsed.accepted.len(), 2);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_header_only_sheet_imports_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, SHEET, &[]);

        let store = Arc::new(InMemoryRecordStore::new());
        let importer = SpreadsheetImporter::new(store, SHEET);
        let summary = importer.import_file(&path).unwrap();
        assert!(summary.accepted.is_empty());
        assert!(summary.created.is_empty());
    }

    struct QuotaStore {
        inner: InMemoryRecordStore,
        remaining: Mutex<usize>,
    }

    impl RecordStore for QuotaStore {
        fn create(&self, draft: VacationDraft) -> Result<VacationRecord, StoreError> {
            let mut remaining = self.remaining.lock().unwrap();
            if *remaining == 0 {
                return Err(StoreError::Unavailable("connection lost".to_string()));
            }
            *remaining -= 1;
            self.inner.create(draft)
        }
        fn find_by_id(&self, id: RecordId) -> Result<Option<VacationRecord>, StoreError> {
            self.inner.find_by_id(id)
        }
        fn update(&self, id: RecordId, fields: VacationDraft) -> Result<usize, StoreError> {
            self.inner.update(id, fields)
        }
        fn delete_by_id(&self, id: RecordId) -> Result<usize, StoreError> {
            self.inner.delete_by_id(id)
        }
        fn delete_many(&self, ids: &[RecordId]) -> Result<usize, StoreError> {
            self.inner.delete_many(ids)
        }
        fn find_page(
            &self,
            limit: usize,
            offset: usize,
            order: RecordOrder,
        ) -> Result<(Vec<VacationRecord>, usize), StoreError> {
            self.inner.find_page(limit, offset, order)
        }
        fn find_all(&self, order: RecordOrder) -> Result<Vec<VacationRecord>, StoreError> {
            self.inner.find_all(order)
        }
    }

    #[test]
    fn test_store_failure_reports_partial_import() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            valid_row("Ana", 3000.0),
            valid_row("Bruno", 2000.0),
            valid_row("Caio", 1000.0),
        ];
        let path = write_workbook(&dir, SHEET, &rows);

        let store = Arc::new(QuotaStore {
            inner: InMemoryRecordStore::new(),
            remaining: Mutex::new(2),
        });
        let importer = SpreadsheetImporter::new(store.clone(), SHEET);

        match importer.import_file(&path) {
            Err(EngineError::PartialImport {
                created, rejected, ..
            }) => {
                assert_eq!(created, 2);
                assert_eq!(rejected, 0);
            }
            other => panic!("expected PartialImport, got {other:?}"),
        }
        assert_eq!(store.find_all(RecordOrder::OldestFirst).unwrap().len(), 2);
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_salary_text_variants() {
        assert_eq!(parse_salary_text("R$ 1500,00").unwrap(), Decimal::from(1500));
        assert_eq!(
            parse_salary_text(" 2750.25 ").unwrap(),
            Decimal::from_str("2750.25").unwrap()
        );
        assert!(parse_salary_text("abc").is_err());
    }
}
