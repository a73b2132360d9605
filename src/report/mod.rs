//! Printable vacation report.
//!
//! The report is built in two steps: [`ReportGenerator::build_report`] reads
//! the roster and produces a plain [`Report`] model with every entitlement
//! recomputed, and [`render_pdf`] lays that model out on A4 pages.

mod pdf;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::EngineResult;
use crate::models::VacationRecord;
use crate::store::{RecordOrder, RecordStore};

pub use pdf::{PageLayout, PlacedLine, layout_pages, render_pdf};

/// MIME type of the rendered report.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// One numbered block of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// 1-based position in the report.
    pub position: usize,
    /// The HR representative responsible for the record.
    pub hr_representative: String,
    /// The employee the vacation belongs to.
    pub employee_name: String,
    /// Monthly salary.
    pub salary: Decimal,
    /// Entitled vacation days, recomputed.
    pub entitled_days: u32,
    /// Value of the entitlement, recomputed.
    pub entitlement_value: Decimal,
    /// Creation timestamp as `DD/MM/YYYY HH:mm:ss`.
    pub created_at: String,
}

impl ReportEntry {
    fn from_record(position: usize, record: &VacationRecord) -> EngineResult<Self> {
        let entitlement = record.entitlement()?;
        Ok(Self {
            position,
            hr_representative: record.hr_representative.clone(),
            employee_name: record.employee_name.clone(),
            salary: record.salary,
            entitled_days: entitlement.entitled_days,
            entitlement_value: entitlement.value,
            created_at: record.created_at_display(),
        })
    }

    /// The printed lines of this block.
    ///
    /// ```
    /// use vacation_engine::report::ReportEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = ReportEntry {
    ///     position: 1,
    ///     hr_representative: "Carla".to_string(),
    ///     employee_name: "Ana".to_string(),
    ///     salary: Decimal::from(3000),
    ///     entitled_days: 30,
    ///     entitlement_value: Decimal::from(4000),
    ///     created_at: "10/02/2025 14:30:00".to_string(),
    /// };
    /// assert_eq!(entry.lines()[2], "   Salário: R$ 3000.00");
    /// ```
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("{}. RH: {}", self.position, self.hr_representative),
            format!("   Funcionário: {}", self.employee_name),
            format!("   Salário: R$ {:.2}", self.salary),
            format!("   Dias de Férias: {}", self.entitled_days),
            format!("   Valor das Férias: R$ {:.2}", self.entitlement_value),
            format!("   Data de Cadastro: {}", self.created_at),
        ]
    }
}

/// The report content, independent of any output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Title printed at the top of the first page.
    pub title: String,
    /// Entries, newest record first.
    pub entries: Vec<ReportEntry>,
}

/// Builds the printable report from the record store.
pub struct ReportGenerator {
    store: Arc<dyn RecordStore>,
    title: String,
}

impl ReportGenerator {
    /// Creates a generator printing `title` at the top of the report.
    pub fn new(store: Arc<dyn RecordStore>, title: impl Into<String>) -> Self {
        Self {
            store,
            title: title.into(),
        }
    }

    /// Reads the roster and builds the report model. Does not mutate the store.
    pub fn build_report(&self) -> EngineResult<Report> {
        let records = self.store.find_all(RecordOrder::NewestFirst)?;
        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| ReportEntry::from_record(index + 1, record))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Report {
            title: self.title.clone(),
            entries,
        })
    }

    /// Builds the report and renders it as PDF bytes.
    pub fn generate_report(&self) -> EngineResult<Vec<u8>> {
        let report = self.build_report()?;
        let bytes = render_pdf(&report)?;
        info!(
            entries = report.entries.len(),
            bytes = bytes.len(),
            "Vacation report generated"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VacationDraft;
    use crate::store::InMemoryRecordStore;
    use chrono::{Duration, TimeZone, Utc};
    use std::str::FromStr;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn seeded_store() -> Arc<InMemoryRecordStore> {
        let tick = AtomicI64::new(0);
        let start = Utc.with_ymd_and_hms(2025, 5, 20, 9, 0, 0).unwrap();
        let store = Arc::new(InMemoryRecordStore::with_clock(move || {
            start + Duration::seconds(tick.fetch_add(1, Ordering::SeqCst))
        }));
        let seeds = [("Ana", "3000", 0), ("Bruno", "1500", 6), ("Caio", "2200.10", 40)];
        for (name, salary, absences) in seeds {
            store
                .create(VacationDraft::new(
                    "Carla",
                    name,
                    Decimal::from_str(salary).unwrap(),
                    absences,
                ))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_report_lists_newest_first_with_positions() {
        let generator = ReportGenerator::new(seeded_store(), "Relatório de Férias Legais");
        let report = generator.build_report().unwrap();

        assert_eq!(report.title, "Relatório de Férias Legais");
        let names: Vec<&str> = report
            .entries
            .iter()
            .map(|e| e.employee_name.as_str())
            .collect();
        assert_eq!(names, vec!["Caio", "Bruno", "Ana"]);
        let positions: Vec<usize> = report.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_report_entries_carry_recomputed_values() {
        let generator = ReportGenerator::new(seeded_store(), "Relatório");
        let report = generator.build_report().unwrap();

        let bruno = &report.entries[1];
        assert_eq!(bruno.entitled_days, 24);
        assert_eq!(bruno.entitlement_value, Decimal::from(1600));

        let caio = &report.entries[0];
        assert_eq!(caio.entitled_days, 0);
        assert_eq!(caio.entitlement_value, Decimal::ZERO);
    }

    #[test]
    fn test_entry_lines() {
        let generator = ReportGenerator::new(seeded_store(), "Relatório");
        let report = generator.build_report().unwrap();
        let lines = report.entries[2].lines();
        assert_eq!(
            lines,
            vec![
                "3. RH: Carla",
                "   Funcionário: Ana",
                "   Salário: R$ 3000.00",
                "   Dias de Férias: 30",
                "   Valor das Férias: R$ 4000.00",
                "   Data de Cadastro: 20/05/2025 09:00:00",
            ]
        );
    }

    #[test]
    fn test_build_report_is_idempotent() {
        let generator = ReportGenerator::new(seeded_store(), "Relatório");
        let first = generator.build_report().unwrap();
        let second = generator.build_report().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_report_produces_pdf() {
        let generator = ReportGenerator::new(seeded_store(), "Relatório");
        let bytes = generator.generate_report().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unvaluable_record_fails_instead_of_panicking() {
        let store = seeded_store();
        store
            .create(VacationDraft::new("Carla", "Duda", Decimal::MAX, 0))
            .unwrap();
        let generator = ReportGenerator::new(store, "Relatório");
        assert!(matches!(
            generator.generate_report(),
            Err(crate::error::EngineError::Valuation { .. })
        ));
    }
}
