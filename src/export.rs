//! CSV output for projection time series

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::error::ExportError;
use crate::interest::GrowthPoint;
use crate::loan::{AmortizationEntry, LoanYearSummary};
use crate::pension::PensionYear;
use crate::retirement::RetirementYear;

/// Write any serializable rows with a header taken from their field names
fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_amortization_csv<W: Write>(
    writer: W,
    schedule: &[AmortizationEntry],
) -> Result<(), ExportError> {
    write_rows(writer, schedule)
}

pub fn write_loan_years_csv<W: Write>(
    writer: W,
    years: &[LoanYearSummary],
) -> Result<(), ExportError> {
    write_rows(writer, years)
}

pub fn write_pension_csv<W: Write>(writer: W, years: &[PensionYear]) -> Result<(), ExportError> {
    write_rows(writer, years)
}

pub fn write_growth_csv<W: Write>(writer: W, points: &[GrowthPoint]) -> Result<(), ExportError> {
    write_rows(writer, points)
}

pub fn write_lifetime_csv<W: Write>(
    writer: W,
    years: &[RetirementYear],
) -> Result<(), ExportError> {
    write_rows(writer, years)
}
