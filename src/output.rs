use crate::data::{Bucket, Report};
use crate::record::Category;
use crate::Result;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{info, warn};

const HOST_HEADER: &str = "Host/IP";
const HOST_COLUMN_WIDTH: f64 = 30.0;

/// Checks that the report path ends in `.xlsx`, in any case.
pub fn validate_output_path(path: &str) -> std::result::Result<(), String> {
    if path.to_lowercase().ends_with(".xlsx") {
        Ok(())
    } else {
        Err("File must have a .xlsx extension.".to_string())
    }
}

/// Builds the workbook for a report: one sheet per bucket, in the order the buckets were created.
/// Failed lookups are written in red so they can't be mistaken for records.
pub fn build_workbook(report: &Report) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let failure = Format::new().set_font_color(Color::Red);

    if report.is_empty() {
        warn!("no lookups were enabled, the report will be empty");
    }

    for (category, bucket) in report.buckets() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(category.sheet_name())?;
        write_header(sheet, category, bucket, &header)?;
        write_rows(sheet, bucket, &failure)?;
        info!(
            "{}: {} rows, {} value columns",
            category,
            bucket.rows().len(),
            bucket.max_cols()
        );
    }

    Ok(workbook)
}

/// Writes the report to `path` as an xlsx workbook.
pub fn write_workbook(report: &Report, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path)?;
    Ok(())
}

fn write_header(
    sheet: &mut Worksheet,
    category: Category,
    bucket: &Bucket,
    format: &Format,
) -> Result<()> {
    let prefix = category.header_prefix();
    sheet.write_string_with_format(0, 0, HOST_HEADER, format)?;
    sheet.set_column_width(0, HOST_COLUMN_WIDTH)?;
    for i in 0..bucket.max_cols() {
        sheet.write_string_with_format(0, column(i + 1)?, format!("{}_{}", prefix, i), format)?;
    }
    Ok(())
}

// Ragged rows stay ragged: cells past the end of a row are simply not written.
fn write_rows(sheet: &mut Worksheet, bucket: &Bucket, failure: &Format) -> Result<()> {
    for (i, row) in bucket.rows().iter().enumerate() {
        let r = u32::try_from(i + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (j, cell) in row.cells().enumerate() {
            if j > 0 && row.outcome.is_failed() {
                sheet.write_string_with_format(r, column(j)?, cell, failure)?;
            } else {
                sheet.write_string(r, column(j)?, cell)?;
            }
        }
    }
    Ok(())
}

fn column(index: usize) -> Result<u16> {
    Ok(u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)?)
}
