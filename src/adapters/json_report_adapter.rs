//! JSON report adapter implementing ReportPort.

use std::io::Write;

use crate::domain::error::ScannerError;
use crate::domain::report::ScanReport;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &ScanReport, out: &mut dyn Write) -> Result<(), ScannerError> {
        serde_json::to_writer_pretty(&mut *out, report).map_err(|e| ScannerError::Report {
            reason: format!("failed to serialize report: {}", e),
        })?;
        writeln!(out)?;
        Ok(())
    }
}
