//! Scan report rendering port.

use std::io::Write;

use crate::domain::error::ScannerError;
use crate::domain::report::ScanReport;

pub trait ReportPort {
    fn write(&self, report: &ScanReport, out: &mut dyn Write) -> Result<(), ScannerError>;
}
