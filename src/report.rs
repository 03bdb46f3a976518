//! Console rendering of check results

use colored::Colorize;

use crate::version::checker::{PackageReport, Verdict};

/// Number of packages in each state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub up_to_date: usize,
    pub out_of_date: usize,
    pub unknown: usize,
}

impl Summary {
    pub fn from_reports(reports: &[PackageReport]) -> Self {
        reports
            .iter()
            .fold(Self::default(), |mut summary, report| {
                match report.verdict {
                    Verdict::UpToDate { .. } => summary.up_to_date += 1,
                    Verdict::OutOfDate { .. } => summary.out_of_date += 1,
                    Verdict::Unknown { .. } => summary.unknown += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.up_to_date + self.out_of_date + self.unknown
    }
}

/// Renders package reports as console lines
pub struct ReportRenderer {
    show_colors: bool,
}

impl ReportRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    /// Render one line for a package report
    pub fn render_line(&self, report: &PackageReport) -> String {
        let name = &report.package.name;
        match &report.verdict {
            Verdict::Unknown { reason } => {
                let line = format!("[UNKNOWN]     {}", reason);
                if self.show_colors {
                    line.white().to_string()
                } else {
                    line
                }
            }
            Verdict::OutOfDate { declared, upstream } => {
                let line = format!(
                    "[OUT-OF-DATE] Package {} should be updated from {} to {}",
                    name,
                    declared.version_release(),
                    upstream.version_release()
                );
                if self.show_colors {
                    line.red().to_string()
                } else {
                    line
                }
            }
            Verdict::UpToDate { declared, upstream } => {
                let line = format!(
                    "[UP-TO-DATE]  Package {} {} matches upstream version {}",
                    name,
                    declared.version_release(),
                    upstream.version_release()
                );
                if self.show_colors {
                    line.green().to_string()
                } else {
                    line
                }
            }
        }
    }

    /// Render the summary line
    pub fn render_summary(&self, summary: &Summary) -> String {
        let line = format!(
            "{} packages checked: {} up to date, {} out of date, {} unknown",
            summary.total(),
            summary.up_to_date,
            summary.out_of_date,
            summary.unknown
        );
        if self.show_colors {
            line.bold().to_string()
        } else {
            line
        }
    }

    /// Print every report followed by the summary
    pub fn render(&self, reports: &[PackageReport]) {
        for report in reports {
            println!("{}", self.render_line(report));
        }
        println!();
        println!("{}", self.render_summary(&Summary::from_reports(reports)));
    }
}
