//! Table output formatting for CLI commands
//!
//! Renders validation reports, signature records and contributor lists using
//! comfy-table.

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use std::env;

use super::truncate;
use crate::domain::models::{Contributor, RejectionReason, SignatureRecord, ValidationReport};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// One row per evaluated commit: trusted commits first, then rejections.
    pub fn format_report(&self, report: &ValidationReport) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Commit", "Status", "Detail"]));

        for trusted in &report.trusted {
            table.add_row(vec![
                Cell::new(trusted.commit.short()),
                self.colored(Cell::new("trusted"), Color::Green),
                Cell::new(format!(
                    "{} (key {})",
                    truncate(&trusted.contributor, 40),
                    trusted.key_id
                )),
            ]);
        }

        for rejection in &report.rejections {
            table.add_row(vec![
                Cell::new(rejection.commit.short()),
                self.colored(
                    Cell::new(rejection.reason.kind()),
                    reason_color(&rejection.reason),
                ),
                Cell::new(rejection.reason.to_string()),
            ]);
        }

        table.to_string()
    }

    /// Key/value view of one extracted signature record.
    pub fn format_signature(&self, record: &SignatureRecord, trusted_by: Option<&str>) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Field", "Value"]));

        match record {
            SignatureRecord::Unsigned => {
                table.add_row(vec![
                    Cell::new("status"),
                    self.colored(Cell::new("unsigned"), Color::Red),
                ]);
            }
            SignatureRecord::Signed(signed) => {
                let trust = trusted_by.map_or_else(
                    || self.colored(Cell::new("untrusted"), Color::Red),
                    |name| self.colored(Cell::new(format!("trusted ({name})")), Color::Green),
                );
                table.add_row(vec![Cell::new("status"), trust]);
                table.add_row(vec![Cell::new("commit"), Cell::new(signed.commit_id.as_str())]);
                table.add_row(vec![Cell::new("signed at"), Cell::new(&signed.signed_at)]);
                table.add_row(vec![Cell::new("key id"), Cell::new(&signed.key_id)]);
                table.add_row(vec![Cell::new("signer"), Cell::new(&signed.signer_name)]);
                table.add_row(vec![Cell::new("email"), Cell::new(&signed.signer_email)]);
                table.add_row(vec![
                    Cell::new("class"),
                    Cell::new(signed.signature_class.as_str()),
                ]);
            }
        }

        table.to_string()
    }

    /// Format trusted contributors in registry order
    pub fn format_contributors(&self, contributors: &[Contributor]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Key ID", "Name", "Email"]));

        for contributor in contributors {
            table.add_row(vec![
                self.colored(Cell::new(&contributor.key_id), Color::Cyan),
                Cell::new(contributor.name.as_deref().unwrap_or("-")),
                Cell::new(contributor.email.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    fn colored(&self, cell: Cell, color: Color) -> Cell {
        if self.use_colors { cell.fg(color) } else { cell }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

const fn reason_color(reason: &RejectionReason) -> Color {
    match reason {
        RejectionReason::Unsigned | RejectionReason::Untrusted { .. } => Color::Red,
        RejectionReason::ExtractionError { .. } => Color::Yellow,
        RejectionReason::ProcessInvocationError { .. }
        | RejectionReason::VerificationTimeout { .. } => Color::Magenta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        CommitId, Rejection, SignatureClass, SignedCommit, TrustedCommit, Verdict,
    };
    use chrono::Utc;

    fn plain() -> TableFormatter {
        TableFormatter::with_config(false, Some(160))
    }

    #[test]
    fn report_lists_trusted_and_rejected_commits() {
        let report = ValidationReport {
            verdict: Verdict::Rejected,
            commits_in_range: 3,
            trusted: vec![TrustedCommit {
                commit: CommitId::new("aaaaaaaaaaaaaaaaaaaa"),
                key_id: "A1".to_string(),
                signer_name: "Alice".to_string(),
                contributor: "Alice".to_string(),
            }],
            rejections: vec![Rejection {
                commit: CommitId::new("bbbbbbbbbbbbbbbbbbbb"),
                reason: RejectionReason::Unsigned,
            }],
            skipped: 1,
            checked_at: Utc::now(),
        };

        let rendered = plain().format_report(&report);
        assert!(rendered.contains("aaaaaaaaaaaa"));
        assert!(rendered.contains("trusted"));
        assert!(rendered.contains("bbbbbbbbbbbb"));
        assert!(rendered.contains("unsigned"));
        assert!(!rendered.contains("bbbbbbbbbbbbb"));
    }

    #[test]
    fn signature_table_marks_trust() {
        let record = SignatureRecord::Signed(SignedCommit {
            commit_id: CommitId::new("c1"),
            signed_at: "Mon Jan 1 00:00:00 2024 UTC".to_string(),
            key_id: "A1".to_string(),
            signer_name: "Alice".to_string(),
            signer_email: "alice@example.com".to_string(),
            signature_class: SignatureClass::Ultimate,
        });

        let trusted = plain().format_signature(&record, Some("Alice"));
        assert!(trusted.contains("trusted (Alice)"));
        assert!(trusted.contains("alice@example.com"));
        assert!(trusted.contains("ultimate"));

        let untrusted = plain().format_signature(&record, None);
        assert!(untrusted.contains("untrusted"));

        let unsigned = plain().format_signature(&SignatureRecord::Unsigned, None);
        assert!(unsigned.contains("unsigned"));
    }

    #[test]
    fn contributors_without_details_show_placeholders() {
        let contributors = vec![
            Contributor::new("A1").with_name("Alice"),
            Contributor::new("B2"),
        ];

        let rendered = plain().format_contributors(&contributors);
        assert!(rendered.contains("A1"));
        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("B2"));
        assert!(rendered.contains('-'));
    }
}
