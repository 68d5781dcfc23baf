use std::collections::BTreeSet;

use crate::core::errors::{AuditExportError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::traits::exporter::Exporter;

/// Comma-separated report, one row per event.
///
/// Columns are the alphabetically sorted union of field names, not the
/// canonical field order.
pub struct CsvExporter;

impl CsvExporter {
    fn columns(events: &[AuditEvent]) -> Vec<&'static str> {
        let names: BTreeSet<&'static str> = events
            .iter()
            .flat_map(|e| e.fields().into_iter().map(|(name, _)| name))
            .collect();
        names.into_iter().collect()
    }
}

fn render_error(e: impl std::fmt::Display) -> AuditExportError {
    AuditExportError::Render {
        format: "csv".into(),
        detail: e.to_string(),
    }
}

impl Exporter for CsvExporter {
    fn render(&self, events: &[AuditEvent]) -> Result<String> {
        let columns = Self::columns(events);
        let mut wtr = csv::Writer::from_writer(Vec::new());

        wtr.write_record(&columns).map_err(render_error)?;
        for event in events {
            wtr.write_record(columns.iter().map(|c| event.field(c).unwrap_or("")))
                .map_err(render_error)?;
        }

        let bytes = wtr.into_inner().map_err(render_error)?;
        String::from_utf8(bytes).map_err(render_error)
    }

    fn name(&self) -> &str {
        "csv"
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_event::EventSource;
    use crate::core::traits::exporter::ExportOutcome;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn sample() -> Vec<AuditEvent> {
        vec![
            AuditEvent::new(EventSource::RemoteMergeRequest, "merge_request_opened")
                .with_user(Some("Grace"), None)
                .with_timestamp("2025-10-03T08:00:00+00:00")
                .with_ref("feature->main")
                .with_commit(Some("m1"))
                .with_message(Some("Fix \"quoted\", and commas"))
                .with_url(Some("https://gitlab.example.com/g/p/-/merge_requests/1")),
            AuditEvent::new(EventSource::LocalReflogEntry, "reflog")
                .with_commit(Some("abc1234"))
                .with_message(Some("HEAD@{0}: reset: moving to HEAD~1")),
        ]
    }

    #[test]
    fn header_is_sorted_field_names() {
        let out = CsvExporter.render(&sample()).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "action_type,commit_sha,message,ref,source,timestamp,url,user_email,user_name"
        );
    }

    #[test]
    fn reading_back_yields_every_field() {
        let events = sample();
        let out = CsvExporter.render(&events).unwrap();

        let mut rdr = csv::Reader::from_reader(out.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        let rows: Vec<HashMap<String, String>> = rdr
            .records()
            .map(|r| {
                let r = r.unwrap();
                headers
                    .iter()
                    .zip(r.iter())
                    .map(|(h, v)| (h.to_string(), v.to_string()))
                    .collect()
            })
            .collect();

        assert_eq!(rows.len(), events.len());
        for (event, row) in events.iter().zip(&rows) {
            for (name, value) in event.fields() {
                assert_eq!(row[name], value, "field {name}");
            }
        }
    }

    #[test]
    fn empty_list_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        let outcome = CsvExporter.write_to(&[], &path).unwrap();

        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(!path.exists());
    }

    #[test]
    fn write_to_reports_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        let outcome = CsvExporter.write_to(&sample(), &path).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Written {
                rows: 2,
                path: path.clone()
            }
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing/out.csv");

        let err = CsvExporter.write_to(&sample(), &path).unwrap_err();
        assert!(matches!(err, AuditExportError::Export { .. }));
    }
}
