// file: src/export.rs
// description: json export of the deduplicated record set
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::models::IncidentRecord;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub exported_at: String,
    pub total_records: usize,
    pub records: &'a [IncidentRecord],
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn export_records(&self, records: &[IncidentRecord], pretty: bool) -> Result<usize> {
        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let document = ExportDocument {
            exported_at: Utc::now().to_rfc3339(),
            total_records: records.len(),
            records,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        fs::write(&self.output_path, json)?;

        info!(
            "Exported {} records to {}",
            records.len(),
            self.output_path.display()
        );
        Ok(records.len())
    }
}
