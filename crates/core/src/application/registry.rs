// participants.tsv writer

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::info;

use crate::domain::ParticipantRecord;
use crate::error::{AppError, Result};

/// Tabs and line breaks would break the row structure
fn sanitize(field: &str) -> String {
    field
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

fn format_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut row = fields
        .into_iter()
        .map(|f| sanitize(f.as_ref()))
        .collect::<Vec<_>>()
        .join("\t");
    row.push('\n');
    row
}

/// Append `record` to the registry at `path`
///
/// The header row is written first when the file does not exist yet.
/// Returns `true` if the file was created.
pub fn append_participant(path: &Path, record: &ParticipantRecord) -> Result<bool> {
    let created = !path.is_file();

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(AppError::io_at(path))?;

    let mut out = String::new();
    if created {
        out.push_str(&format_row(ParticipantRecord::COLUMNS));
    } else if !ends_with_newline(&mut file).map_err(AppError::io_at(path))? {
        out.push('\n');
    }
    out.push_str(&format_row(record.fields()));

    file.write_all(out.as_bytes()).map_err(AppError::io_at(path))?;

    if created {
        info!("Created new participants.tsv file at {}", path.display());
    }
    info!(
        "Added entry for {}/{} to participants.tsv",
        record.participant_id, record.session_id
    );

    Ok(created)
}

/// Empty files count as terminated
fn ends_with_newline(file: &mut std::fs::File) -> std::io::Result<bool> {
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
