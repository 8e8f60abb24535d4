use std::path::Path;

use crate::vtt::TimedSegment;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Format merged segments as a console table.
pub fn format_table(video_id: &str, segments: &[TimedSegment]) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table.set_header(["#", "Video", "Time", "Text"]);

    for (i, seg) in segments.iter().enumerate() {
        table.add_row([
            (i + 1).to_string(),
            video_id.to_string(),
            seg.time.clone(),
            seg.text.clone(),
        ]);
    }

    table
}

/// Write merged segments to a CSV file.
pub fn write_csv(path: &str, segments: &[TimedSegment]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_path(Path::new(path))?;
    wtr.write_record(["time", "text"])?;

    for seg in segments {
        wtr.write_record([&seg.time, &seg.text])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(time: &str, text: &str) -> TimedSegment {
        TimedSegment {
            time: time.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn table_has_one_row_per_segment() {
        let table = format_table("abc123", &[seg("00:00:01", "first"), seg("00:00:10", "second")]);
        assert_eq!(table.row_iter().count(), 2);
    }

    #[test]
    fn csv_roundtrips_through_a_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.csv");
        let path = path.to_str().expect("utf-8 path");

        write_csv(path, &[seg("00:00:01", "some, quoted text")]).expect("write");

        let written = std::fs::read_to_string(path).expect("read back");
        assert!(written.starts_with("time,text\n"));
        assert!(written.contains("00:00:01"));
        assert!(written.contains("some, quoted text"));
    }
}
