use crate::config::OutputConfig;
use crate::error::Result;
use crate::results::{ScrapeReport, TitleList};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Width of the rule under the report header
const RULE_WIDTH: usize = 70;

/// Writes the numbered report: header, rule, blank line, one numbered title per line
pub fn write_report<W: Write>(out: &mut W, titles: &TitleList) -> Result<()> {
    writeln!(
        out,
        "Complete YouTube Playlist Titles (Total: {})",
        titles.len()
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    for (i, title) in titles.iter().enumerate() {
        writeln!(out, "{:4}. {}", i + 1, title)?;
    }
    Ok(())
}

/// Writes one title per line
pub fn write_list<W: Write>(out: &mut W, titles: &TitleList) -> Result<()> {
    for title in titles {
        writeln!(out, "{}", title)?;
    }
    Ok(())
}

/// Writes every configured output file, replacing existing ones.
/// Returns the paths written, in order.
pub fn save(report: &ScrapeReport, config: &OutputConfig) -> Result<Vec<String>> {
    let mut written = Vec::new();

    write_file(&config.report_path, |out| write_report(out, &report.titles))?;
    written.push(config.report_path.clone());

    write_file(&config.list_path, |out| write_list(out, &report.titles))?;
    written.push(config.list_path.clone());

    if let Some(json_path) = &config.json_path {
        write_file(json_path, |out| {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        })?;
        written.push(json_path.clone());
    }

    for path in &written {
        ::log::debug!("Wrote {}", path);
    }
    Ok(written)
}

fn write_file<P, F>(path: P, body: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    body(&mut out)?;
    out.flush()?;
    Ok(())
}
