//! Chunk command implementation.

use super::{chunk_config, load_config, open_vault};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use vaultrag_core::Chunk;
use vaultrag_ingest::{Chunker, IngestReport, Ingestor};

pub fn run(
    vault: Option<String>,
    max_chunk_size: Option<usize>,
    overlap: Option<usize>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let chunk_config = chunk_config(&config, max_chunk_size, overlap)?;
    let reader = open_vault(vault, &config)?;
    let ingestor = Ingestor::new(reader, Chunker::new(chunk_config));

    let files = ingestor.discover()?;
    if files.is_empty() {
        eprintln!("{}", "No notes found.".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = ingestor.run_files(&files, |file| {
        pb.set_message(file.relative_path.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if json {
        match output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_json_lines(&report.chunks, BufWriter::new(file))?;
                eprintln!(
                    "{} {} chunks to {}",
                    "Wrote".green().bold(),
                    report.chunks.len(),
                    path.display()
                );
            }
            None => write_json_lines(&report.chunks, std::io::stdout().lock())?,
        }
    } else {
        print_summary(&report, chunk_config.max_chunk_size(), chunk_config.overlap());
    }

    Ok(())
}

fn write_json_lines<W: Write>(chunks: &[Chunk], mut out: W) -> Result<()> {
    for chunk in chunks {
        writeln!(out, "{}", chunk.to_json_line()?)?;
    }
    out.flush()?;
    Ok(())
}

fn print_summary(report: &IngestReport, max_chunk_size: usize, overlap: usize) {
    println!("{}", "Chunking Summary".cyan().bold());
    println!("{}", "─".repeat(50));
    println!("  Notes:          {}", report.notes.len());
    println!("  Chunks:         {}", report.chunks.len());
    println!("  Empty notes:    {}", report.empty_notes);
    if report.frontmatter_errors > 0 {
        println!(
            "  Bad frontmatter: {}",
            report.frontmatter_errors.to_string().yellow()
        );
    }
    println!("  Chunk size:     {} (overlap {})", max_chunk_size, overlap);

    if !report.chunks.is_empty() {
        let total: usize = report.chunks.iter().map(|c| c.text.chars().count()).sum();
        println!("  Avg chunk:      {} chars", total / report.chunks.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultrag_core::{Note, TagSet};

    #[test]
    fn test_write_json_lines() {
        let tags: TagSet = ["rag".to_string()].into_iter().collect();
        let note = Note::new("n", "dir/n.md").with_tags(tags);
        let chunks = vec![
            Chunk::from_note(&note, 0, "", "first\nline"),
            Chunk::from_note(&note, 1, "H", "second"),
        ];

        let mut buf = Vec::new();
        write_json_lines(&chunks, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"source\":\"dir/n.md\""));
        assert!(lines[1].contains("\"heading\":\"H\""));
    }
}
