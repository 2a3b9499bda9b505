use anyhow::{Context, Result};
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, peek_header: None }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n == 0 {
            self.done = true;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done && self.peek_header.is_none() {
            return Ok(None);
        }

        // Skip anything before the first header
        let header = match self.peek_header.take() {
            Some(h) => h,
            None => loop {
                if !self.read_line()? {
                    return Ok(None);
                }
                if let Some(h) = self.buf.strip_prefix('>') {
                    break h.trim().to_string();
                }
            },
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let mut seq: Vec<u8> = Vec::new();
        while self.read_line()? {
            if let Some(h) = self.buf.strip_prefix('>') {
                self.peek_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(
                self.buf
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// Reads every record of a FASTA file in file order, keeping names.
pub fn read_records(path: &str) -> Result<Vec<FastaRecord>> {
    let fh = std::fs::File::open(path).with_context(|| format!("cannot open FASTA '{}'", path))?;
    let mut reader = FastaReader::new(std::io::BufReader::new(fh));
    let mut records = Vec::new();
    while let Some(rec) = reader.next_record()? {
        records.push(rec);
    }
    if records.is_empty() {
        anyhow::bail!("FASTA file '{}' contains no sequences", path);
    }
    Ok(records)
}

/// Reads every record of a FASTA file and joins the sequences into one genome
/// string (headers dropped).
pub fn read_genome(path: &str) -> Result<Vec<u8>> {
    let records = read_records(path)?;
    let genome: Vec<u8> = records.iter().flat_map(|r| r.seq.iter().copied()).collect();
    log::info!("read {} record(s), {} bp from {}", records.len(), genome.len(), path);
    Ok(genome)
}
