use anyhow::{anyhow, Context, Result};
use std::io::BufRead;

use crate::util::dna::phred33_to_q;

/// 质量直方图的桶数（Phred 0..50）
pub const HIST_BINS: usize = 50;

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), line_no: 0 }
    }

    fn line(&mut self) -> Result<Option<&str>> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        self.line_no += 1;
        Ok((n > 0).then(|| self.buf.trim_end()))
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        // skip blank lines between records
        let header = loop {
            match self.line()? {
                None => return Ok(None),
                Some("") => continue,
                Some(h) => break h.to_string(),
            }
        };
        let header = header
            .strip_prefix('@')
            .ok_or_else(|| anyhow!("line {}: FASTQ header not starting with '@'", self.line_no))?;
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let seq = self
            .line()?
            .ok_or_else(|| anyhow!("unexpected EOF after header '{}'", id))?
            .as_bytes()
            .to_vec();

        let has_plus = matches!(self.line()?, Some(l) if l.starts_with('+'));
        if !has_plus {
            return Err(anyhow!("line {}: missing '+' line", self.line_no));
        }

        let qual = self
            .line()?
            .ok_or_else(|| anyhow!("missing quality line for '{}'", id))?
            .as_bytes()
            .to_vec();
        if qual.len() != seq.len() {
            return Err(anyhow!(
                "record '{}': seq/qual length mismatch ({} vs {})",
                id,
                seq.len(),
                qual.len()
            ));
        }

        Ok(Some(FastqRecord { id, desc, seq, qual }))
    }
}

/// 读取整个 FASTQ 文件，返回 (序列, 质量串)
pub fn read_fastq(path: &str) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>)> {
    let fh = std::fs::File::open(path).with_context(|| format!("cannot open FASTQ '{}'", path))?;
    let mut reader = FastqReader::new(std::io::BufReader::new(fh));
    let mut seqs = Vec::new();
    let mut quals = Vec::new();
    while let Some(rec) = reader
        .next_record()
        .with_context(|| format!("malformed FASTQ '{}'", path))?
    {
        seqs.push(rec.seq);
        quals.push(rec.qual);
    }
    log::info!("read {} reads from {}", seqs.len(), path);
    Ok((seqs, quals))
}

/// 按 Phred 值统计质量分布；超出 `HIST_BINS` 的值计入最后一个桶。
pub fn quality_histogram<Q: AsRef<[u8]>>(qualities: &[Q]) -> Vec<u64> {
    let mut hist = vec![0u64; HIST_BINS];
    for qual in qualities {
        for &c in qual.as_ref() {
            let q = (phred33_to_q(c) as usize).min(HIST_BINS - 1);
            hist[q] += 1;
        }
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_two_records() {
        let data = b"@r1 lane1\nACGT\n+\nIIII\n\n@r2\nGG\n+r2\n#!\n";
        let mut r = FastqReader::new(Cursor::new(&data[..]));
        let a = r.next_record().unwrap().unwrap();
        assert_eq!(a.id, "r1");
        assert_eq!(a.desc.as_deref(), Some("lane1"));
        assert_eq!(a.seq, b"ACGT");
        assert_eq!(a.qual, b"IIII");
        let b = r.next_record().unwrap().unwrap();
        assert_eq!(b.id, "r2");
        assert_eq!(b.qual, b"#!");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn malformed_records_rejected() {
        let bad_header = b"r1\nACGT\n+\nIIII\n";
        assert!(FastqReader::new(Cursor::new(&bad_header[..])).next_record().is_err());
        let bad_len = b"@r1\nACGT\n+\nIII\n";
        assert!(FastqReader::new(Cursor::new(&bad_len[..])).next_record().is_err());
        let no_plus = b"@r1\nACGT\nIIII\n";
        assert!(FastqReader::new(Cursor::new(&no_plus[..])).next_record().is_err());
    }

    #[test]
    fn histogram_counts_phred_values() {
        let quals = vec![b"II#".to_vec(), b"!".to_vec()];
        let h = quality_histogram(&quals);
        assert_eq!(h.len(), HIST_BINS);
        assert_eq!(h[40], 2);
        assert_eq!(h[2], 1);
        assert_eq!(h[0], 1);
        assert_eq!(h.iter().sum::<u64>(), 4);
    }
}
