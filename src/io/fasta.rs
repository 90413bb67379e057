use anyhow::{Context, Result};
use std::io::BufRead;

/// 一条 FASTA 记录。第一个 `>` 之前的序列行组成一条 `id` 为空的匿名记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

/// Record-by-record FASTA reader. Sequence lines are uppercased with all whitespace removed.
pub struct FastaReader<R: BufRead> {
    reader: R,
    line: String,
    done: bool,
    pending_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), done: false, pending_header: None }
    }

    /// Read one line into `self.line`; `false` at EOF.
    fn fill_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        if n == 0 {
            self.done = true;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        let mut header = match self.pending_header.take() {
            Some(h) => Some(h),
            None if self.done => return Ok(None),
            None => None,
        };

        let mut seq: Vec<u8> = Vec::new();
        while self.fill_line()? {
            if let Some(h) = self.line.strip_prefix('>') {
                let h = h.trim().to_string();
                // 文件开头只有空行时，这一行才是第一条记录的标题
                if header.is_none() && seq.is_empty() {
                    header = Some(h);
                    continue;
                }
                self.pending_header = Some(h);
                break;
            }
            seq.extend(self.line.bytes().filter(|b| !b.is_ascii_whitespace()).map(|b| b.to_ascii_uppercase()));
        }

        if header.is_none() && seq.is_empty() {
            return Ok(None);
        }
        let header = header.unwrap_or_default();
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// 读取 FASTA 中全部记录并首尾拼接为一条序列（记录之间不插入分隔符）。
///
/// 第一个 `>` 之前的序列行作为匿名记录同样计入。
pub fn read_sequence_from<R: BufRead>(reader: R) -> Result<Vec<u8>> {
    let mut fasta = FastaReader::new(reader);
    let mut text = Vec::new();
    let mut records = 0usize;
    while let Some(rec) = fasta.next_record()? {
        if rec.id.is_empty() {
            log::debug!("{} bp before the first header", rec.seq.len());
        } else {
            log::debug!("record '{}': {} bp", rec.id, rec.seq.len());
        }
        text.extend_from_slice(&rec.seq);
        records += 1;
    }
    log::debug!("read {} record(s), {} bp in total", records, text.len());
    Ok(text)
}

pub fn read_sequence(path: &str) -> Result<Vec<u8>> {
    let fh = std::fs::File::open(path).with_context(|| format!("cannot open FASTA '{}'", path))?;
    read_sequence_from(std::io::BufReader::new(fh)).with_context(|| format!("cannot read FASTA '{}'", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_records_with_descriptions() {
        let data = b">chr1 first\nACgTNN\n>chr2\nAAA\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("first"));
        assert_eq!(r1.seq, b"ACGTNN");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"AAA");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn strips_crlf_and_inner_whitespace() {
        let data = b"\n>chr1 desc\r\nAC g t n\r\n acgt\r\n>chr2 \r\n N N N \r\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        assert_eq!(r.next_record().unwrap().unwrap().seq, b"ACGTNACGT");
        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.seq, b"NNN");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn last_record_without_sequence() {
        let data = b">a\nAC\n>b\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        assert_eq!(r.next_record().unwrap().unwrap().seq, b"AC");
        let b = r.next_record().unwrap().unwrap();
        assert_eq!(b.id, "b");
        assert!(b.seq.is_empty());
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn lines_before_first_header_form_an_anonymous_record() {
        let data = b"ac\nGT\n>r1 d\nTT\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let anon = r.next_record().unwrap().unwrap();
        assert_eq!(anon, FastaRecord { id: String::new(), desc: None, seq: b"ACGT".to_vec() });
        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "r1");
        assert_eq!(r1.desc.as_deref(), Some("d"));
        assert_eq!(r1.seq, b"TT");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn empty_input_has_no_records() {
        let mut r = FastaReader::new(Cursor::new(&b"\n\n"[..]));
        assert!(r.next_record().unwrap().is_none());
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn concatenates_all_records() {
        let data = b">r1\nacg\nT\n>r2 x\n\nNNa c\n";
        let text = read_sequence_from(Cursor::new(&data[..])).unwrap();
        assert_eq!(text, b"ACGTNNAC");

        let headerless = read_sequence_from(Cursor::new(&b"AC\n>r\nGT\n"[..])).unwrap();
        assert_eq!(headerless, b"ACGT");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_sequence("/nonexistent/gapseek/ref.fa").unwrap_err();
        assert!(err.to_string().contains("cannot open FASTA"));
    }
}
