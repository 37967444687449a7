//!
//! Streaming FASTA decoder
//!
//! Turns a line-oriented byte stream into a lazy iterator of records,
//! reading the input strictly once, forward-only.
//!
use std::io::{self, BufRead};

/// first byte of a title line
const MARKER: u8 = b'>';

/// Type of a raw sequence body
pub type Sequence = Vec<u8>;

///
/// One FASTA record: the title after `>` and the sequence body with
/// line breaks, spaces and carriage returns removed.
///
#[derive(Debug, Clone, PartialEq)]
pub struct FastaRecord {
    pub title: String,
    pub seq: Sequence,
}

///
/// Pull-based reader over FASTA records.
///
/// Text before the first `>` line (blank lines, comments) is skipped.
/// Memory usage is bounded by the longest single record: only the
/// current line and the record being accumulated are held. Read
/// failures of the underlying stream surface as `Err` items and end
/// the iteration.
///
pub struct FastaReader<R> {
    reader: R,
    /// title of the record currently being accumulated
    title: String,
    /// set once the first marker line has been seen
    in_record: bool,
    /// reusable raw line buffer
    line: Vec<u8>,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        FastaReader {
            reader,
            title: String::new(),
            in_record: false,
            line: Vec::new(),
            done: false,
        }
    }

    /// read the next raw line into the line buffer, returning its length
    fn next_line(&mut self) -> io::Result<usize> {
        self.line.clear();
        self.reader.read_until(b'\n', &mut self.line)
    }

    fn is_marker_line(&self) -> bool {
        self.line.first() == Some(&MARKER)
    }

    /// title of the marker line in the buffer: everything after `>` up to
    /// the end of line, trailing whitespace stripped
    fn title_line(&self) -> String {
        String::from_utf8_lossy(&self.line[1..]).trim_end().to_string()
    }
}

/// append one sequence line to `seq`: the trailing line terminator is
/// dropped, spaces and carriage returns are removed, every other byte is
/// preserved as-is
fn append_bases(seq: &mut Sequence, line: &[u8]) {
    let line = match line.last() {
        Some(&b'\n') => &line[..line.len() - 1],
        _ => line,
    };
    seq.extend(line.iter().copied().filter(|&b| b != b' ' && b != b'\r'));
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = io::Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // skip any text before the first record
        while !self.in_record {
            match self.next_line() {
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Ok(0) => {
                    // no marker line encountered - probably an empty file
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
            }
            if self.is_marker_line() {
                self.title = self.title_line();
                self.in_record = true;
            }
        }
        let mut seq = Sequence::new();
        loop {
            match self.next_line() {
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Ok(0) => {
                    // end of input: the pending record is emitted even if
                    // no sequence lines followed its marker
                    self.done = true;
                    let title = std::mem::take(&mut self.title);
                    return Some(Ok(FastaRecord { title, seq }));
                }
                Ok(_) => {}
            }
            if self.is_marker_line() {
                let next_title = self.title_line();
                let title = std::mem::replace(&mut self.title, next_title);
                return Some(Ok(FastaRecord { title, seq }));
            }
            append_bases(&mut seq, &self.line);
        }
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn records(input: &str) -> Vec<FastaRecord> {
        FastaReader::new(input.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn two_records_with_spaces() {
        let rs = records(">a\nACGT\nAC GT\n>b\nTTTT\n");
        assert_eq!(rs.len(), 2);
        assert_eq!(rs[0].title, "a");
        assert_eq!(rs[0].seq, b"ACGTACGT".to_vec());
        assert_eq!(rs[1].title, "b");
        assert_eq!(rs[1].seq, b"TTTT".to_vec());
    }

    #[test_case("", 0 ; "empty input")]
    #[test_case("no marker\nanywhere\n", 0 ; "no record marker")]
    #[test_case(">only\n", 1 ; "marker then eof")]
    #[test_case(">only", 1 ; "marker without newline")]
    #[test_case(">a\n>b\n", 2 ; "consecutive markers")]
    #[test_case("junk\n\n>a\nACGT\n", 1 ; "leading noise")]
    fn record_counts(input: &str, n: usize) {
        assert_eq!(records(input).len(), n);
    }

    #[test]
    fn marker_at_eof_yields_empty_record() {
        let rs = records("before\n>last");
        assert_eq!(rs.len(), 1);
        assert_eq!(rs[0].title, "last");
        assert!(rs[0].seq.is_empty());
    }

    #[test]
    fn consecutive_markers_give_empty_first_seq() {
        let rs = records(">a\n>b\nGG\n");
        assert_eq!(rs[0].title, "a");
        assert!(rs[0].seq.is_empty());
        assert_eq!(rs[1].title, "b");
        assert_eq!(rs[1].seq, b"GG".to_vec());
    }

    #[test]
    fn crlf_input_is_normalized() {
        let rs = records(">a desc\r\nAC GT\r\nGG\r\n>b\r\nTT\r\n");
        assert_eq!(rs[0].title, "a desc");
        assert_eq!(rs[0].seq, b"ACGTGG".to_vec());
        assert_eq!(rs[1].title, "b");
        assert_eq!(rs[1].seq, b"TT".to_vec());
    }

    #[test]
    fn title_keeps_internal_spaces() {
        let rs = records(">seq 1 desc  \nAC\n");
        assert_eq!(rs[0].title, "seq 1 desc");
    }

    #[test]
    fn non_space_whitespace_is_preserved() {
        // only spaces and carriage returns are removed from the body
        let rs = records(">t\nAC\tGT\n");
        assert_eq!(rs[0].seq, b"AC\tGT".to_vec());
    }

    #[test]
    fn blank_lines_inside_record_add_nothing() {
        let rs = records(">t\nAC\n\nGT\n");
        assert_eq!(rs[0].seq, b"ACGT".to_vec());
    }

    #[test]
    fn multi_line_join_preserves_order() {
        let rs = records(">t\nAAA\nCCC\nGGG\n");
        assert_eq!(rs[0].seq, b"AAACCCGGG".to_vec());
    }
}
