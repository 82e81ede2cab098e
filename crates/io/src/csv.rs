// CSV/TSV import

use std::io::Read;
use std::path::Path;

use crate::error::IoError;
use crate::table::{Cell, Table};

/// Read a delimited file into a header table. `None` sniffs the delimiter.
pub fn import(path: &Path, delimiter: Option<u8>) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    log::debug!("{}: delimiter {:?}", path.display(), delimiter as char);
    import_from_string(&content, delimiter)
}

const DELIMITER_CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];
const SNIFF_LINES: usize = 10;

/// Guess the field delimiter from the first lines of `content`.
///
/// A candidate must split the header line in two or more. Among those, the
/// one with the most sampled lines agreeing with the header's field count
/// (weighted by that count) wins; ties keep the earlier candidate. Falls
/// back to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(SNIFF_LINES).collect();

    let mut best = (0usize, b',');
    for delim in DELIMITER_CANDIDATES {
        let mut counts = sample.iter().map(|line| field_count(line, delim));
        let header = match counts.next() {
            Some(n) if n > 1 => n,
            _ => continue,
        };
        let agreeing = 1 + counts.filter(|&n| n == header).count();
        let score = agreeing * header;
        if score > best.0 {
            best = (score, delim);
        }
    }
    best.1
}

/// Fields on one line, honouring quotes.
fn field_count(line: &str, delimiter: u8) -> usize {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    reader
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let unreadable = |e: std::io::Error| IoError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(unreadable)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(unreadable)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            log::debug!("{}: not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

pub fn import_from_string(content: &str, delimiter: u8) -> Result<Table, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::Parse(format!("line {}: {}", row_idx + 1, e)))?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Ok(Table::from_rows(rows, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use targetfind_matcher::Item;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Name;Age;City\nAlice;30;Paris\nBob;25;London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Name,Age,City\nAlice,30,Paris\nBob,25,London\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Name\tAge\tCity\nAlice\t30\tParis\nBob\t25\tLondon\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_pipe_delimiter() {
        let content = "Name|Age|City\nAlice|30|Paris\nBob|25|London\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        // European export: semicolon fields, decimal commas inside quotes
        let content = "Invoice;Amount;Memo\n\"A-1\";\"1,50\";\"Fees, bank\"\nA-2;3;none\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("Amount\n1\n2\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_import_numeric_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, "Memo,Debit,Credit\nrent,1200,\nrefund,,45.5\nfee,2.5,10\n").unwrap();

        let table = import(&path, None).unwrap();
        assert_eq!(table.headers, vec!["Memo", "Debit", "Credit"]);
        let items = table.items(&[]).unwrap();
        assert_eq!(
            items,
            vec![
                Item::new(1200.0, "Debit", 2),
                Item::new(2.5, "Debit", 4),
                Item::new(45.5, "Credit", 3),
                Item::new(10.0, "Credit", 4),
            ]
        );
    }

    #[test]
    fn test_import_explicit_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipes.csv");
        fs::write(&path, "A|B\n1|2\n").unwrap();

        // Forcing comma leaves one text column named "A|B"
        let table = import(&path, Some(b',')).unwrap();
        assert_eq!(table.headers, vec!["A|B"]);
        let table = import(&path, Some(b'|')).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "Café" with 0xE9, invalid as UTF-8
        fs::write(&path, b"Caf\xe9,Total\nx,5\n").unwrap();

        let table = import(&path, None).unwrap();
        assert_eq!(table.headers, vec!["Café", "Total"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{feff}Amount,Fee\n1,2\n").unwrap();

        let table = import(&path, None).unwrap();
        assert_eq!(table.headers[0], "Amount");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = import(Path::new("/nonexistent/ledger.csv"), None).unwrap_err();
        assert!(matches!(err, IoError::Unreadable { .. }));
    }
}
