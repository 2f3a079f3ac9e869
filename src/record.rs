//! Delimited-text tables.
//!
//! Each table is a CSV file with a fixed header row. Quoting follows the
//! Python `csv` module defaults so files written by either side read back the
//! same: fields containing a comma, quote, CR or LF are wrapped in quotes,
//! embedded quotes are doubled and rows end with CRLF.

use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

use crate::error::{Error, Result};

pub const TRUE: &str = "True";
pub const FALSE: &str = "False";

pub fn encode_bool(value: bool) -> String {
    if value { TRUE } else { FALSE }.to_owned()
}

pub fn decode_bool(value: &str) -> bool {
    value == TRUE
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

/// Encodes one row, including the trailing line terminator.
pub fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        let field = field.as_ref();
        if i > 0 {
            line.push(',');
        }
        if needs_quotes(field) {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    }
    line.push_str("\r\n");
    line
}

/// Splits text into rows of fields. Blank lines are dropped.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // set once the current row has any content, so blank lines can be told apart
    let mut dirty = false;
    // a quote only opens a quoted field as the field's first character
    let mut field_started = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
                dirty = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                field_started = false;
                dirty = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if dirty {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                field_started = false;
                dirty = false;
            }
            _ => {
                field.push(c);
                field_started = true;
                dirty = true;
            }
        }
    }

    if dirty {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// A data row viewed through the table header.
#[derive(Debug)]
pub struct Row<'a> {
    header: &'a [String],
    fields: &'a [String],
}

impl<'a> Row<'a> {
    pub fn new(header: &'a [String], fields: &'a [String]) -> Self {
        Self { header, fields }
    }

    /// Field under `column`, or empty when the column or field is absent.
    pub fn get(&self, column: &str) -> &'a str {
        self.header
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A type stored as one row of a table.
pub trait Record: Sized {
    const HEADER: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    fn from_row(row: &Row<'_>) -> std::result::Result<Self, String>;
}

/// A flat file holding records of one type.
#[derive(Debug)]
pub struct Table<R> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Table<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Creates the file with its header if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_header_if_empty().await
    }

    async fn write_header_if_empty(&self) -> Result<()> {
        let len = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(self.io_err(e)),
        };
        if len > 0 {
            return Ok(());
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(|e| self.io_err(e))?;
        }
        fs::write(&self.path, encode_row(R::HEADER))
            .await
            .map_err(|e| self.io_err(e))
    }

    pub async fn append(&self, record: &R) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_header_if_empty().await?;

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        file.write_all(encode_row(&record.to_row()).as_bytes())
            .await
            .map_err(|e| self.io_err(e))?;
        file.flush().await.map_err(|e| self.io_err(e))
    }

    /// Every decodable record, in file order.
    pub async fn scan(&self) -> Result<Vec<R>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        let mut rows = parse(&text).into_iter();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (i, fields) in rows.enumerate() {
            match R::from_row(&Row::new(&header, &fields)) {
                Ok(record) => records.push(record),
                Err(message) => {
                    let err = Error::Malformed {
                        path: self.path.clone(),
                        row: i + 1,
                        message,
                    };
                    tracing::warn!("skipping row: {err}");
                }
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        key: String,
        value: u32,
    }

    impl Record for Pair {
        const HEADER: &'static [&'static str] = &["Key", "Value"];

        fn to_row(&self) -> Vec<String> {
            vec![self.key.clone(), self.value.to_string()]
        }

        fn from_row(row: &Row<'_>) -> std::result::Result<Self, String> {
            Ok(Self {
                key: row.get("Key").to_owned(),
                value: row.get("Value").parse().map_err(|e| format!("Value: {e}"))?,
            })
        }
    }

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(encode_row(&["a", "b c"]), "a,b c\r\n");
        assert_eq!(
            encode_row(&["Food & Dining, Music", "say \"hi\""]),
            "\"Food & Dining, Music\",\"say \"\"hi\"\"\"\r\n"
        );
    }

    #[test]
    fn parses_quoted_fields_across_lines() {
        let rows = parse("Name,Bio\r\nAda,\"line one\nline two, still bio\"\r\nBob,\"\"\"quoted\"\"\"\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["Ada", "line one\nline two, still bio"]);
        assert_eq!(rows[2], vec!["Bob", "\"quoted\""]);
    }

    #[test]
    fn stray_quote_inside_a_field_is_literal() {
        let rows = parse("a\"b,c\r\nd,e\r\n");
        assert_eq!(rows, vec![vec!["a\"b", "c"], vec!["d", "e"]]);

        let rows = parse("\"ab\"c\"d,e\r\n");
        assert_eq!(rows, vec![vec!["abc\"d", "e"]]);
    }

    #[test]
    fn skips_blank_lines_and_keeps_empty_fields() {
        let rows = parse("a,b\r\n\r\n,\r\nc,\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["", ""], vec!["c", ""]]);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let header = vec!["A".to_owned(), "B".to_owned()];
        let fields = vec!["x".to_owned()];
        let row = Row::new(&header, &fields);
        assert_eq!(row.get("A"), "x");
        assert_eq!(row.get("B"), "");
        assert_eq!(row.get("C"), "");
    }

    #[tokio::test]
    async fn table_writes_header_once_and_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::<Pair>::new(dir.path().join("nested/pairs.csv"));

        assert!(table.scan().await.unwrap().is_empty());

        table.init().await.unwrap();
        table.append(&Pair { key: "one, two".into(), value: 1 }).await.unwrap();
        table.append(&Pair { key: "three".into(), value: 3 }).await.unwrap();
        table
            .append(&Pair { key: "say \"hi\",\r\nthen wave".into(), value: 4 })
            .await
            .unwrap();

        let mut file = fs::OpenOptions::new().append(true).open(table.path()).await.unwrap();
        file.write_all(b"broken,not-a-number\r\n").await.unwrap();

        let text = fs::read_to_string(table.path()).await.unwrap();
        assert!(text.starts_with("Key,Value\r\n"));
        assert_eq!(text.matches("Key,Value").count(), 1);

        let pairs = table.scan().await.unwrap();
        assert_eq!(
            pairs,
            vec![
                Pair { key: "one, two".into(), value: 1 },
                Pair { key: "three".into(), value: 3 },
                Pair { key: "say \"hi\",\r\nthen wave".into(), value: 4 },
            ]
        );
    }
}
