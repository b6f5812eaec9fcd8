//! Reading and writing the delimited text form of a [`Table`].
//!
//! The first record is the header. Fields holding the delimiter, a quote
//! or a line break are wrapped in double quotes with inner quotes doubled,
//! and so is text that would otherwise read back as another type. A
//! quoted field is always text.
//!
//! Blank lines are skipped, except in a one-column table where a blank
//! line is a row holding a single null.

use std::fs;
use std::path::Path;

use super::error::{TableError, TableResult};
use super::row::Row;
use super::schema::Schema;
use super::table::Table;
use super::value::Value;

const DELIMITER: char = ',';
const QUOTE: char = '"';

struct Field {
    text: String,
    quoted: bool,
}

/// One parsed record and the line it started on (1-based).
struct Record {
    line: usize,
    fields: Vec<Field>,
}

impl Record {
    fn is_blank(&self) -> bool {
        matches!(self.fields.as_slice(), [Field { text, quoted: false }] if text.is_empty())
    }
}

pub(crate) fn read_table(path: &Path) -> TableResult<Table> {
    let text = fs::read_to_string(path)?;
    decode(&text)
}

pub(crate) fn write_table(path: &Path, table: &Table) -> TableResult<()> {
    fs::write(path, encode(table))?;
    Ok(())
}

pub(crate) fn decode(text: &str) -> TableResult<Table> {
    let mut records = split_records(text)?
        .into_iter()
        .skip_while(Record::is_blank);

    let header = records
        .next()
        .ok_or_else(|| TableError::malformed(1, "missing header"))?;
    let names: Vec<String> = header.fields.into_iter().map(|field| field.text).collect();
    let schema = Schema::new(names).map_err(|error| match error {
        TableError::SchemaMismatch { unexpected, .. } => TableError::malformed(
            header.line,
            format!("empty or duplicate column names {:?}", unexpected),
        ),
        other => other,
    })?;

    let n_columns = schema.len();
    let mut rows = Vec::new();
    for record in records {
        if record.is_blank() && n_columns > 1 {
            continue;
        }
        if record.fields.len() > n_columns {
            return Err(TableError::malformed(
                record.line,
                format!("expected {} fields, found {}", n_columns, record.fields.len()),
            ));
        }

        let mut fields = record.fields.into_iter();
        let row: Row = schema
            .names()
            .map(|name| {
                let value = fields
                    .next()
                    .map_or(Value::Null, |field| Value::from_field(&field.text, field.quoted));
                (name, value)
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::from_rows(schema, rows))
}

pub(crate) fn encode(table: &Table) -> String {
    let mut output = table
        .schema()
        .names()
        .map(|name| escape_field(name, false))
        .collect::<Vec<String>>()
        .join(&DELIMITER.to_string());
    output.push('\n');

    for row in table {
        let line = row
            .values()
            .map(|value| escape_field(&value.to_field(), value.needs_quotes()))
            .collect::<Vec<String>>()
            .join(&DELIMITER.to_string());
        output.push_str(&line);
        output.push('\n');
    }

    output
}

fn escape_field(field: &str, force: bool) -> String {
    if force || field.contains([DELIMITER, QUOTE, '\n', '\r']) {
        format!("\"{}\"", field.replace(QUOTE, "\"\""))
    } else {
        field.to_string()
    }
}

fn split_records(text: &str) -> TableResult<Vec<Record>> {
    //! Split the text into records, honouring quoted fields that span
    //! line breaks. Blank lines come back as records with one empty,
    //! unquoted field.

    let mut records = Vec::new();
    let mut fields: Vec<Field> = Vec::new();
    let mut field = String::new();

    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            DELIMITER => {
                fields.push(Field {
                    text: std::mem::take(&mut field),
                    quoted,
                });
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(Field {
                    text: std::mem::take(&mut field),
                    quoted,
                });
                records.push(Record {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TableError::malformed(record_line, "unterminated quoted field"));
    }
    if !fields.is_empty() || !field.is_empty() || quoted {
        fields.push(Field { text: field, quoted });
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
