//! Housing List Module
//!
//! Reads saved housing lists (`Item Name: Quantity` per line) into ordered
//! line items.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{AppraiseError, Result};

/// One `name: quantity` entry of a housing list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub quantity: u64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Reads and parses a housing list file.
///
/// The byte-order mark decides the encoding; files without one are read as UTF-8.
pub fn read_housing_list(path: &Path) -> Result<Vec<LineItem>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppraiseError::ListNotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        warn!(
            "{} is not valid {}, unreadable characters were replaced",
            path.display(),
            encoding.name()
        );
    }

    Ok(parse_housing_list(&text))
}

/// Parses housing list text, keeping line order.
///
/// Blank lines, dividers and section headers are skipped. Lines with an
/// unreadable quantity are skipped with a warning.
pub fn parse_housing_list(text: &str) -> Vec<LineItem> {
    let mut items = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_divider(line) {
            continue;
        }

        let Some((name, quantity)) = line.rsplit_once(':') else {
            debug!("Skipping section header on line {}: {}", index + 1, line);
            continue;
        };

        let (name, quantity) = (name.trim(), quantity.trim());
        if quantity.is_empty() {
            debug!("Skipping section header on line {}: {}", index + 1, line);
            continue;
        }
        if name.is_empty() {
            warn!("Skipping line {} with no item name: {}", index + 1, line);
            continue;
        }

        match quantity.parse::<u64>() {
            Ok(quantity) => items.push(LineItem::new(name, quantity)),
            Err(_) => warn!(
                "Skipping line {} with invalid quantity '{}': {}",
                index + 1,
                quantity,
                line
            ),
        }
    }

    items
}

/// A line made only of punctuation and spaces, e.g. `-----` or `== ==`.
fn is_divider(line: &str) -> bool {
    !line.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_lines() {
        let items = parse_housing_list("Garden Lamp: 2\nOak Table: 1\n");
        assert_eq!(
            items,
            vec![LineItem::new("Garden Lamp", 2), LineItem::new("Oak Table", 1)]
        );
    }

    #[test]
    fn test_parse_skips_dividers_headers_and_blanks() {
        let text = "\
Furniture:
Garden Lamp: 2

------------------
[Dyes]
Pastel Pink Dye: 4
==========
";
        let items = parse_housing_list(text);
        assert_eq!(
            items,
            vec![
                LineItem::new("Garden Lamp", 2),
                LineItem::new("Pastel Pink Dye", 4)
            ]
        );
    }

    #[test]
    fn test_parse_name_containing_colon() {
        let items = parse_housing_list("Wall Chronometer: Deluxe: 3");
        assert_eq!(items, vec![LineItem::new("Wall Chronometer: Deluxe", 3)]);
    }

    #[test]
    fn test_parse_invalid_quantity_skipped() {
        let items = parse_housing_list("Garden Lamp: two\nOak Table: -1\nStool: 5\n: 9");
        assert_eq!(items, vec![LineItem::new("Stool", 5)]);
    }

    #[test]
    fn test_parse_crlf_and_padding() {
        let items = parse_housing_list("  Garden Lamp :  7  \r\nOak Table:1\r\n");
        assert_eq!(
            items,
            vec![LineItem::new("Garden Lamp", 7), LineItem::new("Oak Table", 1)]
        );
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_housing_list(&dir.path().join("cottage.txt"));
        assert!(matches!(result, Err(AppraiseError::ListNotFound(_))));
    }

    #[test]
    fn test_read_utf8_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cottage.txt");
        fs::write(&path, b"\xEF\xBB\xBFGarden Lamp: 2\n").unwrap();

        let items = read_housing_list(&path).unwrap();
        assert_eq!(items, vec![LineItem::new("Garden Lamp", 2)]);
    }

    #[test]
    fn test_read_utf16le_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cottage.txt");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Oak Table: 3\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();

        let items = read_housing_list(&path).unwrap();
        assert_eq!(items, vec![LineItem::new("Oak Table", 3)]);
    }
}
