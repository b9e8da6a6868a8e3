//! CSV header parsing and normalization.

/// Column names and separator detected from the header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeaders {
    /// Normalized column names (trimmed, in file order).
    pub columns: Vec<String>,
    /// Field separator (`,` or `;`).
    pub separator: u8,
}

impl TableHeaders {
    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the first column name that appears more than once.
    pub fn first_duplicate(&self) -> Option<&str> {
        self.columns
            .iter()
            .enumerate()
            .find(|(idx, name)| self.columns[..*idx].contains(name))
            .map(|(_, name)| name.as_str())
    }
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Picks `;` when it outnumbers `,` outside quotes (spreadsheet exports in
/// Spanish locales use it), `,` otherwise.
pub fn detect_separator(line: &str) -> u8 {
    let mut in_quotes = false;
    let (mut commas, mut semicolons) = (0usize, 0usize);
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semicolons += 1,
            _ => {}
        }
    }
    if semicolons > commas { b';' } else { b',' }
}

/// Parses a CSV line into fields, handling quoted values.
pub fn parse_csv_line(line: &str, separator: u8) -> Vec<String> {
    let separator = char::from(separator);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == separator && !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_simple() {
        let result = parse_csv_line("Fecha,Empresa,Toneladas", b',');
        assert_eq!(result, vec!["Fecha", "Empresa", "Toneladas"]);
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"Peso, neto\",b,c", b',');
        assert_eq!(result, vec!["Peso, neto", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"he said \"\"hello\"\"\",b", b',');
        assert_eq!(result, vec!["he said \"hello\"", "b"]);
    }

    #[test]
    fn test_parse_csv_line_semicolon() {
        let result = parse_csv_line("  Fecha ; Empresa ", b';');
        assert_eq!(result, vec!["Fecha", "Empresa"]);
    }

    #[test]
    fn test_detect_separator() {
        assert_eq!(detect_separator("a,b,c"), b',');
        assert_eq!(detect_separator("Fecha;Empresa;\"Peso, kg\""), b';');
        assert_eq!(detect_separator("single"), b',');
    }

    #[test]
    fn test_first_duplicate() {
        let headers = TableHeaders {
            columns: vec!["A".into(), "B".into(), "A".into()],
            separator: b',',
        };
        assert_eq!(headers.first_duplicate(), Some("A"));
    }
}
