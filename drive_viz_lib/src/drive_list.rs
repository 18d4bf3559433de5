use crate::{drive::Drive, error::FormatError};

/// Decodes one archive line: an array of objects, each with exactly one
/// field, whose value is a `"=>"`-joined point string. The raw archive
/// writes `;` where a standard array format writes `,`, so the scanner
/// accepts either as a structural separator. Quoted content is never
/// rewritten; a literal `;` inside a value survives.
pub fn parse_drive_list(raw: &str) -> Result<Vec<Drive>, FormatError> {
    let mut scanner = Scanner::new(raw);
    let mut drives = Vec::new();

    scanner.skip_whitespace();
    scanner.expect('[')?;
    scanner.skip_whitespace();

    if !scanner.eat(']') {
        loop {
            let (key, value) = scanner.object(drives.len())?;
            drives.push(Drive::from_route(&key, &value)?);

            scanner.skip_whitespace();
            if scanner.eat(';') || scanner.eat(',') {
                scanner.skip_whitespace();
                continue;
            }
            scanner.expect(']')?;
            break;
        }
    }

    scanner.skip_whitespace();
    if !scanner.at_end() {
        return Err(FormatError::TrailingContent { at: scanner.pos });
    }
    Ok(drives)
}

/// Cursor over the raw line; `pos` is a byte offset.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), FormatError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(FormatError::Syntax {
                expected: c,
                at: self.pos,
            })
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// One `{"key": "value"}` object. Extra fields are scanned past so the
    /// fault can report how many there were.
    fn object(&mut self, index: usize) -> Result<(String, String), FormatError> {
        self.expect('{')?;
        self.skip_whitespace();

        if self.eat('}') {
            return Err(FormatError::EntryCount { index, found: 0 });
        }

        let key = self.string()?;
        self.skip_whitespace();
        self.expect(':')?;
        self.skip_whitespace();
        let value = self.string()?;
        self.skip_whitespace();

        let mut found = 1;
        while self.eat(';') || self.eat(',') {
            self.skip_whitespace();
            self.string()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            self.string()?;
            self.skip_whitespace();
            found += 1;
        }
        self.expect('}')?;

        if found != 1 {
            return Err(FormatError::EntryCount { index, found });
        }
        Ok((key, value))
    }

    /// A double-quoted string; a backslash escapes the next character.
    fn string(&mut self) -> Result<String, FormatError> {
        let start = self.pos;
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err(FormatError::UnterminatedString { at: start }),
                },
                Some(c) => out.push(c),
                None => return Err(FormatError::UnterminatedString { at: start }),
            }
        }
    }
}

#[test]
fn parses_a_raw_semicolon_separated_line() {
    let raw = r#"[{"20": "2021-01-01 08:00:00 (40.0; -75.0) => 2021-01-01 09:00:00 (40.5; -75.0)"}; {"21": "2021-01-02 10:00:00 (41.0; -74.0)"}]"#;
    let drives = parse_drive_list(raw).unwrap();
    assert_eq!(drives.len(), 2);
    assert_eq!(drives[0].label, "20");
    assert_eq!(drives[0].points.len(), 2);
    assert_eq!(drives[0].segments.len(), 1);
    assert_eq!(drives[1].label, "21");
    assert_eq!(drives[1].points.len(), 1);
    assert!(drives[1].segments.is_empty());
}

#[test]
fn parses_a_normalized_comma_separated_line() {
    let raw = r#"[{"a": "2021-01-01 08:00:00 (40.0, -75.0) => 2021-01-01 09:00:00 (40.5, -75.0)"}, {"b": "2021-01-02 10:00:00 (41.0, -74.0)"}]"#;
    let drives = parse_drive_list(raw).unwrap();
    assert_eq!(drives.len(), 2);
    assert_eq!(drives[0].segments[0].duration_hours(), 1.0);
}

#[test]
fn empty_array_means_no_drives() {
    assert!(parse_drive_list("[]").unwrap().is_empty());
    assert!(parse_drive_list("  [ ]  ").unwrap().is_empty());
}

#[test]
fn two_field_object_is_a_format_error() {
    let raw = r#"[{"a": "2021-01-01 08:00:00 (40.0, -75.0)"; "b": "2021-01-01 08:00:00 (40.0, -75.0)"}]"#;
    assert_eq!(
        parse_drive_list(raw).unwrap_err(),
        FormatError::EntryCount { index: 0, found: 2 }
    );
}

#[test]
fn empty_object_is_a_format_error() {
    assert_eq!(
        parse_drive_list("[{}]").unwrap_err(),
        FormatError::EntryCount { index: 0, found: 0 }
    );
}

#[test]
fn missing_bracket_is_a_syntax_error() {
    assert!(matches!(
        parse_drive_list(r#"{"a": "2021-01-01 08:00:00 (40.0, -75.0)"}"#).unwrap_err(),
        FormatError::Syntax { expected: '[', .. }
    ));
}

#[test]
fn trailing_garbage_is_a_format_error() {
    let raw = r#"[{"a": "2021-01-01 08:00:00 (40.0, -75.0)"}] extra"#;
    assert!(matches!(
        parse_drive_list(raw).unwrap_err(),
        FormatError::TrailingContent { .. }
    ));
}

#[test]
fn unterminated_string_is_a_format_error() {
    assert!(matches!(
        parse_drive_list(r#"[{"a": "2021-01-01 08:00:00 (40.0, -75.0)"#).unwrap_err(),
        FormatError::UnterminatedString { .. }
    ));
}

#[test]
fn full_pipeline_from_an_archive_line() {
    let line = r#"[{"8": "2021-01-01 08:00:00 (40.0; -75.0) => 2021-01-01 09:00:00 (40.5; -75.0)"}]"#;
    let path = std::env::temp_dir().join(format!("drive_viz_pipeline_{}.csv", std::process::id()));
    std::fs::write(&path, format!("header\n{}\n", line)).unwrap();

    let raw = crate::archive::nth_line(&path, 2).unwrap();
    let drives = parse_drive_list(&raw).unwrap();
    assert_eq!(drives.len(), 1);

    let segment = &drives[0].segments[0];
    assert_eq!(segment.duration_hours(), 1.0);
    assert!((segment.distance_km() - 55.5).abs() < 0.5);
    assert_eq!(segment.speed_kmh().unwrap(), segment.distance_km());

    let scene = crate::scene::DriveScene::build(&drives[0]).unwrap();
    let geojson = crate::export::to_geojson_string(&scene);
    assert!(geojson.contains("56km/h"));

    std::fs::remove_file(path).unwrap();
}

#[test]
fn escaped_quotes_stay_inside_the_value() {
    let raw = r#"[{"a\"b": "2021-01-01 08:00:00 (40.0, -75.0)"}]"#;
    let drives = parse_drive_list(raw).unwrap();
    assert_eq!(drives[0].label, "a\"b");
}
