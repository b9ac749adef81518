// .editorconfig 讀取與解析

use crate::settings::{parse_bool, SettingsRecord};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 內容層級的解析錯誤
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("content is not valid {0} text")]
    Encoding(&'static str),

    #[error("line {line}: {message}")]
    Line { line: usize, message: String },

    #[error("no [section] found")]
    NoSection,
}

/// 載入設定檔時的錯誤分類：不存在、讀取失敗、內容無效
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    /// 檔案不存在屬於預期情況（建立模式）
    pub fn is_absent(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// 讀取並解析 `path`，區段中缺少的欄位取自 `defaults`
pub fn load(path: &Path, defaults: &SettingsRecord) -> Result<SettingsRecord, LoadError> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let text = decode(&bytes).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&text, defaults).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// 依 BOM 檢測編碼，無 BOM 時視為 UTF-8
fn decode(bytes: &[u8]) -> Result<String, ParseError> {
    let (encoding, bom_length) =
        encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_8, 0));

    let (decoded, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
    if had_errors {
        return Err(ParseError::Encoding(encoding.name()));
    }

    Ok(decoded.into_owned())
}

/// 解析 .editorconfig 文字
///
/// 只讀取第一個區段（其 glob 不做解讀），之後的區段一律忽略。
/// 前言中只認得 `root`；檔案沒有寫 `root` 時視為 `false`。
/// 單一屬性值無效或為 `unset` 時只略過該屬性，保留 `defaults` 的值。
pub fn parse(text: &str, defaults: &SettingsRecord) -> Result<SettingsRecord, ParseError> {
    let mut record = defaults.clone();
    record.root = false;

    // 0 = 前言, 1 = 第一個區段, 2 = 其後的區段
    let mut section = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let line = strip_inline_comment(line);

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 3 {
                return Err(syntax(line_no, format!("invalid section header '{}'", line)));
            }
            section += 1;
            if section > 1 {
                log::debug!("Ignoring section {} at line {}", line, line_no);
            }
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (key.trim().to_ascii_lowercase(), value.trim()),
            None => return Err(syntax(line_no, format!("expected 'key = value', got '{}'", line))),
        };

        if key.is_empty() {
            return Err(syntax(line_no, "missing key".to_string()));
        }

        let applied = match section {
            0 => apply_preamble(&mut record, &key, value),
            1 => apply_property(&mut record, &key, value),
            _ => Ok(()),
        };
        if let Err(message) = applied {
            log::warn!("Ignoring line {}: {}", line_no, message);
        }
    }

    if section == 0 {
        return Err(ParseError::NoSection);
    }

    Ok(record)
}

/// 去除行尾註解：前面有空白的 `#` 或 `;` 之後都是註解
fn strip_inline_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate().skip(1) {
        if (*b == b'#' || *b == b';') && bytes[i - 1].is_ascii_whitespace() {
            return line[..i].trim_end();
        }
    }
    line
}

fn syntax(line: usize, message: String) -> ParseError {
    ParseError::Line { line, message }
}

fn apply_preamble(record: &mut SettingsRecord, key: &str, value: &str) -> Result<(), String> {
    if key == "root" {
        record.root =
            parse_bool(value).ok_or_else(|| format!("root must be true or false, got '{}'", value))?;
    } else {
        log::debug!("Ignoring preamble key '{}'", key);
    }
    Ok(())
}

/// 套用一個屬性；回傳的錯誤只影響這一行
fn apply_property(record: &mut SettingsRecord, key: &str, value: &str) -> Result<(), String> {
    if value.eq_ignore_ascii_case("unset") {
        return Err(format!("{} is unset, keeping the default", key));
    }

    match key {
        "charset" => record.charset = value.parse().map_err(|e: anyhow::Error| e.to_string())?,
        "indent_style" => {
            record.indent_style = value.parse().map_err(|e: anyhow::Error| e.to_string())?
        }
        "end_of_line" => {
            record.end_of_line = value.parse().map_err(|e: anyhow::Error| e.to_string())?
        }
        // indent_size 也可以是 "tab"，保留原文
        "indent_size" => record.indent_size = value.to_string(),
        "tab_width" => {
            let width: i64 = value
                .parse()
                .map_err(|_| format!("tab_width must be an integer, got '{}'", value))?;
            record.tab_width = width.to_string();
        }
        "trim_trailing_whitespace" => {
            record.trim_trailing_whitespace = parse_bool(value)
                .ok_or_else(|| format!("{} must be true or false, got '{}'", key, value))?;
        }
        "insert_final_newline" => {
            record.insert_final_newline = parse_bool(value)
                .ok_or_else(|| format!("{} must be true or false, got '{}'", key, value))?;
        }
        _ => log::debug!("Ignoring unknown key '{}'", key),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Charset, EndOfLine, IndentStyle};
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_file() {
        let text = "root = true\n\n[*]\ncharset = latin1\nindent_style = tab\nindent_size = 8\ntab_width = 2\nend_of_line = crlf\ninsert_final_newline = false\ntrim_trailing_whitespace = false\n";
        let record = parse(text, &SettingsRecord::builtin()).unwrap();

        assert!(record.root);
        assert_eq!(record.charset, Charset::Latin1);
        assert_eq!(record.indent_style, IndentStyle::Tab);
        assert_eq!(record.indent_size, "8");
        assert_eq!(record.tab_width, "2");
        assert_eq!(record.end_of_line, EndOfLine::CrLf);
        assert!(!record.insert_final_newline);
        assert!(!record.trim_trailing_whitespace);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let record = parse("[*]\nindent_style = tab\n", &SettingsRecord::builtin()).unwrap();

        // root 沒寫就不是根檔案
        assert!(!record.root);
        assert_eq!(record.indent_style, IndentStyle::Tab);
        assert_eq!(record.indent_size, "4");
        assert_eq!(record.tab_width, "4");
        assert_eq!(record.end_of_line, EndOfLine::Lf);
    }

    #[test]
    fn test_comments_case_and_later_sections() {
        let text = "# top\nROOT = TRUE\n\n[*.md]\n; note\nIndent_Style = Space\nindent_size = 2\n\n[Makefile]\nindent_style = tab\n";
        let record = parse(text, &SettingsRecord::builtin()).unwrap();

        assert!(record.root);
        assert_eq!(record.indent_style, IndentStyle::Space);
        assert_eq!(record.indent_size, "2");
    }

    #[test]
    fn test_indent_size_kept_as_text() {
        let record = parse("[*]\nindent_size = tab\n", &SettingsRecord::builtin()).unwrap();
        assert_eq!(record.indent_size, "tab");
    }

    #[test]
    fn test_malformed_content() {
        let defaults = SettingsRecord::builtin();

        assert_eq!(parse("root = true\n", &defaults), Err(ParseError::NoSection));
        assert!(matches!(
            parse("[*]\nindent_style\n", &defaults),
            Err(ParseError::Line { line: 2, .. })
        ));
        assert!(matches!(
            parse("[*\n", &defaults),
            Err(ParseError::Line { line: 1, .. })
        ));
    }

    const TAB_FILE: &str = "root = true\n[*]\nindent_style = tab\ntab_width = 2\n";

    #[test]
    fn test_inline_comments_are_stripped() {
        let text = "root = true # top level\n[*] # all files\nindent_style = tab # tabs please\ntab_width = 2 ; narrow\nindent_size = 3#not a comment\n";
        let record = parse(text, &SettingsRecord::builtin()).unwrap();

        assert!(record.root);
        assert_eq!(record.indent_style, IndentStyle::Tab);
        assert_eq!(record.tab_width, "2");
        assert_eq!(record.indent_size, "3#not a comment");
    }

    #[test]
    fn test_unset_keeps_default_for_that_key_only() {
        let text = format!("{}charset = unset\nindent_size = UNSET\n", TAB_FILE);
        let record = parse(&text, &SettingsRecord::builtin()).unwrap();

        assert_eq!(record.charset, Charset::Utf8);
        assert_eq!(record.indent_size, "4");
        assert_eq!(record.indent_style, IndentStyle::Tab);
        assert_eq!(record.tab_width, "2");
    }

    #[test]
    fn test_invalid_values_skip_only_their_key() {
        let text = format!(
            "{}insert_final_newline = yes\nend_of_line = \\n\ncharset = ascii\n",
            "root = maybe\n[*]\nindent_style = tab\ntab_width = wide\ntab_width = 2\n"
        );
        let record = parse(&text, &SettingsRecord::builtin()).unwrap();

        assert!(!record.root);
        assert!(record.insert_final_newline);
        assert_eq!(record.end_of_line, EndOfLine::Lf);
        assert_eq!(record.charset, Charset::Utf8);
        assert_eq!(record.indent_style, IndentStyle::Tab);
        assert_eq!(record.tab_width, "2");
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".editorconfig");

        let err = load(&path, &SettingsRecord::builtin()).unwrap_err();
        assert!(err.is_absent());
    }

    #[test]
    fn test_load_utf8_bom_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".editorconfig");

        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(b"root = true\n[*]\nend_of_line = cr\n");
        fs::write(&path, content).unwrap();

        let record = load(&path, &SettingsRecord::builtin()).unwrap();
        assert_eq!(record.end_of_line, EndOfLine::Cr);
    }

    #[test]
    fn test_load_invalid_utf8_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".editorconfig");
        fs::write(&path, [b'[', b'*', b']', b'\n', 0xFF, 0xFE, 0xFD]).unwrap();

        let err = load(&path, &SettingsRecord::builtin()).unwrap_err();
        assert!(!err.is_absent());
        assert!(matches!(
            err,
            LoadError::Malformed {
                source: ParseError::Encoding(_),
                ..
            }
        ));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = load(temp_dir.path(), &SettingsRecord::builtin()).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
