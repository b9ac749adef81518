// 設定記錄 - .editorconfig 單一區段的欄位

use anyhow::{anyhow, Error};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Space,
    Tab,
}

impl IndentStyle {
    /// 提示時的選項順序
    pub const ALL: [&'static str; 2] = ["space", "tab"];

    pub fn as_str(self) -> &'static str {
        match self {
            IndentStyle::Space => "space",
            IndentStyle::Tab => "tab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfLine {
    Cr,
    CrLf,
    Lf,
}

impl EndOfLine {
    pub const ALL: [&'static str; 3] = ["cr", "crlf", "lf"];

    pub fn as_str(self) -> &'static str {
        match self {
            EndOfLine::Cr => "cr",
            EndOfLine::CrLf => "crlf",
            EndOfLine::Lf => "lf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Latin1,
    Utf8,
    Utf8Bom,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    pub fn as_str(self) -> &'static str {
        match self {
            Charset::Latin1 => "latin1",
            Charset::Utf8 => "utf-8",
            Charset::Utf8Bom => "utf-8-bom",
            Charset::Utf16Be => "utf-16be",
            Charset::Utf16Le => "utf-16le",
        }
    }
}

// EditorConfig 的屬性值不分大小寫
impl FromStr for IndentStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "space" => Ok(IndentStyle::Space),
            "tab" => Ok(IndentStyle::Tab),
            other => Err(anyhow!("unknown indent_style '{}'", other)),
        }
    }
}

impl FromStr for EndOfLine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cr" => Ok(EndOfLine::Cr),
            "crlf" => Ok(EndOfLine::CrLf),
            "lf" => Ok(EndOfLine::Lf),
            other => Err(anyhow!("unknown end_of_line '{}'", other)),
        }
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin1" => Ok(Charset::Latin1),
            "utf-8" => Ok(Charset::Utf8),
            "utf-8-bom" => Ok(Charset::Utf8Bom),
            "utf-16be" => Ok(Charset::Utf16Be),
            "utf-16le" => Ok(Charset::Utf16Le),
            other => Err(anyhow!("unknown charset '{}'", other)),
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EndOfLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 布林值的選項，提示與檔案中都以字面文字呈現
pub const BOOL_CHOICES: [&str; 2] = ["true", "false"];

/// 解析 `true`/`false`（不分大小寫）
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub root: bool,
    pub charset: Charset,
    pub indent_style: IndentStyle,
    /// 整數文字，只在 indent_style = space 時詢問
    pub indent_size: String,
    /// 整數文字，只在 indent_style = tab 時詢問
    pub tab_width: String,
    pub end_of_line: EndOfLine,
    pub trim_trailing_whitespace: bool,
    pub insert_final_newline: bool,
}

impl SettingsRecord {
    /// 內建預設值，找不到檔案時作為基準
    pub fn builtin() -> Self {
        Self {
            root: true,
            charset: Charset::Utf8,
            indent_style: IndentStyle::Space,
            indent_size: "4".to_string(),
            tab_width: 4.to_string(),
            end_of_line: EndOfLine::Lf,
            trim_trailing_whitespace: true,
            insert_final_newline: true,
        }
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let record = SettingsRecord::default();
        assert!(record.root);
        assert_eq!(record.charset, Charset::Utf8);
        assert_eq!(record.indent_style, IndentStyle::Space);
        assert_eq!(record.indent_size, "4");
        assert_eq!(record.tab_width, "4");
        assert_eq!(record.end_of_line, EndOfLine::Lf);
        assert!(record.trim_trailing_whitespace);
        assert!(record.insert_final_newline);
    }

    #[test]
    fn test_values_are_case_insensitive() {
        assert_eq!("TAB".parse::<IndentStyle>().unwrap(), IndentStyle::Tab);
        assert_eq!("CrLf".parse::<EndOfLine>().unwrap(), EndOfLine::CrLf);
        assert_eq!("UTF-8-BOM".parse::<Charset>().unwrap(), Charset::Utf8Bom);
        assert_eq!(parse_bool("False"), Some(false));
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!("spaces".parse::<IndentStyle>().is_err());
        assert!("\\n".parse::<EndOfLine>().is_err());
        assert!("ascii".parse::<Charset>().is_err());
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_choice_lists_round_trip() {
        for token in IndentStyle::ALL {
            assert_eq!(token.parse::<IndentStyle>().unwrap().as_str(), token);
        }
        for token in EndOfLine::ALL {
            assert_eq!(token.parse::<EndOfLine>().unwrap().to_string(), token);
        }
    }
}
