// 互動提示 - 自由輸入與封閉選項，輸入無效時重新詢問

use anyhow::{anyhow, bail, Context, Result};
use crossterm::{
    queue,
    style::{self, Color},
    tty::IsTty,
};
use std::io::{self, BufRead, Write};

/// 驗證函數：回傳錯誤時重新詢問
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<()>;

/// 終端互動能力，測試時可用腳本替代
pub trait Prompter {
    /// 自由輸入；空白輸入採用預設值，驗證失敗時一直重問
    fn ask(&mut self, query: &str, default: &str, validate: Validator<'_>) -> Result<String>;

    /// 從 `choices` 中選一個；可輸入編號或選項文字，空白輸入採用預設值
    fn select(&mut self, query: &str, choices: &[&str], default: &str) -> Result<String>;
}

/// 尺寸類輸入只要能解析成整數即可
pub fn validate_int(value: &str) -> Result<()> {
    value
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| anyhow!("value must be an integer"))
}

pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// 使用標準輸入輸出，只有在終端上才加顏色
    pub fn stdio() -> Self {
        let stdout = io::stdout();
        let color = stdout.is_tty();
        Self::new(io::stdin().lock(), stdout, color)
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W, color: bool) -> Self {
        Self {
            reader,
            writer,
            color,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_writer(self) -> W {
        self.writer
    }

    fn print_query(&mut self, query: &str) -> Result<()> {
        if self.color {
            queue!(
                self.writer,
                style::SetForegroundColor(Color::Cyan),
                style::Print(query),
                style::ResetColor,
                style::Print("\n\n"),
            )?;
        } else {
            write!(self.writer, "{}\n\n", query)?;
        }
        Ok(())
    }

    fn print_hint(&mut self, hint: &str) -> Result<()> {
        if self.color {
            queue!(
                self.writer,
                style::SetForegroundColor(Color::DarkGrey),
                style::Print(hint),
                style::ResetColor,
            )?;
        } else {
            write!(self.writer, "{}", hint)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn print_error(&mut self, message: &str) -> Result<()> {
        if self.color {
            queue!(
                self.writer,
                style::SetForegroundColor(Color::Red),
                style::Print(message),
                style::ResetColor,
                style::Print("\n"),
            )?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }

    /// 讀一行輸入並去除空白；EOF 視為錯誤，避免無限重問
    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, query: &str, default: &str, validate: Validator<'_>) -> Result<String> {
        self.print_query(query)?;

        loop {
            self.print_hint(&format!("Enter a value (Default is {}): ", default))?;

            let answer = self.read_answer()?;
            let value = if answer.is_empty() {
                default.to_string()
            } else {
                answer
            };

            match validate(&value) {
                Ok(()) => {
                    writeln!(self.writer)?;
                    return Ok(value);
                }
                Err(e) => {
                    log::debug!("Rejected '{}' for '{}': {}", value, query, e);
                    self.print_error(&format!("{}, try again", e))?;
                }
            }
        }
    }

    fn select(&mut self, query: &str, choices: &[&str], default: &str) -> Result<String> {
        self.print_query(query)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.writer, "{}. {}", i + 1, choice)?;
        }
        writeln!(self.writer)?;

        let default_idx = choices.iter().position(|c| *c == default);
        let hint = match default_idx {
            Some(idx) => format!("Enter a number (Default is {}): ", idx + 1),
            None => "Enter a number: ".to_string(),
        };

        loop {
            self.print_hint(&hint)?;

            let answer = self.read_answer()?;
            let picked = if answer.is_empty() {
                default_idx
            } else if let Ok(n) = answer.parse::<usize>() {
                n.checked_sub(1).filter(|idx| *idx < choices.len())
            } else {
                choices.iter().position(|c| c.eq_ignore_ascii_case(&answer))
            };

            match picked {
                Some(idx) => {
                    writeln!(self.writer)?;
                    return Ok(choices[idx].to_string());
                }
                None => self.print_error("Invalid choice, try again")?,
            }
        }
    }
}
