// 設定精靈 - 載入、詢問、輸出三個階段依序執行

use crate::loader;
use crate::prompt::{validate_int, Prompter};
use crate::render::{persist, render};
use crate::settings::{parse_bool, EndOfLine, IndentStyle, SettingsRecord, BOOL_CHOICES};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// 本次執行的基準設定，提供各提示的預設值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub record: SettingsRecord,
    /// 目標檔案原本不存在
    pub creating: bool,
}

/// 載入基準設定
///
/// 檔案不存在時使用 `defaults` 並進入建立模式。其他錯誤只記錄警告，
/// 同樣以 `defaults` 為基準，但仍視為更新既有檔案。
pub fn resolve_baseline(path: &Path, defaults: &SettingsRecord) -> Baseline {
    match loader::load(path, defaults) {
        Ok(record) => {
            log::debug!("Loaded {}", path.display());
            Baseline {
                record,
                creating: false,
            }
        }
        Err(e) if e.is_absent() => {
            log::debug!("{}, using defaults", e);
            Baseline {
                record: defaults.clone(),
                creating: true,
            }
        }
        Err(e) => {
            log::warn!("Unable to read editorconfig: {}", e);
            Baseline {
                record: defaults.clone(),
                creating: false,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub path: PathBuf,
    pub creating: bool,
    pub settings: SettingsRecord,
}

impl Outcome {
    pub fn status_line(&self) -> String {
        let verb = if self.creating { "Created" } else { "Updated" };
        format!("{} editorconfig in {}", verb, self.path.display())
    }
}

pub struct Wizard {
    path: PathBuf,
    defaults: SettingsRecord,
}

impl Wizard {
    pub fn new(path: impl Into<PathBuf>, defaults: SettingsRecord) -> Self {
        Self {
            path: path.into(),
            defaults,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 執行一次完整流程並覆寫目標檔案；只有寫入失敗（或輸入中斷）會回傳錯誤
    pub fn run<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<Outcome> {
        let baseline = resolve_baseline(&self.path, &self.defaults);
        let settings = collect(&baseline.record, prompter)?;

        let contents = render(&settings);
        persist(&self.path, &contents)
            .with_context(|| format!("Cannot save file {}", self.path.display()))?;

        Ok(Outcome {
            path: self.path.clone(),
            creating: baseline.creating,
            settings,
        })
    }
}

/// 依固定順序詢問，root 與 charset 不詢問，直接沿用基準值
pub fn collect<P: Prompter + ?Sized>(
    baseline: &SettingsRecord,
    prompter: &mut P,
) -> Result<SettingsRecord> {
    let mut settings = baseline.clone();

    let indent_style = prompter.select(
        "Indent style",
        &IndentStyle::ALL,
        baseline.indent_style.as_str(),
    )?;
    settings.indent_style = indent_style.parse()?;

    // 只詢問其中一個，另一個保留原值
    match settings.indent_style {
        IndentStyle::Space => {
            settings.indent_size =
                prompter.ask("Indent size", &baseline.indent_size, &validate_int)?;
        }
        IndentStyle::Tab => {
            settings.tab_width = prompter.ask("Tab width", &baseline.tab_width, &validate_int)?;
        }
    }

    let end_of_line = prompter.select("End of line", &EndOfLine::ALL, baseline.end_of_line.as_str())?;
    settings.end_of_line = end_of_line.parse()?;

    settings.trim_trailing_whitespace = select_bool(
        prompter,
        "Trim trailing whitespace",
        baseline.trim_trailing_whitespace,
    )?;
    settings.insert_final_newline =
        select_bool(prompter, "Insert final newline", baseline.insert_final_newline)?;

    Ok(settings)
}

fn select_bool<P: Prompter + ?Sized>(prompter: &mut P, query: &str, default: bool) -> Result<bool> {
    let answer = prompter.select(query, &BOOL_CHOICES, &default.to_string())?;
    parse_bool(&answer).ok_or_else(|| anyhow!("unexpected answer '{}' for {}", answer, query))
}
