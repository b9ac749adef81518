// 輸出固定格式的 .editorconfig

use crate::settings::SettingsRecord;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// 固定欄位順序，只有一個 `[*]` 區段
pub fn render(record: &SettingsRecord) -> String {
    format!(
        "root = {}\n\
         \n\
         [*]\n\
         charset = {}\n\
         indent_style = {}\n\
         indent_size = {}\n\
         tab_width = {}\n\
         end_of_line = {}\n\
         insert_final_newline = {}\n\
         trim_trailing_whitespace = {}\n",
        record.root,
        record.charset,
        record.indent_style,
        record.indent_size,
        record.tab_width,
        record.end_of_line,
        record.insert_final_newline,
        record.trim_trailing_whitespace,
    )
}

/// 覆寫檔案，Unix 上新檔案權限為 rw-r--r--
pub fn persist(path: &Path, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
