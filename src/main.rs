use anyhow::Result;
use clap::Parser;
use ecwiz::{utils, SettingsRecord, TerminalPrompter, Wizard};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ecwiz")]
#[command(author = "wen")]
#[command(version)]
#[command(about = "Create or update an .editorconfig file interactively.")]
#[command(long_about = "
ecwiz - Create or update an .editorconfig file

Asks for the indent style, indent size (or tab width), end of line,
trailing whitespace and final newline settings. Values found in an
existing file are offered as defaults; press Enter to keep them.

The file is written with a single [*] section:

  root = true

  [*]
  charset = utf-8
  indent_style = space
  indent_size = 4
  tab_width = 4
  end_of_line = lf
  insert_final_newline = true
  trim_trailing_whitespace = true
")]
struct Args {
    /// File to create or update
    #[arg(default_value = ".editorconfig")]
    file: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日誌
    utils::init_logger(args.debug);

    let wizard = Wizard::new(args.file, SettingsRecord::builtin());
    let mut prompter = TerminalPrompter::stdio();

    // 寫入失敗時直接回傳錯誤，以非零狀態結束
    let outcome = wizard.run(&mut prompter)?;
    println!("{}", outcome.status_line());

    Ok(())
}
