// 日誌工具

/// 預設只顯示警告（例如無法讀取既有設定檔）；`--debug` 時顯示全部除錯訊息。
/// 沒有 `--debug` 而設定了 `RUST_LOG` 時，完全依照 `RUST_LOG`。
pub fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();

    if let Some(level) = default_level(debug, std::env::var_os("RUST_LOG").is_some()) {
        builder.filter_level(level);
    }

    builder.format_timestamp(None).init();
}

fn default_level(debug: bool, rust_log_set: bool) -> Option<log::LevelFilter> {
    if debug {
        Some(log::LevelFilter::Debug)
    } else if rust_log_set {
        None
    } else {
        Some(log::LevelFilter::Warn)
    }
}
