// ============================================
// src/logger.rs
// デバッグログ (画面のログ欄 + 任意でファイル)
// ============================================

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

use crate::error::GameError;

/// 画面に残すログの行数
pub const LOG_CAPACITY: usize = 200;

/// ログ行の共有バッファ (新しい行が先頭)
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push_front(line);
            lines.truncate(self.capacity);
        }
    }

    /// 新しい順に最大 `max` 行
    pub fn recent(&self, max: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().take(max).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// `log` クレートの出力先
pub struct DebugLog {
    buffer: LogBuffer,
    file: Option<Mutex<File>>,
    level: LevelFilter,
}

impl DebugLog {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        Self {
            buffer,
            file: None,
            level,
        }
    }

    /// ログファイルに追記する
    pub fn with_file(mut self, path: &Path) -> Result<Self, GameError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.file = Some(Mutex::new(file));
        Ok(self)
    }

    fn format(record: &Record) -> String {
        let ts = Local::now().format("%H:%M:%S");
        format!("[{ts}] {:<5} {}", record.level(), record.args())
    }
}

impl Log for DebugLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{line}");
            }
        }
        self.buffer.push(line);
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// グローバルロガーを登録して、画面表示用のバッファを返す
pub fn init(log_file: Option<&Path>) -> Result<LogBuffer, GameError> {
    let buffer = LogBuffer::new(LOG_CAPACITY);
    let mut logger = DebugLog::new(buffer.clone(), LevelFilter::Debug);
    if let Some(path) = log_file {
        logger = logger.with_file(path)?;
    }

    // 2 回目の登録はエラーになるが、最初のロガーがそのまま使われるので無視する
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
    log::info!("Logger ready");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_newest_lines_first() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {i}"));
        }
        assert_eq!(buffer.recent(10), ["line 4", "line 3", "line 2"]);
        assert_eq!(buffer.recent(1), ["line 4"]);
    }

    #[test]
    fn logger_writes_to_buffer_and_file() {
        let path = std::env::temp_dir().join(format!("wordwiz-log-{}.txt", std::process::id()));
        let buffer = LogBuffer::new(10);
        let logger = DebugLog::new(buffer.clone(), LevelFilter::Info)
            .with_file(&path)
            .unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("Load Q: 0"))
                .level(log::Level::Info)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("too chatty"))
                .level(log::Level::Trace)
                .build(),
        );
        logger.flush();

        let lines = buffer.recent(10);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Load Q: 0"));

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(written.contains("Load Q: 0"));
        assert!(!written.contains("too chatty"));
    }
}
