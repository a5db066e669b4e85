// ============================================
// src/error.rs
// ゲーム全体で使うエラー型
// ============================================

use std::path::PathBuf;

use thiserror::Error;

/// コアロジックとお題読み込みのエラー
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    /// 状態の前提が崩れている (空のキュー、範囲外の ID など)
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("question bank is empty")]
    EmptyBank,

    #[error("failed to read question bank {path}: {source}")]
    BankIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question bank {path}: {source}")]
    BankFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
