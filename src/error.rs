//! エラーハンドリングシステム
//!
//! gapedit 全体で使用される統一されたエラー型を定義
//! コアは内部で回復処理を行わず、不変条件違反は即座にエラーとして報告する

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GapEditError {
    /// バッファ操作エラー
    #[error("Buffer operation failed: {0}")]
    Buffer(#[from] BufferError),

    /// 辞書読み込みエラー
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 入出力エラー
    #[error("IO error: {message}")]
    Io { message: String },
}

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// 位置が対象の長さ `len` に対して範囲外
    #[error("Position {position} is out of range for length {len}")]
    OutOfRange { position: usize, len: usize },

    /// 終端が始端より前にある範囲
    #[error("Invalid range: {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    /// 内部不変条件の破綻（プログラミングエラー）
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// 辞書（単語リスト）固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("Failed to load word list {path}: {message}")]
    LoadFailure { path: String, message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, GapEditError>;

/// 各モジュール固有のResult型
pub mod buffer {
    pub type Result<T> = std::result::Result<T, super::BufferError>;
}

pub mod dictionary {
    pub type Result<T> = std::result::Result<T, super::DictionaryError>;
}

pub mod config {
    pub type Result<T> = std::result::Result<T, super::ConfigError>;
}

// std::io::Error から GapEditError への変換
impl From<std::io::Error> for GapEditError {
    fn from(error: std::io::Error) -> Self {
        GapEditError::Io {
            message: error.to_string(),
        }
    }
}
