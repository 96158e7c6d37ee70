//! エディタ設定
//!
//! JSON 設定ファイルと環境変数から読み込み、未指定の項目は既定値で解決する

use crate::buffer::DEFAULT_CAPACITY;
use crate::editor::ClipboardIndexing;
use crate::error::{config::Result, ConfigError};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定の単語リスト
pub const DEFAULT_DICTIONARY_PATH: &str = "/usr/share/dict/words";

pub const ENV_CAPACITY: &str = "GAPEDIT_CAPACITY";
pub const ENV_DICTIONARY: &str = "GAPEDIT_DICTIONARY";
pub const ENV_DEBUG_LOG: &str = "GAPEDIT_DEBUG_LOG";
pub const ENV_LOG_LEVEL: &str = "GAPEDIT_LOG_LEVEL";
pub const ENV_CLIPBOARD_INDEXING: &str = "GAPEDIT_CLIPBOARD_INDEXING";

/// エディタ設定（未指定項目は `resolve_*` で既定値になる）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorOptions {
    /// ギャップバッファの初期容量
    pub initial_capacity: Option<usize>,
    /// 単語リストのパス（`~` と環境変数を展開する）
    pub dictionary_path: Option<PathBuf>,
    /// デバッグログ出力先
    pub debug_log_path: Option<PathBuf>,
    pub log_level: Option<LevelFilter>,
    pub clipboard_indexing: Option<ClipboardIndexing>,
}

impl EditorOptions {
    /// プロセスの環境変数から読み込み
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込み（空文字列は未指定扱い）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let initial_capacity = get(ENV_CAPACITY)
            .map(|value| parse_capacity(ENV_CAPACITY, &value))
            .transpose()?;

        let log_level = get(ENV_LOG_LEVEL)
            .map(|value| {
                value
                    .trim()
                    .parse::<LevelFilter>()
                    .map_err(|_| invalid_value(ENV_LOG_LEVEL, &value))
            })
            .transpose()?;

        let clipboard_indexing = get(ENV_CLIPBOARD_INDEXING)
            .map(|value| {
                value
                    .parse::<ClipboardIndexing>()
                    .map_err(|_| invalid_value(ENV_CLIPBOARD_INDEXING, &value))
            })
            .transpose()?;

        Ok(Self {
            initial_capacity,
            dictionary_path: get(ENV_DICTIONARY).map(PathBuf::from),
            debug_log_path: get(ENV_DEBUG_LOG).map(PathBuf::from),
            log_level,
            clipboard_indexing,
        })
    }

    /// JSON 設定ファイルから読み込み
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid_file = |message: String| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message,
        };

        let source = std::fs::read_to_string(path).map_err(|e| invalid_file(e.to_string()))?;
        serde_json::from_str(&source).map_err(|e| invalid_file(e.to_string()))
    }

    /// `overrides` で指定された項目を優先して統合
    pub fn merged_with(&self, overrides: &EditorOptions) -> EditorOptions {
        EditorOptions {
            initial_capacity: overrides.initial_capacity.or(self.initial_capacity),
            dictionary_path: overrides
                .dictionary_path
                .clone()
                .or_else(|| self.dictionary_path.clone()),
            debug_log_path: overrides
                .debug_log_path
                .clone()
                .or_else(|| self.debug_log_path.clone()),
            log_level: overrides.log_level.or(self.log_level),
            clipboard_indexing: overrides.clipboard_indexing.or(self.clipboard_indexing),
        }
    }

    pub fn resolve_capacity(&self) -> usize {
        self.initial_capacity.unwrap_or(DEFAULT_CAPACITY)
    }

    pub fn resolve_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(LevelFilter::Warn)
    }

    pub fn resolve_clipboard_indexing(&self) -> ClipboardIndexing {
        self.clipboard_indexing.unwrap_or_default()
    }

    /// 単語リストのパスを展開して返す
    pub fn resolve_dictionary_path(&self) -> Result<PathBuf> {
        match &self.dictionary_path {
            Some(path) => expand_path(ENV_DICTIONARY, path),
            None => Ok(PathBuf::from(DEFAULT_DICTIONARY_PATH)),
        }
    }

    /// デバッグログのパスを展開して返す（未指定時は出力しない）
    pub fn resolve_log_path(&self) -> Result<Option<PathBuf>> {
        self.debug_log_path
            .as_deref()
            .map(|path| expand_path(ENV_DEBUG_LOG, path))
            .transpose()
    }
}

/// 既定のデバッグログ出力先（`~/.gapedit-log/debug.log`）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gapedit-log").join("debug.log"))
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn parse_capacity(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(invalid_value(key, value)),
    }
}

fn expand_path(key: &str, path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|_| invalid_value(key, &raw))
}

fn invalid_value(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
