//! バッファ内部状態のスナップショット
//!
//! デバッグ表示やデモ出力向けに、テキストと生ストレージ、ギャップ位置を記録する

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BufferSnapshot {
    /// 論理テキスト
    pub text: String,
    /// 生ストレージ（空きスロットは `*`）
    pub storage: String,
    pub capacity: usize,
    pub gap_start: usize,
    /// 排他的終端
    pub gap_end: usize,
    pub gap_size: usize,
    pub next_growth: usize,
}

impl BufferSnapshot {
    /// JSON 文字列に変換
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
