//! ギャップバッファ実装
//!
//! 文書テキストと移動可能な空き領域（ギャップ）を単一の配列に保持する。
//! 挿入はギャップを消費し、ギャップを使い切った時点で倍々に拡張する。

use crate::buffer::snapshot::BufferSnapshot;
use crate::error::{buffer::Result, BufferError};
use std::fmt;
use std::ops::Range;

/// 初期容量の既定値
pub const DEFAULT_CAPACITY: usize = 10;
const GAP_GROWTH_FACTOR: usize = 2;
/// ギャップ内スロットを文字列として読み出すときの記号
pub const FILLER_MARKER: char = '*';

/// ギャップバッファ構造体
///
/// 物理位置 `gap_start..gap_end` がギャップ（`None` のスロット）で、
/// 文書テキストは `[0, gap_start)` と `[gap_end, capacity)` の連結となる。
/// 各公開操作の前後でギャップは空にならない。
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// 内部ストレージ（`None` はギャップ内の空きスロット）
    storage: Vec<Option<char>>,
    /// ギャップの開始位置（物理位置）
    gap_start: usize,
    /// ギャップの終了位置（排他的、物理位置）
    gap_end: usize,
    /// 次回の拡張で挿入する空きスロット数
    next_growth: usize,
}

impl GapBuffer {
    /// 既定容量の空バッファを作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 指定容量の空バッファを作成
    ///
    /// 容量 0 は 1 に切り上げる（最初の拡張量が 0 だと成長できないため）
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: vec![None; capacity],
            gap_start: 0,
            gap_end: capacity,
            next_growth: capacity,
        }
    }

    /// 文書と初期容量からバッファを作成
    ///
    /// 文書は実行時の挿入と同じ拡張規則で一文字ずつ先頭から書き込まれる
    pub fn from_text(document: &str, initial_capacity: usize) -> Self {
        let mut buffer = Self::with_capacity(initial_capacity);
        buffer.write_into_gap(document);
        buffer
    }

    /// 文書の文字数
    pub fn len_chars(&self) -> usize {
        self.storage.len() - self.gap_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// ストレージ全体のスロット数
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// 現在のギャップサイズ
    pub fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// ギャップの物理範囲（排他的終端）
    pub fn gap_range(&self) -> Range<usize> {
        self.gap_start..self.gap_end
    }

    /// 次回の拡張で挿入されるスロット数
    pub fn next_growth(&self) -> usize {
        self.next_growth
    }

    /// 論理位置を物理位置に変換
    ///
    /// ギャップより前ならそのまま、以降ならギャップの直後から数えた位置を返す。
    /// `map(len_chars())` は `capacity()` になる。
    pub fn map(&self, text_pos: usize) -> Result<usize> {
        let len = self.len_chars();
        if text_pos > len {
            return Err(BufferError::OutOfRange {
                position: text_pos,
                len,
            });
        }

        let physical = if text_pos < self.gap_start {
            text_pos
        } else {
            self.gap_end + (text_pos - self.gap_start)
        };

        if self.gap_range().contains(&physical) {
            return Err(BufferError::InvariantViolation(format!(
                "text position {} mapped into the gap at {}",
                text_pos, physical
            )));
        }

        Ok(physical)
    }

    /// ギャップを左へ移動し `gap_start == target` にする
    ///
    /// ギャップ直前の文字を一文字ずつギャップ直後へ移す。
    /// `target` がギャップ開始位置以降なら何もしない。
    /// 左方向の移動先は `0..=gap_start` に必ず収まるため失敗しない。
    pub fn relocate_backward(&mut self, target: usize) {
        let distance = self.gap_start.saturating_sub(target);
        while self.gap_start > target {
            self.gap_start -= 1;
            self.gap_end -= 1;
            self.storage[self.gap_end] = self.storage[self.gap_start].take();
        }

        if distance > 0 {
            log::trace!("gap moved backward by {} to {:?}", distance, self.gap_range());
        }
    }

    /// ギャップを右へ移動し `gap_end == target` にする
    ///
    /// ギャップ直後の文字を一文字ずつギャップ直前へ移す。
    /// `target` がギャップ終了位置以前なら何もしない。
    pub fn relocate_forward(&mut self, target: usize) -> Result<()> {
        if target > self.capacity() {
            return Err(BufferError::OutOfRange {
                position: target,
                len: self.capacity(),
            });
        }

        let distance = target.saturating_sub(self.gap_end);
        while self.gap_end < target {
            self.storage[self.gap_start] = self.storage[self.gap_end].take();
            self.gap_start += 1;
            self.gap_end += 1;
        }

        if distance > 0 {
            log::trace!("gap moved forward by {} to {:?}", distance, self.gap_range());
        }
        Ok(())
    }

    /// `text_pos` の直前に文字列を挿入
    ///
    /// 挿入後、`text` の先頭文字は論理位置 `text_pos` に位置する
    pub fn insert_before(&mut self, text_pos: usize, text: &str) -> Result<()> {
        let physical = self.map(text_pos)?;
        if physical < self.gap_start {
            self.relocate_backward(physical);
        } else {
            self.relocate_forward(physical)?;
        }

        self.write_into_gap(text);
        self.check_invariants()
    }

    /// `text_pos` の文字の直後に文字列を挿入
    ///
    /// `insert_before(text_pos + 1, text)` と同じ結果になる
    pub fn insert_after(&mut self, text_pos: usize, text: &str) -> Result<()> {
        self.ensure_occupied(text_pos)?;
        let physical = self.map(text_pos)?;
        if physical < self.gap_start {
            self.relocate_backward(physical + 1);
        } else {
            self.relocate_forward(physical + 1)?;
        }

        self.write_into_gap(text);
        self.check_invariants()
    }

    /// 指定位置の文字を削除し、削除した文字を返す
    ///
    /// ギャップ直後の文字（`text_pos == gap_start`）は移動なしでギャップに取り込む
    pub fn delete(&mut self, text_pos: usize) -> Result<char> {
        self.ensure_occupied(text_pos)?;

        let removed = if text_pos <= self.gap_start {
            // ギャップを右方向へ一つ広げる
            self.relocate_backward(text_pos);
            let slot = self.gap_end;
            self.gap_end += 1;
            self.storage[slot].take()
        } else {
            // ギャップを左方向へ一つ広げる
            let physical = self.map(text_pos)?;
            self.relocate_forward(physical + 1)?;
            self.gap_start -= 1;
            self.storage[self.gap_start].take()
        };

        let removed = removed.ok_or_else(|| {
            BufferError::InvariantViolation(format!(
                "deleted slot at text position {} was filler",
                text_pos
            ))
        })?;

        self.check_invariants()?;
        Ok(removed)
    }

    /// 論理範囲 `[start, end)` を一括で削除し、削除したテキストを返す
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<String> {
        self.ensure_range(start, end, self.len_chars())?;
        if start == end {
            return Ok(String::new());
        }

        let physical = self.map(start)?;
        if physical < self.gap_start {
            self.relocate_backward(physical);
        } else {
            self.relocate_forward(physical)?;
        }

        // ギャップ直後の `end - start` スロットをギャップへ取り込む
        let count = end - start;
        let removed: Option<String> = self.storage[self.gap_end..self.gap_end + count]
            .iter_mut()
            .map(Option::take)
            .collect();
        self.gap_end += count;

        let removed = removed.ok_or_else(|| {
            BufferError::InvariantViolation(format!(
                "filler slot found while deleting {}..{}",
                start, end
            ))
        })?;

        self.check_invariants()?;
        Ok(removed)
    }

    /// 論理範囲 `[start, end)` のテキストを取得（ギャップは移動しない）
    pub fn substring(&self, start: usize, end: usize) -> Result<String> {
        self.ensure_range(start, end, self.len_chars())?;
        Ok(self.live_chars().skip(start).take(end - start).collect())
    }

    /// 物理範囲 `[start, end)` のスロットをそのまま読み出す
    ///
    /// ギャップ内の空きスロットは `FILLER_MARKER` として読み出すため、
    /// 結果の文字数は常に `end - start` になる
    pub fn physical_slice(&self, start: usize, end: usize) -> Result<String> {
        self.ensure_range(start, end, self.capacity())?;
        Ok(self.storage[start..end]
            .iter()
            .map(|slot| slot.unwrap_or(FILLER_MARKER))
            .collect())
    }

    /// 全テキストを文字列として取得
    pub fn get_text(&self) -> String {
        self.live_chars().collect()
    }

    /// 生ストレージの表示用文字列（空きスロットは `*`）
    pub fn storage_view(&self) -> String {
        self.storage
            .iter()
            .map(|slot| slot.unwrap_or(FILLER_MARKER))
            .collect()
    }

    /// 現在の内部状態のスナップショット
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            text: self.get_text(),
            storage: self.storage_view(),
            capacity: self.capacity(),
            gap_start: self.gap_start,
            gap_end: self.gap_end,
            gap_size: self.gap_size(),
            next_growth: self.next_growth,
        }
    }

    /// 全ての不変条件を検査
    pub fn validate(&self) -> Result<()> {
        self.validate_gap_bounds()?;
        self.validate_slots()
    }

    /// ギャップ境界の検査（定数時間）
    fn validate_gap_bounds(&self) -> Result<()> {
        let capacity = self.capacity();
        if self.gap_start > self.gap_end || self.gap_end > capacity {
            return Err(BufferError::InvariantViolation(format!(
                "gap {:?} does not fit in capacity {}",
                self.gap_range(),
                capacity
            )));
        }

        if self.gap_start == self.gap_end {
            return Err(BufferError::InvariantViolation(format!(
                "gap exhausted at {}",
                self.gap_start
            )));
        }

        Ok(())
    }

    /// ギャップ内外のスロット内容の検査（容量に比例）
    fn validate_slots(&self) -> Result<()> {
        if let Some(offset) = self.storage[self.gap_range()]
            .iter()
            .position(Option::is_some)
        {
            return Err(BufferError::InvariantViolation(format!(
                "live character inside the gap at {}",
                self.gap_start + offset
            )));
        }

        if self.storage[..self.gap_start]
            .iter()
            .chain(&self.storage[self.gap_end..])
            .any(Option::is_none)
        {
            return Err(BufferError::InvariantViolation(
                "filler slot outside the gap".to_string(),
            ));
        }

        Ok(())
    }

    /// 変更操作の後に呼ぶ。スロット走査はデバッグビルドのみ
    fn check_invariants(&self) -> Result<()> {
        self.validate_gap_bounds()?;
        if cfg!(debug_assertions) {
            self.validate_slots()?;
        }
        Ok(())
    }

    fn live_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.storage[..self.gap_start]
            .iter()
            .chain(&self.storage[self.gap_end..])
            .flatten()
            .copied()
    }

    /// 文字が存在する位置（`[0, len)`）であることを確認
    fn ensure_occupied(&self, text_pos: usize) -> Result<()> {
        let len = self.len_chars();
        if text_pos >= len {
            return Err(BufferError::OutOfRange {
                position: text_pos,
                len,
            });
        }
        Ok(())
    }

    fn ensure_range(&self, start: usize, end: usize, len: usize) -> Result<()> {
        if end < start {
            return Err(BufferError::InvalidRange { start, end });
        }
        if end > len {
            return Err(BufferError::OutOfRange { position: end, len });
        }
        Ok(())
    }

    /// ギャップ先頭から文字を書き込み、使い切るたびに拡張する
    fn write_into_gap(&mut self, text: &str) {
        for ch in text.chars() {
            self.storage[self.gap_start] = Some(ch);
            self.gap_start += 1;
            if self.gap_start == self.gap_end {
                self.grow_gap();
            }
        }
    }

    /// `next_growth` 個の空きスロットをギャップ位置に挿入し、次回の拡張量を倍にする
    fn grow_gap(&mut self) {
        let segment = self.next_growth;
        let old_capacity = self.capacity();

        let mut storage = Vec::with_capacity(old_capacity + segment);
        storage.extend_from_slice(&self.storage[..self.gap_start]);
        storage.resize(self.gap_end + segment, None);
        storage.extend_from_slice(&self.storage[self.gap_end..]);

        self.storage = storage;
        self.gap_end += segment;
        self.next_growth = segment.saturating_mul(GAP_GROWTH_FACTOR);

        log::debug!(
            "gap buffer grown: capacity {} -> {}, next growth {}",
            old_capacity,
            self.capacity(),
            self.next_growth
        );
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for GapBuffer {
    fn from(document: &str) -> Self {
        Self::from_text(document, DEFAULT_CAPACITY)
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.live_chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
