//! テキストエディタ本体
//!
//! ギャップバッファとクリップボードを所有し、コピー・カット・ペーストを提供する

use crate::buffer::{BufferSnapshot, GapBuffer, DEFAULT_CAPACITY};
use crate::dictionary::{count_misspellings, Lexicon};
use crate::editor::clipboard::Clipboard;
use crate::error::{ConfigError, Result};
use crate::options::EditorOptions;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// コピー・カットの範囲指定に使う座標系
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardIndexing {
    /// 論理位置（挿入・削除と同じ座標系）
    #[default]
    Logical,
    /// 物理位置（互換モード）：ストレージの生スロットを範囲指定する
    Physical,
}

impl FromStr for ClipboardIndexing {
    type Err = ConfigError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "logical" => Ok(Self::Logical),
            "physical" => Ok(Self::Physical),
            _ => Err(ConfigError::InvalidValue {
                key: "clipboard_indexing".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// テキストエディタのメイン構造体
#[derive(Debug, Clone)]
pub struct TextEditor {
    buffer: GapBuffer,
    clipboard: Clipboard,
    indexing: ClipboardIndexing,
}

impl TextEditor {
    /// 文書と初期容量から作成
    pub fn new(document: &str, initial_capacity: usize) -> Self {
        Self {
            buffer: GapBuffer::from_text(document, initial_capacity),
            clipboard: Clipboard::new(),
            indexing: ClipboardIndexing::default(),
        }
    }

    /// 設定から作成
    pub fn from_options(document: &str, options: &EditorOptions) -> Self {
        Self::new(document, options.resolve_capacity())
            .with_indexing(options.resolve_clipboard_indexing())
    }

    /// 座標系を指定
    pub fn with_indexing(mut self, indexing: ClipboardIndexing) -> Self {
        self.indexing = indexing;
        self
    }

    pub fn indexing(&self) -> ClipboardIndexing {
        self.indexing
    }

    pub fn set_indexing(&mut self, indexing: ClipboardIndexing) {
        self.indexing = indexing;
    }

    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn get_text(&self) -> String {
        self.buffer.get_text()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        self.buffer.snapshot()
    }

    pub fn insert_before(&mut self, text_pos: usize, text: &str) -> Result<()> {
        self.buffer.insert_before(text_pos, text)?;
        Ok(())
    }

    pub fn insert_after(&mut self, text_pos: usize, text: &str) -> Result<()> {
        self.buffer.insert_after(text_pos, text)?;
        Ok(())
    }

    pub fn delete(&mut self, text_pos: usize) -> Result<char> {
        Ok(self.buffer.delete(text_pos)?)
    }

    /// 範囲 `[start, end)` をクリップボードへコピー
    ///
    /// 範囲の解釈は `indexing()` に従う。失敗時クリップボードは変化しない。
    pub fn copy(&mut self, start: usize, end: usize) -> Result<()> {
        match self.indexing {
            ClipboardIndexing::Logical => self.copy_logical(start, end),
            ClipboardIndexing::Physical => self.copy_physical(start, end),
        }
    }

    /// 範囲 `[start, end)` をクリップボードへ移して削除
    pub fn cut(&mut self, start: usize, end: usize) -> Result<()> {
        match self.indexing {
            ClipboardIndexing::Logical => self.cut_logical(start, end),
            ClipboardIndexing::Physical => self.cut_physical(start, end),
        }
    }

    /// 論理位置 `[start, end)` のテキストをコピー
    pub fn copy_logical(&mut self, start: usize, end: usize) -> Result<()> {
        let text = self.buffer.substring(start, end)?;
        log::debug!("copied {} chars from text {}..{}", text.chars().count(), start, end);
        self.clipboard.set(text);
        Ok(())
    }

    /// 論理位置 `[start, end)` のテキストを一括で切り取る
    pub fn cut_logical(&mut self, start: usize, end: usize) -> Result<()> {
        let text = self.buffer.delete_range(start, end)?;
        log::debug!("cut {} chars from text {}..{}", text.chars().count(), start, end);
        self.clipboard.set(text);
        Ok(())
    }

    /// 互換モード：物理スロット `[i, j)` をそのままコピー
    ///
    /// 範囲がギャップを含む場合、空きスロットは `*` として取り込まれる
    pub fn copy_physical(&mut self, i: usize, j: usize) -> Result<()> {
        let text = self.buffer.physical_slice(i, j)?;
        log::debug!("copied {} chars from storage {}..{}", text.chars().count(), i, j);
        self.clipboard.set(text);
        Ok(())
    }

    /// 互換モード：物理スロット `[start, stop)` を取り込み、論理位置 `[start, stop)` を削除
    ///
    /// ギャップが範囲外にあれば両者は同じ文字列を指す。
    /// クリップボードには取り込んだ側（空きスロットを含みうる）を残す
    pub fn cut_physical(&mut self, start: usize, stop: usize) -> Result<()> {
        let captured = self.buffer.physical_slice(start, stop)?;
        let removed = self.buffer.delete_range(start, stop)?;
        if captured != removed {
            log::warn!(
                "physical cut {}..{} captured {:?} but removed {:?}",
                start,
                stop,
                captured,
                removed
            );
        }
        self.clipboard.set(captured);
        Ok(())
    }

    /// クリップボードの内容を `text_pos` の文字の直後に挿入
    pub fn paste(&mut self, text_pos: usize) -> Result<()> {
        self.buffer.insert_after(text_pos, self.clipboard.contents())?;
        Ok(())
    }

    /// クリップボードの内容を `text_pos` の直前に挿入
    pub fn paste_before(&mut self, text_pos: usize) -> Result<()> {
        self.buffer.insert_before(text_pos, self.clipboard.contents())?;
        Ok(())
    }

    /// 現在のテキスト中で辞書にない語の数
    pub fn misspellings<L: Lexicon + ?Sized>(&self, lexicon: &L) -> usize {
        count_misspellings(&self.buffer.get_text(), lexicon)
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new("", DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::error::{BufferError, GapEditError};

    #[test]
    fn test_copy_and_paste_logical() {
        let mut editor = TextEditor::new("HelloWorld", 5);
        editor.copy(5, 10).unwrap();
        assert_eq!(editor.clipboard().contents(), "World");

        editor.paste_before(0).unwrap();
        assert_eq!(editor.get_text(), "WorldHelloWorld");
        assert_eq!(editor.clipboard().contents(), "World");
    }

    #[test]
    fn test_cut_removes_range() {
        let mut editor = TextEditor::new("HelloWorld", 5);
        editor.cut(0, 5).unwrap();
        assert_eq!(editor.get_text(), "World");
        assert_eq!(editor.clipboard().contents(), "Hello");

        editor.paste(4).unwrap();
        assert_eq!(editor.get_text(), "WorldHello");
    }

    #[test]
    fn test_invalid_range_leaves_clipboard_untouched() {
        let mut editor = TextEditor::new("abcdef", 4);
        editor.copy(0, 2).unwrap();

        let error = editor.copy(4, 1).unwrap_err();
        assert_eq!(
            error,
            GapEditError::Buffer(BufferError::InvalidRange { start: 4, end: 1 })
        );
        let error = editor.cut(2, 99).unwrap_err();
        assert!(matches!(
            error,
            GapEditError::Buffer(BufferError::OutOfRange { position: 99, .. })
        ));

        assert_eq!(editor.clipboard().contents(), "ab");
        assert_eq!(editor.get_text(), "abcdef");
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut editor = TextEditor::new("abc", 4);
        editor.paste(1).unwrap();
        editor.paste_before(3).unwrap();
        assert_eq!(editor.get_text(), "abc");
        assert!(editor.paste(3).is_err());
    }

    #[test]
    fn test_physical_copy_reads_raw_storage() {
        let mut editor =
            TextEditor::new("HelloWorldHelloWo", 10).with_indexing(ClipboardIndexing::Physical);
        // 構築直後のギャップは末尾にあるため、物理位置と論理位置は一致する
        editor.copy(5, 10).unwrap();
        assert_eq!(editor.clipboard().contents(), "World");

        editor.paste_before(0).unwrap();
        assert_eq!(editor.get_text(), "WorldHelloWorldHelloWo");

        // ギャップは物理位置 5 から始まる
        let gap = editor.buffer().gap_range();
        assert_eq!(gap, 5..23);
        editor.copy(0, gap.end + 5).unwrap();
        let expected = format!("World{}Hello", "*".repeat(gap.len()));
        assert_eq!(editor.clipboard().contents(), expected);
    }

    #[test]
    fn test_physical_copy_captures_filler_verbatim() {
        let mut editor =
            TextEditor::new("HelloWorld", 5).with_indexing(ClipboardIndexing::Physical);
        assert_eq!(editor.buffer().storage_view(), "HelloWorld**********");

        editor.copy(8, 12).unwrap();
        assert_eq!(editor.clipboard().contents(), "ld**");
        assert_eq!(editor.clipboard().contents().chars().count(), 4);

        editor.paste(9).unwrap();
        assert_eq!(editor.get_text(), "HelloWorldld**");
    }

    #[test]
    fn test_physical_cut_spanning_gap_keeps_captured_slots() {
        let mut editor =
            TextEditor::new("abcdef", 4).with_indexing(ClipboardIndexing::Physical);
        editor.insert_before(3, "").unwrap();
        assert_eq!(editor.buffer().gap_range(), 3..5);

        // 物理 [2, 4) は 'c' と空きスロット、削除は論理 [2, 4)
        editor.cut(2, 4).unwrap();
        assert_eq!(editor.clipboard().contents(), "c*");
        assert_eq!(editor.get_text(), "abef");

        // 論理範囲外なら何も変えない
        assert!(editor.cut(3, 5).is_err());
        assert_eq!(editor.get_text(), "abef");
        assert_eq!(editor.clipboard().contents(), "c*");
    }

    #[test]
    fn test_physical_cut_matches_logical_when_gap_is_outside() {
        let mut editor =
            TextEditor::new("HelloWorldHelloWo", 10).with_indexing(ClipboardIndexing::Physical);
        editor.cut(0, 5).unwrap();
        assert_eq!(editor.clipboard().contents(), "Hello");
        assert_eq!(editor.get_text(), "WorldHelloWo");
    }

    #[test]
    fn test_indexing_parses_from_str() {
        assert_eq!(
            "Physical".parse::<ClipboardIndexing>().unwrap(),
            ClipboardIndexing::Physical
        );
        assert_eq!(
            " logical ".parse::<ClipboardIndexing>().unwrap(),
            ClipboardIndexing::Logical
        );
        assert!("raw".parse::<ClipboardIndexing>().is_err());
    }

    #[test]
    fn test_misspellings_follow_current_text() {
        let words = WordList::from_words(["hello", "world"]);
        let mut editor = TextEditor::new("hello wrld", 8);
        assert_eq!(editor.misspellings(&words), 1);

        editor.insert_after(6, "o").unwrap();
        assert_eq!(editor.get_text(), "hello world");
        assert_eq!(editor.misspellings(&words), 0);
    }
}
