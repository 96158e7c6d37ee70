//! クリップボード実装

/// 単一エントリのクリップボード
///
/// コピー・カットのたびに上書きされ、ペーストでは変化しない
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    contents: String,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内容を置き換える（空文字列も保持する）
    pub fn set(&mut self, text: String) {
        self.contents = text;
    }

    /// 現在の内容
    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }
}
