//! 編集層モジュール
//!
//! ギャップバッファ上の編集操作とクリップボード操作を提供

pub mod clipboard;
pub mod text_editor;

// 公開API
pub use clipboard::Clipboard;
pub use text_editor::{ClipboardIndexing, TextEditor};
