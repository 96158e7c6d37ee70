//! gapedit - ギャップバッファによるテキスト編集コア
//!
//! 単一の配列と移動可能なギャップで文書を保持し、
//! 挿入・削除とクリップボード操作、単語リストによるスペルチェックを提供する

// コアモジュール
pub mod error;
pub mod logging;
pub mod options;

// データ層
pub mod buffer;

// 編集層
pub mod editor;

// 外部協調（単語リスト）
pub mod dictionary;

// 公開API
pub use buffer::{BufferSnapshot, GapBuffer};
pub use dictionary::{count_misspellings, Lexicon, WordList};
pub use editor::{Clipboard, ClipboardIndexing, TextEditor};
pub use error::{BufferError, GapEditError, Result};
pub use options::EditorOptions;
