//! バッファ管理モジュール
//!
//! ギャップバッファによるテキスト格納と、その内部状態のスナップショットを提供

pub mod gap_buffer;
pub mod snapshot;

// 公開API
pub use gap_buffer::{GapBuffer, DEFAULT_CAPACITY, FILLER_MARKER};
pub use snapshot::BufferSnapshot;
