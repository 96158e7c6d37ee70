//! 単語リスト（辞書）モジュール
//!
//! スペルチェック用の単語集合と、文書中の未登録語を数えるユーティリティ。
//! 辞書はバッファの外部から注入され、コアは `Lexicon::contains` だけを利用する。

use crate::error::{dictionary::Result, DictionaryError};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 単語の所属判定インターフェース
pub trait Lexicon {
    fn contains(&self, word: &str) -> bool;
}

impl Lexicon for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

impl<F> Lexicon for F
where
    F: Fn(&str) -> bool,
{
    fn contains(&self, word: &str) -> bool {
        self(word)
    }
}

/// 行指向の単語リストから読み込んだ単語集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 単語の列から作成
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// 読み込み元から作成
    ///
    /// 各行を空白で区切った語を全て登録する（空語は登録しない）
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            words.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(Self { words })
    }

    /// ファイルから読み込み
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_failure = |error: std::io::Error| DictionaryError::LoadFailure {
            path: path.display().to_string(),
            message: error.to_string(),
        };

        let file = File::open(path).map_err(load_failure)?;
        let list = Self::from_reader(BufReader::new(file)).map_err(load_failure)?;

        log::debug!("loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// 文書を単一スペースで区切り、辞書にない語の数を返す
///
/// 連続するスペースが作る空トークンは数えない
pub fn count_misspellings<L: Lexicon + ?Sized>(text: &str, lexicon: &L) -> usize {
    text.split(' ')
        .filter(|token| !token.is_empty())
        .filter(|token| !lexicon.contains(token))
        .count()
}
