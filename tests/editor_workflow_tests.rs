//! TextEditor workflow tests
//!
//! Edit, clipboard and spell-check flows exercised through the public facade.

use gapedit::{
    BufferError, ClipboardIndexing, EditorOptions, GapEditError, TextEditor, WordList,
};
use proptest::prelude::*;

#[test]
fn hello_world_walkthrough() {
    let mut editor = TextEditor::new("HelloWorld", 5);

    // 末尾の文字 'd' の直後へ挿入
    editor.insert_after(9, "Hello").unwrap();
    assert_eq!(editor.get_text(), "HelloWorldHello");

    for _ in 0..5 {
        editor.delete(0).unwrap();
    }
    assert_eq!(editor.get_text(), "WorldHello");

    editor.copy(0, 5).unwrap();
    assert_eq!(editor.clipboard().contents(), "World");

    let last = editor.len_chars() - 1;
    editor.paste(last).unwrap();
    assert_eq!(editor.get_text(), "WorldHelloWorld");
}

#[test]
fn insert_after_mid_document() {
    let mut editor = TextEditor::new("HelloWorld", 5);
    editor.insert_after(5, "Hello").unwrap();
    assert_eq!(editor.get_text(), "HelloWHelloorld");
}

#[test]
fn compatibility_walkthrough_in_physical_mode() {
    let mut editor =
        TextEditor::new("HelloWorldHelloWo", 10).with_indexing(ClipboardIndexing::Physical);

    editor.copy(5, 10).unwrap();
    editor.paste_before(0).unwrap();
    assert_eq!(editor.get_text(), "WorldHelloWorldHelloWo");

    editor.cut(0, 5).unwrap();
    assert_eq!(editor.clipboard().contents(), "World");
    assert_eq!(editor.get_text(), "HelloWorldHelloWo");

    editor.paste(4).unwrap();
    assert_eq!(editor.get_text(), "HelloWorldWorldHelloWo");
}

#[test]
fn physical_copy_through_gap_pastes_filler_marker() {
    let mut editor = TextEditor::new("HelloWorld", 5).with_indexing(ClipboardIndexing::Physical);

    editor.copy(8, 12).unwrap();
    assert_eq!(editor.clipboard().contents(), "ld**");

    editor.paste(9).unwrap();
    assert_eq!(editor.get_text(), "HelloWorldld**");
    editor.buffer().validate().unwrap();
}

#[test]
fn logical_cut_is_independent_of_gap_position() {
    let mut editor = TextEditor::new("abcdefghij", 3);
    // ギャップを範囲の内側へ移動させておく
    editor.insert_before(5, "").unwrap();
    let gap = editor.buffer().gap_range();
    assert_eq!(gap.start, 5);

    editor.cut(3, 8).unwrap();
    assert_eq!(editor.clipboard().contents(), "defgh");
    assert_eq!(editor.get_text(), "abcij");
    editor.buffer().validate().unwrap();
}

#[test]
fn errors_surface_as_typed_variants() {
    let mut editor = TextEditor::new("abc", 4);

    assert_eq!(
        editor.insert_before(4, "x"),
        Err(GapEditError::Buffer(BufferError::OutOfRange {
            position: 4,
            len: 3
        }))
    );
    assert_eq!(
        editor.delete(3),
        Err(GapEditError::Buffer(BufferError::OutOfRange {
            position: 3,
            len: 3
        }))
    );
    assert_eq!(
        editor.cut(2, 1),
        Err(GapEditError::Buffer(BufferError::InvalidRange { start: 2, end: 1 }))
    );
    assert_eq!(editor.get_text(), "abc");
}

#[test]
fn physical_copy_bounds_follow_capacity() {
    let mut editor = TextEditor::new("abc", 4).with_indexing(ClipboardIndexing::Physical);
    let capacity = editor.buffer().capacity();

    // gap sits in the last slot, so its filler is captured verbatim
    assert_eq!(editor.buffer().gap_range(), 3..4);
    editor.copy(0, capacity).unwrap();
    assert_eq!(editor.clipboard().contents(), "abc*");
    assert!(editor.copy(0, capacity + 1).is_err());
}

#[test]
fn editor_from_options_uses_capacity_and_indexing() {
    let options = EditorOptions {
        initial_capacity: Some(3),
        clipboard_indexing: Some(ClipboardIndexing::Physical),
        ..EditorOptions::default()
    };

    let editor = TextEditor::from_options("abcd", &options);
    assert_eq!(editor.indexing(), ClipboardIndexing::Physical);
    // 容量 3 を使い切って 3 スロット拡張、次回の拡張量は 6
    assert_eq!(editor.buffer().capacity(), 6);
    assert_eq!(editor.buffer().next_growth(), 6);
}

#[test]
fn misspellings_use_injected_word_list() {
    let words = WordList::from_words(["the", "cat", "sat"]);
    let mut editor = TextEditor::new("the cat sta", 4);
    assert_eq!(editor.misspellings(&words), 1);

    editor.cut(8, 11).unwrap();
    editor.insert_before(8, "sat").unwrap();
    assert_eq!(editor.misspellings(&words), 0);

    let reject_all = |_: &str| false;
    assert_eq!(editor.misspellings(&reject_all), 3);
}

proptest! {
    #[test]
    fn repeated_pastes_insert_identical_content(
        document in "[a-z]{10,30}",
        start in 0usize..5,
        width in 1usize..5,
        pastes in proptest::collection::vec((any::<bool>(), any::<u16>()), 1..8)
    ) {
        let mut editor = TextEditor::new(&document, 4);
        editor.copy(start, start + width).unwrap();
        let copied = editor.clipboard().contents().to_string();
        let mut model: Vec<char> = document.chars().collect();

        for (before, raw_pos) in pastes {
            if before {
                let pos = raw_pos as usize % (model.len() + 1);
                editor.paste_before(pos).unwrap();
                model.splice(pos..pos, copied.chars());
            } else {
                let pos = raw_pos as usize % model.len();
                editor.paste(pos).unwrap();
                model.splice(pos + 1..pos + 1, copied.chars());
            }
            prop_assert_eq!(editor.clipboard().contents(), copied.as_str());
        }

        prop_assert_eq!(editor.get_text(), model.iter().collect::<String>());
    }
}
