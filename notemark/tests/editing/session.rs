use notemark::{parse, serialize, BlockKind, EditError, TextPosition, TextRange};

#[test]
fn test_writing_a_list_from_scratch() {
    let mut doc = parse("");
    doc.toggle_heading(0, 1).unwrap();
    let caret = doc.insert_text(TextPosition::new(0, 0), "Groceries").unwrap();
    let caret = doc.insert_newline(caret).unwrap();
    assert_eq!(doc.blocks[caret.block].kind, BlockKind::Plain);

    let caret = doc.insert_text(caret, "- ").unwrap();
    assert_eq!(serialize(&doc), "# Groceries\n- ");

    let mut doc = parse(&serialize(&doc));
    let caret = doc.insert_text(TextPosition::new(1, 2), "eggs").unwrap();
    let caret = doc.insert_newline(caret).unwrap();
    let caret = doc.insert_text(caret, "milk").unwrap();
    let caret = doc.insert_newline(caret).unwrap();
    let caret = doc.insert_newline(caret).unwrap();
    doc.insert_text(caret, "done").unwrap();

    assert_eq!(serialize(&doc), "# Groceries\n- eggs\n- milk\ndone");
}

#[test]
fn test_numbered_list_continues() {
    let mut doc = parse("1. one");
    let caret = doc.insert_newline(TextPosition::new(0, 6)).unwrap();
    let caret = doc.insert_text(caret, "two").unwrap();
    let caret = doc.insert_newline(caret).unwrap();
    doc.insert_text(caret, "three").unwrap();
    assert_eq!(serialize(&doc), "1. one\n2. two\n3. three");

    doc.set_list_index(0, 5).unwrap();
    assert_eq!(serialize(&doc), "5. one\n2. two\n3. three");
}

#[test]
fn test_formatting_a_sentence() {
    let mut doc = parse("remember to call the bank");
    doc.toggle_bold(TextRange::new(0, 0, 8)).unwrap();
    doc.toggle_italic(TextRange::new(0, 21, 25)).unwrap();
    doc.toggle_underline(TextRange::new(0, 12, 16)).unwrap();
    assert_eq!(
        serialize(&doc),
        "**remember** to <u>call</u> the *bank*"
    );

    let range = doc
        .set_link(TextRange::new(0, 21, 25), "https://bank.example")
        .unwrap();
    assert_eq!(
        serialize(&doc),
        "**remember** to <u>call</u> the [*bank*](https://bank.example)"
    );

    doc.update_link(range, "https://bank.example/login", "my bank")
        .unwrap();
    assert_eq!(
        serialize(&doc),
        "**remember** to <u>call</u> the [*my bank*](https://bank.example/login)"
    );

    doc.reset_to_normal(TextRange::new(0, 0, 0)).unwrap();
    assert_eq!(serialize(&doc), "remember to call the my bank");
}

#[test]
fn test_edits_survive_a_save() {
    let mut doc = parse("## Notes\n- *first*\n---");
    doc.toggle_heading(1, 2).unwrap();
    assert_eq!(serialize(&doc), "## Notes\n## first\n---");
    doc.toggle_italic(TextRange::new(1, 0, 5)).unwrap();
    let saved = serialize(&doc);
    assert_eq!(saved, "## Notes\n## ***first***\n---");
    assert_eq!(serialize(&parse(&saved)), saved);
}

#[test]
fn test_deleting_a_rule_makes_a_blank_line() {
    let mut doc = parse("a\n---\nb");
    let caret = doc.delete_range(TextRange::new(1, 0, 3)).unwrap();
    assert_eq!(caret, TextPosition::new(1, 0));
    assert_eq!(doc.blocks[1].kind, BlockKind::Plain);
    assert_eq!(serialize(&doc), "a\n\nb");
}

#[test]
fn test_errors_leave_the_document_untouched() {
    let mut doc = parse("# Title\n- item");
    let before = doc.clone();
    assert_eq!(
        doc.toggle_bold(TextRange::new(5, 0, 1)),
        Err(EditError::BlockOutOfRange {
            block: 5,
            blocks: 2
        })
    );
    assert_eq!(
        doc.toggle_heading(0, 0),
        Err(EditError::InvalidHeadingLevel(0))
    );
    assert_eq!(doc.set_list_index(0, 3), Err(EditError::NotAnOrderedItem(0)));
    assert_eq!(
        doc.insert_text(TextPosition::new(1, 40), "x"),
        Err(EditError::InvalidOffset {
            block: 1,
            offset: 40
        })
    );
    assert_eq!(doc, before);
}
