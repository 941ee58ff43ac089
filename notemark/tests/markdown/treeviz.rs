//! Treeviz snapshots of parsed notes
//!
//! These pin down run boundaries and attributes: any change in how the parser splits or tags
//! text shows up as a snapshot diff.

use notemark::formats::treeviz::{to_treeviz_str, to_treeviz_str_with_params};
use notemark::parse;
use std::collections::HashMap;

#[test]
fn test_lists_and_links() {
    let doc = parse("## Tasks\n- buy *milk*\n2. [Ada](mailto:ada@example.com)\n---");
    insta::assert_snapshot!(to_treeviz_str(&doc), @r###"
    ⧉ document (4 blocks)
    ├─ § heading 2
    │ └─ ◦ "Tasks" [bold h2]
    ├─ • unordered
    │ ├─ ▸ "-\t"
    │ ├─ ◦ "buy "
    │ └─ ◦ "milk" [italic]
    ├─ • ordered 2
    │ ├─ ▸ "2.\t"
    │ └─ ◦ "Ada" [link=mailto:ada@example.com]
    └─ ― rule
      └─ ⊡ "---"
    "###);
}

#[test]
fn test_nested_styles() {
    let doc = parse("***a*** <u>[b](u)</u> **<u>c</u>**");
    insta::assert_snapshot!(to_treeviz_str(&doc), @r###"
    ⧉ document (1 blocks)
    └─ ¶ plain
      ├─ ◦ "a" [bold italic]
      ├─ ◦ " "
      ├─ ◦ "b" [underline link=u]
      ├─ ◦ " "
      └─ ◦ "c" [bold underline]
    "###);
}

#[test]
fn test_attachment_previews() {
    let doc = parse("| a |\n|---|\n| 1 |\n---");
    let mut params = HashMap::new();
    params.insert("show-previews".to_string(), "true".to_string());
    insta::assert_snapshot!(to_treeviz_str_with_params(&doc, &params), @r###"
    ⧉ document (2 blocks)
    ├─ ▦ table 1x1
    │ └─ ⊡ "| a |\n|---|\n| 1 |" (54x72)
    └─ ― rule
      └─ ⊡ "---" (1000x1)
    "###);
}
