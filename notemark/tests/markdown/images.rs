//! Image tests: path resolution, loading and sizing through [`ParseOptions`].

use crate::common::read_fixture;
use notemark::model::Preview;
use notemark::{serialize, BlockKind, MemoryImages, ParseOptions, Parser, Theme};
use std::path::PathBuf;

fn parser_with(images: MemoryImages) -> Parser {
    Parser::new(ParseOptions {
        notes_root: PathBuf::from("/notes"),
        home_dir: Some(PathBuf::from("/home/ada")),
        image_loader: Box::new(images),
        ..ParseOptions::default()
    })
}

#[test]
fn test_standalone_image_becomes_image_block() {
    let parser = parser_with(MemoryImages::new().with("/notes/images/diagram.png", 1000.0, 400.0));
    let source = read_fixture("kitchensink.md");
    let doc = parser.parse(&source);

    let block = &doc.blocks[13];
    assert_eq!(
        block.kind,
        BlockKind::Image {
            alt: "diagram".to_string(),
            path: "images/diagram.png".to_string(),
        }
    );
    let attachment = block.runs[0].attachment.as_ref().unwrap();
    match &attachment.preview {
        Preview::Image(image) => {
            assert_eq!(image.path, PathBuf::from("/notes/images/diagram.png"));
            assert_eq!((image.width, image.height), (500.0, 200.0));
        }
        other => panic!("expected an image preview, got {other:?}"),
    }

    assert_eq!(serialize(&doc), source.trim_end_matches('\n'));
}

#[test]
fn test_home_and_absolute_paths() {
    let parser = parser_with(
        MemoryImages::new()
            .with("/home/ada/pics/a.png", 10.0, 10.0)
            .with("/srv/b.png", 20.0, 10.0),
    );
    let doc = parser.parse("![a](~/pics/a.png) and ![b](/srv/b.png)");
    let runs = &doc.blocks[0].runs;
    assert_eq!(runs.len(), 3);
    assert!(runs[0].is_attachment());
    assert_eq!(runs[1].text, " and ");
    assert!(runs[2].is_attachment());
    assert_eq!(doc.blocks[0].kind, BlockKind::Plain);
    assert_eq!(serialize(&doc), "![a](~/pics/a.png) and ![b](/srv/b.png)");
}

#[test]
fn test_missing_image_stays_literal() {
    let parser = parser_with(MemoryImages::new());
    let doc = parser.parse("![gone](gone.png)");
    assert!(doc.blocks[0].runs.iter().all(|run| !run.is_attachment()));
    assert_eq!(serialize(&doc), "![gone](gone.png)");
}

#[test]
fn test_linked_image_keeps_link() {
    let parser = parser_with(MemoryImages::new().with("/notes/logo.png", 64.0, 64.0));
    let doc = parser.parse("[![logo](logo.png)](https://example.com)");
    let run = &doc.blocks[0].runs[0];
    assert!(run.is_attachment());
    assert_eq!(
        run.attrs.link.as_ref().map(|link| link.as_str()),
        Some("https://example.com")
    );
    assert_eq!(doc.blocks[0].kind, BlockKind::Plain);
    assert_eq!(serialize(&doc), "[![logo](logo.png)](https://example.com)");
}

#[test]
fn test_image_max_width_comes_from_theme() {
    let parser = Parser::new(ParseOptions {
        theme: Theme {
            image_max_width: 100.0,
            ..Theme::default()
        },
        notes_root: PathBuf::from("/notes"),
        image_loader: Box::new(MemoryImages::new().with("/notes/wide.png", 400.0, 300.0)),
        ..ParseOptions::default()
    });
    let doc = parser.parse("![w](wide.png)");
    match &doc.blocks[0].runs[0].attachment.as_ref().unwrap().preview {
        Preview::Image(image) => assert_eq!((image.width, image.height), (100.0, 75.0)),
        other => panic!("expected an image preview, got {other:?}"),
    }
}
