//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a given document node type
///
/// Returns a single Unicode character that visually represents the node type, so a tree dump can
/// be skimmed by shape.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Plain" => "¶",
        "Heading" => "§",
        "ListItem" => "•",
        "HorizontalRule" => "―",
        "Table" => "▦",
        "Image" => "▣",
        "Text" => "◦",
        "Attachment" => "⊡",
        "Marker" => "▸",
        _ => "○",
    }
}
