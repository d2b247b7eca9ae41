//! LSP type conversion utilities.

use tower_lsp::lsp_types::{InlayHint, InlayHintLabel, InlayHintTooltip, Position, Range, Url};

use pylive_core::Annotation;

/// Converts an annotation to an inlay hint at the end of its line.
pub fn to_inlay_hint(annotation: &Annotation<Url>, text: &str) -> Option<InlayHint> {
    let position = line_end_position(annotation.line, text)?;

    Some(InlayHint {
        position,
        label: InlayHintLabel::String(format!(" # {}", annotation.text)),
        kind: None,
        text_edits: None,
        tooltip: Some(InlayHintTooltip::String(annotation.text.clone())),
        padding_left: Some(true),
        padding_right: None,
        data: None,
    })
}

/// Position just past the last character of `line`.
pub fn line_end_position(line: usize, text: &str) -> Option<Position> {
    let content = text.split('\n').nth(line)?;
    let content = content.strip_suffix('\r').unwrap_or(content);
    let col: usize = content.chars().map(char::len_utf16).sum();
    Some(Position::new(
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(col).unwrap_or(u32::MAX),
    ))
}

/// Converts an LSP position to a byte offset.
///
/// Columns past the end of a line clamp to the line end.
pub fn position_to_offset(position: Position, text: &str) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        let newline = text[line_start..].find('\n')?;
        line_start += newline + 1;
    }

    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);

    let mut col = 0u32;
    for (i, ch) in text[line_start..line_end].char_indices() {
        if col >= position.character {
            return Some(line_start + i);
        }
        col += ch.len_utf16() as u32;
    }

    Some(line_end)
}

/// Returns the text covered by `range`.
pub fn range_to_text(range: Range, text: &str) -> Option<&str> {
    let start = position_to_offset(range.start, text)?;
    let end = position_to_offset(range.end, text)?;
    if start > end {
        return None;
    }
    Some(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylive_core::AnnotationColor;

    #[test]
    fn test_position_to_offset_basic_ascii() {
        let text = "Hello World";
        assert_eq!(position_to_offset(Position::new(0, 0), text), Some(0));
        assert_eq!(position_to_offset(Position::new(0, 5), text), Some(5));
        assert_eq!(position_to_offset(Position::new(0, 11), text), Some(11));
        assert_eq!(position_to_offset(Position::new(0, 40), text), Some(11));
        assert_eq!(position_to_offset(Position::new(1, 0), text), None);
    }

    #[test]
    fn test_position_to_offset_multiline() {
        let text = "Line 1\nLine 2\nLine 3";
        assert_eq!(position_to_offset(Position::new(1, 0), text), Some(7));
        assert_eq!(position_to_offset(Position::new(2, 6), text), Some(20));
        assert_eq!(position_to_offset(Position::new(0, 99), text), Some(6));
    }

    #[test]
    fn test_position_to_offset_unicode_multibyte() {
        // 'あ' is 3 bytes in UTF-8, 1 code unit in UTF-16
        let text = "あいう";
        assert_eq!(position_to_offset(Position::new(0, 1), text), Some(3));
        assert_eq!(position_to_offset(Position::new(0, 3), text), Some(9));
    }

    #[test]
    fn test_position_to_offset_supplementary_plane_chars() {
        // '🎉' is 4 bytes in UTF-8, 2 code units in UTF-16
        let text = "a🎉b";
        assert_eq!(position_to_offset(Position::new(0, 1), text), Some(1));
        assert_eq!(position_to_offset(Position::new(0, 3), text), Some(5));
    }

    #[test]
    fn test_range_to_text() {
        let text = "x = 1\nprint(x)\nprint(2)";
        let range = Range::new(Position::new(1, 0), Position::new(2, 8));
        assert_eq!(range_to_text(range, text), Some("print(x)\nprint(2)"));

        let reversed = Range::new(Position::new(2, 0), Position::new(1, 0));
        assert_eq!(range_to_text(reversed, text), None);
    }

    #[test]
    fn test_line_end_position() {
        let text = "ab\r\nあ🎉\n";
        assert_eq!(line_end_position(0, text), Some(Position::new(0, 2)));
        assert_eq!(line_end_position(1, text), Some(Position::new(1, 3)));
        assert_eq!(line_end_position(2, text), Some(Position::new(2, 0)));
        assert_eq!(line_end_position(3, text), None);
    }

    #[test]
    fn test_to_inlay_hint() {
        let annotation = Annotation {
            editor: Url::parse("file:///tmp/a.py").unwrap(),
            line: 1,
            text: "42 (Execution Time: 0.01s)".to_string(),
            color: AnnotationColor::Normal,
        };

        let hint = to_inlay_hint(&annotation, "x = 42\nprint(x)").unwrap();
        assert_eq!(hint.position, Position::new(1, 8));
        match hint.label {
            InlayHintLabel::String(label) => assert_eq!(label, " # 42 (Execution Time: 0.01s)"),
            other => panic!("Unexpected label: {:?}", other),
        }
    }
}
