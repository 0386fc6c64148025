use unicode_segmentation::UnicodeSegmentation;

/// Stand-in for anything the built-in fonts cannot show.
pub const FALLBACK: u8 = b'?';

fn is_printable_latin1(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF)
}

/// Lossy conversion to single-byte Latin-1. A grapheme cluster that is not
/// entirely printable Latin-1 collapses to one `?`, so a multi-codepoint
/// emoji yields one fallback glyph, not several. Never fails.
pub fn to_latin1(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for g in text.graphemes(true) {
        match g {
            "\n" | "\r\n" => out.push(b'\n'),
            "\r" => {}
            "\t" => out.push(b' '),
            _ if g.chars().all(is_printable_latin1) => out.extend(g.chars().map(|c| c as u8)),
            _ => out.push(FALLBACK),
        }
    }
    out
}
