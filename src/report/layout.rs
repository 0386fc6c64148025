//! Line breaking for the built-in Helvetica faces.
//!
//! Widths are the standard Adobe metrics in 1/1000 em, indexed by the
//! WinAnsi byte. Input is already Latin-1 (see [`super::encoding`]).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

// 0xA0..=0xFF. Bold text is only ever the fixed ASCII labels, so both
// faces share this row.
#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const DEFAULT_WIDTH: u16 = 556;

pub fn char_width(font: Font, b: u8) -> u16 {
    match b {
        0x20..=0x7E => {
            let i = (b - 0x20) as usize;
            match font {
                Font::Regular => HELVETICA_ASCII[i],
                Font::Bold => HELVETICA_BOLD_ASCII[i],
            }
        }
        0xA0..=0xFF => HELVETICA_LATIN1[(b - 0xA0) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Rendered width in points at `size`.
pub fn text_width(font: Font, text: &[u8], size: f32) -> f32 {
    let units: u32 = text.iter().map(|b| char_width(font, *b) as u32).sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap. Newlines always break; a word wider than `max_width`
/// is split between characters. Every paragraph yields at least one line.
pub fn wrap_lines(text: &[u8], font: Font, size: f32, max_width: f32) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    for paragraph in text.split(|b| *b == b'\n') {
        let mut line: Vec<u8> = Vec::new();
        for word in paragraph.split(|b| *b == b' ') {
            let mut candidate = line.clone();
            if !candidate.is_empty() {
                candidate.push(b' ');
            }
            candidate.extend_from_slice(word);
            if text_width(font, &candidate, size) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let mut rest = word;
            loop {
                let n = fitting_prefix(rest, font, size, max_width).max(1);
                if n >= rest.len() {
                    break;
                }
                lines.push(rest[..n].to_vec());
                rest = &rest[n..];
            }
            line = rest.to_vec();
        }
        lines.push(line);
    }
    lines
}

fn fitting_prefix(word: &[u8], font: Font, size: f32, max_width: f32) -> usize {
    let mut used = 0.0;
    for (i, b) in word.iter().enumerate() {
        used += char_width(font, *b) as f32 * size / 1000.0;
        if used > max_width {
            return i;
        }
    }
    word.len()
}
