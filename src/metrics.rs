//! Advance widths and text encoding for the built-in PDF base fonts.
//!
//! Helvetica, Helvetica-Bold and Courier ship with every PDF viewer, so the
//! document embeds no font programs; wrapping only needs their advance
//! widths. The tables hold the Adobe AFM widths in 1/1000 em units, laid out
//! by WinAnsi (CP1252) code for 0x20..=0xFF. This module also owns the
//! character -> WinAnsi mapping, so glyph coverage and the `?` substitution
//! threshold used by the sanitizer are defined in one place.

use crate::canvas::Font;

const FIRST_CODE: usize = 0x20;
const COURIER_WIDTH: u16 = 600;

#[rustfmt::skip]
const HELVETICA: [u16; 224] = [
     278,  278,  355,  556,  556,  889,  667,  191, // 0x20
     333,  333,  389,  584,  278,  333,  278,  278, // 0x28
     556,  556,  556,  556,  556,  556,  556,  556, // 0x30
     556,  556,  278,  278,  584,  584,  584,  556, // 0x38
    1015,  667,  667,  722,  722,  667,  611,  778, // 0x40
     722,  278,  500,  667,  556,  833,  722,  778, // 0x48
     667,  778,  722,  667,  611,  722,  667,  944, // 0x50
     667,  667,  611,  278,  278,  278,  469,  556, // 0x58
     333,  556,  556,  500,  556,  556,  278,  556, // 0x60
     556,  222,  222,  500,  222,  833,  556,  556, // 0x68
     556,  556,  333,  500,  278,  556,  500,  722, // 0x70
     500,  500,  500,  334,  260,  334,  584,    0, // 0x78
     556,    0,  222,  556,  333, 1000,  556,  556, // 0x80
     333, 1000,  667,  333, 1000,    0,  611,    0, // 0x88
       0,  222,  222,  333,  333,  350,  556, 1000, // 0x90
     333, 1000,  500,  333,  944,    0,  500,  667, // 0x98
     278,  333,  556,  556,  556,  556,  260,  556, // 0xa0
     333,  737,  370,  556,  584,  333,  737,  333, // 0xa8
     400,  584,  333,  333,  333,  556,  537,  278, // 0xb0
     333,  333,  365,  556,  834,  834,  834,  611, // 0xb8
     667,  667,  667,  667,  667,  667, 1000,  722, // 0xc0
     667,  667,  667,  667,  278,  278,  278,  278, // 0xc8
     722,  722,  778,  778,  778,  778,  778,  584, // 0xd0
     778,  722,  722,  722,  722,  667,  667,  611, // 0xd8
     556,  556,  556,  556,  556,  556,  889,  500, // 0xe0
     556,  556,  556,  556,  222,  222,  222,  222, // 0xe8
     556,  556,  556,  556,  556,  556,  556,  584, // 0xf0
     611,  556,  556,  556,  556,  500,  556,  500, // 0xf8
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 224] = [
     278,  333,  474,  556,  556,  889,  722,  238, // 0x20
     333,  333,  389,  584,  278,  333,  278,  278, // 0x28
     556,  556,  556,  556,  556,  556,  556,  556, // 0x30
     556,  556,  333,  333,  584,  584,  584,  611, // 0x38
     975,  722,  722,  722,  722,  667,  611,  778, // 0x40
     722,  278,  556,  722,  611,  833,  722,  778, // 0x48
     667,  778,  722,  667,  611,  722,  667,  944, // 0x50
     667,  667,  611,  333,  278,  333,  584,  556, // 0x58
     333,  556,  611,  556,  611,  556,  333,  611, // 0x60
     611,  278,  278,  556,  278,  889,  611,  611, // 0x68
     611,  611,  389,  556,  333,  611,  556,  778, // 0x70
     556,  556,  500,  389,  280,  389,  584,    0, // 0x78
     556,    0,  278,  556,  500, 1000,  556,  556, // 0x80
     333, 1000,  667,  333, 1000,    0,  611,    0, // 0x88
       0,  278,  278,  500,  500,  350,  556, 1000, // 0x90
     333, 1000,  556,  333,  944,    0,  500,  667, // 0x98
     278,  333,  556,  556,  556,  556,  280,  556, // 0xa0
     333,  737,  370,  556,  584,  333,  737,  333, // 0xa8
     400,  584,  333,  333,  333,  611,  556,  278, // 0xb0
     333,  333,  365,  556,  834,  834,  834,  611, // 0xb8
     722,  722,  722,  722,  722,  722, 1000,  722, // 0xc0
     667,  667,  667,  667,  278,  278,  278,  278, // 0xc8
     722,  722,  778,  778,  778,  778,  778,  584, // 0xd0
     778,  722,  722,  722,  722,  667,  667,  611, // 0xd8
     556,  556,  556,  556,  556,  556,  889,  556, // 0xe0
     556,  556,  556,  556,  278,  278,  278,  278, // 0xe8
     611,  611,  611,  611,  611,  611,  611,  584, // 0xf0
     611,  611,  611,  611,  611,  556,  611,  556, // 0xf8
];

/// WinAnsi code for `c`, or `?` (0x3F) when the encoding has no slot for it.
///
/// Codepoints at or below 0xFF map straight through; the 0x80..=0x9F block of
/// CP1252 additionally covers a handful of higher codepoints (smart quotes,
/// dashes, the bullet) which matter because list markers are drawn after
/// sanitization.
pub fn encode_char(c: char) -> u8 {
    match c as u32 {
        cp @ 0x00..=0xFF => cp as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}

pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn advance(font: Font, code: u8) -> u16 {
    let idx = code as usize;
    if idx < FIRST_CODE {
        return 0;
    }
    match font {
        Font::Regular => HELVETICA[idx - FIRST_CODE],
        Font::Bold => HELVETICA_BOLD[idx - FIRST_CODE],
        Font::Mono => COURIER_WIDTH,
    }
}

/// Width of one character set at `size` points.
pub fn char_width(font: Font, size: f32, c: char) -> f32 {
    advance(font, encode_char(c)) as f32 * size / 1000.0
}

/// Width of `text` set at `size` points.
pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| advance(font, encode_char(c)) as u32)
        .sum();
    units as f32 * size / 1000.0
}
