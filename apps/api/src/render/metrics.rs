//! Static advance-width tables for the two standard PDF fonts the renderer uses.
//!
//! Widths are in 1/1000 em, taken from the Adobe core-font AFM files, and cover
//! ASCII 0x20..=0x7E (95 printable characters). Index = (char as usize) - 32.
//! Anything outside that range is measured with `average_char_width`; such
//! characters are rare in resumes and the error stays within a few points.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// Base-14 fonts referenced by the PDF writer. No font program is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfFont {
    Helvetica,
    HelveticaBold,
}

impl PdfFont {
    /// The PostScript name written into the `/BaseFont` entry.
    pub fn base_font(self) -> &'static str {
        match self {
            PdfFont::Helvetica => "Helvetica",
            PdfFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams (`/F1 11 Tf`).
    pub fn resource_name(self) -> &'static str {
        match self {
            PdfFont::Helvetica => "F1",
            PdfFont::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Character-width table for one font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Width of a single character in 1/1000 em.
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Rendered width of `s` in points at `size` pt.
    pub fn measure_str(&self, s: &str, size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

#[rustfmt::skip]
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

#[rustfmt::skip]
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

/// Returns the static metric table for a font.
pub fn get_metrics(font: PdfFont) -> &'static FontMetricTable {
    match font {
        PdfFont::Helvetica => &HELVETICA_TABLE,
        PdfFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Soft wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap of `text` to `max_width` points.
///
/// Explicit newlines always start a new line. The whitespace between two
/// words that stay on the same line is kept as written; a line break drops
/// it. A paragraph with no words (including empty input) yields one empty
/// line. A single word wider than the line is split at character boundaries.
pub fn wrap_text(text: &str, font: PdfFont, size: f32, max_width: f32) -> Vec<String> {
    let metrics = get_metrics(font);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for (i, (gap, word)) in words_with_gaps(paragraph).into_iter().enumerate() {
            let gap_w = metrics.measure_str(gap, size);
            let word_w = metrics.measure_str(word, size);

            if i > 0 && current_w + gap_w + word_w <= max_width {
                current.push_str(gap);
                current.push_str(word);
                current_w += gap_w + word_w;
                continue;
            }

            if i > 0 {
                lines.push(std::mem::take(&mut current));
            }
            // Leading indentation survives only at the start of a paragraph.
            let piece = if i == 0 {
                format!("{gap}{word}")
            } else {
                word.to_string()
            };
            let piece_w = metrics.measure_str(&piece, size);
            if piece_w <= max_width {
                current = piece;
                current_w = piece_w;
            } else {
                let (head, tail) = break_long_word(&piece, metrics, size, max_width);
                lines.extend(head);
                current_w = metrics.measure_str(&tail, size);
                current = tail;
            }
        }

        lines.push(current);
    }

    lines
}

/// Splits a paragraph into `(preceding whitespace, word)` pairs.
/// Trailing whitespace is dropped.
fn words_with_gaps(paragraph: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut rest = paragraph;

    loop {
        let word_start = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(word_start);
        if tail.is_empty() {
            break;
        }
        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, after) = tail.split_at(word_end);
        pairs.push((gap, word));
        rest = after;
    }

    pairs
}

/// Splits an over-long word into full-width chunks plus the trailing remainder.
fn break_long_word(
    word: &str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
) -> (Vec<String>, String) {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c) as f32 * size / 1000.0;
        // Always place at least one character per line.
        if !current.is_empty() && current_w + w > max_width {
            chunks.push(std::mem::take(&mut current));
            current_w = 0.0;
        }
        current.push(c);
        current_w += w;
    }

    (chunks, current)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert_eq!(metrics.measure_str("", 11.0), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(PdfFont::Helvetica);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056 units → 20.56pt at 10pt
        let width = metrics.measure_str("Rust", 10.0);
        assert!((width - 20.56).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(PdfFont::Helvetica);
        let width = metrics.measure_str("é", 1000.0);
        assert!((width - metrics.average_char_width as f32).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Experience and Education";
        let regular = get_metrics(PdfFont::Helvetica).measure_str(text, 11.0);
        let bold = get_metrics(PdfFont::HelveticaBold).measure_str(text, 11.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_wrap_empty_yields_one_blank_line() {
        assert_eq!(wrap_text("", PdfFont::Helvetica, 11.0, 515.0), vec![String::new()]);
        assert_eq!(wrap_text("   ", PdfFont::Helvetica, 11.0, 515.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_keeps_inner_whitespace_on_unbroken_line() {
        let lines = wrap_text("a  \u{2022}  b", PdfFont::Helvetica, 11.0, 515.0);
        assert_eq!(lines, vec!["a  \u{2022}  b".to_string()]);

        let lines = wrap_text("Led  the   team", PdfFont::Helvetica, 11.0, 515.0);
        assert_eq!(lines, vec!["Led  the   team".to_string()]);
    }

    #[test]
    fn test_wrap_drops_whitespace_at_break() {
        // "alpha" + gap + "beta" only fits in two lines.
        let width = get_metrics(PdfFont::Helvetica).measure_str("alpha", 10.0) + 1.0;
        let lines = wrap_text("alpha    beta", PdfFont::Helvetica, 10.0, width);
        assert_eq!(lines, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_wrap_keeps_blank_paragraphs() {
        let lines = wrap_text("first\n\nsecond", PdfFont::Helvetica, 11.0, 515.0);
        assert_eq!(lines, vec!["first".to_string(), String::new(), "second".to_string()]);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("Rust, Go, SQL", PdfFont::Helvetica, 11.0, 515.0);
        assert_eq!(lines, vec!["Rust, Go, SQL".to_string()]);
    }

    #[test]
    fn test_wrap_long_text_respects_width_and_keeps_words() {
        let text = "Architected a distributed caching layer using consistent hashing ".repeat(8);
        let lines = wrap_text(&text, PdfFont::Helvetica, 11.0, 515.0);
        assert!(lines.len() > 1);
        let metrics = get_metrics(PdfFont::Helvetica);
        for line in &lines {
            assert!(metrics.measure_str(line, 11.0) <= 515.0, "overfull: {line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, PdfFont::Helvetica, 11.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_honours_explicit_newlines() {
        let lines = wrap_text("first\nsecond", PdfFont::Helvetica, 11.0, 515.0);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }
}
