//! Color templates and width-aware truncation for terminal lines.
//!
//! Lines destined for the terminal embed `${NAME}` style placeholders and a
//! `$$` literal-dollar escape. Rendering substitutes each placeholder with
//! its SGR escape sequence (or strips it when color is unsupported) and can
//! truncate the result to the terminal width, counting only visible
//! characters — escape sequences pass through the budget for free.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Appended at a truncation point; occupies the final visible column.
const ELLIPSIS: char = '\u{2026}';

/// Matches `$$` or `${word}`; any other `$` sequence passes through intact.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$|\$\{(\w+)\}").unwrap());

/// Matches one SGR escape sequence: ESC, then anything up to the first `m`.
static SGR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b[^m]*m").unwrap());

/// A terminal style attribute from the fixed palette.
///
/// The `${NAME}` placeholder vocabulary maps one-to-one onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    LightGrey,
    Grey,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    White,
    Reset,
    Normal,
    Bold,
    Dim,
    Underline,
    Invert,
    Hidden,
}

impl Style {
    /// The SGR escape sequence for this style.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Default => "\x1b[39m",
            Self::Black => "\x1b[30m",
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Blue => "\x1b[34m",
            Self::Magenta => "\x1b[35m",
            Self::Cyan => "\x1b[36m",
            Self::LightGrey => "\x1b[37m",
            Self::Grey => "\x1b[90m",
            Self::BrightRed => "\x1b[91m",
            Self::BrightGreen => "\x1b[92m",
            Self::BrightYellow => "\x1b[93m",
            Self::BrightBlue => "\x1b[94m",
            Self::BrightMagenta => "\x1b[95m",
            Self::BrightCyan => "\x1b[96m",
            Self::White => "\x1b[97m",
            Self::Reset => "\x1b[0m",
            Self::Normal => "\x1b[22m",
            Self::Bold => "\x1b[1m",
            Self::Dim => "\x1b[2m",
            Self::Underline => "\x1b[4m",
            Self::Invert => "\x1b[7m",
            Self::Hidden => "\x1b[8m",
        }
    }

    /// Look up a placeholder name in the palette.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "DEFAULT" => Self::Default,
            "BLACK" => Self::Black,
            "RED" => Self::Red,
            "GREEN" => Self::Green,
            "YELLOW" => Self::Yellow,
            "BLUE" => Self::Blue,
            "MAGENTA" => Self::Magenta,
            "CYAN" => Self::Cyan,
            "LIGHT_GREY" => Self::LightGrey,
            "GREY" => Self::Grey,
            "BRIGHT_RED" => Self::BrightRed,
            "BRIGHT_GREEN" => Self::BrightGreen,
            "BRIGHT_YELLOW" => Self::BrightYellow,
            "BRIGHT_BLUE" => Self::BrightBlue,
            "BRIGHT_MAGENTA" => Self::BrightMagenta,
            "BRIGHT_CYAN" => Self::BrightCyan,
            "WHITE" => Self::White,
            "RESET" => Self::Reset,
            "NORMAL" => Self::Normal,
            "BOLD" => Self::Bold,
            "DIM" => Self::Dim,
            "UNDERLINE" => Self::Underline,
            "INVERT" => Self::Invert,
            "HIDDEN" => Self::Hidden,
            _ => return None,
        })
    }
}

/// Renders templated lines against one terminal's capabilities.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color_enabled: bool,
    columns: usize,
}

impl Renderer {
    #[must_use]
    pub const fn new(color_enabled: bool, columns: usize) -> Self {
        Self {
            color_enabled,
            columns,
        }
    }

    #[must_use]
    pub const fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Render a templated line.
    ///
    /// With color enabled, each `${NAME}` becomes its escape sequence
    /// (unknown names vanish silently), `$$` becomes a literal `$`, the
    /// result is optionally trimmed to the column budget, and the whole line
    /// is wrapped in `styles` and terminated with a reset.
    ///
    /// With color disabled, all placeholder syntax strips to nothing and an
    /// overlong line is cut to `columns - 1` characters plus an ellipsis.
    #[must_use]
    pub fn render(&self, text: &str, styles: &[Style], should_trim: bool) -> String {
        if self.color_enabled {
            let mut seq = PLACEHOLDER
                .replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
                    None => "$".to_owned(),
                    Some(name) => Style::from_name(name.as_str())
                        .map_or_else(String::new, |style| style.code().to_owned()),
                })
                .into_owned();

            if should_trim {
                seq = trim(&seq, self.columns);
            }

            let prefix: String = styles.iter().map(|style| style.code()).collect();
            format!("{prefix}{seq}{}", Style::Reset.code())
        } else {
            let seq = PLACEHOLDER.replace_all(text, "").into_owned();
            if should_trim && seq.chars().count() > self.columns {
                let mut cut: String = seq.chars().take(self.columns.saturating_sub(1)).collect();
                cut.push(ELLIPSIS);
                cut
            } else {
                seq
            }
        }
    }
}

impl Default for Renderer {
    /// Plain renderer: no color, 80 columns.
    fn default() -> Self {
        Self::new(false, 80)
    }
}

/// Truncate `raw` to at most `width` visible characters.
///
/// SGR escape sequences are passed through unchanged and never count toward
/// the budget. On overflow the current chunk is cut short, an ellipsis takes
/// the final column, and the escape sequence that terminated the chunk (if
/// any) is still emitted so color state carries over; everything after that
/// is dropped. Input that fits is returned byte-identical.
#[must_use]
pub fn trim(raw: &str, width: usize) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen = 0usize;
    let mut pos = 0usize;

    for esc in SGR.find_iter(raw) {
        let chunk = &raw[pos..esc.start()];
        pos = esc.end();

        let chunk_len = chunk.chars().count();
        if seen + chunk_len > width {
            push_cut(&mut out, chunk, width.saturating_sub(seen + 1));
            out.push_str(esc.as_str());
            return out;
        }

        seen += chunk_len;
        out.push_str(chunk);
        out.push_str(esc.as_str());

        if seen >= width && chunk_len > 0 {
            return out;
        }
    }

    let chunk = &raw[pos..];
    if seen + chunk.chars().count() > width {
        push_cut(&mut out, chunk, width.saturating_sub(seen + 1));
    } else {
        out.push_str(chunk);
    }
    out
}

fn push_cut(out: &mut String, chunk: &str, keep: usize) {
    out.extend(chunk.chars().take(keep));
    out.push(ELLIPSIS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RESET: &str = "\x1b[0m";

    fn visible_len(s: &str) -> usize {
        SGR.replace_all(s, "").chars().count()
    }

    fn color(columns: usize) -> Renderer {
        Renderer::new(true, columns)
    }

    fn plain(columns: usize) -> Renderer {
        Renderer::new(false, columns)
    }

    #[test]
    fn substitutes_palette_names() {
        let out = color(80).render("${RED}x${RESET}", &[], false);
        assert_eq!(out, format!("\x1b[31mx{RESET}{RESET}"));
    }

    #[test]
    fn unknown_names_vanish_silently() {
        let out = color(80).render("${NOPE}x", &[], false);
        assert_eq!(out, format!("x{RESET}"));
    }

    #[test]
    fn double_dollar_is_a_literal_dollar() {
        let out = color(80).render("$$5", &[], false);
        assert_eq!(out, format!("$5{RESET}"));
    }

    #[test]
    fn unmatched_dollar_sequences_pass_through() {
        assert_eq!(color(80).render("$5 ${!}", &[], false), format!("$5 ${{!}}{RESET}"));
        assert_eq!(plain(80).render("$5 ${!}", &[], false), "$5 ${!}");
    }

    #[test]
    fn prefix_styles_wrap_the_whole_line() {
        let out = color(80).render("hi", &[Style::Bold, Style::BrightBlue], false);
        assert_eq!(out, format!("\x1b[1m\x1b[94mhi{RESET}"));
    }

    #[test]
    fn color_disabled_strips_all_placeholder_syntax() {
        assert_eq!(plain(80).render("${RED}x${RESET}", &[], true), "x");
        assert_eq!(plain(80).render("$$5", &[], false), "5");
    }

    #[test]
    fn color_disabled_cuts_overlong_lines() {
        let out = plain(5).render("abcdefgh", &[], true);
        assert_eq!(out, "abcd…");
        assert_eq!(plain(5).render("abcde", &[], true), "abcde");
    }

    #[test]
    fn trim_is_identity_when_input_fits() {
        let s = "\x1b[32mgreen\x1b[0m tail";
        assert_eq!(trim(s, 80), s);
        assert_eq!(trim("", 10), "");
    }

    #[test]
    fn trim_never_counts_escape_sequences() {
        // 10 visible chars wrapped in sequences that would blow a naive
        // byte-length budget.
        let s = "\x1b[1m\x1b[32m0123456789\x1b[0m";
        assert_eq!(trim(s, 10), s);
    }

    #[test]
    fn trim_cuts_at_the_budget_with_ellipsis() {
        assert_eq!(trim("0123456789", 4), "012…");
        let s = "\x1b[31m0123456789\x1b[0m";
        assert_eq!(trim(s, 4), "\x1b[31m012…\x1b[0m");
    }

    #[test]
    fn trim_emits_boundary_escape_then_stops() {
        // "abcd" lands exactly on the budget; the closing escape still goes
        // out but the tail is dropped.
        let s = "\x1b[31mabcd\x1b[0mtail";
        assert_eq!(trim(s, 4), "\x1b[31mabcd\x1b[0m");
    }

    #[test]
    fn trim_escape_only_input_is_unchanged() {
        let s = "\x1b[31m\x1b[1m\x1b[0m";
        assert_eq!(trim(s, 0), s);
        assert_eq!(trim(s, 3), s);
    }

    #[test]
    fn trim_zero_width_yields_single_ellipsis() {
        assert_eq!(trim("anything", 0), "…");
    }

    #[test]
    fn trim_respects_the_width_invariant() {
        let inputs = [
            "plain text with no sequences at all",
            "\x1b[31mred\x1b[0m then \x1b[1mbold\x1b[22m then tail",
            "\x1b[95m\x1b[4mHeading\x1b[0m",
            "ünïcödé — títlé with curls",
        ];
        for s in inputs {
            for width in 1..40 {
                let trimmed = trim(s, width);
                assert!(
                    visible_len(&trimmed) <= width,
                    "visible {} > width {width} for {s:?}",
                    visible_len(&trimmed),
                );
            }
        }
    }

    #[test]
    fn render_trims_before_wrapping() {
        let out = color(4).render("${GREEN}0123456789", &[Style::Bold], true);
        assert_eq!(out, format!("\x1b[1m\x1b[32m012…{RESET}"));
    }
}
