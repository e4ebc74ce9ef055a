//! User-facing message formatting.
//!
//! Messages are categorised (`[INFO]`, `[ERROR]`, ...) and optionally colored.
//! Errors and warnings can be redirected to stderr. Diagnostics that are not
//! meant for the user go through `tracing` instead.

use colored::{Color, ColoredString, Colorize};
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Red,
    LightRed,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Purple,
    Pink,
    Reset,
    Bold,
    Text,
    Black,
    White,
    Aqua,
    Orange,
    DarkGray,
    Gray,
    LightGray,
}

impl Tone {
    fn color(self) -> Option<Color> {
        let rgb = |r, g, b| Some(Color::TrueColor { r, g, b });
        match self {
            Tone::Red => Some(Color::Red),
            Tone::LightRed => Some(Color::BrightRed),
            Tone::Green => Some(Color::Green),
            Tone::Yellow => Some(Color::Yellow),
            Tone::Blue => Some(Color::Blue),
            Tone::Magenta => Some(Color::Magenta),
            Tone::Cyan => Some(Color::Cyan),
            Tone::Purple => rgb(95, 0, 215),
            Tone::Pink => rgb(255, 0, 255),
            Tone::Reset => None,
            Tone::Bold => Some(Color::BrightWhite),
            Tone::Text => Some(Color::White),
            Tone::Black => rgb(8, 8, 8),
            Tone::White => rgb(238, 238, 238),
            Tone::Aqua => rgb(95, 215, 255),
            Tone::Orange => rgb(255, 135, 0),
            Tone::DarkGray => rgb(58, 58, 58),
            Tone::Gray => rgb(108, 108, 108),
            Tone::LightGray => rgb(178, 178, 178),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tone = match s {
            "RED" | "red" => Tone::Red,
            "LRED" | "light_red" => Tone::LightRed,
            "GRN" | "green" => Tone::Green,
            "YLW" | "yellow" => Tone::Yellow,
            "BLUE" | "blue" => Tone::Blue,
            "MGN" | "magenta" => Tone::Magenta,
            "CYAN" | "cyan" => Tone::Cyan,
            "PRP" | "purple" => Tone::Purple,
            "PNK" | "pink" => Tone::Pink,
            "RST" | "reset" => Tone::Reset,
            "BLD" | "bold" => Tone::Bold,
            "TXT" | "text" | "foreground" => Tone::Text,
            "BLCK" | "black" => Tone::Black,
            "WHT" | "white" => Tone::White,
            "AQUA" | "aqua" => Tone::Aqua,
            "ORANGE" | "orange" => Tone::Orange,
            "DGRAY" | "dark_gray" => Tone::DarkGray,
            "GRAY" | "gray" => Tone::Gray,
            "LGRAY" | "light_gray" => Tone::LightGray,
            other => return Err(format!("unknown tone '{other}'")),
        };
        Ok(tone)
    }
}

/// Foreground only, or background + foreground. Anything else falls back to
/// plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Fg(Tone),
    BgFg(Tone, Tone),
}

impl Paint {
    pub fn parse(names: &[&str]) -> Paint {
        let tones: Option<Vec<Tone>> = names.iter().map(|n| n.parse().ok()).collect();
        match tones.as_deref() {
            Some([fg]) => Paint::Fg(*fg),
            Some([bg, fg]) => Paint::BgFg(*bg, *fg),
            _ => Paint::Fg(Tone::Text),
        }
    }

    fn apply(self, text: &str) -> ColoredString {
        match self {
            Paint::Fg(fg) => paint_fg(text.normal(), fg),
            Paint::BgFg(bg, fg) => {
                let s = paint_fg(text.normal(), fg);
                match bg.color() {
                    Some(c) => s.on_color(c),
                    None => s,
                }
            }
        }
    }
}

fn paint_fg(s: ColoredString, tone: Tone) -> ColoredString {
    match tone.color() {
        Some(c) => s.color(c),
        None => s.clear(),
    }
}

// ---------------------------------------------------------------------------
// Level / LineStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    Success,
    Debug,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "[INFO]",
            Level::Warning => "[WARNING]",
            Level::Error => "[ERROR]",
            Level::Success => "[SUCCESS]",
            Level::Debug => "[DEBUG]",
        }
    }

    fn tones(self) -> (Tone, Tone) {
        match self {
            Level::Info => (Tone::Blue, Tone::Bold),
            Level::Warning => (Tone::Yellow, Tone::Bold),
            Level::Error => (Tone::Red, Tone::LightRed),
            Level::Success => (Tone::Green, Tone::Aqua),
            Level::Debug => (Tone::Magenta, Tone::Bold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Single,
    Double,
}

impl LineStyle {
    fn glyph(self) -> &'static str {
        match self {
            LineStyle::Single => "-",
            LineStyle::Double => "=",
        }
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

pub struct Console {
    use_colors: bool,
    use_stderr: bool,
    out: RefCell<Box<dyn Write>>,
    err: RefCell<Box<dyn Write>>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("use_colors", &self.use_colors)
            .field("use_stderr", &self.use_stderr)
            .finish_non_exhaustive()
    }
}

impl Console {
    pub fn stdio(use_colors: bool, use_stderr: bool) -> Self {
        Self::with_writers(
            use_colors,
            use_stderr,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn with_writers(
        use_colors: bool,
        use_stderr: bool,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Self {
        Self {
            use_colors,
            use_stderr,
            out: RefCell::new(out),
            err: RefCell::new(err),
        }
    }

    fn format_message(&self, level: Level, message: &str) -> String {
        if !self.use_colors {
            return format!("{} {message}", level.label());
        }
        let (label_tone, text_tone) = level.tones();
        format!(
            "{} {}",
            Paint::Fg(label_tone).apply(level.label()),
            Paint::Fg(text_tone).apply(message)
        )
    }

    fn paint(&self, text: &str, paint: Paint) -> String {
        if self.use_colors {
            paint.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    // Best effort: write errors are ignored.
    fn write_line(&self, to_err: bool, line: &str) {
        let stream = if to_err { &self.err } else { &self.out };
        let mut w = stream.borrow_mut();
        let _ = writeln!(w, "{line}");
        let _ = w.flush();
    }

    fn emit(&self, level: Level, message: &str) {
        let to_err = self.use_stderr && matches!(level, Level::Error | Level::Warning);
        self.write_line(to_err, &self.format_message(level, message));
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Level::Info, &message.to_string());
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.emit(Level::Warning, &message.to_string());
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Level::Error, &message.to_string());
    }

    pub fn success(&self, message: impl fmt::Display) {
        self.emit(Level::Success, &message.to_string());
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Level::Debug, &message.to_string());
    }

    /// Message without category prefix or color.
    pub fn plain(&self, message: impl fmt::Display) {
        self.write_line(false, &message.to_string());
    }

    /// `tones` holds one name (foreground) or two (background, foreground).
    pub fn print_col(&self, text: &str, tones: &[&str]) {
        self.write_line(false, &self.paint(text, Paint::parse(tones)));
    }

    fn join_segments(&self, segments: &[&str], tones: &[&str], separator: &str) -> String {
        segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                let tone = tones.get(i).copied().unwrap_or("text");
                self.paint(seg, Paint::parse(&[tone]))
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Print several segments on one line, one tone per segment. Missing
    /// tones default to `text`, extra tones are ignored.
    pub fn print_same_line(&self, segments: &[&str], tones: &[&str], separator: &str) {
        self.write_line(false, &self.join_segments(segments, tones, separator));
    }

    pub fn print_line(&self, len: usize, tones: &[&str], style: LineStyle) {
        self.print_col(&style.glyph().repeat(len), tones);
    }

    /// Title, optionally underlined with the title's (background) tone.
    pub fn print_section(&self, title: &str, tones: &[&str], underline: Option<LineStyle>) {
        self.print_col(title, tones);
        if let Some(style) = underline {
            let line_tone = &tones[..tones.len().min(1)];
            self.print_line(title.chars().count(), line_tone, style);
        }
    }

    /// Same-line prompt: written to stdout without a trailing newline.
    pub fn prompt(&self, segments: &[&str], tones: &[&str]) {
        let text = self.join_segments(segments, tones, "");
        let mut w = self.out.borrow_mut();
        let _ = write!(w, "{text}");
        let _ = w.flush();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Console;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub(crate) struct Capture(Rc<RefCell<Vec<u8>>>);

    impl Capture {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Uncolored console with captured stdout and stderr.
    pub(crate) fn captured(use_stderr: bool) -> (Console, Capture, Capture) {
        let out = Capture::default();
        let err = Capture::default();
        let console =
            Console::with_writers(false, use_stderr, Box::new(out.clone()), Box::new(err.clone()));
        (console, out, err)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::captured;
    use super::*;

    #[test]
    fn categories_without_colors() {
        let (console, out, err) = captured(false);
        console.info("Hello");
        console.error("Something went wrong");
        console.success("Done!");
        assert_eq!(
            out.contents(),
            "[INFO] Hello\n[ERROR] Something went wrong\n[SUCCESS] Done!\n"
        );
        assert!(err.contents().is_empty());
    }

    #[test]
    fn errors_and_warnings_go_to_stderr() {
        let (console, out, err) = captured(true);
        console.warning("careful");
        console.error("broken");
        console.debug("detail");
        assert_eq!(err.contents(), "[WARNING] careful\n[ERROR] broken\n");
        assert_eq!(out.contents(), "[DEBUG] detail\n");
    }

    #[test]
    fn print_col_plain() {
        let (console, out, _) = captured(true);
        console.print_col("test", &["yellow", "red"]);
        console.print_col("test_b", &["BLUE"]);
        console.print_col("only_text", &[]);
        assert_eq!(out.contents(), "test\ntest_b\nonly_text\n");
    }

    #[test]
    fn same_line_and_section() {
        let (console, out, _) = captured(true);
        console.print_same_line(&["--scale", "Scale factor"], &["pink"], "\t\t");
        console.print_section("Images", &["PRP", "BLCK"], Some(LineStyle::Double));
        assert_eq!(out.contents(), "--scale\t\tScale factor\nImages\n======\n");
    }

    #[test]
    fn prompt_has_no_newline() {
        let (console, out, _) = captured(true);
        console.prompt(&["please provide a value for ", "left_icon", ": "], &["text", "yellow"]);
        assert_eq!(out.contents(), "please provide a value for left_icon: ");
    }

    #[test]
    fn tone_aliases() {
        assert_eq!("YLW".parse::<Tone>(), Ok(Tone::Yellow));
        assert_eq!("light_gray".parse::<Tone>(), Ok(Tone::LightGray));
        assert!("chartreuse".parse::<Tone>().is_err());
        assert_eq!(Paint::parse(&["PRP", "BLCK"]), Paint::BgFg(Tone::Purple, Tone::Black));
        assert_eq!(Paint::parse(&["nope"]), Paint::Fg(Tone::Text));
        assert_eq!(Paint::parse(&["a", "b", "c"]), Paint::Fg(Tone::Text));
    }

    #[test]
    fn colored_output_wraps_text() {
        colored::control::set_override(true);
        let out = testing::Capture::default();
        let console = Console::with_writers(true, false, Box::new(out.clone()), Box::new(io::sink()));
        console.print_col("hi", &["red"]);
        assert!(out.contents().contains("\u{1b}["));
        assert!(out.contents().contains("hi"));
    }
}
