//! Argument validators.
//!
//! Every check takes a raw or already-typed [`Value`] and either converts it
//! to the expected kind or answers [`Repeat`], the sentinel that tells the
//! resolver to prompt for the slot again. Checks never fail any other way:
//! parse errors, missing files and network failures all become `Repeat`.

use crate::network::Network;
use crate::value::{round3, Channel, Rgb, Value};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Rejected input. Carries the message shown to the user before re-prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeat {
    pub reason: String,
}

impl Repeat {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

pub type Checked = std::result::Result<Value, Repeat>;

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Any,
    /// Inclusive `min <= x <= max`.
    FloatRange { min: f64, max: f64 },
    /// Exclusive `min < x < max`.
    IntegerRange { min: i64, max: i64 },
    String,
    Integer,
    Float,
    Extension,
    HtmlHex,
    HtmlColor,
    Rgb,
    Color,
    DirPath,
    ExistingFile,
    Site,
    Choice(Vec<String>),
    FileList,
    PypiVersion,
}

impl Check {
    pub fn choice<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Check::Choice(items.into_iter().map(Into::into).collect())
    }

    pub fn choices(&self) -> Option<&[String]> {
        match self {
            Check::Choice(items) => Some(items),
            _ => None,
        }
    }

    pub fn check(&self, input: &Value, network: &Network) -> Checked {
        match self {
            Check::Any => Ok(input.clone()),
            Check::FloatRange { min, max } => check_float_range(input, *min, *max),
            Check::IntegerRange { min, max } => check_integer_range(input, *min, *max),
            Check::String => check_string(input),
            Check::Integer => check_integer(input),
            Check::Float => check_float(input),
            Check::Extension => check_extension(input),
            Check::HtmlHex => check_html_hex(input),
            Check::HtmlColor => check_html_color(input),
            Check::Rgb => check_rgb_color(input),
            Check::Color => check_color(input),
            Check::DirPath => check_dir_path(input),
            Check::ExistingFile => check_existing_file(input),
            Check::Site => check_site(input, network),
            Check::Choice(items) => check_choice(input, items),
            Check::FileList => check_file_list(input),
            Check::PypiVersion => check_pypi_version(input, network),
        }
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

const RGB_CHANNEL: &str = r"(0(?:\.\d+)?|1(?:\.0+)?|[1-9]?\d|1\d\d|2[0-4]\d|25[0-5])";

fn rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let c = RGB_CHANNEL;
        Regex::new(&format!(r"^\(?\s*{c}\s*,\s*{c}\s*,\s*{c}\s*\)?$")).unwrap()
    })
}

fn html_hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{8})$").unwrap())
}

fn html_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap())
}

fn extension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.[0-9a-zA-Z]+$").unwrap())
}

/// Drop surrounding quotes, e.g. `"'#ffaabb'"` typed at a prompt.
fn unquote(s: &str) -> String {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s.replace(['"', '\''], "")
    } else {
        s.to_string()
    }
}

fn not_a_string(input: &Value) -> Repeat {
    Repeat::new(format!("{input} is not a string"))
}

// ---------------------------------------------------------------------------
// Numbers and strings
// ---------------------------------------------------------------------------

pub fn check_float_range(input: &Value, min: f64, max: f64) -> Checked {
    let f = input
        .as_f64()
        .ok_or_else(|| Repeat::new("Must be a floating point number"))?;
    if !(min..=max).contains(&f) {
        return Err(Repeat::new(format!("Must be in range {min} .. {max}")));
    }
    Ok(Value::Float(f))
}

pub fn check_integer_range(input: &Value, min: i64, max: i64) -> Checked {
    let parsed = match input {
        Value::Int(i) => Some(*i),
        Value::Str(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(i) if i > min && i < max => Ok(Value::Int(i)),
        _ => Err(Repeat::new(format!(
            "{input} is not in allowed integer range {min} - {max}"
        ))),
    }
}

pub fn check_string(input: &Value) -> Checked {
    match input {
        Value::Str(_) => Ok(input.clone()),
        _ => Err(Repeat::new("Must be string type")),
    }
}

pub fn check_integer(input: &Value) -> Checked {
    match input {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Float(f) if f.is_finite() => Ok(Value::Int(f.trunc() as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Repeat::new(format!("invalid literal for integer: '{s}'"))),
        _ => Err(Repeat::new(format!("{input} is not an integer"))),
    }
}

pub fn check_float(input: &Value) -> Checked {
    match input {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Repeat::new(format!("could not convert '{s}' to float"))),
        _ => Err(Repeat::new(format!("{input} is not a number"))),
    }
}

pub fn check_extension(input: &Value) -> Checked {
    match input.as_str() {
        Some(s) if extension_re().is_match(s) => Ok(Value::str(s)),
        _ => Err(Repeat::new(format!("{input} does not match a file extension"))),
    }
}

pub fn check_choice(input: &Value, choices: &[String]) -> Checked {
    match input.as_str() {
        Some(s) if choices.iter().any(|c| c == s) => Ok(Value::str(s)),
        _ => Err(Repeat::new(format!(
            "'{input}' is not one of: {}",
            choices.join(", ")
        ))),
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// A 6 or 8 digit html hex color, returned with a leading `#`.
pub fn check_html_hex(input: &Value) -> Checked {
    let s = input.as_str().ok_or_else(|| not_a_string(input))?;
    let mut s = unquote(s);
    if !s.starts_with('#') && (s.len() == 6 || s.len() == 8) {
        s.insert(0, '#');
    }
    if !html_hex_re().is_match(&s) {
        return Err(Repeat::new(
            "Given color doesn't match a 6 or 8 digit html hex color code",
        ));
    }
    Ok(Value::Str(s))
}

/// A 3 or 6 digit html hex color, returned as a normalized 0..1 rgb triple.
pub fn check_html_color(input: &Value) -> Checked {
    if let Value::Rgb(rgb) = input {
        if rgb.is_unit_scale() {
            return Ok(input.clone());
        }
    }
    let s = input.as_str().ok_or_else(|| not_a_string(input))?;
    let mut s = unquote(s);
    if !s.starts_with('#') && s.len() == 6 {
        s.insert(0, '#');
    }
    match html_color_re().captures(&s) {
        Some(caps) => Ok(Value::Rgb(hex_to_unit_rgb(&caps[1]))),
        None => Err(Repeat::new(format!(
            "{s} doesn't match an html hex code pattern"
        ))),
    }
}

fn hex_to_unit_rgb(digits: &str) -> Rgb {
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let channel = |i: usize| {
        let byte = u8::from_str_radix(&expanded[i..i + 2], 16).unwrap_or(0);
        Channel::Float(round3(byte as f64 / 255.0))
    };
    Rgb(channel(0), channel(2), channel(4))
}

fn is_255_scale(rgb: &Rgb) -> bool {
    rgb.channels()
        .iter()
        .all(|c| matches!(c, Channel::Int(i) if (0..=255).contains(i)))
}

fn is_unit_range(rgb: &Rgb) -> bool {
    rgb.channels()
        .iter()
        .all(|c| (0.0..=1.0).contains(&c.as_f64()))
}

fn check_rgb_tuple(rgb: &Rgb) -> Checked {
    if is_255_scale(rgb) || is_unit_range(rgb) {
        Ok(Value::Rgb(*rgb))
    } else {
        Err(Repeat::new(format!(
            "{rgb} mixes 0-1 and 0-255 channels or is out of range"
        )))
    }
}

fn parse_rgb_string(s: &str) -> Option<Rgb> {
    let caps = rgb_re().captures(s)?;
    Some(Rgb(
        Channel::parse(&caps[1])?,
        Channel::parse(&caps[2])?,
        Channel::parse(&caps[3])?,
    ))
}

/// An rgb triple, either a tuple or a string such as `"(0.53, 0.35, 0.77)"`,
/// returned in the scale it was given in.
pub fn check_rgb_color(input: &Value) -> Checked {
    match input {
        Value::Rgb(rgb) => check_rgb_tuple(rgb),
        Value::Str(s) => match parse_rgb_string(s) {
            Some(rgb) => check_rgb_tuple(&rgb),
            None => Err(Repeat::new(format!("{s} doesn't match an rgb color"))),
        },
        _ => Err(Repeat::new(format!("{input} doesn't match an rgb color"))),
    }
}

/// Any color: an rgb triple is returned unchanged, an html hex color is
/// converted to a normalized 0..1 triple.
pub fn check_color(input: &Value) -> Checked {
    let original = match input {
        Value::Rgb(rgb) => return check_rgb_tuple(rgb),
        Value::Str(s) => s,
        _ => {
            return Err(Repeat::new(format!(
                "{input} matches neither an html hex color nor an rgb tuple"
            )))
        }
    };

    let mut s = unquote(original);
    if !s.starts_with('#') && s.len() == 6 && !s.contains([',', '(', ')']) {
        s.insert(0, '#');
    }

    if let Some(rgb) = parse_rgb_string(&s) {
        return check_rgb_tuple(&rgb);
    }
    if let Some(caps) = html_color_re().captures(&s) {
        return Ok(Value::Rgb(hex_to_unit_rgb(&caps[1])));
    }
    Err(Repeat::new(format!(
        "{original} string matches neither an html hex color nor an rgb tuple"
    )))
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

pub fn check_dir_path(input: &Value) -> Checked {
    match input.as_str() {
        Some(s) if Path::new(s).is_dir() => Ok(Value::str(s)),
        _ => Err(Repeat::new(format!("{input} is not an existing dir path"))),
    }
}

pub fn check_existing_file(input: &Value) -> Checked {
    match input.as_str() {
        Some(s) if Path::new(s).is_file() => Ok(Value::str(s)),
        _ => Err(Repeat::new(format!("{input} is not an existing file path"))),
    }
}

/// Whitespace separated file paths, each of which must exist.
pub fn check_file_list(input: &Value) -> Checked {
    let paths: Vec<String> = match input {
        Value::Str(s) => s.split_whitespace().map(str::to_string).collect(),
        Value::List(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(|| not_a_string(v)))
            .collect::<Result<_, _>>()?,
        _ => return Err(not_a_string(input)),
    };
    if paths.is_empty() {
        return Err(Repeat::new("No file paths given"));
    }
    if let Some(missing) = paths.iter().find(|p| !Path::new(p).is_file()) {
        return Err(Repeat::new(format!("{missing} is not an existing file path")));
    }
    Ok(Value::List(paths.into_iter().map(Value::Str).collect()))
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

pub fn check_site(input: &Value, network: &Network) -> Checked {
    let url = input.as_str().ok_or_else(|| not_a_string(input))?;
    network
        .reachable(url)
        .map(|()| Value::str(url))
        .map_err(Repeat::new)
}

/// Looks up the most recent version of a package on the package index.
pub fn check_pypi_version(input: &Value, network: &Network) -> Checked {
    let package = input.as_str().ok_or_else(|| not_a_string(input))?.trim();
    if package.is_empty() || package.contains(['/', '?', '#']) {
        return Err(Repeat::new(format!("'{package}' is not a valid package name")));
    }
    network
        .latest_version(package)
        .map(Value::Str)
        .map_err(Repeat::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn offline() -> Network {
        Network::new(Duration::from_secs(2), "http://127.0.0.1:9/pypi").unwrap()
    }

    fn s(v: &str) -> Value {
        Value::str(v)
    }

    fn rgb_int(r: i64, g: i64, b: i64) -> Value {
        Value::Rgb(Rgb(Channel::Int(r), Channel::Int(g), Channel::Int(b)))
    }

    fn rgb_float(r: f64, g: f64, b: f64) -> Value {
        Value::Rgb(Rgb(Channel::Float(r), Channel::Float(g), Channel::Float(b)))
    }

    #[test]
    fn float_range_is_inclusive() {
        assert_eq!(check_float_range(&s("10"), 1.0, 10.0), Ok(Value::Float(10.0)));
        assert_eq!(check_float_range(&Value::Int(1), 1.0, 10.0), Ok(Value::Float(1.0)));
        let err = check_float_range(&Value::Int(17), 1.0, 10.0).unwrap_err();
        assert_eq!(err.reason, "Must be in range 1 .. 10");
        assert!(check_float_range(&s("abc"), 1.0, 10.0).is_err());
        assert!(check_float_range(&s("NaN"), 1.0, 10.0).is_err());
        assert!(check_float_range(&s("inf"), 1.0, 10.0).is_err());
    }

    #[test]
    fn integer_range_is_exclusive() {
        assert_eq!(check_integer_range(&Value::Int(9), 1, 10), Ok(Value::Int(9)));
        assert_eq!(check_integer_range(&s(" 9 "), 1, 10), Ok(Value::Int(9)));
        let err = check_integer_range(&Value::Int(100), 1, 10).unwrap_err();
        assert_eq!(err.reason, "100 is not in allowed integer range 1 - 10");
        assert!(check_integer_range(&Value::Int(10), 1, 10).is_err());
        assert!(check_integer_range(&Value::Int(1), 1, 10).is_err());
        assert!(check_integer_range(&Value::Float(5.0), 1, 10).is_err());
    }

    #[test]
    fn string_and_integer() {
        assert_eq!(check_string(&s("text input")), Ok(s("text input")));
        assert!(check_string(&Value::Int(20)).is_err());
        assert_eq!(check_integer(&Value::Int(20)), Ok(Value::Int(20)));
        assert_eq!(check_integer(&s("20")), Ok(Value::Int(20)));
        assert_eq!(check_integer(&Value::Float(20.7)), Ok(Value::Int(20)));
        let err = check_integer(&s("text input")).unwrap_err();
        assert!(err.reason.contains("text input"));
    }

    #[test]
    fn float_conversion() {
        assert_eq!(check_float(&s("0.8")), Ok(Value::Float(0.8)));
        assert_eq!(check_float(&Value::Int(19)), Ok(Value::Float(19.0)));
        assert!(check_float(&s("big")).is_err());
    }

    #[test]
    fn extension() {
        assert_eq!(check_extension(&s(".png")), Ok(s(".png")));
        assert_eq!(check_extension(&s(".pdf")), Ok(s(".pdf")));
        assert!(check_extension(&s("complete_file.mp4")).is_err());
        assert!(check_extension(&s(".")).is_err());
    }

    #[test]
    fn choice() {
        let items = vec!["rgb".to_string(), "hex".to_string()];
        assert_eq!(check_choice(&s("hex"), &items), Ok(s("hex")));
        let err = check_choice(&s("cmyk"), &items).unwrap_err();
        assert_eq!(err.reason, "'cmyk' is not one of: rgb, hex");
    }

    #[test]
    fn html_hex() {
        assert_eq!(check_html_hex(&s("#FFAABB")), Ok(s("#FFAABB")));
        assert_eq!(check_html_hex(&s("#FFAABBCC")), Ok(s("#FFAABBCC")));
        assert_eq!(check_html_hex(&s("#12345678")), Ok(s("#12345678")));
        assert_eq!(check_html_hex(&s("FFAABB")), Ok(s("#FFAABB")));
        assert_eq!(check_html_hex(&s("123456")), Ok(s("#123456")));
        assert_eq!(check_html_hex(&s("\"#ffaabb\"")), Ok(s("#ffaabb")));
        assert_eq!(check_html_hex(&s("'ffaabb'")), Ok(s("#ffaabb")));
        assert!(check_html_hex(&s("#GGAABB")).is_err());
        let err = check_html_hex(&Value::Int(545153)).unwrap_err();
        assert_eq!(err.reason, "545153 is not a string");
    }

    #[test]
    fn html_hex_is_idempotent() {
        let once = check_html_hex(&s("#ffaabb")).unwrap();
        assert_eq!(check_html_hex(&once), Ok(s("#ffaabb")));
    }

    #[test]
    fn html_color_normalizes() {
        assert_eq!(check_html_color(&s("#fcb6c3")), Ok(rgb_float(0.988, 0.714, 0.765)));
        assert_eq!(check_html_color(&s("#fff")), Ok(rgb_float(1.0, 1.0, 1.0)));
        assert!(check_html_color(&s("#Blue")).is_err());
        let once = check_html_color(&s("fcb6c3")).unwrap();
        assert_eq!(check_html_color(&once), Ok(once.clone()));
    }

    #[test]
    fn rgb_color_keeps_scale() {
        assert_eq!(check_rgb_color(&rgb_float(0.53, 0.35, 0.77)), Ok(rgb_float(0.53, 0.35, 0.77)));
        assert_eq!(check_rgb_color(&rgb_int(150, 144, 32)), Ok(rgb_int(150, 144, 32)));
        assert_eq!(check_rgb_color(&s("(0.53, 0.35, 0.77)")), Ok(rgb_float(0.53, 0.35, 0.77)));
        assert_eq!(check_rgb_color(&s("0.53, 0.35, 0.77")), Ok(rgb_float(0.53, 0.35, 0.77)));
        let err = check_rgb_color(&s("#fcb3c2")).unwrap_err();
        assert_eq!(err.reason, "#fcb3c2 doesn't match an rgb color");
    }

    #[test]
    fn malformed_rgb_tuples_repeat() {
        assert!(check_rgb_color(&rgb_int(300, 1, 1)).is_err());
        assert!(check_rgb_color(&s("(0.5, 200, 3)")).is_err());
        assert!(check_color(&Value::Rgb(Rgb(
            Channel::Float(0.5),
            Channel::Int(200),
            Channel::Int(3)
        )))
        .is_err());
    }

    #[test]
    fn color_accepts_hex_and_rgb() {
        assert_eq!(check_color(&s("#f7b9c3")), Ok(rgb_float(0.969, 0.725, 0.765)));
        assert_eq!(check_color(&s("f7b9c3")), Ok(rgb_float(0.969, 0.725, 0.765)));
        assert_eq!(check_color(&rgb_float(0.53, 0.51, 0.94)), Ok(rgb_float(0.53, 0.51, 0.94)));
        assert_eq!(check_color(&s("(115, 151, 13)")), Ok(rgb_int(115, 151, 13)));
        assert_eq!(check_color(&s("(0, 151, 13)")), Ok(rgb_int(0, 151, 13)));
        let err = check_color(&s("Yellow")).unwrap_err();
        assert_eq!(
            err.reason,
            "Yellow string matches neither an html hex color nor an rgb tuple"
        );
    }

    #[test]
    fn color_is_idempotent() {
        for raw in ["#f7b9c3", "(115, 151, 13)", "0.1, 0.2, 0.3", "(0, 0, 0)"] {
            let once = check_color(&s(raw)).unwrap();
            assert_eq!(check_color(&once), Ok(once.clone()), "{raw}");
        }
    }

    #[test]
    fn checked_values_pass_their_check_again() {
        let dir = TempDir::new().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();
        let net = offline();
        let cases = [
            (Check::Rgb, s("(0.53, 0.35, 0.77)")),
            (Check::Rgb, s("150, 144, 32")),
            (Check::Extension, s(".svg")),
            (Check::FloatRange { min: 1.0, max: 10.0 }, s("10")),
            (Check::IntegerRange { min: 1, max: 10 }, s(" 9 ")),
            (Check::DirPath, s(&dir_str)),
        ];
        for (check, raw) in cases {
            let once = check.check(&raw, &net).unwrap();
            assert_eq!(check.check(&once, &net), Ok(once.clone()), "{check:?} {raw}");
        }
    }

    #[test]
    fn filesystem_checks() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("badge_template.svg");
        std::fs::write(&file, "<svg/>").unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();
        let file_str = file.to_string_lossy().to_string();

        assert_eq!(check_dir_path(&s(&dir_str)), Ok(s(&dir_str)));
        assert!(check_dir_path(&s(&file_str)).is_err());
        assert!(check_dir_path(&s("non_existing/path")).is_err());

        assert_eq!(check_existing_file(&s(&file_str)), Ok(s(&file_str)));
        let err = check_existing_file(&s("../non_existing/path")).unwrap_err();
        assert_eq!(err.reason, "../non_existing/path is not an existing file path");
    }

    #[test]
    fn file_list() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.svg");
        let b = dir.path().join("b.svg");
        std::fs::write(&a, "").unwrap();
        std::fs::write(&b, "").unwrap();
        let raw = format!("{}  {}", a.display(), b.display());

        let listed = check_file_list(&s(&raw)).unwrap();
        assert_eq!(
            listed,
            Value::List(vec![s(&a.display().to_string()), s(&b.display().to_string())])
        );
        assert_eq!(check_file_list(&listed), Ok(listed.clone()));

        let missing = format!("{} {}", a.display(), dir.path().join("c.svg").display());
        assert!(check_file_list(&s(&missing)).is_err());
        assert!(check_file_list(&s("   ")).is_err());
    }

    #[test]
    fn site_reachable() {
        let mut server = mockito::Server::new();
        let ok = server.mock("HEAD", "/").with_status(200).create();
        let url = server.url();
        assert_eq!(check_site(&s(&url), &offline()), Ok(s(&url)));
        ok.assert();
    }

    #[test]
    fn site_error_status_repeats() {
        let mut server = mockito::Server::new();
        let _m = server.mock("HEAD", "/missing").with_status(404).create();
        let url = format!("{}/missing", server.url());
        assert!(check_site(&s(&url), &offline()).is_err());
    }

    #[test]
    fn site_unreachable_repeats() {
        assert!(check_site(&s("http://127.0.0.1:9/"), &offline()).is_err());
        assert!(check_site(&s("not a url"), &offline()).is_err());
    }

    #[test]
    fn pypi_version_lookup() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/pypi/numpy/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"info": {"name": "numpy", "version": "2.1.3"}}"#)
            .create();
        let network = Network::new(Duration::from_secs(2), format!("{}/pypi", server.url())).unwrap();
        assert_eq!(check_pypi_version(&s("numpy"), &network), Ok(s("2.1.3")));
    }

    #[test]
    fn pypi_unknown_package_repeats() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/pypi/nope/json")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Not Found"}"#)
            .create();
        let network = Network::new(Duration::from_secs(2), format!("{}/pypi", server.url())).unwrap();
        assert!(check_pypi_version(&s("nope"), &network).is_err());
        assert!(check_pypi_version(&s(""), &network).is_err());
    }

    #[test]
    fn any_passes_through_everything() {
        let net = offline();
        assert_eq!(Check::Any.check(&Value::Null, &net), Ok(Value::Null));
        assert_eq!(Check::Any.check(&s("x"), &net), Ok(s("x")));
    }
}
