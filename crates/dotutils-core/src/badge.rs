//! Two-tone SVG badges: a template with `L_RECT`/`R_RECT` rectangles gets
//! its fills rewritten, an icon embedded in the left half and a text label
//! centred in the right half.
//!
//! The template is streamed through `quick_xml` once; nothing outside the two
//! rectangles and the appended elements is touched.

use crate::error::{BadgeError, Result};
use crate::io::atomic_write;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/badge_template.svg");
pub const PYTHON_ICON: &str = include_str!("../assets/python.svg");

const LEFT_RECT: &str = "L_RECT";
const RIGHT_RECT: &str = "R_RECT";

// ---------------------------------------------------------------------------
// BadgeSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BadgeSpec {
    pub right_text: String,
    /// 6 or 8 hex digits; the last two of an 8-digit color are the opacity.
    pub right_color: String,
    pub left_color: Option<String>,
    pub scale_factor: f64,
    pub font_size: f64,
    /// The text sits at `rect height / text_align`; 2 is the geometric centre.
    pub text_align: f64,
    /// Fill the icon's first top-level `<path>` with the right color.
    pub color_icon: bool,
}

impl BadgeSpec {
    pub fn new(right_text: impl Into<String>, right_color: impl Into<String>) -> Self {
        Self {
            right_text: right_text.into(),
            right_color: right_color.into(),
            left_color: None,
            scale_factor: 0.8,
            font_size: 19.0,
            text_align: 1.75,
            color_icon: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Black or white, whichever reads better on `hex`.
pub fn contrast_color(hex: &str) -> &'static str {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
            .map(f64::from)
    };
    let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) else {
        return "#000000";
    };
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.5 {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

/// `#rrggbb` plus the opacity carried by an 8-digit color, if any.
pub fn split_opacity(color: &str) -> (String, Option<f64>) {
    let digits = color.trim_start_matches('#');
    if digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        if let (Some(rgb), Some(Ok(alpha))) = (
            digits.get(..6),
            digits.get(6..).map(|a| u8::from_str_radix(a, 16)),
        ) {
            return (format!("#{rgb}"), Some(f64::from(alpha) / 255.0));
        }
    }
    (format!("#{digits}"), None)
}

/// Replace (or append) `key:value` in an inline `style` declaration list.
fn set_style_property(style: &str, key: &str, value: &str) -> String {
    let mut found = false;
    let mut parts: Vec<String> = style
        .split(';')
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            let name = p.split(':').next().unwrap_or_default().trim();
            if name == key {
                found = true;
                format!("{key}:{value}")
            } else {
                p.to_string()
            }
        })
        .collect();
    if !found {
        parts.push(format!("{key}:{value}"));
    }
    parts.join(";")
}

// ---------------------------------------------------------------------------
// XML helpers
// ---------------------------------------------------------------------------

fn xml_err(e: impl std::fmt::Display) -> BadgeError {
    BadgeError::Xml(e.to_string())
}

fn attr(e: &BytesStart<'_>, key: &str) -> std::result::Result<Option<String>, BadgeError> {
    for a in e.attributes() {
        let a = a.map_err(xml_err)?;
        if a.key.as_ref() == key.as_bytes() {
            return Ok(Some(a.unescape_value().map_err(xml_err)?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_length(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches("px").trim().parse().ok()
}

/// Copy of `e` with `key` set to `value`, replacing any existing value.
fn with_attr(
    e: &BytesStart<'_>,
    key: &str,
    value: &str,
) -> std::result::Result<BytesStart<'static>, BadgeError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    let mut replaced = false;
    for a in e.attributes() {
        let a = a.map_err(xml_err)?;
        if a.key.as_ref() == key.as_bytes() {
            out.push_attribute((key, value));
            replaced = true;
        } else {
            out.push_attribute(a);
        }
    }
    if !replaced {
        out.push_attribute((key, value));
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Geometry {
    fn read(e: &BytesStart<'_>, rect: &'static str) -> std::result::Result<Self, BadgeError> {
        let num = |name: &'static str| -> std::result::Result<f64, BadgeError> {
            attr(e, name)?
                .as_deref()
                .and_then(parse_length)
                .ok_or(BadgeError::MissingAttribute { rect, attr: name })
        };
        Ok(Self {
            x: num("x")?,
            y: num("y")?,
            width: num("width")?,
            height: num("height")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

struct Icon<'a> {
    events: Vec<Event<'a>>,
    width: Option<f64>,
    height: Option<f64>,
}

impl<'a> Icon<'a> {
    /// Parse the icon document, keeping only its root element subtree.
    fn parse(svg: &'a str, fill: Option<&str>) -> std::result::Result<Self, BadgeError> {
        let mut reader = Reader::from_str(svg);
        let mut events = Vec::new();
        let mut width = None;
        let mut height = None;
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut colored = fill.is_none();

        loop {
            let event = reader.read_event().map_err(xml_err)?;
            match event {
                Event::Eof => break,
                Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_) => {}
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if !seen_root {
                        seen_root = true;
                        width = attr(e, "width")?.as_deref().and_then(parse_length);
                        height = attr(e, "height")?.as_deref().and_then(parse_length);
                    }
                    let is_start = matches!(event, Event::Start(_));
                    let recolor = !colored && depth == 1 && e.local_name().as_ref() == b"path";
                    let next = match (recolor, fill) {
                        (true, Some(color)) => {
                            colored = true;
                            let e = with_attr(e, "fill", color)?;
                            if is_start {
                                Event::Start(e)
                            } else {
                                Event::Empty(e)
                            }
                        }
                        _ => event.clone(),
                    };
                    events.push(next);
                    if is_start {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    events.push(event);
                }
                other if depth > 0 => events.push(other),
                _ => {}
            }
        }

        if !seen_root {
            return Err(BadgeError::Xml("icon has no root element".to_string()));
        }
        if !colored {
            tracing::warn!("icon has no top-level <path> to color");
        }
        Ok(Self {
            events,
            width,
            height,
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `template` with `icon` and `spec` applied, returning the new document.
pub fn render_badge(
    template: &str,
    icon: &str,
    spec: &BadgeSpec,
) -> std::result::Result<String, BadgeError> {
    let (right_fill, right_opacity) = split_opacity(&spec.right_color);
    let left = spec.left_color.as_deref().map(split_opacity);
    let text_color = contrast_color(&right_fill);
    let icon_fill = spec.color_icon.then_some(right_fill.as_str());
    let icon = Icon::parse(icon, icon_fill)?;

    let mut reader = Reader::from_str(template);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new("\n")))
        .map_err(xml_err)?;

    let mut left_rect = None;
    let mut right_rect = None;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(xml_err)?;
        match event {
            Event::Eof => break,
            // Ours is already written.
            Event::Decl(_) => {}
            Event::Text(ref t) if depth == 0 && t.iter().all(u8::is_ascii_whitespace) => {}
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_start = matches!(event, Event::Start(_));
                let id = attr(e, "id")?;
                let rewrite = match id.as_deref() {
                    Some(LEFT_RECT) => {
                        left_rect = Some(Geometry::read(e, LEFT_RECT)?);
                        left.as_ref().map(|(fill, opacity)| (fill.as_str(), *opacity))
                    }
                    Some(RIGHT_RECT) => {
                        right_rect = Some(Geometry::read(e, RIGHT_RECT)?);
                        Some((right_fill.as_str(), right_opacity))
                    }
                    _ => None,
                };
                let out = match rewrite {
                    Some((fill, opacity)) => {
                        let mut style = attr(e, "style")?.unwrap_or_default();
                        style = set_style_property(&style, "fill", fill);
                        if let Some(opacity) = opacity {
                            style = set_style_property(&style, "opacity", &opacity.to_string());
                        }
                        let e = with_attr(e, "style", &style)?;
                        if is_start {
                            Event::Start(e)
                        } else {
                            Event::Empty(e)
                        }
                    }
                    None => event.clone(),
                };
                writer.write_event(out).map_err(xml_err)?;
                if is_start {
                    depth += 1;
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let l = left_rect.ok_or(BadgeError::MissingRect(LEFT_RECT))?;
                    let r = right_rect.ok_or(BadgeError::MissingRect(RIGHT_RECT))?;
                    write_icon(&mut writer, &icon, l, spec.scale_factor)?;
                    write_text(&mut writer, r, spec, text_color)?;
                }
                writer
                    .write_event(Event::End(e.clone()))
                    .map_err(xml_err)?;
            }
            other => writer.write_event(other).map_err(xml_err)?,
        }
    }

    if left_rect.is_none() {
        return Err(BadgeError::MissingRect(LEFT_RECT));
    }
    if right_rect.is_none() {
        return Err(BadgeError::MissingRect(RIGHT_RECT));
    }

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(xml_err)
}

fn write_icon(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    icon: &Icon<'_>,
    rect: Geometry,
    scale_factor: f64,
) -> std::result::Result<(), BadgeError> {
    let iw = icon.width.unwrap_or(rect.width);
    let ih = icon.height.unwrap_or(rect.height);
    let scale = f64::min(scale_factor * rect.width / iw, scale_factor * rect.height / ih);
    let x = rect.x + (rect.width - iw * scale) / 2.0;
    let y = rect.y + (rect.height - ih * scale) / 2.0;

    let mut g = BytesStart::new("g");
    g.push_attribute(("transform", format!("translate({x},{y}) scale({scale})").as_str()));
    writer.write_event(Event::Start(g)).map_err(xml_err)?;
    for event in &icon.events {
        writer.write_event(event.clone()).map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("g")))
        .map_err(xml_err)
}

fn write_text(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    rect: Geometry,
    spec: &BadgeSpec,
    color: &str,
) -> std::result::Result<(), BadgeError> {
    let x = rect.x + rect.width / 2.0;
    let y = rect.y + rect.height / spec.text_align;
    let style = format!(
        "font-size:{}px;text-anchor:middle;dominant-baseline:middle;fill:{color};",
        spec.font_size
    );
    let mut text = BytesStart::new("text");
    text.push_attribute(("x", x.to_string().as_str()));
    text.push_attribute(("y", y.to_string().as_str()));
    text.push_attribute(("style", style.as_str()));
    writer.write_event(Event::Start(text)).map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(&spec.right_text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("text")))
        .map_err(xml_err)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Contents of `path`, or `builtin` when no path is configured.
pub fn load_svg(path: Option<&Path>, builtin: &'static str) -> Result<Cow<'static, str>> {
    match path {
        Some(p) => Ok(Cow::Owned(std::fs::read_to_string(p)?)),
        None => Ok(Cow::Borrowed(builtin)),
    }
}

pub fn write_badge(template: &str, icon: &str, spec: &BadgeSpec, output: &Path) -> Result<()> {
    let svg = render_badge(template, icon, spec)?;
    atomic_write(output, svg.as_bytes())?;
    tracing::debug!(path = %output.display(), "badge written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
