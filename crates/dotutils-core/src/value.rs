use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Channel / Rgb
// ---------------------------------------------------------------------------

/// One RGB channel, kept in the scale it was given in (`0..=1` or `0..=255`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channel {
    Int(i64),
    Float(f64),
}

impl Channel {
    pub fn as_f64(self) -> f64 {
        match self {
            Channel::Int(i) => i as f64,
            Channel::Float(f) => f,
        }
    }

    /// Parse a channel the way it was written: `"13"` is an integer, `"0.5"` a float.
    pub fn parse(raw: &str) -> Option<Channel> {
        if raw.contains('.') {
            raw.parse().ok().map(Channel::Float)
        } else {
            raw.parse().ok().map(Channel::Int)
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Int(i) => write!(f, "{i}"),
            Channel::Float(x) => write_float(f, *x),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub Channel, pub Channel, pub Channel);

impl Rgb {
    pub fn channels(&self) -> [Channel; 3] {
        [self.0, self.1, self.2]
    }

    /// Normalized 0..1 floats, rounded to three decimals.
    pub fn normalized(&self) -> Rgb {
        let scale = if self.is_unit_scale() { 1.0 } else { 255.0 };
        let [r, g, b] = self.channels().map(|c| Channel::Float(round3(c.as_f64() / scale)));
        Rgb(r, g, b)
    }

    /// Integer 0..255 channels for either scale.
    pub fn to_255(&self) -> Rgb {
        let scale = if self.is_unit_scale() { 255.0 } else { 1.0 };
        let [r, g, b] = self
            .channels()
            .map(|c| Channel::Int((c.as_f64() * scale).round().clamp(0.0, 255.0) as i64));
        Rgb(r, g, b)
    }

    /// `#rrggbb` for either scale.
    pub fn to_hex(&self) -> String {
        let scale = if self.is_unit_scale() { 255.0 } else { 1.0 };
        let [r, g, b] = self
            .channels()
            .map(|c| (c.as_f64() * scale).round().clamp(0.0, 255.0) as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Every channel is within `0..=1`. An all-integer triple such as
    /// `(1, 0, 1)` is still treated as 0..255 unless it holds a float.
    pub fn is_unit_scale(&self) -> bool {
        let channels = self.channels();
        channels.iter().any(|c| matches!(c, Channel::Float(_)))
            && channels.iter().all(|c| (0.0..=1.0).contains(&c.as_f64()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.fract() == 0.0 && x.is_finite() {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A resolved, typed argument value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    Rgb(Rgb),
    List(Vec<Value>),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<Rgb> {
        match self {
            Value::Rgb(rgb) => Some(*rgb),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => f.write_str(s),
            Value::Rgb(rgb) => write!(f, "{rgb}"),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Rgb> for Value {
    fn from(rgb: Rgb) -> Self {
        Value::Rgb(rgb)
    }
}
