use super::Session;
use crate::flags;
use crate::output::print_json;
use anyhow::{bail, Context};
use dotutils_core::value::{Rgb, Value};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Conversion {
    input: Value,
    format: String,
    output: Value,
}

/// `--convert-color input_color [output_format]`
pub fn run(session: &Session, raw: Vec<String>, json: bool) -> anyhow::Result<()> {
    let values = session.resolve(&flags::CONVERT_COLOR, raw)?;
    let [input, format, ..] = values.as_slice() else {
        bail!("--convert-color resolved to {} values", values.len());
    };

    let rgb = input
        .as_rgb()
        .with_context(|| format!("{input} is not a color"))?;
    let format = format.to_string();
    let output = convert(rgb, &format)?;

    if json {
        print_json(&Conversion {
            input: input.clone(),
            format,
            output,
        })
    } else {
        session.console.plain(&output);
        Ok(())
    }
}

pub fn convert(rgb: Rgb, format: &str) -> anyhow::Result<Value> {
    match format {
        "rgb" => Ok(Value::Rgb(rgb.to_255())),
        "normalized" => Ok(Value::Rgb(rgb.normalized())),
        "hex" => Ok(Value::Str(rgb.to_hex())),
        other => bail!(
            "unknown output format '{other}', expected one of: {}",
            flags::OUTPUT_FORMATS.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotutils_core::value::Channel;

    fn ints(r: i64, g: i64, b: i64) -> Rgb {
        Rgb(Channel::Int(r), Channel::Int(g), Channel::Int(b))
    }

    #[test]
    fn converts_255_scale() {
        let rgb = ints(115, 151, 13);
        assert_eq!(convert(rgb, "rgb").unwrap(), Value::Rgb(rgb));
        assert_eq!(convert(rgb, "hex").unwrap(), Value::str("#73970d"));
        assert_eq!(
            convert(rgb, "normalized").unwrap().to_string(),
            "(0.451, 0.592, 0.051)"
        );
    }

    #[test]
    fn converts_normalized_hex_input() {
        let rgb = Rgb(Channel::Float(1.0), Channel::Float(0.667), Channel::Float(0.733));
        assert_eq!(convert(rgb, "rgb").unwrap(), Value::Rgb(ints(255, 170, 187)));
        assert_eq!(convert(rgb, "hex").unwrap(), Value::str("#ffaabb"));
    }

    #[test]
    fn unknown_format_is_an_error() {
        assert!(convert(ints(0, 0, 0), "cmyk").is_err());
    }
}
