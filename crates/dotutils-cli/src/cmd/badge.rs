use super::Session;
use crate::flags::{self, Flag};
use anyhow::{bail, Context};
use dotutils_core::badge::{load_svg, write_badge, BadgeSpec, DEFAULT_TEMPLATE, PYTHON_ICON};
use dotutils_core::paths::stamped_badge_path;
use std::path::Path;

const PYPI_COLOR: &str = "#ffff00";
const UPDATED_LEFT_COLOR: &str = "#646464cc";
const UPDATED_RIGHT_COLOR: &str = "#737be6cc";

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

/// Icon scale and text placement shared by every badge in one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub scale: f64,
    pub font_size: f64,
    pub text_align: f64,
}

impl Sizing {
    /// `--scale`, `--font-size` and `--text-align` over the configured defaults.
    pub fn resolve(
        session: &Session,
        scale: Option<Vec<String>>,
        font_size: Option<Vec<String>>,
        text_align: Option<Vec<String>>,
    ) -> anyhow::Result<Self> {
        let badge = &session.config.badge;
        Ok(Self {
            scale: number(session, &flags::SCALE, scale)?.unwrap_or(badge.scale),
            font_size: number(session, &flags::FONT_SIZE, font_size)?.unwrap_or(badge.font_size),
            text_align: number(session, &flags::TEXT_ALIGN, text_align)?
                .unwrap_or(badge.text_align),
        })
    }

    fn spec(&self, right_text: impl Into<String>, right_color: impl Into<String>) -> BadgeSpec {
        let mut spec = BadgeSpec::new(right_text, right_color);
        spec.scale_factor = self.scale;
        spec.font_size = self.font_size;
        spec.text_align = self.text_align;
        spec
    }
}

fn number(session: &Session, flag: &Flag, raw: Option<Vec<String>>) -> anyhow::Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let values = session.resolve(flag, raw)?;
    let first = values
        .first()
        .and_then(|v| v.as_f64())
        .with_context(|| format!("{} needs a number", flag.long))?;
    Ok(Some(first))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn template(session: &Session) -> anyhow::Result<std::borrow::Cow<'static, str>> {
    let path = session.config.badge.template.as_deref();
    load_svg(path, DEFAULT_TEMPLATE).context("failed to read badge template")
}

fn read_icon(path: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read icon {path}"))
}

/// `--generate-badge left_icon right_text right_color output_svg [left_color]`
pub fn generate(session: &Session, raw: Vec<String>, sizing: &Sizing) -> anyhow::Result<()> {
    let values = session.resolve(&flags::GENERATE_BADGE, raw)?;
    let [icon, text, right_color, output, left_color, ..] = values.as_slice() else {
        bail!("--generate-badge resolved to {} values", values.len());
    };

    let mut spec = sizing.spec(text.to_string(), right_color.to_string());
    spec.left_color = left_color.as_str().map(str::to_string);

    let output = output.to_string();
    let icon = read_icon(&icon.to_string())?;
    write_badge(&template(session)?, &icon, &spec, Path::new(&output))
        .with_context(|| format!("failed to generate {output}"))?;
    session.console.success(format!("{output} generated!"));
    Ok(())
}

/// `--generate-pypi-badge package_name output_svg`
pub fn generate_pypi(session: &Session, raw: Vec<String>, sizing: &Sizing) -> anyhow::Result<()> {
    let values = session.resolve(&flags::GENERATE_PYPI_BADGE, raw)?;
    let [version, output, ..] = values.as_slice() else {
        bail!("--generate-pypi-badge resolved to {} values", values.len());
    };

    let spec = sizing.spec(format!("V.{version}"), PYPI_COLOR);
    let icon = load_svg(session.config.badge.python_icon.as_deref(), PYTHON_ICON)
        .context("failed to read python icon")?;
    let output = output.to_string();
    write_badge(&template(session)?, &icon, &spec, Path::new(&output))
        .with_context(|| format!("failed to generate {output}"))?;
    session.console.success(format!("{output} generated!"));
    session
        .console
        .success(format!("SVG updated with latest {version} version"));
    Ok(())
}

/// `--generate-updated-badge left_icon [output_dir]`, named after the current month.
pub fn generate_updated(
    session: &Session,
    raw: Vec<String>,
    sizing: &Sizing,
) -> anyhow::Result<()> {
    let values = session.resolve(&flags::GENERATE_UPDATED_BADGE, raw)?;
    let [icon, dir, ..] = values.as_slice() else {
        bail!("--generate-updated-badge resolved to {} values", values.len());
    };

    let stamp = chrono::Local::now().format("%b %y").to_string();
    let mut spec = sizing.spec(stamp.as_str(), UPDATED_RIGHT_COLOR);
    spec.left_color = Some(UPDATED_LEFT_COLOR.to_string());
    spec.color_icon = true;

    let output = stamped_badge_path(Path::new(&dir.to_string()), &stamp);
    let icon = read_icon(&icon.to_string())?;
    write_badge(&template(session)?, &icon, &spec, &output)
        .with_context(|| format!("failed to generate {}", output.display()))?;
    session
        .console
        .success(format!("{} generated!", output.display()));
    Ok(())
}
