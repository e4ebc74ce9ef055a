//! Argument slot declarations.
//!
//! A flag declares its positional arguments as metavar strings. The small
//! annotation grammar is decided once, when the flag is declared:
//!
//! - `name` is a required slot,
//! - `name (Optional)` falls back to the default registry,
//! - `name (default: X)` resolves to the literal `X`, checked and typed here,
//! - `name (Multiple)` is required and absorbs trailing extra values.

use crate::check::Check;
use crate::error::{DotutilsError, Result};
use crate::network::Network;
use crate::registry::{DefaultRegistry, ValidatorRegistry};
use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    Required,
    Optional(Value),
    /// Holds the raw literal after parsing, and the checked value once the
    /// slot belongs to a declared [`Signature`].
    Default(Value),
    Multiple,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    pub position: usize,
    pub kind: SlotKind,
}

fn annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\S+)\s+\((?i:(optional)|(multiple)|default:\s*([^)]*))\)\s*$").unwrap()
    })
}

impl Slot {
    /// Parse a metavar declaration into a slot at `position`.
    pub fn parse(position: usize, metavar: &str, defaults: &DefaultRegistry) -> Result<Slot> {
        let metavar = metavar.trim();
        if metavar.is_empty() || metavar.starts_with('(') {
            return Err(DotutilsError::InvalidMetavar(metavar.to_string()));
        }

        let Some(caps) = annotation_re().captures(metavar) else {
            if metavar.contains(char::is_whitespace) {
                return Err(DotutilsError::InvalidMetavar(metavar.to_string()));
            }
            return Ok(Slot {
                name: metavar.to_string(),
                position,
                kind: SlotKind::Required,
            });
        };

        let name = caps[1].to_string();
        let kind = if caps.get(2).is_some() {
            let fallback = match defaults.get(&name) {
                Some(v) => v.clone(),
                None => {
                    tracing::warn!(slot = %name, "optional slot has no registered default, using null");
                    Value::Null
                }
            };
            SlotKind::Optional(fallback)
        } else if caps.get(3).is_some() {
            SlotKind::Multiple
        } else {
            SlotKind::Default(Value::Str(caps[4].trim().to_string()))
        };

        Ok(Slot {
            name,
            position,
            kind,
        })
    }

    pub fn is_multiple(&self) -> bool {
        self.kind == SlotKind::Multiple
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// The ordered slots of one flag, plus the check used for any slot the
/// validator registry has no entry for.
#[derive(Debug, Clone)]
pub struct Signature {
    pub slots: Vec<Slot>,
    pub fallback: Check,
}

impl Signature {
    /// Parse `metavars` and type every `(default: X)` literal with its slot's
    /// check. A rejected literal is a declaration error.
    pub fn declare(
        metavars: &[&str],
        fallback: Check,
        validators: &ValidatorRegistry,
        defaults: &DefaultRegistry,
        network: &Network,
    ) -> Result<Self> {
        let mut slots = metavars
            .iter()
            .enumerate()
            .map(|(i, m)| Slot::parse(i, m, defaults))
            .collect::<Result<Vec<_>>>()?;

        for slot in &mut slots {
            let SlotKind::Default(literal) = &slot.kind else {
                continue;
            };
            let check = validators.check_for(&slot.name, &fallback);
            let typed = check
                .check(literal, network)
                .map_err(|repeat| DotutilsError::InvalidDefault {
                    slot: slot.name.clone(),
                    reason: repeat.reason,
                })?;
            slot.kind = SlotKind::Default(typed);
        }
        Ok(Signature { slots, fallback })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot that absorbs values beyond the declared count, if any.
    pub fn multiple(&self) -> Option<&Slot> {
        self.slots.iter().rev().find(|s| s.is_multiple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn network() -> Network {
        Network::new(Duration::from_secs(1), "http://127.0.0.1:9/pypi").unwrap()
    }

    fn defaults() -> DefaultRegistry {
        let mut d = DefaultRegistry::default();
        d.insert("left_color", Value::str("#646464"));
        d
    }

    #[test]
    fn plain_metavar_is_required() {
        let slot = Slot::parse(0, "left_icon", &defaults()).unwrap();
        assert_eq!(slot.name, "left_icon");
        assert_eq!(slot.kind, SlotKind::Required);
    }

    #[test]
    fn optional_takes_registered_default() {
        let slot = Slot::parse(4, "left_color (Optional)", &defaults()).unwrap();
        assert_eq!(slot.name, "left_color");
        assert_eq!(slot.position, 4);
        assert_eq!(slot.kind, SlotKind::Optional(Value::str("#646464")));
    }

    #[test]
    fn optional_without_default_is_null() {
        let slot = Slot::parse(0, "width (Optional)", &defaults()).unwrap();
        assert_eq!(slot.kind, SlotKind::Optional(Value::Null));
    }

    #[test]
    fn default_literal() {
        let slot = Slot::parse(1, "output_dir (default: ../badges)", &defaults()).unwrap();
        assert_eq!(slot.name, "output_dir");
        assert_eq!(slot.kind, SlotKind::Default(Value::str("../badges")));

        let slot = Slot::parse(1, "align (Default: 1.75)", &defaults()).unwrap();
        assert_eq!(slot.kind, SlotKind::Default(Value::str("1.75")));
    }

    #[test]
    fn declared_default_is_typed_by_its_check() {
        let validators = ValidatorRegistry::new().with("align", Check::Float);
        let sig = Signature::declare(
            &["text", "align (default: 1.75)"],
            Check::Any,
            &validators,
            &defaults(),
            &network(),
        )
        .unwrap();
        assert_eq!(sig.slots[1].kind, SlotKind::Default(Value::Float(1.75)));
    }

    #[test]
    fn declared_default_failing_its_check_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");
        let metavar = format!("output_dir (default: {})", missing.display());
        let validators = ValidatorRegistry::new().with("output_dir", Check::DirPath);

        let err = Signature::declare(
            &[metavar.as_str()],
            Check::Any,
            &validators,
            &defaults(),
            &network(),
        )
        .unwrap_err();
        assert!(matches!(err, DotutilsError::InvalidDefault { ref slot, .. } if slot == "output_dir"));

        let sig = Signature::declare(
            &["align (default: wide)"],
            Check::Float,
            &ValidatorRegistry::new(),
            &defaults(),
            &network(),
        );
        assert!(sig.is_err());
    }

    #[test]
    fn optional_default_is_not_checked() {
        let validators = ValidatorRegistry::new().with("left_color", Check::Float);
        let sig = Signature::declare(
            &["left_color (Optional)"],
            Check::Any,
            &validators,
            &defaults(),
            &network(),
        )
        .unwrap();
        assert_eq!(sig.slots[0].kind, SlotKind::Optional(Value::str("#646464")));
    }

    #[test]
    fn multiple() {
        let slot = Slot::parse(0, "files (Multiple)", &defaults()).unwrap();
        assert!(slot.is_multiple());
        assert_eq!(slot.name, "files");
    }

    #[test]
    fn malformed_metavars_rejected() {
        assert!(Slot::parse(0, "", &defaults()).is_err());
        assert!(Slot::parse(0, "(Optional)", &defaults()).is_err());
        assert!(Slot::parse(0, "two words", &defaults()).is_err());
    }

    #[test]
    fn signature_finds_multiple_slot() {
        let sig = Signature::declare(
            &["out", "inputs (Multiple)"],
            Check::Any,
            &ValidatorRegistry::new(),
            &defaults(),
            &network(),
        )
        .unwrap();
        assert_eq!(sig.len(), 2);
        assert_eq!(sig.multiple().map(|s| s.name.as_str()), Some("inputs"));
    }
}
