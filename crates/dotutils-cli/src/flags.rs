//! The flag table: every value-taking flag, its help group, and the metavars
//! its values are resolved against.

use dotutils_core::check::Check;
use dotutils_core::registry::ValidatorRegistry;

pub const OUTPUT_FORMATS: [&str; 3] = ["rgb", "normalized", "hex"];

const SCALE_RANGE: Check = Check::FloatRange { min: 0.01, max: 10.0 };
const FONT_SIZE_RANGE: Check = Check::FloatRange { min: 1.0, max: 500.0 };
const TEXT_ALIGN_RANGE: Check = Check::FloatRange { min: 0.1, max: 100.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Images,
    Colors,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Images, Group::Colors];

    pub fn title(self) -> &'static str {
        match self {
            Group::Images => "Images",
            Group::Colors => "Colors",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Group::Images => "Image utilities related commands.",
            Group::Colors => "Color conversion related commands.",
        }
    }

    /// Section tones: background, foreground.
    pub fn tones(self) -> [&'static str; 2] {
        match self {
            Group::Images => ["PRP", "BLCK"],
            Group::Colors => ["AQUA", "BLCK"],
        }
    }

    pub fn find(name: &str) -> Option<Group> {
        Group::ALL
            .into_iter()
            .find(|g| g.title().eq_ignore_ascii_case(name))
    }
}

pub struct Flag {
    pub long: &'static str,
    pub group: Group,
    pub help: &'static str,
    pub metavars: &'static [&'static str],
    /// Check for values past the declared slots and for slots without a
    /// registered check.
    pub fallback: Check,
}

pub static GENERATE_BADGE: Flag = Flag {
    long: "--generate-badge",
    group: Group::Images,
    help: "Generate a badge svg with an icon on the left rectangle and a text on the right \
           rectangle, colored with the given color. Tune it with --scale, --font-size and \
           --text-align.",
    metavars: &[
        "left_icon",
        "right_text",
        "right_color",
        "output_svg",
        "left_color (Optional)",
    ],
    fallback: Check::Any,
};

pub static GENERATE_PYPI_BADGE: Flag = Flag {
    long: "--generate-pypi-badge",
    group: Group::Images,
    help: "Generate a pypi badge svg with the package's latest version on it.",
    metavars: &["package_name", "output_svg"],
    fallback: Check::String,
};

pub static GENERATE_UPDATED_BADGE: Flag = Flag {
    long: "--generate-updated-badge",
    group: Group::Images,
    help: "Generate a badge stamped with the current month, named after it.",
    metavars: &["left_icon", "output_dir (default: .)"],
    fallback: Check::String,
};

pub static SCALE: Flag = Flag {
    long: "--scale",
    group: Group::Images,
    help: "Scale of the left icon relative to its rectangle (defaults to 0.8).",
    metavars: &["scale_factor"],
    fallback: Check::Float,
};

pub static FONT_SIZE: Flag = Flag {
    long: "--font-size",
    group: Group::Images,
    help: "Font size, in px, of the badge text (defaults to 19).",
    metavars: &["font_size"],
    fallback: Check::Float,
};

pub static TEXT_ALIGN: Flag = Flag {
    long: "--text-align",
    group: Group::Images,
    help: "Divisor of the right rectangle height used to place the text. 2 is the centre; \
           longer texts look better slightly lower (defaults to 1.75).",
    metavars: &["height_division_factor"],
    fallback: Check::Float,
};

pub static CONVERT_COLOR: Flag = Flag {
    long: "--convert-color",
    group: Group::Colors,
    help: "Convert an html hex color or rgb tuple to another format.",
    metavars: &["input_color", "output_format (default: rgb)"],
    fallback: Check::String,
};

pub static FLAGS: [&Flag; 7] = [
    &GENERATE_BADGE,
    &GENERATE_PYPI_BADGE,
    &GENERATE_UPDATED_BADGE,
    &SCALE,
    &FONT_SIZE,
    &TEXT_ALIGN,
    &CONVERT_COLOR,
];

/// Slot name → check for every metavar used in the flag table.
pub fn validators() -> ValidatorRegistry {
    ValidatorRegistry::new()
        .with("left_icon", Check::ExistingFile)
        .with("right_text", Check::String)
        .with("output_svg", Check::String)
        .with("right_color", Check::HtmlHex)
        .with("left_color", Check::HtmlHex)
        .with("input_color", Check::Color)
        .with("package_name", Check::PypiVersion)
        .with("scale_factor", SCALE_RANGE)
        .with("font_size", FONT_SIZE_RANGE)
        .with("height_division_factor", TEXT_ALIGN_RANGE)
        .with("output_format", Check::choice(OUTPUT_FORMATS))
        .with("output_dir", Check::DirPath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotutils_core::network::Network;
    use dotutils_core::registry::DefaultRegistry;
    use dotutils_core::slot::{Signature, SlotKind};
    use dotutils_core::value::Value;
    use std::time::Duration;

    fn network() -> Network {
        Network::new(Duration::from_secs(1), "http://127.0.0.1:9/pypi").unwrap()
    }

    fn declare(flag: &Flag, registry: &ValidatorRegistry) -> Signature {
        Signature::declare(
            flag.metavars,
            flag.fallback.clone(),
            registry,
            &DefaultRegistry::default(),
            &network(),
        )
        .unwrap()
    }

    #[test]
    fn every_flag_declares() {
        let registry = validators();
        for flag in FLAGS {
            let sig = declare(flag, &registry);
            assert_eq!(sig.len(), flag.metavars.len(), "{}", flag.long);
        }
    }

    #[test]
    fn every_slot_has_a_check() {
        let registry = validators();
        for flag in FLAGS {
            for slot in &declare(flag, &registry).slots {
                assert!(registry.get(&slot.name).is_some(), "{}", slot.name);
            }
        }
    }

    #[test]
    fn declared_defaults_are_checked() {
        let registry = validators();
        let sig = declare(&CONVERT_COLOR, &registry);
        assert_eq!(sig.slots[1].kind, SlotKind::Default(Value::str("rgb")));
    }

    #[test]
    fn sizing_slots_reject_non_positive_values() {
        let registry = validators();
        let network = network();
        for name in ["scale_factor", "font_size", "height_division_factor"] {
            let check = registry.check_for(name, &Check::Any);
            assert!(check.check(&Value::str("0"), &network).is_err(), "{name}");
            assert!(check.check(&Value::str("-2"), &network).is_err(), "{name}");
            assert!(check.check(&Value::str("NaN"), &network).is_err(), "{name}");
            assert!(check.check(&Value::str("2"), &network).is_ok(), "{name}");
        }
    }

    #[test]
    fn group_lookup_ignores_case() {
        assert_eq!(Group::find("images"), Some(Group::Images));
        assert_eq!(Group::find("COLORS"), Some(Group::Colors));
        assert_eq!(Group::find("fonts"), None);
    }
}
