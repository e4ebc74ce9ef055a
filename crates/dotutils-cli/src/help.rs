use crate::flags::{Group, FLAGS};
use dotutils_core::console::{Console, LineStyle};
use dotutils_core::registry::ValidatorRegistry;

pub const USAGE: &str = "dotutils [FLAGS] [ARGUMENTS]";

/// Print help for the named groups, or for every group when `names` is empty.
pub fn run(console: &Console, validators: &ValidatorRegistry, names: &[String]) {
    if names.is_empty() {
        console.plain(format!("usage: {USAGE}"));
        for group in Group::ALL {
            print_group(console, validators, group);
        }
        return;
    }

    for name in names {
        match Group::find(name) {
            Some(group) => print_group(console, validators, group),
            None => console.warning(format!(
                "unknown help group '{name}', expected one of: {}",
                Group::ALL.map(Group::title).join(", ")
            )),
        }
    }
}

fn print_group(console: &Console, validators: &ValidatorRegistry, group: Group) {
    console.plain("");
    console.print_section(group.title(), &group.tones(), Some(LineStyle::Double));
    console.print_col(group.description(), &["bold"]);

    for flag in FLAGS.iter().filter(|f| f.group == group) {
        console.print_same_line(&[flag.long, flag.help], &["pink", "bold"], "\t\t");

        let choices: Vec<String> = flag
            .metavars
            .iter()
            .filter_map(|m| m.split_whitespace().next())
            .filter_map(|name| validators.get(name)?.choices().map(<[String]>::to_vec))
            .flatten()
            .collect();
        if !choices.is_empty() {
            let choices = choices.join(" ");
            console.print_same_line(&["Choices", choices.as_str()], &["text", "BLUE"], "\t\t\t");
        }

        let args = flag.metavars.join(" ");
        console.print_same_line(&["Args:", args.as_str()], &["text", "YLW"], "\t\t\t");
    }
}
