//! Catalog Commands
//!
//! List the built-in tables: committees, countries, modes and models.

use crate::ai::models::MODEL_PRESETS;
use crate::ai::prompt::{Mode, Registry};
use crate::cli::ui::Output;
use crate::constants::inference::DEFAULT_MODEL;

pub fn committees() {
    let out = Output::new();
    out.header("Committees");
    for committee in Registry::builtin().committees() {
        out.field(committee.code, committee.name);
    }
}

pub fn countries() {
    let out = Output::new();
    let registry = Registry::builtin();

    out.header("Country profiles");
    for profile in registry.profiles() {
        out.field(profile.name, profile.stance);
    }

    let others: Vec<_> = registry
        .country_names()
        .into_iter()
        .filter(|name| !registry.has_profile(name))
        .collect();

    if !others.is_empty() {
        out.section("Other countries (default profile)");
        println!("  {}", others.join(", "));
    }
}

pub fn modes() {
    let out = Output::new();
    out.header("Modes");
    for mode in Mode::ALL {
        out.field(mode.slug(), mode.label());
    }
    out.caption("Any other value uses the general question template.");
}

pub fn models() {
    let out = Output::new();
    out.header("Models");
    for preset in MODEL_PRESETS {
        let marker = if preset.model_id == DEFAULT_MODEL {
            " (default)"
        } else {
            ""
        };
        out.field(preset.alias, &format!("{}{}", preset.model_id, marker));
    }
    out.caption("--model also accepts any Hugging Face model identifier.");
}
