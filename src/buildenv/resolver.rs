//! Effective build environment of a module under a set of activated profiles.

use crate::config::{BuildEnv, ConfigDocument, Module};

/// Resolve the build environment `module` uses when `activated` profiles are on.
///
/// Starts from the module's default pipeline; each activated profile that
/// exists in `document`, is scoped to the module and defines a build
/// environment replaces the current result. Later activations win. Names
/// `document` does not declare are ignored.
pub fn resolve(document: &ConfigDocument, module: &Module, activated: &[String]) -> Option<BuildEnv> {
    let mut effective = module.build.build_env();

    for name in activated {
        let Some(profile) = document.profile(name) else {
            continue;
        };
        if !profile.applies_to(&module.name) {
            continue;
        }
        if let Some(env) = profile.build.build_env() {
            effective = Some(env);
        }
    }

    effective
}
