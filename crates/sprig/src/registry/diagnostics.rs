//! Diagnostics-only registry exports.
//!
//! Serialises the contents of a [`StepRegistry`] so external tooling can
//! list the available steps and where they were declared.

use serde::Serialize;

use super::StepRegistry;

#[derive(Serialize)]
struct DumpedStep<'r> {
    pattern: &'r str,
    name: &'r str,
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct RegistryDump<'r> {
    mode: &'static str,
    steps: Vec<DumpedStep<'r>>,
}

/// Serialise `registry` as JSON, steps in registration order.
///
/// # Errors
///
/// Returns an error if serialisation fails.
pub fn dump_registry(registry: &StepRegistry) -> serde_json::Result<String> {
    let steps = registry
        .iter()
        .map(|(pattern, implementation)| {
            let location = implementation.location();
            DumpedStep {
                pattern,
                name: implementation.name(),
                file: location.file,
                line: location.line,
            }
        })
        .collect();
    serde_json::to_string(&RegistryDump {
        mode: registry.mode().as_str(),
        steps,
    })
}
