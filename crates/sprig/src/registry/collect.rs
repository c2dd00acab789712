//! Link-time step collection.
//!
//! [`step!`](crate::step) submits a [`StepDefinition`] through `inventory`;
//! [`StepRegistry::register_collected`](super::StepRegistry::register_collected)
//! installs everything submitted in the current binary.

use std::sync::Arc;

use super::implementation::{SourceLocation, StepFn, StepHandler, StepImplementation};

/// A step declared with [`step!`](crate::step).
#[derive(Debug)]
pub struct StepDefinition {
    /// Pattern text.
    pub pattern: &'static str,
    /// Handler name, usually the function path.
    pub name: &'static str,
    /// Handler invoked for matching steps.
    pub run: StepHandler,
    /// Source file of the declaration.
    pub file: &'static str,
    /// Line of the declaration.
    pub line: u32,
}

impl StepDefinition {
    pub(crate) fn implementation(&self) -> StepImplementation {
        let run: StepFn = Arc::new(self.run);
        StepImplementation::with_location(
            self.name,
            SourceLocation {
                file: self.file,
                line: self.line,
            },
            run,
        )
    }
}

inventory::collect!(StepDefinition);

/// Every collected definition, ordered by declaration site.
pub(crate) fn collected() -> Vec<&'static StepDefinition> {
    let mut definitions: Vec<_> = inventory::iter::<StepDefinition>.into_iter().collect();
    definitions.sort_by_key(|def| (def.file, def.line));
    definitions
}

/// Declare a step handler for link-time collection.
///
/// The handler must be a function with the [`StepHandler`] signature. The
/// declaration site is recorded automatically.
///
/// # Examples
///
/// ```
/// use sprig::{StepArguments, StepFailure, StepRegistry, step};
///
/// fn have_number(args: &StepArguments<'_>) -> Result<(), StepFailure> {
///     let _value: u32 = args.arg(0).unwrap_or("0").parse()?;
///     Ok(())
/// }
///
/// step!(r"I have the number (\d+)", have_number);
///
/// fn main() {
///     let mut registry = StepRegistry::new();
///     registry.register_collected().expect("collected steps register");
///     assert!(registry.get(r"I have the number (\d+)").is_some());
/// }
/// ```
#[macro_export]
macro_rules! step {
    ($pattern:expr, $handler:path $(,)?) => {
        const _: () = {
            $crate::submit! {
                $crate::StepDefinition {
                    pattern: $pattern,
                    name: stringify!($handler),
                    run: $handler,
                    file: file!(),
                    line: line!(),
                }
            }
        };
    };
}
