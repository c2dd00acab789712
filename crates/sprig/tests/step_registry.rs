//! Behavioural tests for registering steps and resolving parsed steps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rstest::{fixture, rstest};
use serial_test::serial;
use sprig::{
    FeatureParser, PatternMode, RegistryError, StepArguments, StepBearer, StepFailure,
    StepImplementation, StepMethod, StepRegistry, config, step,
};

fn noop(name: &str) -> StepImplementation {
    StepImplementation::new(name, |_| Ok(()))
}

#[fixture]
fn registry() -> StepRegistry {
    StepRegistry::with_mode(PatternMode::Regex)
}

#[rstest]
fn registers_distinct_patterns(mut registry: StepRegistry) {
    assert!(registry.register("abc", noop("step_a")).is_ok());
    assert!(registry.register("def", noop("step_b")).is_ok());
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("abc").map(StepImplementation::name), Some("step_a"));
    assert_eq!(registry.get("def").map(StepImplementation::name), Some("step_b"));
}

#[rstest]
fn duplicate_pattern_names_both_steps(mut registry: StepRegistry) {
    assert!(registry.register("abc", noop("step_a")).is_ok());
    let Err(err) = registry.register("abc", noop("step_b")) else {
        panic!("duplicate pattern must be rejected");
    };
    assert_eq!(
        err.to_string(),
        "Cannot register step step_b with regex 'abc' because it is already used by step step_a"
    );
    assert_eq!(registry.get("abc").map(StepImplementation::name), Some("step_a"));
}

#[rstest]
fn overlapping_patterns_are_not_duplicates(mut registry: StepRegistry) {
    assert!(registry.register(r"I have (\d+) apples", noop("digits")).is_ok());
    assert!(registry.register(r"I have (\w+) apples", noop("words")).is_ok());
    assert_eq!(registry.len(), 2);
}

#[derive(Default)]
struct Steps {
    calls: Mutex<Vec<String>>,
}

impl Steps {
    fn record(&self, entry: &str) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.to_owned());
    }

    fn some_step(&self, _: &StepArguments<'_>) -> Result<(), StepFailure> {
        self.record("some_step");
        Ok(())
    }

    fn some_other_step(&self, _: &StepArguments<'_>) -> Result<(), StepFailure> {
        self.record("some_other_step");
        Ok(())
    }

    fn ignore_me(&self, _: &StepArguments<'_>) -> Result<(), StepFailure> {
        self.record("ignore_me");
        Ok(())
    }

    fn undocumented(&self, _: &StepArguments<'_>) -> Result<(), StepFailure> {
        self.record("undocumented");
        Ok(())
    }
}

impl StepBearer for Steps {
    fn step_methods() -> Vec<StepMethod<Self>> {
        vec![
            StepMethod::new("some_step", "When I call some step", Self::some_step),
            StepMethod::new(
                "some_other_step",
                "\n        Then I expect some behaviour\n\n        with trailing notes\n    ",
                Self::some_other_step,
            ),
            StepMethod::new("ignore_me", "When I am ignored", Self::ignore_me),
            StepMethod::new("undocumented", "", Self::undocumented),
        ]
    }
}

#[rstest]
fn register_object_uses_first_doc_line(mut registry: StepRegistry) {
    let bearer = Arc::new(Steps::default());
    let registered = registry
        .register_object(&bearer, &["ignore_me"])
        .unwrap_or_else(|err| panic!("bearer registers: {err}"));
    assert_eq!(registered, 2);
    let patterns: Vec<_> = registry.iter().map(|(pattern, _)| pattern).collect();
    assert_eq!(patterns, ["When I call some step", "Then I expect some behaviour"]);
    assert!(registry.get("When I am ignored").is_none());
}

#[rstest]
fn bearer_methods_run_against_shared_receiver(mut registry: StepRegistry) {
    let bearer = Arc::new(Steps::default());
    assert!(registry.register_object(&bearer, &["ignore_me"]).is_ok());

    let parser = FeatureParser::new((), "bearer.feature", 1, "en")
        .unwrap_or_else(|err| panic!("parser: {err}"));
    let feature = parser
        .parse_str(concat!(
            "Feature: bearer\n",
            "  Scenario: calls\n",
            "    When I call some step\n",
            "    Then I expect some behaviour\n",
        ))
        .unwrap_or_else(|err| panic!("parse: {err}"));
    for scenario in feature.runnable_scenarios() {
        for step in &scenario.steps {
            let found = registry
                .find(step)
                .unwrap_or_else(|err| panic!("resolve: {err}"));
            assert!(found.run(step).is_ok());
        }
    }
    let calls = bearer
        .calls
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    assert_eq!(calls, ["some_step", "some_other_step"]);
}

#[rstest]
fn register_object_conflict_leaves_registry_untouched(mut registry: StepRegistry) {
    assert!(registry.register("When I call some step", noop("earlier")).is_ok());
    let bearer = Arc::new(Steps::default());
    let Err(RegistryError::DuplicatePattern { existing, incoming, .. }) =
        registry.register_object(&bearer, &[])
    else {
        panic!("conflicting bearer must be rejected");
    };
    assert_eq!((existing.as_str(), incoming.as_str()), ("earlier", "some_step"));
    assert_eq!(registry.len(), 1);
}

#[rstest]
#[case::unknown("Given something unheard of", "not found")]
#[case::ambiguous("Given I have 3 apples", "ambiguous")]
fn lookup_failures_identify_the_step(
    mut registry: StepRegistry,
    #[case] sentence: &str,
    #[case] expected: &str,
) {
    assert!(registry.register(r"(\d+) apples", noop("digits")).is_ok());
    assert!(registry.register(r"I have", noop("having")).is_ok());
    let parser = FeatureParser::new((), "lookup.feature", 1, "en")
        .unwrap_or_else(|err| panic!("parser: {err}"));
    let source = format!("Feature: lookup\n  Scenario: one\n    {sentence}\n");
    let feature = parser
        .parse_str(&source)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let Some(step) = feature.runnable_scenarios().flat_map(|s| &s.steps).next() else {
        panic!("one step parsed");
    };
    let Err(err) = registry.find(step) else {
        panic!("lookup must fail");
    };
    match (expected, &err) {
        ("not found", RegistryError::StepDefinitionNotFound { path, line, .. })
        | ("ambiguous", RegistryError::AmbiguousStep { path, line, .. }) => {
            assert_eq!(path.as_str(), "lookup.feature");
            assert_eq!(*line, 3);
        }
        _ => panic!("unexpected error {err:?}"),
    }
}

static COLLECTED_CALLS: AtomicUsize = AtomicUsize::new(0);

fn collected_step(args: &StepArguments<'_>) -> Result<(), StepFailure> {
    let count: usize = args.arg(0).unwrap_or("0").parse()?;
    COLLECTED_CALLS.fetch_add(count, Ordering::SeqCst);
    Ok(())
}

fn collected_table(args: &StepArguments<'_>) -> Result<(), StepFailure> {
    if args.table().len() == 2 {
        Ok(())
    } else {
        Err(format!("expected two rows, got {}", args.table().len()).into())
    }
}

step!(r"collect (\d+) items$", collected_step);
step!("the following rows:", collected_table);

#[rstest]
fn collected_steps_register_and_run(mut registry: StepRegistry) {
    let count = registry
        .register_collected()
        .unwrap_or_else(|err| panic!("collected: {err}"));
    assert_eq!(count, 2);
    let Some(location) = registry
        .get(r"collect (\d+) items$")
        .map(StepImplementation::location)
    else {
        panic!("collected step is registered");
    };
    assert!(location.file.ends_with("step_registry.rs"));

    let parser = FeatureParser::new((), "collected.feature", 1, "en")
        .unwrap_or_else(|err| panic!("parser: {err}"));
    let feature = parser
        .parse_str(concat!(
            "Feature: collected\n",
            "  Scenario: run\n",
            "    Given collect 4 items\n",
            "    And the following rows:\n",
            "      | a |\n",
            "      | b |\n",
        ))
        .unwrap_or_else(|err| panic!("parse: {err}"));
    for step in feature.runnable_scenarios().flat_map(|s| &s.steps) {
        let found = registry
            .find(step)
            .unwrap_or_else(|err| panic!("resolve: {err}"));
        found
            .run(step)
            .unwrap_or_else(|err| panic!("run {}: {err}", step.sentence));
    }
    assert_eq!(COLLECTED_CALLS.load(Ordering::SeqCst), 4);
}

#[rstest]
#[serial]
fn literal_mode_from_configuration_requires_whole_sentence() {
    config::set_pattern_mode(PatternMode::Literal);
    let mut registry = StepRegistry::new();
    config::clear_pattern_mode_override();
    assert_eq!(registry.mode(), PatternMode::Literal);

    assert!(registry.register("Given a.b", noop("dotted")).is_ok());
    let parser = FeatureParser::new((), "literal.feature", 1, "en")
        .unwrap_or_else(|err| panic!("parser: {err}"));
    let feature = parser
        .parse_str("Feature: literal\n  Scenario: s\n    Given a.b\n    Given axb\n")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let outcomes: Vec<_> = feature
        .runnable_scenarios()
        .flat_map(|s| &s.steps)
        .map(|step| registry.find(step).is_ok())
        .collect();
    assert_eq!(outcomes, [true, false]);
}
