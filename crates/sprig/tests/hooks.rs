//! Behavioural tests for hooks driven around a parsed feature.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use rstest::{fixture, rstest};
use sprig::{
    Feature, FeatureParser, Hook, HookArgs, HookError, HookScope, HookTiming, PatternMode,
    Registries, StepImplementation, StepRegistry,
};

type Journal = Arc<Mutex<Vec<String>>>;

fn push(journal: &Journal, entry: String) {
    journal
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(entry);
}

fn snapshot(journal: &Journal) -> Vec<String> {
    journal
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[fixture]
fn feature() -> Feature {
    FeatureParser::new((), "hooks.feature", 1, "en")
        .and_then(|parser| {
            parser.parse_str(concat!(
                "Feature: hooks\n",
                "  Scenario Loop 2: repeat\n",
                "    Given a step\n",
            ))
        })
        .unwrap_or_else(|err| panic!("parse: {err}"))
}

fn tracing_hook(name: &str, journal: &Journal) -> Hook {
    let journal = Arc::clone(journal);
    let label = name.to_owned();
    Hook::new(name, move |args: &HookArgs<'_>| {
        let subject = match *args {
            HookArgs::Feature(feature) => feature.sentence.clone(),
            HookArgs::Scenario(scenario) => scenario.sentence.clone(),
            HookArgs::Step(step) => step.sentence.clone(),
            _ => "-".to_owned(),
        };
        push(&journal, format!("{label}:{subject}"));
        Ok(())
    })
}

/// Walk `feature` the way a runner would, calling every scope's hooks.
fn drive(registries: &sprig::FrozenRegistries, feature: &Feature) -> Result<(), HookError> {
    let hooks = registries.hooks();
    hooks.call(HookTiming::Before, HookScope::All, &HookArgs::None)?;
    hooks.call(HookTiming::Before, HookScope::EachFeature, &HookArgs::Feature(feature))?;
    for scenario in feature.runnable_scenarios() {
        hooks.call(
            HookTiming::Before,
            HookScope::EachScenario,
            &HookArgs::Scenario(scenario),
        )?;
        for step in &scenario.steps {
            hooks.call(HookTiming::Before, HookScope::EachStep, &HookArgs::Step(step))?;
            hooks.call(HookTiming::After, HookScope::EachStep, &HookArgs::Step(step))?;
        }
        hooks.call(
            HookTiming::After,
            HookScope::EachScenario,
            &HookArgs::Scenario(scenario),
        )?;
    }
    hooks.call(HookTiming::After, HookScope::EachFeature, &HookArgs::Feature(feature))?;
    hooks.call(HookTiming::After, HookScope::All, &HookArgs::None)
}

fn registries_with(journal: &Journal) -> Registries {
    let mut registries = Registries {
        steps: StepRegistry::with_mode(PatternMode::Regex),
        hooks: sprig::HookRegistry::new(),
    };
    registries
        .hooks
        .before()
        .all(tracing_hook("before_all", journal))
        .each_feature(tracing_hook("before_feature", journal))
        .each_scenario(tracing_hook("before_scenario", journal));
    registries
        .hooks
        .after()
        .each_step(tracing_hook("after_step", journal))
        .all(tracing_hook("after_all", journal));
    registries
}

#[rstest]
fn hooks_bracket_every_boundary(feature: Feature) {
    let journal = Journal::default();
    let frozen = registries_with(&journal).freeze();
    assert!(drive(&frozen, &feature).is_ok());
    assert_eq!(
        snapshot(&journal),
        [
            "before_all:-",
            "before_feature:hooks",
            "before_scenario:repeat - iteration 0",
            "after_step:Given a step",
            "before_scenario:repeat - iteration 1",
            "after_step:Given a step",
            "after_all:-",
        ]
    );
}

#[rstest]
fn failing_hook_aborts_only_its_call(feature: Feature) {
    let journal = Journal::default();
    let mut registries = registries_with(&journal);
    registries.hooks.register(
        HookTiming::Before,
        HookScope::EachFeature,
        Hook::new("refuses", |_: &HookArgs<'_>| Err("not today".into())),
    );
    registries
        .hooks
        .before()
        .each_feature(tracing_hook("never_runs", &journal));
    let frozen = registries.freeze();

    let Err(HookError::Failed {
        hook,
        timing,
        scope,
        ..
    }) = drive(&frozen, &feature)
    else {
        panic!("failing hook must surface");
    };
    assert_eq!(hook, "refuses");
    assert_eq!((timing, scope), (HookTiming::Before, HookScope::EachFeature));
    assert_eq!(snapshot(&journal), ["before_all:-", "before_feature:hooks"]);

    // the registry itself is unaffected and later calls still run
    assert!(
        frozen
            .call_hooks(HookTiming::After, HookScope::All, &HookArgs::None)
            .is_ok()
    );
    assert_eq!(snapshot(&journal).last().map(String::as_str), Some("after_all:-"));
}

#[rstest]
fn frozen_registries_serve_parallel_runners(feature: Feature) {
    let journal = Journal::default();
    let mut registries = registries_with(&journal);
    assert!(
        registries
            .steps
            .register("a step", StepImplementation::new("a_step", |_| Ok(())))
            .is_ok()
    );
    let frozen = registries.freeze();
    let feature = Arc::new(feature);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let frozen = frozen.clone();
            let feature = Arc::clone(&feature);
            thread::spawn(move || {
                for step in feature.runnable_scenarios().flat_map(|s| &s.steps) {
                    let found = frozen
                        .find(step)
                        .unwrap_or_else(|err| panic!("resolve: {err}"));
                    assert_eq!(found.implementation().name(), "a_step");
                }
                drive(&frozen, &feature).is_ok()
            })
        })
        .collect();
    for worker in workers {
        assert!(worker.join().unwrap_or_else(|_| panic!("worker panicked")));
    }
    assert_eq!(snapshot(&journal).len(), 4 * 7);
}
