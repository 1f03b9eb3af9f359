use std::sync::{Arc, Mutex};

use speculate2::speculate;
use whatsnew::engine::*;
use whatsnew::models::*;
use whatsnew::store::{InMemoryVersionStore, StoreError, VersionStore};

/// Counts every `save` so tests can check the write-once contract.
#[derive(Default)]
struct CountingStore {
    inner: InMemoryVersionStore,
    saves: Mutex<Vec<Version>>,
}

impl CountingStore {
    fn saves(&self) -> Vec<Version> {
        self.saves.lock().unwrap().clone()
    }
}

impl VersionStore for CountingStore {
    fn presented_versions(&self) -> Result<Vec<Version>, StoreError> {
        self.inner.presented_versions()
    }

    fn save(&self, version: &Version) -> Result<(), StoreError> {
        self.saves.lock().unwrap().push(*version);
        self.inner.save(version)
    }

    fn remove_all(&self) -> Result<(), StoreError> {
        self.inner.remove_all()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    GroupChanged(usize),
    Haptic(HapticFeedback),
    Present(String),
    Close(TerminalCause),
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    fn closes(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Close(_)))
            .count()
    }
}

impl PresentationObserver for Recorder {
    fn group_changed(&mut self, index: usize, _group: &FeatureGroup) {
        self.0.lock().unwrap().push(Event::GroupChanged(index));
    }

    fn haptic(&mut self, feedback: &HapticFeedback) {
        self.0.lock().unwrap().push(Event::Haptic(*feedback));
    }

    fn present_custom_view(&mut self, content: &ContentRef) {
        self.0.lock().unwrap().push(Event::Present(content.to_string()));
    }

    fn close_requested(&mut self, cause: TerminalCause) {
        self.0.lock().unwrap().push(Event::Close(cause));
    }
}

fn release_with_groups(version: Version, count: usize) -> WhatsNew {
    WhatsNew::with_groups(
        version,
        "What's New",
        (0..count)
            .map(|i| FeatureGroup::new(vec![Feature::new("star", format!("Feature {i}"), "Details")]))
            .collect(),
    )
}

fn engine_for(whats_new: WhatsNew, store: &Arc<CountingStore>) -> PresentationEngine {
    let store: Arc<dyn VersionStore> = store.clone();
    PresentationEngine::new(whats_new, Some(store))
}

fn title_of(group: Option<&FeatureGroup>) -> String {
    match group.and_then(|g| g.features.first()) {
        Some(Feature::Structured { title, .. }) => title.to_string(),
        other => panic!("expected a structured feature, got {:?}", other),
    }
}

speculate! {
    before {
        let v2 = Version::new(2, 0, 0);
    }

    describe "for every group count" {
        it "ends after exactly N advances for any group count" {
            for count in 1..=5 {
                let store = Arc::new(CountingStore::default());
                let mut engine = engine_for(release_with_groups(v2, count), &store);
                engine.start().unwrap();

                for step in 0..count {
                    assert!(!engine.is_terminal(), "ended early at step {step} of {count}");
                    engine.advance().unwrap();
                }

                assert_eq!(engine.state(), EngineState::Terminal(TerminalCause::Exhausted));
                assert_eq!(store.saves().len(), 1);
            }
        }

        it "ends from any group with one save" {
            for count in 1..=4 {
                for at in 0..count {
                    let store = Arc::new(CountingStore::default());
                    let mut engine = engine_for(release_with_groups(v2, count), &store);
                    engine.start().unwrap();
                    for _ in 0..at {
                        engine.advance().unwrap();
                    }
                    assert_eq!(engine.state(), EngineState::Showing(at));

                    assert_eq!(
                        engine.request_dismiss(),
                        EngineState::Terminal(TerminalCause::Dismissed)
                    );
                    assert_eq!(store.saves(), vec![v2]);
                }
            }
        }
    }

    describe "without a store" {
        it "still reaches the end" {
            let mut engine = PresentationEngine::new(release_with_groups(v2, 1), None);
            engine.start().unwrap();
            engine.advance().unwrap();
            assert!(engine.is_terminal());
        }
    }

    describe "with a counting store" {
        before {
            let store = Arc::new(CountingStore::default());
        }

        describe "sequencing" {
            it "walks two groups then ends and records the version once" {
                let release = WhatsNew::with_groups(v2, "What's New", vec![
                    FeatureGroup::new(vec![
                        Feature::new("a", "F1", "first"),
                        Feature::new("b", "F2", "second"),
                    ]),
                    FeatureGroup::new(vec![Feature::new("c", "F3", "third")]),
                ]);
                let mut engine = engine_for(release, &store);

                assert_eq!(engine.start().unwrap(), EngineState::Showing(0));
                assert_eq!(engine.current_group().unwrap().features.len(), 2);

                assert_eq!(engine.advance().unwrap(), EngineState::Showing(1));
                assert_eq!(title_of(engine.current_group()), "F3");

                assert_eq!(
                    engine.advance().unwrap(),
                    EngineState::Terminal(TerminalCause::Exhausted)
                );
                assert_eq!(store.saves(), vec![v2]);
            }

            it "reports group changes to the observer" {
                let recorder = Recorder::default();
                let mut engine = engine_for(release_with_groups(v2, 2), &store)
                    .with_observer(recorder.clone());

                engine.start().unwrap();
                engine.advance().unwrap();
                engine.advance().unwrap();

                assert_eq!(recorder.events(), vec![
                    Event::GroupChanged(0),
                    Event::GroupChanged(1),
                    Event::Close(TerminalCause::Exhausted),
                ]);
            }
        }

        describe "advance before start" {
            it "shows the first group by default" {
                let mut engine = engine_for(release_with_groups(v2, 3), &store);
                assert_eq!(engine.advance_policy(), AdvancePolicy::InitializeFirst);

                assert_eq!(engine.advance().unwrap(), EngineState::Showing(0));
                assert_eq!(title_of(engine.current_group()), "Feature 0");
            }

            it "skips to the second group with SkipToNext" {
                let mut engine = engine_for(release_with_groups(v2, 3), &store)
                    .with_advance_policy(AdvancePolicy::SkipToNext);

                assert_eq!(engine.advance().unwrap(), EngineState::Showing(1));
            }

            it "ends a single-group release with SkipToNext" {
                let mut engine = engine_for(release_with_groups(v2, 1), &store)
                    .with_advance_policy(AdvancePolicy::SkipToNext);

                assert_eq!(
                    engine.advance().unwrap(),
                    EngineState::Terminal(TerminalCause::Exhausted)
                );
                assert_eq!(store.saves().len(), 1);
            }

            it "refuses an empty release without recording it" {
                let mut engine = engine_for(release_with_groups(v2, 0), &store);

                assert_eq!(engine.advance(), Err(PresentationError::EmptyFeatureGroups(v2)));
                assert_eq!(engine.state(), EngineState::NotStarted);
                assert!(store.saves().is_empty());
            }
        }

        describe "request_dismiss" {
            it "ends an engine that never started" {
                let mut engine = engine_for(release_with_groups(v2, 2), &store);
                assert_eq!(
                    engine.request_dismiss(),
                    EngineState::Terminal(TerminalCause::Dismissed)
                );
                assert_eq!(store.saves().len(), 1);
            }
        }

        describe "after the end" {
            it "ignores further calls" {
                let recorder = Recorder::default();
                let mut engine = engine_for(release_with_groups(v2, 2), &store)
                    .with_observer(recorder.clone());
                engine.start().unwrap();
                engine.request_dismiss();

                let ended = engine.state();
                assert_eq!(engine.advance().unwrap(), ended);
                assert_eq!(engine.request_dismiss(), ended);
                assert_eq!(engine.start().unwrap(), ended);
                assert_eq!(engine.press_primary().unwrap(), ended);
                assert_eq!(engine.press_secondary(), ended);

                assert_eq!(engine.group_index(), Some(0));
                assert_eq!(store.saves().len(), 1);
                assert_eq!(recorder.closes(), 1);
            }
        }

        describe "primary action" {
            it "advances with the default callback" {
                let mut engine = engine_for(release_with_groups(v2, 2), &store);
                engine.start().unwrap();

                assert_eq!(engine.press_primary().unwrap(), EngineState::Showing(1));
                assert_eq!(
                    engine.press_primary().unwrap(),
                    EngineState::Terminal(TerminalCause::Exhausted)
                );
            }

            it "lets the callback choose to dismiss" {
                let release = WhatsNew::new(v2, "T", vec![Feature::new("a", "A", "a")])
                    .with_primary_action(PrimaryAction::new("Close").on_press(|c| c.dismiss()));
                let mut engine = engine_for(release, &store);
                engine.start().unwrap();

                assert_eq!(
                    engine.press_primary().unwrap(),
                    EngineState::Terminal(TerminalCause::Dismissed)
                );
            }

            it "does not transition on its own when the callback does nothing" {
                let presses = Arc::new(Mutex::new(0));
                let counter = presses.clone();
                let release = WhatsNew::new(v2, "T", vec![Feature::new("a", "A", "a")])
                    .with_primary_action(PrimaryAction::new("Hmm").on_press(move |_| {
                        *counter.lock().unwrap() += 1;
                    }));
                let mut engine = engine_for(release, &store);
                engine.start().unwrap();

                assert_eq!(engine.press_primary().unwrap(), EngineState::Showing(0));
                assert_eq!(*presses.lock().unwrap(), 1);
            }

            it "is inert without a callback but still plays haptics" {
                let recorder = Recorder::default();
                let release = WhatsNew::new(v2, "T", vec![Feature::new("a", "A", "a")])
                    .with_primary_action(
                        PrimaryAction::default()
                            .with_haptic_feedback(HapticFeedback::Selection)
                            .inert(),
                    );
                let mut engine = engine_for(release, &store).with_observer(recorder.clone());
                engine.start().unwrap();

                assert_eq!(engine.press_primary().unwrap(), EngineState::Showing(0));
                assert_eq!(recorder.events(), vec![
                    Event::GroupChanged(0),
                    Event::Haptic(HapticFeedback::Selection),
                ]);
                assert!(store.saves().is_empty());
            }

            it "is ignored before start" {
                let mut engine = engine_for(release_with_groups(v2, 2), &store);
                assert_eq!(engine.press_primary().unwrap(), EngineState::NotStarted);
            }

            it "sees the state change inside the callback" {
                let seen = Arc::new(Mutex::new(Vec::new()));
                let log = seen.clone();
                let group = FeatureGroup::new(vec![Feature::new("a", "A", "a")]).with_primary_action(
                    PrimaryAction::default().on_press(move |c| {
                        log.lock().unwrap().push(c.state());
                        c.advance();
                        log.lock().unwrap().push(c.state());
                    }),
                );
                let release = WhatsNew::with_groups(v2, "T", vec![group, FeatureGroup::default()]);
                let mut engine = engine_for(release, &store);
                engine.start().unwrap();
                engine.press_primary().unwrap();

                assert_eq!(*seen.lock().unwrap(), vec![EngineState::Showing(0), EngineState::Showing(1)]);
            }
        }

        describe "secondary action" {
            it "dismisses a single-group release without advancing" {
                let recorder = Recorder::default();
                let release = WhatsNew::new(v2, "T", vec![Feature::new("a", "A", "a")])
                    .with_secondary_action(SecondaryAction::dismiss("Skip"));
                let mut engine = engine_for(release, &store).with_observer(recorder.clone());
                engine.start().unwrap();

                assert_eq!(
                    engine.press_secondary(),
                    EngineState::Terminal(TerminalCause::Dismissed)
                );
                assert_eq!(recorder.events(), vec![
                    Event::GroupChanged(0),
                    Event::Close(TerminalCause::Dismissed),
                ]);
                assert_eq!(store.saves(), vec![v2]);
            }

            it "hands custom content to the host without changing state" {
                let recorder = Recorder::default();
                let release = WhatsNew::new(v2, "T", vec![Feature::new("a", "A", "a")])
                    .with_secondary_action(
                        SecondaryAction::present("Learn more", "release-notes")
                            .with_haptic_feedback(HapticFeedback::Impact { style: Some(ImpactStyle::Light), intensity: None }),
                    );
                let mut engine = engine_for(release, &store).with_observer(recorder.clone());
                engine.start().unwrap();

                assert_eq!(engine.press_secondary(), EngineState::Showing(0));
                assert_eq!(recorder.events(), vec![
                    Event::GroupChanged(0),
                    Event::Haptic(HapticFeedback::Impact { style: Some(ImpactStyle::Light), intensity: None }),
                    Event::Present("release-notes".to_string()),
                ]);
                assert!(store.saves().is_empty());
            }

            it "does nothing when the group has none" {
                let mut engine = engine_for(release_with_groups(v2, 2), &store);
                engine.start().unwrap();
                assert_eq!(engine.press_secondary(), EngineState::Showing(0));
            }

            it "belongs to the current group only" {
                let release = WhatsNew::with_groups(v2, "T", vec![
                    FeatureGroup::new(vec![Feature::new("a", "A", "a")]),
                    FeatureGroup::new(vec![Feature::new("b", "B", "b")])
                        .with_secondary_action(SecondaryAction::dismiss("Skip")),
                ]);
                let mut engine = engine_for(release, &store);
                engine.start().unwrap();

                assert_eq!(engine.press_secondary(), EngineState::Showing(0));
                engine.advance().unwrap();
                assert_eq!(
                    engine.press_secondary(),
                    EngineState::Terminal(TerminalCause::Dismissed)
                );
            }
        }

        describe "rendered_features" {
            it "is empty before start" {
                let engine = engine_for(release_with_groups(v2, 1), &store);
                assert!(engine.rendered_features().is_empty());
            }

            it "styles custom features with the current group's primary action" {
                let red = ActionStyle { background: "red".into(), foreground: "white".into() };
                let blue = ActionStyle { background: "blue".into(), foreground: "black".into() };
                let release = WhatsNew::with_groups(v2, "T", vec![
                    FeatureGroup::new(vec![Feature::custom("intro")])
                        .with_primary_action(PrimaryAction::default().with_style(red.clone())),
                    FeatureGroup::new(vec![Feature::custom("promo"), Feature::custom_unstyled("plain")])
                        .with_primary_action(PrimaryAction::default().with_style(blue.clone())),
                ]);
                let mut engine = engine_for(release, &store);

                engine.start().unwrap();
                assert_eq!(engine.rendered_features(), vec![RenderedFeature::Custom {
                    content: &ContentRef::from("intro"),
                    style: Some(&red),
                }]);

                engine.advance().unwrap();
                assert_eq!(engine.rendered_features(), vec![
                    RenderedFeature::Custom { content: &ContentRef::from("promo"), style: Some(&blue) },
                    RenderedFeature::Custom { content: &ContentRef::from("plain"), style: None },
                ]);
            }

            it "reports features without content as unavailable" {
                let release = WhatsNew::new(v2, "T", vec![Feature::Missing, Feature::new("a", "A", "a")]);
                let mut engine = engine_for(release, &store);
                engine.start().unwrap();

                let features = engine.rendered_features();
                assert_eq!(features.len(), 2);
                assert_eq!(features[0], RenderedFeature::Unavailable);
                assert!(matches!(features[1], RenderedFeature::Structured { .. }));
            }
        }
    }
}
