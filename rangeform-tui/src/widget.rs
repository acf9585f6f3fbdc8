//! Presentation adapter — binds one slider spec to the data source and the
//! action collaborator.
//!
//! The widget holds no numeric state of its own: every frame it re-reads
//! bounds, step, and value(s) through the `DataSource`, runs validation, and
//! produces a [`SliderView`] for the renderer. Key input turns into writes
//! through the same trait, and commits turn into action invocations.

use rangeform_core::action::{ActionError, ActionRunner};
use rangeform_core::binding::{
    BindingError, ChangeNotice, DataSource, SubscriptionHandle, SubscriptionScope,
};
use rangeform_core::config::{Orientation, SliderMode, SliderSpec, SliderValue};
use rangeform_core::marks::{self, Mark};
use rangeform_core::tooltip;
use rangeform_core::validate::Validation;

/// Display fallbacks used when a bound is unset, so the control still draws.
const FALLBACK_MINIMUM: f64 = 0.0;
const FALLBACK_MAXIMUM: f64 = 100.0;

/// Which handle of a range slider the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveHandle {
    Lower,
    Upper,
}

/// Concrete handle positions to draw, fallbacks applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValue {
    Single(f64),
    Range { lower: f64, upper: f64 },
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct SliderView {
    pub label: String,
    pub orientation: Orientation,
    /// Externally disabled: missing object, read-only spec, or read-only
    /// attributes. Hides the alert region too.
    pub disabled: bool,
    /// Configuration problems exist; interaction is blocked but the alert
    /// stays visible so the problem can be diagnosed.
    pub settings_error: bool,
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
    pub value: SliderValue,
    pub display: DisplayValue,
    pub marks: Vec<Mark>,
    pub tooltip: Option<String>,
    pub alert: Option<String>,
    /// Whether the alert is a hard problem (bad configuration, failed
    /// action) rather than value-range drift.
    pub hard_alert: bool,
}

/// Outcome of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The action ran.
    Invoked(String),
    /// The action failed; its message is now the widget's alert.
    Failed(ActionError),
    /// Nothing to do: no action configured, no value, or disabled.
    Skipped,
}

/// One slider bound to a data object.
#[derive(Debug)]
pub struct SliderWidget {
    pub spec: SliderSpec,
    active_handle: ActiveHandle,
    external_alert: Option<String>,
    subscriptions: Vec<SubscriptionHandle>,
}

impl SliderWidget {
    pub fn new(spec: SliderSpec) -> Self {
        Self {
            spec,
            active_handle: ActiveHandle::Lower,
            external_alert: None,
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe to the bound object, each named attribute, and validation
    /// feedback. Safe to call again after the spec or object changed; old
    /// subscriptions are dropped first.
    pub fn attach(&mut self, source: &mut dyn DataSource) {
        self.detach(source);
        let object = self.spec.object;
        self.subscriptions
            .push(source.subscribe(SubscriptionScope::Object(object)));
        for attribute in self.spec.bound_attributes() {
            let attribute = attribute.to_string();
            self.subscriptions
                .push(source.subscribe(SubscriptionScope::Attribute { object, attribute }));
        }
        self.subscriptions
            .push(source.subscribe(SubscriptionScope::Validation(object)));
    }

    pub fn detach(&mut self, source: &mut dyn DataSource) {
        for handle in self.subscriptions.drain(..) {
            source.unsubscribe(handle);
        }
    }

    pub fn active_handle(&self) -> ActiveHandle {
        self.active_handle
    }

    /// Switch between the lower and upper handle. Single mode has one handle
    /// and ignores this.
    pub fn toggle_handle(&mut self) {
        if self.spec.mode == SliderMode::Range {
            self.active_handle = match self.active_handle {
                ActiveHandle::Lower => ActiveHandle::Upper,
                ActiveHandle::Upper => ActiveHandle::Lower,
            };
        }
    }

    pub fn external_alert(&self) -> Option<&str> {
        self.external_alert.as_deref()
    }

    /// React to a drained change notice. Data updates clear any
    /// externally-reported alert (state is re-read next frame); validation
    /// feedback naming one of the edited attributes becomes the alert.
    pub fn handle_notice(&mut self, notice: &ChangeNotice) {
        match notice {
            ChangeNotice::Updated { object, .. } if *object == self.spec.object => {
                self.external_alert = None;
            }
            ChangeNotice::Validation {
                object,
                attribute,
                reason,
            } if *object == self.spec.object
                && self.spec.edited_attributes().contains(&attribute.as_str()) =>
            {
                self.external_alert = Some(reason.clone());
            }
            _ => {}
        }
    }

    /// Resolve one frame's view: settings, value, validation, marks,
    /// display positions, tooltip, and alert.
    pub fn view(&self, source: &dyn DataSource) -> SliderView {
        let settings = self.spec.resolve_settings(source);
        let value = self.spec.resolve_value(source);
        let validation = Validation::run(&settings, &value);

        let disabled = self.is_disabled(source);
        let settings_error = validation.has_settings_problems();

        let minimum = settings.minimum.unwrap_or(FALLBACK_MINIMUM);
        let maximum = settings.maximum.unwrap_or(FALLBACK_MAXIMUM);
        let valid_span = settings
            .minimum
            .zip(settings.maximum)
            .is_some_and(|(lo, hi)| lo < hi);

        let display = match value {
            SliderValue::Single(v) => DisplayValue::Single(v.unwrap_or(if valid_span {
                minimum + (maximum - minimum) / 2.0
            } else {
                0.0
            })),
            SliderValue::Range { lower, upper } => DisplayValue::Range {
                lower: lower.unwrap_or(if valid_span {
                    minimum + settings.step
                } else {
                    1.0
                }),
                upper: upper.unwrap_or(if valid_span {
                    maximum - settings.step
                } else {
                    FALLBACK_MAXIMUM - settings.step
                }),
            },
        };

        let (alert, hard_alert) = if disabled {
            (None, false)
        } else if let Some(message) = validation.settings_message() {
            (Some(message), true)
        } else if let Some(external) = self.external_alert.clone() {
            (Some(external), true)
        } else if let Some(message) = validation.values_message() {
            (Some(message), false)
        } else {
            (None, false)
        };

        let tooltip = if self.spec.tooltip.is_empty() {
            None
        } else {
            let handle_position = match display {
                DisplayValue::Single(v) => v,
                DisplayValue::Range { lower, upper } => match self.active_handle {
                    ActiveHandle::Lower => lower,
                    ActiveHandle::Upper => upper,
                },
            };
            Some(tooltip::format(
                &self.spec.tooltip,
                handle_position,
                value.is_defined(),
            ))
        };

        SliderView {
            label: self.spec.label.clone(),
            orientation: self.spec.orientation,
            disabled,
            settings_error,
            minimum,
            maximum,
            step: settings.step,
            value,
            display,
            marks: marks::marks(&settings),
            tooltip,
            alert,
            hard_alert,
        }
    }

    /// Move the active handle by `steps` steps and write the result back.
    /// Inert while the control is disabled or the configuration is invalid.
    pub fn nudge(&mut self, source: &mut dyn DataSource, steps: f64) -> Result<(), BindingError> {
        let view = self.view(source);
        if view.disabled || view.settings_error {
            return Ok(());
        }
        let object = self.spec.object;
        let delta = steps * view.step;

        match view.display {
            DisplayValue::Single(current) => {
                let Some(attribute) = self.spec.value_attribute.clone() else {
                    return Ok(());
                };
                let target = (current + delta).max(view.minimum);
                // Past the configured maximum, the maximum itself is what
                // gets persisted.
                let written = if target > view.maximum {
                    view.maximum
                } else {
                    target
                };
                source.set(object, &attribute, written)?;
            }
            DisplayValue::Range { lower, upper } => match self.active_handle {
                ActiveHandle::Lower => {
                    let Some(attribute) = self.spec.lower_bound_attribute.clone() else {
                        return Ok(());
                    };
                    // The upper handle can sit below the minimum when the
                    // bound data is out of range; the lower handle still
                    // never goes below the minimum.
                    let ceiling = upper.max(view.minimum);
                    let target = (lower + delta).clamp(view.minimum, ceiling);
                    source.set(object, &attribute, target)?;
                }
                ActiveHandle::Upper => {
                    let Some(attribute) = self.spec.upper_bound_attribute.clone() else {
                        return Ok(());
                    };
                    let target = (upper + delta).max(lower);
                    let written = if target > view.maximum {
                        view.maximum
                    } else {
                        target
                    };
                    source.set(object, &attribute, written)?;
                }
            },
        }
        Ok(())
    }

    /// Invoke the configured action against the bound object. Runs only when
    /// the bound value is defined and the control is interactive; failures
    /// become the widget's alert.
    pub fn commit(
        &mut self,
        source: &dyn DataSource,
        actions: &mut dyn ActionRunner,
    ) -> CommitOutcome {
        let Some(action) = self.spec.on_change.clone() else {
            return CommitOutcome::Skipped;
        };
        let settings = self.spec.resolve_settings(source);
        let value = self.spec.resolve_value(source);
        if !value.is_defined() || self.is_disabled(source) {
            return CommitOutcome::Skipped;
        }
        if Validation::run(&settings, &value).has_settings_problems() {
            return CommitOutcome::Skipped;
        }
        match actions.invoke(&action, self.spec.object) {
            Ok(()) => CommitOutcome::Invoked(action),
            Err(err) => {
                self.external_alert = Some(err.to_string());
                CommitOutcome::Failed(err)
            }
        }
    }

    fn is_disabled(&self, source: &dyn DataSource) -> bool {
        let object = self.spec.object;
        if !source.has_object(object) || self.spec.read_only {
            return true;
        }
        let mut attributes = self.spec.edited_attributes();
        if let Some(step) = self.spec.step_attribute.as_deref() {
            attributes.push(step);
        }
        attributes
            .into_iter()
            .any(|attribute| source.is_readonly(object, attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangeform_core::binding::ObjectId;
    use rangeform_core::store::MemoryStore;
    use std::sync::mpsc::{self, Receiver};

    const OBJ: ObjectId = ObjectId(1);

    fn store_with(attrs: &[(&str, &str)]) -> (MemoryStore, Receiver<ChangeNotice>) {
        let (tx, rx) = mpsc::channel();
        let mut store = MemoryStore::new(tx);
        store.insert_object(OBJ);
        for (name, text) in attrs {
            store.set_text(OBJ, name, *text);
        }
        (store, rx)
    }

    fn single_spec() -> SliderSpec {
        let mut spec = SliderSpec::new("Volume", OBJ);
        spec.value_attribute = Some("volume".into());
        spec.min_attribute = Some("min".into());
        spec.max_attribute = Some("max".into());
        spec.step_value = 5.0;
        spec
    }

    fn range_spec() -> SliderSpec {
        let mut spec = SliderSpec::new("Band", OBJ);
        spec.mode = SliderMode::Range;
        spec.lower_bound_attribute = Some("lo".into());
        spec.upper_bound_attribute = Some("hi".into());
        spec.min_attribute = Some("min".into());
        spec.max_attribute = Some("max".into());
        spec.step_value = 10.0;
        spec
    }

    #[test]
    fn unset_single_value_displays_the_midpoint() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100")]);
        let widget = SliderWidget::new(single_spec());
        let view = widget.view(&store);
        assert_eq!(view.display, DisplayValue::Single(50.0));
        assert_eq!(view.value, SliderValue::Single(None));
        // No value: the tooltip shows the placeholder.
        assert_eq!(view.tooltip.as_deref(), Some("--"));
    }

    #[test]
    fn unset_range_bounds_display_one_step_inside() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100")]);
        let widget = SliderWidget::new(range_spec());
        let view = widget.view(&store);
        assert_eq!(
            view.display,
            DisplayValue::Range {
                lower: 10.0,
                upper: 90.0
            }
        );
        // Missing bounds are a settings problem in range mode.
        assert!(view.settings_error);
    }

    #[test]
    fn settings_problem_blocks_nudging() {
        let (mut store, _rx) = store_with(&[("min", "50"), ("max", "30"), ("volume", "40")]);
        let mut widget = SliderWidget::new(single_spec());
        widget.nudge(&mut store, 1.0).unwrap();
        assert_eq!(store.get_raw(OBJ, "volume").as_deref(), Some("40"));

        let view = widget.view(&store);
        assert!(view.settings_error);
        assert!(!view.disabled);
        assert_eq!(
            view.alert.as_deref(),
            Some("Minimum value 50 should be less than the maximum value 30")
        );
    }

    #[test]
    fn nudge_writes_through_the_source() {
        let (mut store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "40")]);
        let mut widget = SliderWidget::new(single_spec());
        widget.nudge(&mut store, 1.0).unwrap();
        assert_eq!(store.get_number(OBJ, "volume"), Some(45.0));
        widget.nudge(&mut store, -2.0).unwrap();
        assert_eq!(store.get_number(OBJ, "volume"), Some(35.0));
    }

    #[test]
    fn nudge_clamps_to_the_track() {
        let (mut store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "98")]);
        let mut widget = SliderWidget::new(single_spec());
        widget.nudge(&mut store, 1.0).unwrap();
        assert_eq!(store.get_number(OBJ, "volume"), Some(100.0));
        widget.nudge(&mut store, 1.0).unwrap();
        assert_eq!(store.get_number(OBJ, "volume"), Some(100.0));
    }

    #[test]
    fn upper_handle_stops_at_the_configured_maximum() {
        let (mut store, _rx) = store_with(&[
            ("min", "0"),
            ("max", "100"),
            ("lo", "20"),
            ("hi", "95"),
        ]);
        let mut widget = SliderWidget::new(range_spec());
        widget.toggle_handle();
        assert_eq!(widget.active_handle(), ActiveHandle::Upper);

        widget.nudge(&mut store, 1.0).unwrap();
        assert_eq!(store.get_number(OBJ, "hi"), Some(100.0));
    }

    #[test]
    fn lower_handle_cannot_cross_the_upper() {
        let (mut store, _rx) = store_with(&[
            ("min", "0"),
            ("max", "100"),
            ("lo", "40"),
            ("hi", "50"),
        ]);
        let mut widget = SliderWidget::new(range_spec());
        widget.nudge(&mut store, 3.0).unwrap();
        assert_eq!(store.get_number(OBJ, "lo"), Some(50.0));
    }

    #[test]
    fn lower_handle_tolerates_an_upper_below_the_minimum() {
        let (mut store, _rx) = store_with(&[
            ("min", "0"),
            ("max", "100"),
            ("lo", "2"),
            ("hi", "-5"),
        ]);
        let mut widget = SliderWidget::new(range_spec());
        widget.nudge(&mut store, -1.0).unwrap();
        assert_eq!(store.get_number(OBJ, "lo"), Some(0.0));
    }

    #[test]
    fn readonly_spec_is_disabled_and_silent() {
        let (mut store, _rx) = store_with(&[("min", "50"), ("max", "30"), ("volume", "40")]);
        let mut spec = single_spec();
        spec.read_only = true;
        let mut widget = SliderWidget::new(spec);

        let view = widget.view(&store);
        assert!(view.disabled);
        // Externally disabled controls do not alert, even with bad settings.
        assert_eq!(view.alert, None);

        widget.nudge(&mut store, 1.0).unwrap();
        assert_eq!(store.get_raw(OBJ, "volume").as_deref(), Some("40"));
    }

    #[test]
    fn readonly_value_attribute_disables() {
        let (mut store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "40")]);
        store.mark_readonly(OBJ, "volume");
        let widget = SliderWidget::new(single_spec());
        assert!(widget.view(&store).disabled);
    }

    #[test]
    fn alert_precedence_settings_then_external_then_values() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "150")]);
        let mut widget = SliderWidget::new(single_spec());

        // Out-of-range value alone.
        assert_eq!(
            widget.view(&store).alert.as_deref(),
            Some("Value 150 should be less than the maximum 100")
        );

        // External validation feedback outranks value problems.
        widget.handle_notice(&ChangeNotice::Validation {
            object: OBJ,
            attribute: "volume".into(),
            reason: "Volume is out of stock".into(),
        });
        assert_eq!(
            widget.view(&store).alert.as_deref(),
            Some("Volume is out of stock")
        );

        // A data update clears the external alert again.
        widget.handle_notice(&ChangeNotice::Updated {
            object: OBJ,
            attribute: Some("volume".into()),
        });
        assert_eq!(
            widget.view(&store).alert.as_deref(),
            Some("Value 150 should be less than the maximum 100")
        );
    }

    #[test]
    fn validation_for_other_attributes_is_ignored() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "40")]);
        let mut widget = SliderWidget::new(single_spec());
        widget.handle_notice(&ChangeNotice::Validation {
            object: OBJ,
            attribute: "unrelated".into(),
            reason: "nope".into(),
        });
        assert_eq!(widget.view(&store).alert, None);
    }

    #[test]
    fn empty_tooltip_template_suppresses_the_tooltip() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "40")]);
        let mut spec = single_spec();
        spec.tooltip = String::new();
        let widget = SliderWidget::new(spec);
        assert_eq!(widget.view(&store).tooltip, None);
    }

    #[test]
    fn tooltip_follows_the_active_handle() {
        let (store, _rx) = store_with(&[
            ("min", "0"),
            ("max", "100"),
            ("lo", "20"),
            ("hi", "80"),
        ]);
        let mut widget = SliderWidget::new(range_spec());
        assert_eq!(widget.view(&store).tooltip.as_deref(), Some("20"));
        widget.toggle_handle();
        assert_eq!(widget.view(&store).tooltip.as_deref(), Some("80"));
    }

    #[test]
    fn commit_without_action_or_value_is_skipped() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100")]);
        let mut runner = RecordingRunner::default();

        let mut widget = SliderWidget::new(single_spec());
        assert_eq!(widget.commit(&store, &mut runner), CommitOutcome::Skipped);

        let mut spec = single_spec();
        spec.on_change = Some("volume_changed".into());
        let mut widget = SliderWidget::new(spec);
        // Value attribute unset: still skipped.
        assert_eq!(widget.commit(&store, &mut runner), CommitOutcome::Skipped);
        assert!(runner.invoked.is_empty());
    }

    #[test]
    fn failed_action_becomes_the_alert() {
        let (store, _rx) = store_with(&[("min", "0"), ("max", "100"), ("volume", "40")]);
        let mut runner = RecordingRunner {
            fail_with: Some("backend offline".into()),
            ..Default::default()
        };
        let mut spec = single_spec();
        spec.on_change = Some("volume_changed".into());
        let mut widget = SliderWidget::new(spec);

        let outcome = widget.commit(&store, &mut runner);
        assert!(matches!(outcome, CommitOutcome::Failed(_)));
        assert_eq!(
            widget.view(&store).alert.as_deref(),
            Some("An error occurred while executing action volume_changed: backend offline")
        );
    }

    #[derive(Default)]
    struct RecordingRunner {
        invoked: Vec<(String, ObjectId)>,
        fail_with: Option<String>,
    }

    impl ActionRunner for RecordingRunner {
        fn invoke(&mut self, action: &str, target: ObjectId) -> Result<(), ActionError> {
            self.invoked.push((action.to_string(), target));
            match &self.fail_with {
                Some(message) => Err(ActionError {
                    action: action.to_string(),
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }
}
