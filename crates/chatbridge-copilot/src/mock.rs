//! Recording `PageDriver` mock for adapter-logic tests.
//!
//! Elements are registered with the list of selectors they match (the mock
//! does no CSS parsing); every mutating call is recorded in order so tests can
//! assert exact dispatch sequences.

use std::sync::Mutex;

use async_trait::async_trait;
use chatbridge_core::{BridgeError, FilePayload};

use crate::driver::{PageDriver, SyntheticEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SetValue { selector: String, value: String },
    Dispatch { selector: String, event: SyntheticEvent },
    Focus { selector: String },
    Click { selector: String },
    AssignFiles { selector: String, file: String },
    DragDrop { selector: String, file: String },
    SubmitForm { selector: String },
}

#[derive(Debug, Clone, Default)]
struct MockElement {
    selectors: Vec<String>,
    value: String,
    enabled: bool,
    /// `is_enabled` reports false this many times before `enabled` applies.
    enabled_after_checks: usize,
    has_form_ancestor: bool,
}

impl MockElement {
    fn matches(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }
}

#[derive(Default)]
struct MockState {
    elements: Vec<MockElement>,
    calls: Vec<Call>,
    mounts_on_click: Vec<(String, MockElement)>,
    is_enabled_calls: usize,
    fail_dispatch: bool,
}

pub(crate) struct MockPage {
    state: Mutex<MockState>,
}

impl MockPage {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    fn add_element(&self, element: MockElement) {
        self.state.lock().unwrap().elements.push(element);
    }

    pub(crate) fn add_textarea(&self, selectors: &[&str], value: &str) {
        self.add_element(MockElement {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            value: value.to_string(),
            enabled: true,
            ..MockElement::default()
        });
    }

    pub(crate) fn add_textarea_in_form(&self, selectors: &[&str], value: &str) {
        self.add_element(MockElement {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            value: value.to_string(),
            enabled: true,
            has_form_ancestor: true,
            ..MockElement::default()
        });
    }

    pub(crate) fn add_button(&self, selectors: &[&str], enabled: bool) {
        self.add_element(MockElement {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            enabled,
            ..MockElement::default()
        });
    }

    /// Button that reports disabled for the first `checks` enabled-probes.
    pub(crate) fn add_button_enabled_after(&self, selectors: &[&str], checks: usize) {
        self.add_element(MockElement {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            enabled: true,
            enabled_after_checks: checks,
            ..MockElement::default()
        });
    }

    pub(crate) fn add_file_input(&self) {
        self.add_element(MockElement {
            selectors: vec![r#"input[type="file"]"#.to_string()],
            enabled: true,
            ..MockElement::default()
        });
    }

    /// Lazily mount a file input when `button_selector` is clicked, the way
    /// the real page mounts one after its upload button opens a picker.
    pub(crate) fn mount_file_input_on_click(&self, button_selector: &str) {
        self.state.lock().unwrap().mounts_on_click.push((
            button_selector.to_string(),
            MockElement {
                selectors: vec![r#"input[type="file"]"#.to_string()],
                enabled: true,
                ..MockElement::default()
            },
        ));
    }

    pub(crate) fn fail_dispatch(&self) {
        self.state.lock().unwrap().fail_dispatch = true;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn is_enabled_calls(&self) -> usize {
        self.state.lock().unwrap().is_enabled_calls
    }

    pub(crate) fn value_of(&self, selector: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .elements
            .iter()
            .find(|e| e.matches(selector))
            .map(|e| e.value.clone())
    }
}

fn missing(selector: &str) -> BridgeError {
    BridgeError::ElementNotFound(selector.to_string())
}

#[async_trait]
impl PageDriver for MockPage {
    async fn exists(&self, selector: &str) -> Result<bool, BridgeError> {
        let state = self.state.lock().unwrap();
        Ok(state.elements.iter().any(|e| e.matches(selector)))
    }

    async fn value(&self, selector: &str) -> Result<String, BridgeError> {
        let state = self.state.lock().unwrap();
        state
            .elements
            .iter()
            .find(|e| e.matches(selector))
            .map(|e| e.value.clone())
            .ok_or_else(|| missing(selector))
    }

    async fn set_value(&self, selector: &str, value: &str) -> Result<(), BridgeError> {
        let mut state = self.state.lock().unwrap();
        let element = state
            .elements
            .iter_mut()
            .find(|e| e.matches(selector))
            .ok_or_else(|| missing(selector))?;
        element.value = value.to_string();
        state.calls.push(Call::SetValue {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn dispatch(&self, selector: &str, event: SyntheticEvent) -> Result<(), BridgeError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_dispatch {
            return Err(BridgeError::Dispatch(format!(
                "forced {} failure",
                event.kind()
            )));
        }
        if !state.elements.iter().any(|e| e.matches(selector)) {
            return Err(missing(selector));
        }
        state.calls.push(Call::Dispatch {
            selector: selector.to_string(),
            event,
        });
        Ok(())
    }

    async fn focus(&self, selector: &str) -> Result<(), BridgeError> {
        let mut state = self.state.lock().unwrap();
        if !state.elements.iter().any(|e| e.matches(selector)) {
            return Err(missing(selector));
        }
        state.calls.push(Call::Focus {
            selector: selector.to_string(),
        });
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BridgeError> {
        let mut state = self.state.lock().unwrap();
        if !state.elements.iter().any(|e| e.matches(selector)) {
            return Err(missing(selector));
        }
        state.calls.push(Call::Click {
            selector: selector.to_string(),
        });
        let mounted: Vec<MockElement> = {
            let mut kept = Vec::new();
            let mut out = Vec::new();
            for (sel, element) in state.mounts_on_click.drain(..) {
                if sel == selector {
                    out.push(element);
                } else {
                    kept.push((sel, element));
                }
            }
            state.mounts_on_click = kept;
            out
        };
        state.elements.extend(mounted);
        Ok(())
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool, BridgeError> {
        let mut state = self.state.lock().unwrap();
        state.is_enabled_calls += 1;
        let element = state
            .elements
            .iter_mut()
            .find(|e| e.matches(selector))
            .ok_or_else(|| missing(selector))?;
        if element.enabled_after_checks > 0 {
            element.enabled_after_checks -= 1;
            return Ok(false);
        }
        Ok(element.enabled)
    }

    async fn assign_files(&self, selector: &str, file: &FilePayload) -> Result<(), BridgeError> {
        let mut state = self.state.lock().unwrap();
        if !state.elements.iter().any(|e| e.matches(selector)) {
            return Err(missing(selector));
        }
        state.calls.push(Call::AssignFiles {
            selector: selector.to_string(),
            file: file.name.clone(),
        });
        Ok(())
    }

    async fn dispatch_drag_drop(
        &self,
        selector: &str,
        file: &FilePayload,
    ) -> Result<(), BridgeError> {
        let mut state = self.state.lock().unwrap();
        if !state.elements.iter().any(|e| e.matches(selector)) {
            return Err(missing(selector));
        }
        state.calls.push(Call::DragDrop {
            selector: selector.to_string(),
            file: file.name.clone(),
        });
        Ok(())
    }

    async fn submit_ancestor_form(&self, selector: &str) -> Result<bool, BridgeError> {
        let mut state = self.state.lock().unwrap();
        let has_form = state
            .elements
            .iter()
            .find(|e| e.matches(selector))
            .ok_or_else(|| missing(selector))?
            .has_form_ancestor;
        if has_form {
            state.calls.push(Call::SubmitForm {
                selector: selector.to_string(),
            });
        }
        Ok(has_form)
    }
}
