use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{ContactForm, FieldKey};

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

/// The document a [`FormSubmissionHandler`](crate::handler::FormSubmissionHandler) drives.
///
/// Every method takes `&self` so one page can be shared between the synchronous
/// validation phase and the spawned delivery task.
pub trait FormPage: Send + Sync {
    fn has_element(&self, id: &str) -> bool;
    /// Current value of an input, `None` when no input carries that id.
    fn input_value(&self, id: &str) -> Option<String>;
    /// Resets the text of every element carrying `class`.
    fn clear_error_messages(&self, class: &str);
    fn set_error_text(&self, id: &str, text: &str);
    /// Blocking message box. Returns once the user has dismissed it.
    fn alert(&self, message: &str);
    fn navigate(&self, url: &str);
}

/// A submit event raised by a form.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    form_id: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            default_prevented: false,
        }
    }
    pub fn form_id(&self) -> &str {
        &self.form_id
    }
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Default)]
struct ErrorElement {
    class: String,
    text: String,
}

/// A user-visible effect on an [`InMemoryPage`], in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Alert(String),
    Navigate(String),
}

#[derive(Debug, Default)]
struct PageState {
    forms: Vec<String>,
    inputs: HashMap<String, String>,
    error_elements: BTreeMap<String, ErrorElement>,
    events: Vec<PageEvent>,
}

/// A page held entirely in memory. Records alerts and navigations so callers can inspect them.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    state: Mutex<PageState>,
}

impl InMemoryPage {
    /// The contact form markup: `contactForm`, four empty inputs and their error elements.
    pub fn contact_form() -> Self {
        let page = Self::default();
        {
            let mut state = page.state();
            state.forms.push(CONTACT_FORM_ID.to_owned());
            for key in FieldKey::ALL {
                state.inputs.insert(key.as_str().to_owned(), String::new());
                state.error_elements.insert(
                    key.error_element_id(),
                    ErrorElement {
                        class: ERROR_MESSAGE_CLASS.to_owned(),
                        text: String::new(),
                    },
                );
            }
        }
        page
    }

    pub fn with_error_element(self, id: &str, class: &str, text: &str) -> Self {
        self.state().error_elements.insert(
            id.to_owned(),
            ErrorElement {
                class: class.to_owned(),
                text: text.to_owned(),
            },
        );
        self
    }

    pub fn without_element(self, id: &str) -> Self {
        {
            let mut state = self.state();
            state.forms.retain(|form| form != id);
            state.inputs.remove(id);
            state.error_elements.remove(id);
        }
        self
    }

    pub fn fill(&self, key: FieldKey, value: &str) {
        self.state()
            .inputs
            .insert(key.as_str().to_owned(), value.to_owned());
    }

    pub fn error_text(&self, id: &str) -> Option<String> {
        self.state()
            .error_elements
            .get(id)
            .map(|element| element.text.clone())
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.state().events.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state()
            .events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Alert(message) => Some(message.clone()),
                PageEvent::Navigate(_) => None,
            })
            .collect()
    }

    pub fn history(&self) -> Vec<String> {
        self.state()
            .events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Navigate(url) => Some(url.clone()),
                PageEvent::Alert(_) => None,
            })
            .collect()
    }

    pub fn location(&self) -> Option<String> {
        self.history().pop()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormPage for InMemoryPage {
    fn has_element(&self, id: &str) -> bool {
        let state = self.state();
        state.forms.iter().any(|form| form == id)
            || state.inputs.contains_key(id)
            || state.error_elements.contains_key(id)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.state().inputs.get(id).cloned()
    }

    fn clear_error_messages(&self, class: &str) {
        self.state()
            .error_elements
            .values_mut()
            .filter(|element| element.class == class)
            .for_each(|element| element.text.clear());
    }

    fn set_error_text(&self, id: &str, text: &str) {
        if let Some(element) = self.state().error_elements.get_mut(id) {
            element.text = text.to_owned();
        }
    }

    fn alert(&self, message: &str) {
        self.state().events.push(PageEvent::Alert(message.to_owned()));
    }

    fn navigate(&self, url: &str) {
        self.state().events.push(PageEvent::Navigate(url.to_owned()));
    }
}

/// Renders the contact form on a terminal: errors go to stderr, alerts to stdout.
#[derive(Debug)]
pub struct TerminalPage {
    form: ContactForm,
    errors: Mutex<BTreeMap<String, String>>,
}

impl TerminalPage {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            errors: Mutex::new(BTreeMap::new()),
        }
    }

    fn errors(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormPage for TerminalPage {
    fn has_element(&self, id: &str) -> bool {
        id == CONTACT_FORM_ID
            || FieldKey::ALL
                .iter()
                .any(|key| key.as_str() == id || key.error_element_id() == id)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == id)
            .map(|key| self.form.value(key).to_owned())
    }

    fn clear_error_messages(&self, class: &str) {
        if class == ERROR_MESSAGE_CLASS {
            self.errors().clear();
        }
    }

    fn set_error_text(&self, id: &str, text: &str) {
        eprintln!("{id}: {text}");
        self.errors().insert(id.to_owned(), text.to_owned());
    }

    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn navigate(&self, url: &str) {
        tracing::info!(%url, "Redirecting");
        println!("Redirecting to {url}");
    }
}
