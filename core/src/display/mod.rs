//! Display targets the widgets write into
//!
//! The widgets never own their targets. A target is shared by reference and
//! mutated through `&self`, so several in-flight operations may write to the
//! same element; whichever writes last is what the user sees.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::totp::QrImage;

/// A text-bearing UI element owned by the caller
pub trait DisplayLabel: Send + Sync {
    /// Replace the element's content with `text`
    fn set_text(&self, text: &str);
}

/// A display element that can also have a QR code drawn into it
pub trait QrTarget: DisplayLabel {
    /// Draw a rendered code into the element
    fn draw(&self, image: QrImage);
}

/// A source whose current value is read at call time
pub trait ValueHolder: Send + Sync {
    fn value(&self) -> String;
}

impl<T: DisplayLabel + ?Sized> DisplayLabel for Arc<T> {
    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

impl<T: QrTarget + ?Sized> QrTarget for Arc<T> {
    fn draw(&self, image: QrImage) {
        (**self).draw(image)
    }
}

impl<T: ValueHolder + ?Sized> ValueHolder for Arc<T> {
    fn value(&self) -> String {
        (**self).value()
    }
}

#[derive(Debug, Default)]
struct LabelState {
    text: String,
    code: Option<QrImage>,
}

/// In-memory display element
///
/// Cloning yields another handle to the same element. Setting the text
/// replaces the whole content, dropping any code drawn earlier.
#[derive(Debug, Clone, Default)]
pub struct Label {
    state: Arc<Mutex<LabelState>>,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a label with initial text
    pub fn with_text(text: impl Into<String>) -> Self {
        let label = Self::new();
        label.lock().text = text.into();
        label
    }

    /// Current text content
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Code currently drawn into the element, if any
    pub fn code(&self) -> Option<QrImage> {
        self.lock().code.clone()
    }

    fn lock(&self) -> MutexGuard<'_, LabelState> {
        // A writer panicking mid-update leaves a plain string behind, still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DisplayLabel for Label {
    fn set_text(&self, text: &str) {
        let mut state = self.lock();
        state.text = text.to_string();
        state.code = None;
    }
}

impl QrTarget for Label {
    fn draw(&self, image: QrImage) {
        self.lock().code = Some(image);
    }
}

/// In-memory input field holding a single value
#[derive(Debug, Clone, Default)]
pub struct Field {
    value: Arc<Mutex<String>>,
}

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(value.into())),
        }
    }

    /// Replace the field's value
    pub fn set(&self, value: impl Into<String>) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = value.into();
    }
}

impl ValueHolder for Field {
    fn value(&self) -> String {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
