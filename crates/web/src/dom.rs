//! Loading and error placeholders

use boxoffice_core::feedback::{LOADING_MARKUP, error_markup};
use web_sys::Element;

/// Replace the element's content with a spinner
pub fn show_loading(element: &Element) {
    element.set_inner_html(LOADING_MARKUP);
}

/// Replace the element's content with an error banner.
///
/// `message` is inserted as HTML, not text.
pub fn show_error(element: &Element, message: &str) {
    element.set_inner_html(&error_markup(message));
}
