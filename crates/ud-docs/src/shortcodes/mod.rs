//! Handlers for the userdocs shortcodes.

mod code;
mod codetab;
mod visibility;

pub use code::CodeShortcode;
pub use codetab::{CodeTabShortcode, NOT_FOUND_PLACEHOLDER, NO_ID_PLACEHOLDER};
pub use visibility::{LoggedInShortcode, NotLoggedInShortcode};

use serde_json::Value;
use ud_shortcode::ShortcodeError;
use ud_templates::TemplateRenderer;

use crate::DocsError;

/// Render `template`, attributing failures to `tag`.
fn render(
    templates: &dyn TemplateRenderer,
    tag: &str,
    template: &str,
    data: &Value,
) -> Result<String, ShortcodeError> {
    templates
        .render(template, data)
        .map_err(|err| DocsError::from(err).into_handler_error(tag))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use serde_json::Value;
    use ud_templates::{TemplateError, TemplateRenderer};

    /// Renderer that records calls and echoes `name:data`.
    #[derive(Default)]
    pub struct RecordingTemplates {
        pub calls: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingTemplates {
        pub fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TemplateRenderer for RecordingTemplates {
        fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
            self.calls
                .lock()
                .unwrap()
                .push((template.to_owned(), data.clone()));
            Ok(format!("{template}:{}", data["content"].as_str().unwrap_or_default()))
        }
    }

    /// Renderer that always fails.
    pub struct FailingTemplates;

    impl TemplateRenderer for FailingTemplates {
        fn render(&self, template: &str, _data: &Value) -> Result<String, TemplateError> {
            Err(TemplateError::NotFound(template.to_owned()))
        }
    }
}
