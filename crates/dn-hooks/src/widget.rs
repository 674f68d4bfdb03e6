//! Named widget registry.
//!
//! Widgets are registered once at startup through [`WidgetRegistryBuilder`].
//! [`WidgetRegistryBuilder::build`] produces an immutable [`WidgetRegistry`]
//! that renderers share for the rest of the process.
//!
//! Pages embed widgets as self-closing component tags:
//!
//! ```html
//! <SpringOverview />
//! <AppLearnPlan track="software" />
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

/// Self-closing component tag with double-quoted attributes.
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Z][A-Za-z0-9]*)((?:\s+[A-Za-z_][-A-Za-z0-9_]*="[^"]*")*)\s*/>"#).unwrap()
});

static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][-A-Za-z0-9_]*)="([^"]*)""#).unwrap());

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][-A-Za-z0-9_]*)\s*\}\}").unwrap());

/// Attributes passed to a widget from its embed tag.
pub type WidgetAttrs = BTreeMap<String, String>;

/// Renderable unit embedded in pages by name.
pub trait Widget: Send + Sync {
    /// Render the widget to HTML.
    fn render(&self, attrs: &WidgetAttrs) -> String;
}

/// Widget rendered from an HTML template with `{{attr}}` placeholders.
///
/// Missing attributes render as empty strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateWidget {
    template: String,
}

impl TemplateWidget {
    /// Create a template widget.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Widget for TemplateWidget {
    fn render(&self, attrs: &WidgetAttrs) -> String {
        PLACEHOLDER_RE
            .replace_all(&self.template, |caps: &Captures<'_>| {
                attrs.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

/// Error returned when registering a widget.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// Name already registered.
    #[error("Widget already registered: {0}")]
    Duplicate(String),
    /// Name is not a component name (`UpperCamelCase`).
    #[error("Invalid widget name: \"{0}\" (must start with an uppercase letter)")]
    InvalidName(String),
}

/// Append-only registration phase.
#[derive(Default)]
pub struct WidgetRegistryBuilder {
    order: Vec<String>,
    widgets: HashMap<String, Arc<dyn Widget>>,
}

impl WidgetRegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget under a component name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Result<&mut Self, WidgetError> {
        let name = name.into();
        if !is_component_name(&name) {
            return Err(WidgetError::InvalidName(name));
        }
        if self.widgets.contains_key(&name) {
            return Err(WidgetError::Duplicate(name));
        }

        tracing::debug!(widget = %name, "Registered widget");
        self.order.push(name.clone());
        self.widgets.insert(name, Arc::new(widget));
        Ok(self)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> WidgetRegistry {
        WidgetRegistry {
            order: self.order,
            widgets: self.widgets,
        }
    }
}

/// Result of expanding widget embeds in a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expansion {
    /// HTML with registered widgets rendered in place.
    pub html: String,
    /// Embeds that name unregistered widgets (left untouched).
    pub warnings: Vec<String>,
}

/// Immutable widget registry.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    order: Vec<String>,
    widgets: HashMap<String, Arc<dyn Widget>>,
}

impl WidgetRegistry {
    /// Look up a widget.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Widget> {
        self.widgets.get(name).map(AsRef::as_ref)
    }

    /// Render a widget by name.
    #[must_use]
    pub fn render(&self, name: &str, attrs: &WidgetAttrs) -> Option<String> {
        self.get(name).map(|widget| widget.render(attrs))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no widget is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replace embeds of registered widgets with their rendered HTML.
    #[must_use]
    pub fn expand(&self, html: &str) -> Expansion {
        let mut warnings = Vec::new();
        let expanded = EMBED_RE.replace_all(html, |caps: &Captures<'_>| {
            let name = &caps[1];
            let Some(widget) = self.get(name) else {
                warnings.push(format!("Unknown widget: {name}"));
                return caps[0].to_owned();
            };
            let attrs = ATTR_RE
                .captures_iter(&caps[2])
                .map(|attr| (attr[1].to_owned(), attr[2].to_owned()))
                .collect();
            widget.render(&attrs)
        });

        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        Expansion {
            html: expanded.into_owned(),
            warnings,
        }
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("widgets", &self.order)
            .finish()
    }
}

fn is_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}
