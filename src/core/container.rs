use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Element id used when the caller does not provide one.
pub const DEFAULT_CONTAINER_ID: &str = "reactive-plot";

/// Ordered inline style declarations for the plot container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStyle {
    declarations: IndexMap<String, String>,
}

impl ContainerStyle {
    /// Style without any declaration.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            declarations: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    /// Renders the declarations as an inline `style` attribute value.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self::empty()
            .with("position", "relative")
            .with("display", "inline-block")
    }
}

/// What the host renders as the plot's container element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub id: String,
    pub class: Option<String>,
    pub style: ContainerStyle,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            id: DEFAULT_CONTAINER_ID.to_owned(),
            class: None,
            style: ContainerStyle::default(),
        }
    }
}
