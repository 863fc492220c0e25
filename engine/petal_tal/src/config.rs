//! Rendering configuration.

use petal_value::ValueMap;

/// Options governing a single render.
#[derive(Clone, Debug)]
pub struct RenderingConfig {
    /// Keyword options exposed to expressions through the `options` root.
    pub keyword_options: ValueMap,
    /// The namespace prefix of directive attributes and structural
    /// elements. `tal` unless overridden.
    pub namespace_prefix: String,
}

impl RenderingConfig {
    /// Configuration with the given keyword options.
    pub fn with_options(keyword_options: ValueMap) -> Self {
        RenderingConfig {
            keyword_options,
            ..Self::default()
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        RenderingConfig {
            keyword_options: ValueMap::default(),
            namespace_prefix: "tal".to_string(),
        }
    }
}
