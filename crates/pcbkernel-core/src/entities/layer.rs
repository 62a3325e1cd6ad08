//! Reference to a named board/schematic layer.
//!
//! The kernel does not own a layer-stack registry (that belongs to a board's
//! configuration, out of scope here); a `Layer` is just the validated,
//! immutable identifier an entity uses to refer to one, e.g. `"top_copper"`
//! or `"top_silkscreen"`. Two `Layer`s are equal iff their names are equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Layer(String);

impl Layer {
    pub fn new(name: impl Into<String>) -> KernelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KernelError::invalid_value("Layer", "layer name must not be empty"));
        }
        Ok(Layer(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn top_copper() -> Layer {
        Layer("top_copper".to_string())
    }

    pub fn bottom_copper() -> Layer {
        Layer("bottom_copper".to_string())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Layer {
    type Error = KernelError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Layer::new(value)
    }
}

impl From<Layer> for String {
    fn from(value: Layer) -> String {
        value.0
    }
}

impl AsRef<str> for Layer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_name() {
        assert!(Layer::new("   ").is_err());
    }

    #[test]
    fn accepts_known_names() {
        assert_eq!(Layer::top_copper().as_str(), "top_copper");
    }
}
