//! Ordered inline-style edits computed by the normalizers and applied in one go.

use crate::style_attr::Declaration;
use crate::{NodeKey, VisualHost};

/// A batch of inline declarations. Setting a property twice keeps the last
/// value at the position of the first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMutation {
    declarations: Vec<Declaration>,
}

impl StyleMutation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self
            .declarations
            .iter_mut()
            .find(|decl| decl.property == property)
        {
            existing.value = value;
            return;
        }
        self.declarations.push(Declaration {
            property: property.to_owned(),
            value,
        });
    }

    /// Builder form of [`StyleMutation::set`].
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|decl| (decl.property.as_str(), decl.value.as_str()))
    }

    /// Write every declaration to `node`'s inline style, in order.
    ///
    /// # Errors
    /// Returns the first host write error; earlier declarations stay applied.
    pub fn apply<H>(&self, host: &mut H, node: NodeKey) -> anyhow::Result<()>
    where
        H: VisualHost + ?Sized,
    {
        for (property, value) in self.iter() {
            host.set_style_property(node, property, value)?;
        }
        Ok(())
    }
}
