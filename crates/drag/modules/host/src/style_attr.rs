//! Inline style text (`style="..."`) parsing and serialization.
//! Spec: <https://www.w3.org/TR/css-style-attr/>

/// A single inline declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase.
    pub property: String,
    /// Raw value trimmed of surrounding ASCII whitespace. May contain spaces.
    pub value: String,
}

/// Ordered inline declarations, one entry per property.
///
/// Keeps first-insertion order so serialized text stays stable across edits,
/// the way `CSSStyleDeclaration.cssText` behaves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    /// Parse style text, keeping the last value of duplicated properties.
    ///
    /// Items without a colon, or with an empty property or value, are
    /// skipped. No `!important` handling.
    pub fn parse(input: &str) -> Self {
        let mut style = Self::default();
        for (property, value) in input.split(';').filter_map(|item| item.split_once(':')) {
            if !trim_css_whitespace(property).is_empty() && !trim_css_whitespace(value).is_empty() {
                style.set(property, value);
            }
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let property = property.to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value.as_str())
    }

    /// Set a declaration. An empty value removes it.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = trim_css_whitespace(property).to_ascii_lowercase();
        let value = trim_css_whitespace(value);
        if value.is_empty() {
            self.remove(&property);
            return;
        }
        if let Some(existing) = self
            .declarations
            .iter_mut()
            .find(|decl| decl.property == property)
        {
            value.clone_into(&mut existing.value);
            return;
        }
        self.declarations.push(Declaration {
            property,
            value: value.to_owned(),
        });
    }

    pub fn remove(&mut self, property: &str) {
        let property = property.to_ascii_lowercase();
        self.declarations.retain(|decl| decl.property != property);
    }

    /// Serialize as `prop: value; prop: value;`.
    pub fn to_css_text(&self) -> String {
        let mut out = String::new();
        for decl in &self.declarations {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&decl.property);
            out.push_str(": ");
            out.push_str(&decl.value);
            out.push(';');
        }
        out
    }
}

fn trim_css_whitespace(text: &str) -> &str {
    text.trim_matches(|character: char| character.is_ascii_whitespace())
}
