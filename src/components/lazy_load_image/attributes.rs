use dioxus::dioxus_core::AttributeValue;
use dioxus::prelude::*;

/// Configuration keys only meaningful to the lazy loading and placeholder
/// logic. They are never forwarded to the `img` element.
pub const LAZY_ONLY_KEYS: &[&str] = &[
    "afterLoad",
    "beforeLoad",
    "delayMethod",
    "delayTime",
    "effect",
    "placeholder",
    "placeholderSrc",
    "scrollPosition",
    "threshold",
    "visibleByDefault",
    "wrapperClassName",
];

fn same_key(a: &str, b: &str) -> bool {
    let mut a = a.chars().filter(|c| *c != '_' && *c != '-');
    let mut b = b.chars().filter(|c| *c != '_' && *c != '-');
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(ca), Some(cb)) if ca.eq_ignore_ascii_case(&cb) => (),
            _ => return false,
        }
    }
}

/// `afterLoad`, `after_load` and `after-load` all name the same key
pub fn is_lazy_only(name: &str) -> bool {
    LAZY_ONLY_KEYS.iter().any(|key| same_key(key, name))
}

/// Attributes handed verbatim to the underlying `img` element.
///
/// Built with [`ImgAttributes::partition`], which guarantees none of the
/// [`LAZY_ONLY_KEYS`] is present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImgAttributes(Vec<Attribute>);
impl ImgAttributes {
    /// Splits `attributes` into the ones forwarded to the `img` element and
    /// the lazy-only ones, in their original order.
    pub fn partition(attributes: Vec<Attribute>) -> (Self, Vec<Attribute>) {
        let (lazy_only, forwarded): (Vec<_>, Vec<_>) = attributes
            .into_iter()
            .partition(|attribute| is_lazy_only(attribute.name));
        for attribute in lazy_only.iter() {
            log::warn!(
                "LazyLoadImage - `{}` is a lazy-only setting, not forwarded to the img element",
                attribute.name
            );
        }
        (Self(forwarded), lazy_only)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|attribute| attribute.name == name)
    }

    /// Text form of the last value given for `name`
    pub fn text(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .rev()
            .find(|attribute| attribute.name == name)
            .and_then(|attribute| match &attribute.value {
                AttributeValue::Text(text) => Some(text.clone()),
                AttributeValue::Int(int) => Some(int.to_string()),
                AttributeValue::Float(float) => Some(float.to_string()),
                AttributeValue::Bool(b) => Some(b.to_string()),
                _ => None,
            })
    }

    pub fn width(&self) -> Option<String> {
        self.text("width")
    }
    pub fn height(&self) -> Option<String> {
        self.text("height")
    }
    pub fn class(&self) -> Option<String> {
        self.text("class")
    }
    pub fn style(&self) -> Option<String> {
        self.text("style")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Attribute> {
        self.0
    }
}
