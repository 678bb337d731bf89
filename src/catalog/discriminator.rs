//! Value extraction from catalogued objects.
//!
//! A [`Discriminator`] turns an application object into the [`IndexValue`] an
//! index stores for it, or into `None` when the object has nothing to offer.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Handle to state managed outside the catalog (an object store entry, say).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef(String);

impl ObjectRef {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ObjectRef(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value produced by a discriminator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IndexValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// A live reference to externally managed state. Never indexable.
    Persistent(ObjectRef),
    /// A reference that could not be resolved. Never indexable.
    Broken(ObjectRef),
}

impl IndexValue {
    /// Short name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            IndexValue::Text(_) => "text",
            IndexValue::Integer(_) => "integer",
            IndexValue::Float(_) => "float",
            IndexValue::Boolean(_) => "boolean",
            IndexValue::Persistent(_) => "persistent object",
            IndexValue::Broken(_) => "broken object",
        }
    }

    /// Whether a catalog may store this value.
    pub fn is_indexable(&self) -> bool {
        !matches!(self, IndexValue::Persistent(_) | IndexValue::Broken(_))
    }

    /// Textual rendering of an indexable value.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            IndexValue::Text(text) => Some(Cow::Borrowed(text)),
            IndexValue::Integer(n) => Some(Cow::Owned(n.to_string())),
            IndexValue::Float(x) => Some(Cow::Owned(x.to_string())),
            IndexValue::Boolean(b) => Some(Cow::Owned(b.to_string())),
            IndexValue::Persistent(_) | IndexValue::Broken(_) => None,
        }
    }

    /// Fail with a validation error on values a catalog cannot store.
    pub fn validate(&self) -> Result<()> {
        match self {
            IndexValue::Persistent(object) => Err(FolioError::validation(format!(
                "Catalog cannot index persistent object {object}"
            ))),
            IndexValue::Broken(object) => Err(FolioError::validation(format!(
                "Catalog cannot index broken object {object}"
            ))),
            _ => Ok(()),
        }
    }
}

impl From<&str> for IndexValue {
    fn from(text: &str) -> Self {
        IndexValue::Text(text.to_string())
    }
}

impl From<String> for IndexValue {
    fn from(text: String) -> Self {
        IndexValue::Text(text)
    }
}

impl From<i64> for IndexValue {
    fn from(n: i64) -> Self {
        IndexValue::Integer(n)
    }
}

impl From<f64> for IndexValue {
    fn from(x: f64) -> Self {
        IndexValue::Float(x)
    }
}

impl From<bool> for IndexValue {
    fn from(b: bool) -> Self {
        IndexValue::Boolean(b)
    }
}

/// Named attribute lookup used by [`Discriminator::Attribute`].
///
/// The default implementation has no attributes, so every lookup is absent.
pub trait Attributes {
    fn attribute(&self, _name: &str) -> Option<IndexValue> {
        None
    }
}

impl Attributes for str {}

impl Attributes for String {}

impl Attributes for IndexValue {}

impl<V> Attributes for HashMap<String, V>
where
    V: Clone + Into<IndexValue>,
{
    fn attribute(&self, name: &str) -> Option<IndexValue> {
        self.get(name).cloned().map(Into::into)
    }
}

impl<V> Attributes for BTreeMap<String, V>
where
    V: Clone + Into<IndexValue>,
{
    fn attribute(&self, name: &str) -> Option<IndexValue> {
        self.get(name).cloned().map(Into::into)
    }
}

impl Attributes for serde_json::Value {
    fn attribute(&self, name: &str) -> Option<IndexValue> {
        match self.get(name)? {
            serde_json::Value::String(text) => Some(IndexValue::Text(text.clone())),
            serde_json::Value::Bool(b) => Some(IndexValue::Boolean(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(IndexValue::Integer)
                .or_else(|| n.as_f64().map(IndexValue::Float)),
            _ => None,
        }
    }
}

/// How an index pulls its value out of an object.
pub enum Discriminator<O: ?Sized> {
    /// Compute the value with a function.
    Callable(Arc<dyn Fn(&O) -> Option<IndexValue> + Send + Sync>),
    /// Read a named attribute.
    Attribute(String),
}

impl<O: ?Sized> Discriminator<O> {
    /// Discriminate with a function.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&O) -> Option<IndexValue> + Send + Sync + 'static,
    {
        Discriminator::Callable(Arc::new(f))
    }

    /// Discriminate by attribute name. Blank names are rejected.
    pub fn attribute<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FolioError::configuration(
                "discriminator attribute name must not be empty",
            ));
        }
        Ok(Discriminator::Attribute(name))
    }

    /// Build a discriminator from configuration.
    ///
    /// Only attribute names can be configured; anything but a JSON string is
    /// rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(name) => Self::attribute(name.as_str()),
            other => Err(FolioError::configuration(format!(
                "discriminator value must be callable or a string, got {other}"
            ))),
        }
    }

    /// The attribute name, for attribute discriminators.
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            Discriminator::Attribute(name) => Some(name.as_str()),
            Discriminator::Callable(_) => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Discriminator::Callable(_))
    }
}

impl<O: ?Sized + Attributes> Discriminator<O> {
    /// Extract the value for `object`, `None` if it is absent.
    pub fn extract(&self, object: &O) -> Option<IndexValue> {
        match self {
            Discriminator::Callable(f) => f(object),
            Discriminator::Attribute(name) => object.attribute(name),
        }
    }
}

impl<O: ?Sized> Clone for Discriminator<O> {
    fn clone(&self) -> Self {
        match self {
            Discriminator::Callable(f) => Discriminator::Callable(Arc::clone(f)),
            Discriminator::Attribute(name) => Discriminator::Attribute(name.clone()),
        }
    }
}

impl<O: ?Sized> fmt::Debug for Discriminator<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discriminator::Callable(_) => f.write_str("Discriminator::Callable(..)"),
            Discriminator::Attribute(name) => {
                f.debug_tuple("Discriminator::Attribute").field(name).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_discriminator() {
        let discriminator = Discriminator::<str>::callable(|text| {
            if text.is_empty() {
                None
            } else {
                Some(IndexValue::from(text))
            }
        });

        assert_eq!(
            discriminator.extract("hello"),
            Some(IndexValue::Text("hello".to_string()))
        );
        assert_eq!(discriminator.extract(""), None);
        assert!(discriminator.is_callable());
    }

    #[test]
    fn test_attribute_discriminator() {
        let mut object = HashMap::new();
        object.insert("title".to_string(), IndexValue::from("Ulysses"));

        let discriminator = Discriminator::attribute("title").unwrap();
        assert_eq!(discriminator.attribute_name(), Some("title"));
        assert_eq!(
            discriminator.extract(&object),
            Some(IndexValue::from("Ulysses"))
        );

        let missing = Discriminator::attribute("author").unwrap();
        assert_eq!(missing.extract(&object), None);
    }

    #[test]
    fn test_plain_text_has_no_attributes() {
        let discriminator = Discriminator::<str>::attribute("title").unwrap();
        assert_eq!(discriminator.extract("anything"), None);
    }

    #[test]
    fn test_json_objects_expose_scalar_fields() {
        let object = serde_json::json!({
            "title": "Dubliners",
            "year": 1914,
            "rating": 4.5,
            "banned": false,
            "tags": ["short", "stories"],
        });

        let extract = |name: &str| Discriminator::attribute(name).unwrap().extract(&object);
        assert_eq!(extract("title"), Some(IndexValue::from("Dubliners")));
        assert_eq!(extract("year"), Some(IndexValue::Integer(1914)));
        assert_eq!(extract("rating"), Some(IndexValue::Float(4.5)));
        assert_eq!(extract("banned"), Some(IndexValue::Boolean(false)));
        assert_eq!(extract("tags"), None);
    }

    #[test]
    fn test_blank_attribute_name_is_rejected() {
        assert!(matches!(
            Discriminator::<str>::attribute(""),
            Err(FolioError::Configuration(_))
        ));
        assert!(Discriminator::<str>::attribute("  ").is_err());
    }

    #[test]
    fn test_from_json() {
        let discriminator =
            Discriminator::<serde_json::Value>::from_json(&serde_json::json!("body")).unwrap();
        assert_eq!(discriminator.attribute_name(), Some("body"));

        for bad in [
            serde_json::json!(1),
            serde_json::json!(null),
            serde_json::json!({"name": "body"}),
        ] {
            assert!(matches!(
                Discriminator::<serde_json::Value>::from_json(&bad),
                Err(FolioError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_value_validation_and_rendering() {
        assert!(IndexValue::from("text").validate().is_ok());
        assert_eq!(IndexValue::from(42_i64).as_text().as_deref(), Some("42"));
        assert_eq!(IndexValue::from(true).as_text().as_deref(), Some("true"));

        let persistent = IndexValue::Persistent(ObjectRef::new("oid:17"));
        let error = persistent.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Validation error: Catalog cannot index persistent object oid:17"
        );
        assert!(persistent.as_text().is_none());

        let broken = IndexValue::Broken(ObjectRef::new("oid:18"));
        assert!(broken.validate().is_err());
        assert!(!broken.is_indexable());
    }
}
