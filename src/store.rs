use crate::log::{error_not_object, Error, INVALID_DATA};
use serde::Serialize;
use serde_json::{to_value, Map, Value};

/// Provides storage for data that a [`Template`][`crate::Template`] can be
/// rendered with.
///
/// Members keep the order they were inserted in, which is the order they are
/// visited while rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    data: Map<String, Value>,
}

impl Store {
    /// Create a new [`Store`].
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::Store;
    ///
    /// let store = Store::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { data: Map::new() }
    }

    /// Create a new [`Store`] from any value that serializes to an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails, or the value is not an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::Store;
    /// use serde_json::json;
    ///
    /// let store = Store::from_serialize(&json!({ "name": "taylor" })).unwrap();
    /// assert_eq!(store.get("name").unwrap(), "taylor");
    ///
    /// assert!(Store::from_serialize(&vec![1, 2]).is_err());
    /// ```
    pub fn from_serialize<T>(value: &T) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        let value =
            to_value(value).map_err(|e| Error::build(INVALID_DATA).with_help(e.to_string()))?;

        Self::try_from(value)
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::Store;
    ///
    /// let mut store = Store::new();
    /// let result = store.insert("name", "taylor");
    ///
    /// assert!(result.is_ok());
    /// ```
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let value =
            to_value(value).map_err(|e| Error::build(INVALID_DATA).with_help(e.to_string()))?;
        self.data.insert(key.into(), value);

        Ok(())
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        self.data
            .insert(key.into(), to_value(value).expect("value must serialize"));
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// Returns the `Store`, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    #[inline]
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value)?;

        Ok(self)
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// Returns the `Store`, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::Store;
    ///
    /// let store = Store::new().with_must("name", "taylor").with_must("age", 30);
    /// assert_eq!(store.len(), 2);
    /// ```
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_must(key, value);

        self
    }

    /// Returns a reference to the [`Value`] corresponding to the key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns an iterator over the members, in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Map<String, Value>> for Store {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

impl TryFrom<Value> for Store {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            Value::Null => Err(error_not_object("null")),
            Value::Bool(_) => Err(error_not_object("a boolean")),
            Value::Number(_) => Err(error_not_object("a number")),
            Value::String(_) => Err(error_not_object("a string")),
            Value::Array(_) => Err(error_not_object("an array")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{log::INVALID_DATA, Store};
    use serde::Serialize;
    use serde_json::json;

    #[test]
    fn test_insert() {
        let mut store = Store::new();
        store.insert_must("one", "two");

        assert!(store
            .get("one")
            .is_some_and(|t| t.as_str().unwrap() == "two"));
    }

    #[test]
    fn test_insert_fluent() {
        assert!(Store::new()
            .with_must("three", "four")
            .get("three")
            .is_some_and(|t| t.as_str().unwrap() == "four"))
    }

    #[test]
    fn test_insertion_order() {
        let store = Store::new()
            .with_must("zebra", 1)
            .with_must("apple", 2)
            .with_must("mango", 3);
        let keys: Vec<_> = store.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
            tags: Vec<&'static str>,
        }

        let store = Store::from_serialize(&User {
            name: "taylor",
            tags: vec!["a"],
        })
        .unwrap();

        assert_eq!(store.get("name"), Some(&json!("taylor")));
        assert_eq!(store.get("tags"), Some(&json!(["a"])));
    }

    #[test]
    fn test_try_from_non_object() {
        let error = Store::try_from(json!("text")).unwrap_err();

        assert_eq!(error.reason(), INVALID_DATA);
        assert!(error.help().is_some_and(|h| h.contains("a string")));
    }
}
