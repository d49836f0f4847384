use serde_json::{Map, Value};

/// A request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Any JSON value, serialized as-is.
    Json(Value),
    /// An already-serialized string, sent verbatim.
    Raw(String),
}

impl RequestBody {
    /// Renders the payload as it goes over the wire.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Json(value) => serde_json::to_string(value),
            Self::Raw(contents) => Ok(contents.clone()),
        }
    }
}

/// A body re-expressed for a request that cannot carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryForm {
    /// Key/value pairs added to the query string.
    Pairs(UrlParameters),
    /// Text used as the query string as-is.
    Raw(String),
    Empty,
}

impl RequestBody {
    /// Objects become one pair per field, arrays one pair per index, and
    /// strings, other scalars and raw bodies the query string itself.
    pub fn to_query(&self) -> QueryForm {
        match self {
            Self::Raw(contents) => QueryForm::Raw(contents.clone()),
            Self::Json(Value::Object(fields)) => QueryForm::Pairs(UrlParameters::from_object(fields)),
            Self::Json(Value::Array(items)) => QueryForm::Pairs(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), render(item)))
                    .collect(),
            ),
            Self::Json(Value::Null) => QueryForm::Empty,
            Self::Json(scalar) => QueryForm::Raw(render(scalar)),
        }
    }
}

/// Strings are used verbatim, `null` becomes empty and anything else is
/// rendered as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Map<String, Value>> for RequestBody {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Json(Value::Object(fields))
    }
}

/// Query string parameters, kept in insertion order.
///
/// Values are scalars rendered through `Display`: strings as-is, numbers in
/// decimal, booleans as `true`/`false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParameters(Vec<(String, String)>);

impl UrlParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Flattens a JSON object into parameters, one pair per field.
    pub fn from_object(fields: &Map<String, Value>) -> Self {
        fields
            .iter()
            .map(|(key, value)| (key.as_str(), render(value)))
            .collect()
    }

    pub fn extend(&mut self, other: UrlParameters) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for UrlParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Self::new();
        for (key, value) in iter {
            parameters.insert(key, value);
        }
        parameters
    }
}
