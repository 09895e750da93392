use serde::Serialize;

/// Scalar payload of a simple metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl ScalarValue {
    /// Variant name, used in conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarValue::Int(_) => "int",
            ScalarValue::Float(_) => "float",
            ScalarValue::Text(_) => "text",
            ScalarValue::Bool(_) => "bool",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int(i64::from(v))
    }
}

impl From<u32> for ScalarValue {
    fn from(v: u32) -> Self {
        ScalarValue::Int(i64::from(v))
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

/// Named scalar metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleMetricDto {
    pub name: String,
    pub value: ScalarValue,
}

impl SimpleMetricDto {
    pub fn new(name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
