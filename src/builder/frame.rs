use serde_json::Value;

use crate::error::Error;

/// One level of in-progress container construction: the container being
/// filled at this depth plus the member name staged for the next append.
/// The parent link is implicit in the builder's frame stack.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) container: Value,
    pub(crate) pending_name: Option<String>,
}

impl Frame {
    pub(crate) fn new(container: Value) -> Self {
        Self {
            container,
            pending_name: None,
        }
    }

    /// Checks, without mutating anything, whether this frame could take a
    /// value right now. Used before popping a child frame so that a refused
    /// close leaves the stack exactly as it was.
    pub(crate) fn check_append(&self) -> Result<(), Error> {
        match &self.container {
            Value::Array(_) => Ok(()),
            Value::Object(_) if self.pending_name.is_some() => Ok(()),
            Value::Object(_) => Err(Error::invalid_state("tried to append without name")),
            other => Err(Error::invalid_state(format!(
                "cannot append into {} value",
                kind_name(other)
            ))),
        }
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
