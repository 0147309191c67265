mod frame;

use serde::Serialize;
use serde_json::{Map, Value};
use smallvec::{smallvec, SmallVec};

use crate::error::Error;
use crate::Result;

use frame::{kind_name, Frame};

type FrameStack = SmallVec<[Frame; 8]>;

/// Builder for nested JSON values, following the call structure of a
/// streaming writer: containers are opened with `begin_*` and closed with
/// `end_*`, and each object member is keyed by a preceding [`name`] call.
/// Unlike a writer it produces an in-memory [`Value`] tree, obtained from
/// one of the `build*` terminators once every opened container is closed.
///
/// # Examples
///
/// ```
/// use json_nest::JsonBuilder;
/// use serde_json::json;
///
/// let mut builder = JsonBuilder::object();
/// builder
///     .name("user")?
///     .begin_object()
///     .name("id")?
///     .value(7)?
///     .name("tags")?
///     .begin_array()
///     .value("admin")?
///     .end_array()?
///     .end_object()?;
/// assert_eq!(builder.build()?, json!({"user": {"id": 7, "tags": ["admin"]}}));
/// # Ok::<(), json_nest::Error>(())
/// ```
///
/// [`name`]: JsonBuilder::name
#[derive(Debug, Clone)]
pub struct JsonBuilder {
    frames: FrameStack,
}

impl JsonBuilder {
    /// Creates a builder whose root is a fresh empty object.
    pub fn object() -> Self {
        Self::with_root(Value::Object(Map::new()))
    }

    /// Creates a builder over an existing object. Appends mutate the
    /// supplied map directly; no copy is taken.
    pub fn object_with(base: Map<String, Value>) -> Self {
        Self::with_root(Value::Object(base))
    }

    /// Creates a builder whose root is a fresh empty array.
    pub fn array() -> Self {
        Self::with_root(Value::Array(Vec::new()))
    }

    /// Creates a builder over an existing array. Appends mutate the
    /// supplied vector directly; no copy is taken.
    pub fn array_with(base: Vec<Value>) -> Self {
        Self::with_root(Value::Array(base))
    }

    fn with_root(container: Value) -> Self {
        Self {
            frames: smallvec![Frame::new(container)],
        }
    }

    /// Stages the member name for the next value or container appended to
    /// the current frame. Staging again before an append overwrites the
    /// previous name. A name staged on an array frame is simply ignored.
    ///
    /// Accepts anything convertible to an optional key, so call sites
    /// write `.name("key")`; passing `None` fails with
    /// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument)
    /// and stages nothing.
    pub fn name<'a, K>(&mut self, key: K) -> Result<&mut Self>
    where
        K: Into<Option<&'a str>>,
    {
        let Some(key) = key.into() else {
            return Err(Error::invalid_argument("name must not be absent"));
        };
        self.current_mut().pending_name = Some(key.to_owned());
        Ok(self)
    }

    /// Opens a nested object and makes it the current frame. Always
    /// succeeds; a name already staged on the enclosing frame stays staged
    /// there and is consumed when the matching close appends the finished
    /// object back.
    pub fn begin_object(&mut self) -> &mut Self {
        self.push(Value::Object(Map::new()));
        self
    }

    /// Opens a nested array and makes it the current frame. Always
    /// succeeds.
    pub fn begin_array(&mut self) -> &mut Self {
        self.push(Value::Array(Vec::new()));
        self
    }

    /// Closes the current frame and appends its finished container into
    /// the enclosing frame, which becomes current again.
    ///
    /// Fails with [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState)
    /// at the root, or when the enclosing frame cannot accept the finished
    /// container (an object frame with no staged name); a refused close
    /// leaves the stack unchanged.
    ///
    /// The close does not verify which `begin_*` opened the frame: the
    /// popped container's own variant decides how it is appended, so
    /// closing an array frame through `end_object` behaves identically.
    pub fn end_object(&mut self) -> Result<&mut Self> {
        self.end()?;
        Ok(self)
    }

    /// Closes the current frame; see [`end_object`](JsonBuilder::end_object).
    pub fn end_array(&mut self) -> Result<&mut Self> {
        self.end()?;
        Ok(self)
    }

    /// Appends a leaf or pre-built value to the current frame. Anything
    /// convertible into a [`Value`] is accepted: strings, integers,
    /// floats, booleans, or a `Value` passed through unchanged.
    ///
    /// Appending into an object frame consumes the staged name and fails
    /// with [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState) if
    /// none is staged; the failed call mutates nothing, so staging a name
    /// and retrying succeeds.
    pub fn value<V: Into<Value>>(&mut self, value: V) -> Result<&mut Self> {
        self.append(value.into())?;
        Ok(self)
    }

    /// Appends a JSON `null` to the current frame.
    pub fn null_value(&mut self) -> Result<&mut Self> {
        self.append(Value::Null)?;
        Ok(self)
    }

    /// Serializes any [`Serialize`] type to a [`Value`] and appends it.
    /// Conversion failures are reported as
    /// [`ErrorKind::Serialize`](crate::ErrorKind::Serialize).
    pub fn serialized<T: Serialize>(&mut self, value: &T) -> Result<&mut Self> {
        let value = serde_json::to_value(value).map_err(|err| Error::serialize(err.to_string()))?;
        self.append(value)?;
        Ok(self)
    }

    /// Returns a clone of the finished root value.
    ///
    /// Fails with [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState)
    /// while any opened container remains unclosed. Borrowing rather than
    /// consuming keeps the builder usable: it can be queried at the root
    /// and then extended with further calls.
    pub fn build(&self) -> Result<Value> {
        if !self.is_root() {
            return Err(Error::invalid_state("current element is not root"));
        }
        Ok(self.frames[0].container.clone())
    }

    /// Like [`build`](JsonBuilder::build), but requires the root to be an
    /// object and returns its map.
    pub fn build_object(&self) -> Result<Map<String, Value>> {
        match self.build()? {
            Value::Object(map) => Ok(map),
            other => Err(Error::invalid_state(format!(
                "root is {} value, not object",
                kind_name(&other)
            ))),
        }
    }

    /// Like [`build`](JsonBuilder::build), but requires the root to be an
    /// array and returns its elements.
    pub fn build_array(&self) -> Result<Vec<Value>> {
        match self.build()? {
            Value::Array(items) => Ok(items),
            other => Err(Error::invalid_state(format!(
                "root is {} value, not array",
                kind_name(&other)
            ))),
        }
    }

    /// Consumes the builder and returns the root value without cloning.
    /// Subject to the same root check as [`build`](JsonBuilder::build).
    pub fn into_value(mut self) -> Result<Value> {
        if !self.is_root() {
            return Err(Error::invalid_state("current element is not root"));
        }
        match self.frames.pop() {
            Some(root) => Ok(root.container),
            None => Err(Error::invalid_state("current element is not root")),
        }
    }

    /// Nesting depth of the current frame; 0 at the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Whether the current frame is the root, i.e. every opened container
    /// has been closed.
    pub fn is_root(&self) -> bool {
        self.frames.len() == 1
    }

    fn push(&mut self, container: Value) {
        self.frames.push(Frame::new(container));
    }

    fn end(&mut self) -> Result<()> {
        if self.is_root() {
            return Err(Error::invalid_state("cannot retreat from root"));
        }
        // Refuse before popping so a failed close leaves the stack intact.
        self.frames[self.frames.len() - 2].check_append()?;
        if let Some(closed) = self.frames.pop() {
            self.append(closed.container)?;
        }
        Ok(())
    }

    fn append(&mut self, value: Value) -> Result<()> {
        let frame = self.current_mut();
        match &mut frame.container {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            Value::Object(map) => match frame.pending_name.take() {
                Some(key) => {
                    map.insert(key, value);
                    Ok(())
                }
                None => Err(Error::invalid_state("tried to append without name")),
            },
            other => Err(Error::invalid_state(format!(
                "cannot append into {} value",
                kind_name(other)
            ))),
        }
    }

    fn current_mut(&mut self) -> &mut Frame {
        // The root frame is pushed at construction and never popped.
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::JsonBuilder;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_begin_and_end_track_depth() {
        let mut builder = JsonBuilder::array();
        assert_eq!(builder.depth(), 0);
        builder.begin_array().begin_array();
        assert_eq!(builder.depth(), 2);
        builder.end_array().unwrap();
        assert_eq!(builder.depth(), 1);
        builder.end_array().unwrap();
        assert!(builder.is_root());
    }

    #[rstest::rstest]
    fn test_refused_close_keeps_stack() {
        let mut builder = JsonBuilder::object();
        builder.begin_array();
        // No name staged on the enclosing object, so the close must fail
        // without popping the array frame.
        let err = builder.end_array().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert_eq!(builder.depth(), 1);
        builder.value("still open").unwrap();
    }

    #[rstest::rstest]
    fn test_parent_name_consumed_by_close() {
        let mut builder = JsonBuilder::object();
        builder.name("inner").unwrap().begin_array();
        builder.value(1).unwrap();
        builder.end_array().unwrap();
        assert_eq!(builder.build().unwrap(), json!({"inner": [1]}));
        // The staged name was consumed, so the next append needs a new one.
        let err = builder.value(2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }
}
