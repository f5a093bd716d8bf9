//! Positional parameter slots.
//!
//! A command converts itself to a list of slots with [`ParamWriter`], one slot
//! per declared parameter; `None` marks an unset optional parameter. The
//! reverse direction reads decoded slots back into fields with
//! [`ParamReader`].

use descriptor::{CommandDescriptor, ParamType};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Collects a command's field values in wire order.
#[derive(Debug)]
pub struct ParamWriter {
    method: &'static str,
    slots: Vec<Option<Value>>,
}

impl ParamWriter {
    /// Start writing the parameters of `method`.
    pub fn new(method: &'static str) -> Self { Self { method, slots: Vec::new() } }

    /// Append a value that is always present.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let value = self.encode(value)?;
        self.slots.push(Some(value));
        Ok(self)
    }

    /// Append an optional value; `None` leaves the slot unset.
    pub fn opt<T: Serialize>(mut self, value: &Option<T>) -> Result<Self> {
        let slot = match value {
            Some(value) => Some(self.encode(value)?),
            None => None,
        };
        self.slots.push(slot);
        Ok(self)
    }

    /// Finish and return the slots.
    pub fn finish(self) -> Vec<Option<Value>> { self.slots }

    /// A present value must not serialize to `null`; serde_json writes
    /// non-finite floats that way.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        let marshal_error = |reason: String| Error::Marshal {
            method: self.method.to_string(),
            reason: format!("parameter {}: {}", self.slots.len() + 1, reason),
        };
        match serde_json::to_value(value) {
            Ok(Value::Null) => Err(marshal_error("value has no JSON representation".to_string())),
            Ok(value) => Ok(value),
            Err(e) => Err(marshal_error(e.to_string())),
        }
    }
}

/// Reads default-filled slots back into typed fields, in declaration order.
#[derive(Debug)]
pub struct ParamReader<'a> {
    descriptor: &'a CommandDescriptor,
    slots: std::vec::IntoIter<Option<Value>>,
    position: usize,
}

impl<'a> ParamReader<'a> {
    /// Wrap `slots`, which must hold exactly one entry per declared parameter.
    pub fn new(descriptor: &'a CommandDescriptor, slots: Vec<Option<Value>>) -> Self {
        Self { descriptor, slots: slots.into_iter(), position: 0 }
    }

    /// Method name of the command being read.
    pub fn method(&self) -> &str { &self.descriptor.name }

    /// Read the next slot into a field that must be present.
    pub fn required<T: DeserializeOwned>(&mut self) -> Result<T> {
        match self.next_slot()? {
            Some(value) => self.decode(value),
            None => Err(self.type_error("missing required value".to_string())),
        }
    }

    /// Read the next slot into an optional field; unset and `null` become `None`.
    pub fn optional<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        match self.next_slot()? {
            Some(Value::Null) | None => Ok(None),
            Some(value) => self.decode(value).map(Some),
        }
    }

    fn next_slot(&mut self) -> Result<Option<Value>> {
        self.position += 1;
        self.slots.next().ok_or_else(|| Error::WrongNumberOfParams {
            method: self.descriptor.name.clone(),
            got: self.position - 1,
            min: self.descriptor.required_count(),
            max: self.descriptor.max_params(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        if !self.expected().accepts(&value) {
            return Err(self.type_error(format!("got {}", value)));
        }
        serde_json::from_value(value).map_err(|e| self.type_error(e.to_string()))
    }

    fn expected(&self) -> ParamType {
        self.descriptor
            .params
            .get(self.position - 1)
            .map(|p| p.param_type)
            .unwrap_or(ParamType::Object)
    }

    fn type_error(&self, reason: String) -> Error {
        let param = self
            .descriptor
            .params
            .get(self.position - 1)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        Error::UnmarshalType {
            method: self.descriptor.name.clone(),
            param,
            expected: self.expected(),
            reason,
        }
    }
}
