//! Descriptor data model
//!
//! A [`CommandDescriptor`] lists the positional parameters of one command in
//! wire order. The position of a parameter is its index in
//! [`CommandDescriptor::params`], so positions are contiguous by construction.

use std::collections::HashSet;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic type of a positional parameter.
///
/// This is the JSON shape the daemon expects at that position, not the Rust
/// type of the field that stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// JSON string
    String,
    /// JSON number without a fractional part
    Integer,
    /// Any JSON number
    Float,
    /// JSON boolean
    Bool,
    /// JSON array
    Array,
    /// JSON object used as a key/value map
    Map,
    /// JSON object with a fixed set of fields
    Object,
}

impl ParamType {
    /// Returns `true` if `value` already has this semantic type.
    ///
    /// `null` is never accepted; callers that allow an explicit null for an
    /// optional parameter check for it first.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Float => value.is_number(),
            ParamType::Bool => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Map | ParamType::Object => value.is_object(),
        }
    }

    /// Lower-case name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Float => "float",
            ParamType::Bool => "boolean",
            ParamType::Array => "array",
            ParamType::Map => "map",
            ParamType::Object => "object",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Capability flags attached to a registered command.
///
/// The flags are informational: they are recorded and exposed so that a
/// dispatcher can route or refuse a command, but nothing in this workspace
/// enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageFlags(u32);

impl UsageFlags {
    /// No capability requirements.
    pub const NONE: UsageFlags = UsageFlags(0);
    /// The command needs a daemon with its wallet enabled.
    pub const WALLET_ONLY: UsageFlags = UsageFlags(1);
    /// The command is only meaningful over a websocket connection.
    pub const WEBSOCKET_ONLY: UsageFlags = UsageFlags(1 << 1);
    /// The command is a notification sent by the server.
    pub const NOTIFICATION: UsageFlags = UsageFlags(1 << 2);

    /// Raw bit representation.
    pub fn bits(&self) -> u32 { self.0 }

    /// Returns `true` if every flag in `other` is also set in `self`.
    pub fn contains(&self, other: UsageFlags) -> bool { self.0 & other.0 == other.0 }

    /// Returns `true` if no flag is set.
    pub fn is_empty(&self) -> bool { self.0 == 0 }
}

impl BitOr for UsageFlags {
    type Output = UsageFlags;

    fn bitor(self, rhs: UsageFlags) -> UsageFlags { UsageFlags(self.0 | rhs.0) }
}

impl BitOrAssign for UsageFlags {
    fn bitor_assign(&mut self, rhs: UsageFlags) { self.0 |= rhs.0 }
}

impl fmt::Display for UsageFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(UsageFlags::WALLET_ONLY) {
            names.push("wallet-only");
        }
        if self.contains(UsageFlags::WEBSOCKET_ONLY) {
            names.push("websocket-only");
        }
        if self.contains(UsageFlags::NOTIFICATION) {
            names.push("notification");
        }
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// Positional parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Parameter name as it appears in usage text
    pub name: String,
    /// Semantic type expected on the wire
    pub param_type: ParamType,
    /// Whether this parameter must be supplied
    pub required: bool,
    /// Value assumed by the daemon when the parameter is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Replacement for the generated usage token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl ParamDef {
    /// Returns `true` if `value` is this parameter's declared default.
    pub fn is_default(&self, value: &Value) -> bool {
        match &self.default_value {
            Some(default) => default == value,
            None => false,
        }
    }

    fn usage_token(&self) -> String {
        if let Some(usage) = &self.usage {
            return usage.clone();
        }
        match (&self.default_value, self.param_type) {
            (Some(default), _) => format!("{}={}", self.name, default),
            (None, ParamType::String) => format!("\"{}\"", self.name),
            (None, _) => self.name.clone(),
        }
    }
}

/// Reasons a descriptor cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The descriptor has an empty method name.
    #[error("command name is empty")]
    EmptyName,

    /// Two parameters share a name.
    #[error("parameter '{0}' is declared more than once")]
    DuplicateParam(String),

    /// A required parameter follows an optional one.
    #[error("required parameter '{param}' follows optional parameter '{after}'")]
    TrailingOptional {
        /// The offending required parameter
        param: String,
        /// The optional parameter that precedes it
        after: String,
    },

    /// A required parameter declares a default value.
    #[error("required parameter '{0}' declares a default value")]
    RequiredWithDefault(String),

    /// The declared default does not have the declared semantic type.
    #[error("default of parameter '{param}' is not a {expected}")]
    DefaultTypeMismatch {
        /// The parameter whose default is wrong
        param: String,
        /// The declared semantic type
        expected: ParamType,
    },
}

/// Command descriptor: everything known about a command except its result shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Method name, exactly as the daemon spells it
    pub name: String,
    /// Parameters in wire order
    pub params: Vec<ParamDef>,
    /// Capability flags
    #[serde(default)]
    pub flags: UsageFlags,
}

impl CommandDescriptor {
    /// Start building a descriptor for `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            descriptor: CommandDescriptor {
                name: name.into(),
                params: Vec::new(),
                flags: UsageFlags::NONE,
            },
        }
    }

    /// Number of leading required parameters.
    pub fn required_count(&self) -> usize { self.params.iter().filter(|p| p.required).count() }

    /// Total number of positional parameters.
    pub fn max_params(&self) -> usize { self.params.len() }

    /// Look up a parameter definition by name.
    pub fn param(&self, name: &str) -> Option<&ParamDef> { self.params.iter().find(|p| p.name == name) }

    /// Check the structural rules a registry enforces.
    ///
    /// Parameters must have distinct names, no required parameter may follow
    /// an optional one, required parameters carry no default, and every
    /// default must already have its parameter's semantic type.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }

        let mut seen = HashSet::new();
        let mut first_optional: Option<&ParamDef> = None;
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(DescriptorError::DuplicateParam(param.name.clone()));
            }

            if param.required {
                if let Some(optional) = first_optional {
                    return Err(DescriptorError::TrailingOptional {
                        param: param.name.clone(),
                        after: optional.name.clone(),
                    });
                }
                if param.default_value.is_some() {
                    return Err(DescriptorError::RequiredWithDefault(param.name.clone()));
                }
            } else if first_optional.is_none() {
                first_optional = Some(param);
            }

            if let Some(default) = &param.default_value {
                if !param.param_type.accepts(default) {
                    return Err(DescriptorError::DefaultTypeMismatch {
                        param: param.name.clone(),
                        expected: param.param_type,
                    });
                }
            }
        }
        Ok(())
    }

    /// One-line usage string in the daemon's help style.
    ///
    /// Required parameters come first; optional ones are grouped in
    /// parentheses, e.g. `z_getbalance ("address" minconf=1)`.
    pub fn usage_text(&self) -> String {
        let mut parts = vec![self.name.clone()];
        let mut optional = Vec::new();
        for param in &self.params {
            if param.required {
                parts.push(param.usage_token());
            } else {
                optional.push(param.usage_token());
            }
        }
        if !optional.is_empty() {
            parts.push(format!("({})", optional.join(" ")));
        }
        parts.join(" ")
    }
}

/// Declarative builder returned by [`CommandDescriptor::builder`].
///
/// The builder records parameters in call order and does not validate;
/// validation happens when the descriptor is registered.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    descriptor: CommandDescriptor,
}

impl CommandBuilder {
    /// Append a required parameter.
    pub fn required(self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.push(name.into(), param_type, true, None)
    }

    /// Append an optional parameter without a default.
    pub fn optional(self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.push(name.into(), param_type, false, None)
    }

    /// Append an optional parameter with a declared default.
    pub fn optional_with_default(
        self,
        name: impl Into<String>,
        param_type: ParamType,
        default: Value,
    ) -> Self {
        self.push(name.into(), param_type, false, Some(default))
    }

    /// Override the usage token of the most recently added parameter.
    ///
    /// Has no effect before the first parameter is added; command-level
    /// usage is always generated from the method name and parameters.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        if let Some(last) = self.descriptor.params.last_mut() {
            last.usage = Some(usage.into());
        }
        self
    }

    /// Set the capability flags.
    pub fn flags(mut self, flags: UsageFlags) -> Self {
        self.descriptor.flags = flags;
        self
    }

    /// Finish building.
    pub fn build(self) -> CommandDescriptor { self.descriptor }

    fn push(
        mut self,
        name: String,
        param_type: ParamType,
        required: bool,
        default_value: Option<Value>,
    ) -> Self {
        self.descriptor.params.push(ParamDef {
            name,
            param_type,
            required,
            default_value,
            usage: None,
        });
        self
    }
}
