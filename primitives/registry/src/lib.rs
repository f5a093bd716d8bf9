#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Command Registry — a lookup table from method name to [`CommandDescriptor`].
//!
//! Descriptors are collected on a [`RegistryBuilder`] during an explicit
//! initialization phase. [`RegistryBuilder::build`] freezes them into a
//! [`CommandRegistry`], which has no mutation API and can be shared across
//! threads behind an `Arc` for concurrent lookups.

use std::collections::BTreeMap;

use descriptor::{CommandDescriptor, DescriptorError, UsageFlags};

/// Errors raised while registering or looking up commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A descriptor with the same method name was already registered.
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    /// The descriptor breaks a structural rule.
    #[error("invalid descriptor for '{name}': {source}")]
    InvalidDescriptor {
        /// Method name of the rejected descriptor
        name: String,
        /// The rule that was broken
        #[source]
        source: DescriptorError,
    },

    /// No command is registered under this method name.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Collects descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: BTreeMap<String, CommandDescriptor>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self { Self::default() }

    /// Validate and add a descriptor.
    ///
    /// Fails with [`RegistryError::DuplicateCommand`] if the name is taken and
    /// with [`RegistryError::InvalidDescriptor`] if
    /// [`CommandDescriptor::validate`] rejects it. A failed registration
    /// leaves the builder unchanged.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<&mut Self> {
        if self.commands.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateCommand(descriptor.name));
        }
        descriptor.validate().map_err(|source| RegistryError::InvalidDescriptor {
            name: descriptor.name.clone(),
            source,
        })?;

        tracing::trace!(
            command = %descriptor.name,
            params = descriptor.params.len(),
            flags = %descriptor.flags,
            "registered command"
        );
        self.commands.insert(descriptor.name.clone(), descriptor);
        Ok(self)
    }

    /// Freeze the collected descriptors.
    pub fn build(self) -> CommandRegistry { CommandRegistry { commands: self.commands } }
}

/// An immutable set of command descriptors keyed by method name.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    /// Map from method name to descriptor
    commands: BTreeMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Start a new registry.
    pub fn builder() -> RegistryBuilder { RegistryBuilder::new() }
}

/// Read-only interface to a command registry.
///
/// Marshaling, unmarshaling and the client only ever see a registry through
/// this trait.
pub trait CommandRegistryReader {
    /// Get all method names in the registry, sorted.
    fn list_commands(&self) -> Vec<&str>;

    /// Get a descriptor by method name.
    ///
    /// Returns `None` if no command with the given name exists.
    fn get_command(&self, name: &str) -> Option<&CommandDescriptor>;

    /// Get the total number of commands in the registry.
    fn command_count(&self) -> usize;

    /// Get a descriptor by method name, or [`RegistryError::UnknownCommand`].
    fn lookup(&self, name: &str) -> Result<&CommandDescriptor> {
        self.get_command(name).ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))
    }

    /// Capability flags of a registered command.
    fn usage_flags(&self, name: &str) -> Result<UsageFlags> { Ok(self.lookup(name)?.flags) }

    /// One-line usage text of a registered command.
    fn usage_text(&self, name: &str) -> Result<String> { Ok(self.lookup(name)?.usage_text()) }
}

/// Implement the interface for `CommandRegistry`.
impl CommandRegistryReader for CommandRegistry {
    fn list_commands(&self) -> Vec<&str> { self.commands.keys().map(|s| s.as_str()).collect() }

    fn get_command(&self, name: &str) -> Option<&CommandDescriptor> { self.commands.get(name) }

    fn command_count(&self) -> usize { self.commands.len() }
}
