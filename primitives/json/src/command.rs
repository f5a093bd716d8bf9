//! Command trait and the marshal / unmarshal / untyped-constructor paths.

use descriptor::CommandDescriptor;
use registry::CommandRegistryReader;
use serde_json::Value;

use crate::coerce::coerce;
use crate::error::{Error, Result};
use crate::params::ParamReader;
use crate::wire::Request;
use crate::zcashsvrcmds::AnyCommand;

/// A strongly-typed JSON-RPC command.
///
/// Implementors are plain value types: optional parameters are `Option`
/// fields where `None` means "unset".
pub trait Command: Sized {
    /// Method name, exactly as the daemon spells it.
    const METHOD: &'static str;

    /// The descriptor registered for this command.
    fn descriptor() -> CommandDescriptor;

    /// Field values in wire order, one slot per declared parameter.
    fn to_params(&self) -> Result<Vec<Option<Value>>>;

    /// Rebuild the command from default-filled slots.
    fn from_params(reader: ParamReader<'_>) -> Result<Self>;
}

/// Anything that can be marshaled: a concrete [`Command`] or an [`AnyCommand`].
pub trait Marshal {
    /// Method name of the command.
    fn method(&self) -> &str;

    /// Field values in wire order.
    fn params(&self) -> Result<Vec<Option<Value>>>;
}

impl<C: Command> Marshal for C {
    fn method(&self) -> &str { C::METHOD }

    fn params(&self) -> Result<Vec<Option<Value>>> { self.to_params() }
}

/// Marshal `cmd` into a wire request with identifier `id`.
///
/// The parameter list stops after the last parameter that is set and differs
/// from its declared default. Unset optional parameters before that point are
/// written as their default, or `null` when they declare none. An optional
/// parameter explicitly set to its default is written as-is when a later
/// parameter is significant.
///
/// # Errors
/// - [`Error::Registry`] if the method is not registered
/// - [`Error::Marshal`] if a required parameter is unset or a value does not
///   have its declared semantic type
pub fn marshal_cmd<M, R>(registry: &R, id: u64, cmd: &M) -> Result<Request>
where
    M: Marshal + ?Sized,
    R: CommandRegistryReader + ?Sized,
{
    let descriptor = registry.lookup(cmd.method())?;
    let params = encode_params(descriptor, cmd.params()?)?;
    Ok(Request::new(id, descriptor.name.clone(), params))
}

fn encode_params(descriptor: &CommandDescriptor, slots: Vec<Option<Value>>) -> Result<Vec<Value>> {
    let marshal_error = |reason: String| Error::Marshal { method: descriptor.name.clone(), reason };

    if slots.len() != descriptor.params.len() {
        return Err(marshal_error(format!(
            "command has {} fields but {} parameters are declared",
            slots.len(),
            descriptor.params.len()
        )));
    }

    for (def, slot) in descriptor.params.iter().zip(&slots) {
        match slot {
            None if def.required => {
                return Err(marshal_error(format!("required parameter '{}' is unset", def.name)));
            }
            Some(Value::Null) if def.required => {
                return Err(marshal_error(format!("required parameter '{}' is null", def.name)));
            }
            Some(value) if !value.is_null() && !def.param_type.accepts(value) => {
                return Err(marshal_error(format!(
                    "parameter '{}' must be {}, got {}",
                    def.name, def.param_type, value
                )));
            }
            _ => {}
        }
    }

    let end = descriptor
        .params
        .iter()
        .zip(&slots)
        .rposition(|(def, slot)| slot.as_ref().is_some_and(|value| !def.is_default(value)))
        .map_or(0, |last| last + 1);

    Ok(descriptor
        .params
        .iter()
        .zip(slots)
        .take(end)
        .map(|(def, slot)| slot.or_else(|| def.default_value.clone()).unwrap_or(Value::Null))
        .collect())
}

/// One slot per declared parameter, with absent or `null` optional
/// parameters replaced by their declared default.
fn fill_defaults(descriptor: &CommandDescriptor, mut params: Vec<Value>) -> Vec<Option<Value>> {
    params.truncate(descriptor.params.len());
    let mut given = params.into_iter();
    descriptor
        .params
        .iter()
        .map(|def| match given.next() {
            Some(Value::Null) if !def.required => def.default_value.clone(),
            Some(value) => Some(value),
            None => def.default_value.clone(),
        })
        .collect()
}

fn check_wire_arity(descriptor: &CommandDescriptor, got: usize) -> Result<()> {
    let (min, max) = (descriptor.required_count(), descriptor.max_params());
    if got < min || got > max {
        return Err(Error::WrongNumberOfParams { method: descriptor.name.clone(), got, min, max });
    }
    Ok(())
}

/// Unmarshal a wire request into the statically known command `C`.
///
/// # Errors
/// - [`Error::InvalidRequest`] if the request is for a different method
/// - [`Error::Registry`] if the method is not registered
/// - [`Error::WrongNumberOfParams`] if the parameter count is out of bounds
/// - [`Error::UnmarshalType`] if a parameter cannot be decoded
pub fn unmarshal_as<C, R>(registry: &R, request: &Request) -> Result<C>
where
    C: Command,
    R: CommandRegistryReader + ?Sized,
{
    if request.method != C::METHOD {
        return Err(Error::InvalidRequest(format!(
            "expected method {}, got {}",
            C::METHOD,
            request.method
        )));
    }
    let descriptor = registry.lookup(&request.method)?;
    check_wire_arity(descriptor, request.params.len())?;
    C::from_params(ParamReader::new(descriptor, fill_defaults(descriptor, request.params.clone())))
}

/// Unmarshal a wire request into whichever known command its method names.
///
/// # Errors
/// Same as [`unmarshal_as`]; a method that is registered but has no
/// concrete command type fails with [`Error::Registry`] as unknown.
pub fn unmarshal_cmd<R>(registry: &R, request: &Request) -> Result<AnyCommand>
where
    R: CommandRegistryReader + ?Sized,
{
    let descriptor = registry.lookup(&request.method)?;
    check_wire_arity(descriptor, request.params.len())?;
    AnyCommand::from_params(ParamReader::new(
        descriptor,
        fill_defaults(descriptor, request.params.clone()),
    ))
}

/// Build a command from loosely-typed positional arguments.
///
/// Each argument is coerced into its parameter's semantic type: integers
/// and floats may be given as strings, booleans as `true`/`false`/`1`/`0`
/// style strings, and arrays or objects as JSON text. Omitted trailing
/// positions take their declared defaults.
///
/// # Errors
/// - [`Error::Registry`] if the method is not registered
/// - [`Error::NumParams`] if too few or too many arguments are given
/// - [`Error::TypeCoercion`] if an argument cannot be coerced
pub fn new_cmd<R>(registry: &R, method: &str, args: Vec<Value>) -> Result<AnyCommand>
where
    R: CommandRegistryReader + ?Sized,
{
    let descriptor = registry.lookup(method)?;
    let (min, max) = (descriptor.required_count(), descriptor.max_params());
    if args.len() < min || args.len() > max {
        return Err(Error::NumParams { method: method.to_string(), got: args.len(), min, max });
    }

    let coerced = descriptor
        .params
        .iter()
        .zip(args)
        .map(|(def, arg)| {
            coerce(def, arg).map_err(|reason| Error::TypeCoercion {
                method: method.to_string(),
                param: def.name.clone(),
                expected: def.param_type,
                reason,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    AnyCommand::from_params(ParamReader::new(descriptor, fill_defaults(descriptor, coerced)))
        .map_err(|err| match err {
            Error::UnmarshalType { method, param, expected, reason } => {
                Error::TypeCoercion { method, param, expected, reason }
            }
            other => other,
        })
}
