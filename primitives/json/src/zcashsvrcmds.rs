//! Zcash wallet commands.
//!
//! Every command here is only usable with a daemon that has its wallet
//! enabled, so each descriptor carries [`UsageFlags::WALLET_ONLY`].

use descriptor::{CommandDescriptor, ParamType, UsageFlags};
use registry::{CommandRegistry, RegistryBuilder, RegistryError};
use serde_json::{json, Value};

use crate::command::{Command, Marshal};
use crate::error::{Error, Result};
use crate::params::{ParamReader, ParamWriter};
use crate::zcashsvrinputs::ZSendManyEntry;

/// Defines the `z_exportkey` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZExportKeyCmd {
    /// Shielded address whose spending key is exported
    pub address: String,
}

impl ZExportKeyCmd {
    /// Returns a new instance which can be used to issue a `z_exportkey` command.
    pub fn new(address: impl Into<String>) -> Self { Self { address: address.into() } }
}

impl Command for ZExportKeyCmd {
    const METHOD: &'static str = "z_exportkey";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .required("address", ParamType::String)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).arg(&self.address)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { address: reader.required()? })
    }
}

/// Defines the `z_exportwallet` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZExportWalletCmd {
    /// File name, relative to the daemon's export directory
    pub filename: String,
}

impl ZExportWalletCmd {
    /// Returns a new instance which can be used to issue a `z_exportwallet` command.
    pub fn new(filename: impl Into<String>) -> Self { Self { filename: filename.into() } }
}

impl Command for ZExportWalletCmd {
    const METHOD: &'static str = "z_exportwallet";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .required("filename", ParamType::String)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).arg(&self.filename)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { filename: reader.required()? })
    }
}

/// Defines the `z_getbalance` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZGetBalanceCmd {
    /// Address to query
    pub address: Option<String>,
    /// Only include outputs with at least this many confirmations (default 1)
    pub min_conf: Option<u32>,
}

impl ZGetBalanceCmd {
    /// Returns a new instance which can be used to issue a `z_getbalance` command.
    ///
    /// Passing `None` for an optional parameter uses its default.
    pub fn new(address: Option<String>, min_conf: Option<u32>) -> Self { Self { address, min_conf } }
}

impl Command for ZGetBalanceCmd {
    const METHOD: &'static str = "z_getbalance";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional("address", ParamType::String)
            .optional_with_default("minconf", ParamType::Integer, json!(1))
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).opt(&self.address)?.opt(&self.min_conf)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { address: reader.optional()?, min_conf: reader.optional()? })
    }
}

/// Defines the `z_getnewaddress` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZGetNewAddressCmd {
    /// Address type (`sprout` or `sapling`); the daemon picks when unset
    pub address_type: Option<String>,
}

impl ZGetNewAddressCmd {
    /// Returns a new instance which can be used to issue a `z_getnewaddress` command.
    pub fn new(address_type: Option<String>) -> Self { Self { address_type } }
}

impl Command for ZGetNewAddressCmd {
    const METHOD: &'static str = "z_getnewaddress";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional("type", ParamType::String)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).opt(&self.address_type)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { address_type: reader.optional()? })
    }
}

/// Defines the `z_getoperationresult` JSON-RPC command.
///
/// Results of finished operations are removed from the daemon's memory once
/// retrieved.
#[derive(Debug, Clone, PartialEq)]
pub struct ZGetOperationResultCmd {
    /// Operation ids to query; all finished operations when unset
    pub operation_ids: Option<Vec<String>>,
}

impl ZGetOperationResultCmd {
    /// Returns a new instance which can be used to issue a `z_getoperationresult` command.
    pub fn new(operation_ids: Option<Vec<String>>) -> Self { Self { operation_ids } }
}

impl Command for ZGetOperationResultCmd {
    const METHOD: &'static str = "z_getoperationresult";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional("operationid", ParamType::Array)
            .usage(r#"["operationid",...]"#)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).opt(&self.operation_ids)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { operation_ids: reader.optional()? })
    }
}

/// Defines the `z_getoperationstatus` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZGetOperationStatusCmd {
    /// Operation ids to query; all operations when unset
    pub operation_ids: Option<Vec<String>>,
}

impl ZGetOperationStatusCmd {
    /// Returns a new instance which can be used to issue a `z_getoperationstatus` command.
    pub fn new(operation_ids: Option<Vec<String>>) -> Self { Self { operation_ids } }
}

impl Command for ZGetOperationStatusCmd {
    const METHOD: &'static str = "z_getoperationstatus";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional("operationid", ParamType::Array)
            .usage(r#"["operationid",...]"#)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).opt(&self.operation_ids)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { operation_ids: reader.optional()? })
    }
}

/// Defines the `z_gettotalbalance` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZGetTotalBalanceCmd {
    /// Only include outputs with at least this many confirmations (default 1)
    pub min_conf: Option<u32>,
    /// Also count watch-only addresses (default false)
    pub include_watch_only: Option<bool>,
}

impl ZGetTotalBalanceCmd {
    /// Returns a new instance which can be used to issue a `z_gettotalbalance` command.
    ///
    /// Passing `None` for an optional parameter uses its default.
    pub fn new(min_conf: Option<u32>, include_watch_only: Option<bool>) -> Self {
        Self { min_conf, include_watch_only }
    }
}

impl Command for ZGetTotalBalanceCmd {
    const METHOD: &'static str = "z_gettotalbalance";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional_with_default("minconf", ParamType::Integer, json!(1))
            .optional_with_default("includeWatchonly", ParamType::Bool, json!(false))
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD)
            .opt(&self.min_conf)?
            .opt(&self.include_watch_only)?
            .finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { min_conf: reader.optional()?, include_watch_only: reader.optional()? })
    }
}

/// Defines the `z_importkey` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZImportKeyCmd {
    /// Spending key, as returned by `z_exportkey`
    pub zkey: String,
    /// Rescan the chain for the key's transactions (default true)
    pub rescan: Option<bool>,
}

impl ZImportKeyCmd {
    /// Returns a new instance which can be used to issue a `z_importkey` command.
    ///
    /// Passing `None` for an optional parameter uses its default.
    pub fn new(zkey: impl Into<String>, rescan: Option<bool>) -> Self {
        Self { zkey: zkey.into(), rescan }
    }
}

impl Command for ZImportKeyCmd {
    const METHOD: &'static str = "z_importkey";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .required("zkey", ParamType::String)
            .optional_with_default("rescan", ParamType::Bool, json!(true))
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).arg(&self.zkey)?.opt(&self.rescan)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { zkey: reader.required()?, rescan: reader.optional()? })
    }
}

/// Defines the `z_importwallet` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZImportWalletCmd {
    /// Wallet file produced by `z_exportwallet`
    pub filename: String,
}

impl ZImportWalletCmd {
    /// Returns a new instance which can be used to issue a `z_importwallet` command.
    pub fn new(filename: impl Into<String>) -> Self { Self { filename: filename.into() } }
}

impl Command for ZImportWalletCmd {
    const METHOD: &'static str = "z_importwallet";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .required("filename", ParamType::String)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).arg(&self.filename)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { filename: reader.required()? })
    }
}

/// Defines the `z_listaddresses` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZListAddressesCmd {
    /// Also list watch-only addresses (default false)
    pub include_watch_only: Option<bool>,
}

impl ZListAddressesCmd {
    /// Returns a new instance which can be used to issue a `z_listaddresses` command.
    pub fn new(include_watch_only: Option<bool>) -> Self { Self { include_watch_only } }
}

impl Command for ZListAddressesCmd {
    const METHOD: &'static str = "z_listaddresses";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional_with_default("includeWatchonly", ParamType::Bool, json!(false))
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).opt(&self.include_watch_only)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { include_watch_only: reader.optional()? })
    }
}

/// Defines the `z_listoperationids` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZListOperationIdsCmd {
    /// Only list operations in this state (e.g. `success`)
    pub state: Option<String>,
}

impl ZListOperationIdsCmd {
    /// Returns a new instance which can be used to issue a `z_listoperationids` command.
    pub fn new(state: Option<String>) -> Self { Self { state } }
}

impl Command for ZListOperationIdsCmd {
    const METHOD: &'static str = "z_listoperationids";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .optional("state", ParamType::String)
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).opt(&self.state)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { state: reader.optional()? })
    }
}

/// Defines the `z_listreceivedbyaddress` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZListReceivedByAddressCmd {
    /// Shielded address to list
    pub address: String,
    /// Only include notes with at least this many confirmations (default 1)
    pub min_conf: Option<u32>,
}

impl ZListReceivedByAddressCmd {
    /// Returns a new instance which can be used to issue a `z_listreceivedbyaddress` command.
    ///
    /// Passing `None` for an optional parameter uses its default.
    pub fn new(address: impl Into<String>, min_conf: Option<u32>) -> Self {
        Self { address: address.into(), min_conf }
    }
}

impl Command for ZListReceivedByAddressCmd {
    const METHOD: &'static str = "z_listreceivedbyaddress";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .required("address", ParamType::String)
            .optional_with_default("minconf", ParamType::Integer, json!(1))
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD).arg(&self.address)?.opt(&self.min_conf)?.finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self { address: reader.required()?, min_conf: reader.optional()? })
    }
}

/// Defines the `z_sendmany` JSON-RPC command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZSendManyCmd {
    /// Address to spend from
    pub from_address: String,
    /// Recipients and amounts
    pub amounts: Vec<ZSendManyEntry>,
    /// Only spend outputs with at least this many confirmations (default 1)
    pub min_conf: Option<u32>,
    /// Transaction fee in ZEC (default 0.0001)
    pub fee: Option<f64>,
}

impl ZSendManyCmd {
    /// Returns a new instance which can be used to issue a `z_sendmany` command.
    ///
    /// Passing `None` for an optional parameter uses its default.
    pub fn new(
        from_address: impl Into<String>,
        amounts: Vec<ZSendManyEntry>,
        min_conf: Option<u32>,
        fee: Option<f64>,
    ) -> Self {
        Self { from_address: from_address.into(), amounts, min_conf, fee }
    }
}

impl Command for ZSendManyCmd {
    const METHOD: &'static str = "z_sendmany";

    fn descriptor() -> CommandDescriptor {
        CommandDescriptor::builder(Self::METHOD)
            .required("fromaddress", ParamType::String)
            .required("amounts", ParamType::Array)
            .usage(r#"[{"address":address,"amount":amount,...}]"#)
            .optional_with_default("minconf", ParamType::Integer, json!(1))
            .optional_with_default("fee", ParamType::Float, json!(0.0001))
            .flags(UsageFlags::WALLET_ONLY)
            .build()
    }

    fn to_params(&self) -> Result<Vec<Option<Value>>> {
        Ok(ParamWriter::new(Self::METHOD)
            .arg(&self.from_address)?
            .arg(&self.amounts)?
            .opt(&self.min_conf)?
            .opt(&self.fee)?
            .finish())
    }

    fn from_params(mut reader: ParamReader<'_>) -> Result<Self> {
        Ok(Self {
            from_address: reader.required()?,
            amounts: reader.required()?,
            min_conf: reader.optional()?,
            fee: reader.optional()?,
        })
    }
}

macro_rules! any_command {
    ($($(#[$doc:meta])* $variant:ident($cmd:ty),)*) => {
        /// Tagged union over every known command.
        ///
        /// Produced by [`crate::unmarshal_cmd`] and [`crate::new_cmd`] when
        /// the concrete command is only known at runtime.
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyCommand {
            $($(#[$doc])* $variant($cmd),)*
        }

        impl AnyCommand {
            /// Descriptors of every known command.
            pub fn descriptors() -> Vec<CommandDescriptor> {
                vec![$(<$cmd as Command>::descriptor(),)*]
            }

            pub(crate) fn from_params(reader: ParamReader<'_>) -> Result<Self> {
                let method = reader.method().to_string();
                $(
                    if method == <$cmd as Command>::METHOD {
                        return Ok(AnyCommand::$variant(<$cmd as Command>::from_params(reader)?));
                    }
                )*
                Err(Error::Registry(RegistryError::UnknownCommand(method)))
            }
        }

        impl Marshal for AnyCommand {
            fn method(&self) -> &str {
                match self {
                    $(AnyCommand::$variant(_) => <$cmd as Command>::METHOD,)*
                }
            }

            fn params(&self) -> Result<Vec<Option<Value>>> {
                match self {
                    $(AnyCommand::$variant(cmd) => cmd.to_params(),)*
                }
            }
        }

        $(
            impl From<$cmd> for AnyCommand {
                fn from(cmd: $cmd) -> Self { AnyCommand::$variant(cmd) }
            }
        )*
    };
}

any_command! {
    /// `z_exportkey`
    ZExportKey(ZExportKeyCmd),
    /// `z_exportwallet`
    ZExportWallet(ZExportWalletCmd),
    /// `z_getbalance`
    ZGetBalance(ZGetBalanceCmd),
    /// `z_getnewaddress`
    ZGetNewAddress(ZGetNewAddressCmd),
    /// `z_getoperationresult`
    ZGetOperationResult(ZGetOperationResultCmd),
    /// `z_getoperationstatus`
    ZGetOperationStatus(ZGetOperationStatusCmd),
    /// `z_gettotalbalance`
    ZGetTotalBalance(ZGetTotalBalanceCmd),
    /// `z_importkey`
    ZImportKey(ZImportKeyCmd),
    /// `z_importwallet`
    ZImportWallet(ZImportWalletCmd),
    /// `z_listaddresses`
    ZListAddresses(ZListAddressesCmd),
    /// `z_listoperationids`
    ZListOperationIds(ZListOperationIdsCmd),
    /// `z_listreceivedbyaddress`
    ZListReceivedByAddress(ZListReceivedByAddressCmd),
    /// `z_sendmany`
    ZSendMany(ZSendManyCmd),
}

/// Register every Zcash wallet command on `builder`.
pub fn register_wallet_commands(builder: &mut RegistryBuilder) -> std::result::Result<(), RegistryError> {
    for descriptor in AnyCommand::descriptors() {
        builder.register(descriptor)?;
    }
    Ok(())
}

/// A registry holding exactly the Zcash wallet commands.
pub fn wallet_registry() -> std::result::Result<CommandRegistry, RegistryError> {
    let mut builder = CommandRegistry::builder();
    register_wallet_commands(&mut builder)?;
    Ok(builder.build())
}
