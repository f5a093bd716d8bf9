//! Wallet operations, one `_async` / awaiting pair per command.
//!
//! Optional arguments take `None` for "use the daemon's default".

use bitcoin::Amount;
use zcashjson::{
    ZExportKeyCmd, ZExportWalletCmd, ZGetBalanceCmd, ZGetNewAddressCmd, ZGetOperationResultCmd,
    ZGetOperationStatusCmd, ZGetOperationStatusResult, ZGetTotalBalanceCmd, ZGetTotalBalanceResult,
    ZImportKeyCmd, ZImportWalletCmd, ZListAddressesCmd, ZListOperationIdsCmd,
    ZListReceivedByAddressCmd, ZListReceivedByAddressResult, ZSendManyCmd, ZSendManyEntry,
};

use crate::client::Client;
use crate::error::Result;
use crate::future::{decode_amount, decode_json, decode_nothing, TypedFuture};

impl Client {
    /// Dispatch `z_getoperationresult`.
    pub fn z_get_operation_result_async(
        &self,
        operation_ids: Option<Vec<String>>,
    ) -> TypedFuture<Vec<ZGetOperationStatusResult>> {
        self.typed(&ZGetOperationResultCmd::new(operation_ids), decode_json)
    }

    /// Results of finished async operations, removing them from the daemon.
    pub async fn z_get_operation_result(
        &self,
        operation_ids: Option<Vec<String>>,
    ) -> Result<Vec<ZGetOperationStatusResult>> {
        self.z_get_operation_result_async(operation_ids).receive().await
    }

    /// Dispatch `z_getoperationstatus`.
    pub fn z_get_operation_status_async(
        &self,
        operation_ids: Option<Vec<String>>,
    ) -> TypedFuture<Vec<ZGetOperationStatusResult>> {
        self.typed(&ZGetOperationStatusCmd::new(operation_ids), decode_json)
    }

    /// Status of async operations, finished or not.
    pub async fn z_get_operation_status(
        &self,
        operation_ids: Option<Vec<String>>,
    ) -> Result<Vec<ZGetOperationStatusResult>> {
        self.z_get_operation_status_async(operation_ids).receive().await
    }

    /// Dispatch `z_listoperationids`.
    pub fn z_list_operation_ids_async(&self, state: Option<String>) -> TypedFuture<Vec<String>> {
        self.typed(&ZListOperationIdsCmd::new(state), decode_json)
    }

    /// Ids of known async operations, optionally only those in `state`.
    pub async fn z_list_operation_ids(&self, state: Option<String>) -> Result<Vec<String>> {
        self.z_list_operation_ids_async(state).receive().await
    }

    /// Dispatch `z_sendmany`.
    pub fn z_send_many_async(
        &self,
        from_address: &str,
        amounts: Vec<ZSendManyEntry>,
        min_conf: Option<u32>,
        fee: Option<f64>,
    ) -> TypedFuture<String> {
        self.typed(&ZSendManyCmd::new(from_address, amounts, min_conf, fee), decode_json)
    }

    /// Send to several recipients; returns the id of the async operation
    /// that builds the transaction.
    pub async fn z_send_many(
        &self,
        from_address: &str,
        amounts: Vec<ZSendManyEntry>,
        min_conf: Option<u32>,
        fee: Option<f64>,
    ) -> Result<String> {
        self.z_send_many_async(from_address, amounts, min_conf, fee).receive().await
    }

    /// Dispatch `z_getnewaddress`.
    pub fn z_get_new_address_async(&self, address_type: Option<String>) -> TypedFuture<String> {
        self.typed(&ZGetNewAddressCmd::new(address_type), decode_json)
    }

    /// A new shielded address.
    pub async fn z_get_new_address(&self, address_type: Option<String>) -> Result<String> {
        self.z_get_new_address_async(address_type).receive().await
    }

    /// Dispatch `z_listaddresses`.
    pub fn z_list_addresses_async(&self, include_watch_only: Option<bool>) -> TypedFuture<Vec<String>> {
        self.typed(&ZListAddressesCmd::new(include_watch_only), decode_json)
    }

    /// Shielded addresses belonging to the wallet.
    pub async fn z_list_addresses(&self, include_watch_only: Option<bool>) -> Result<Vec<String>> {
        self.z_list_addresses_async(include_watch_only).receive().await
    }

    /// Dispatch `z_getbalance`.
    pub fn z_get_balance_async(&self, address: Option<String>, min_conf: Option<u32>) -> TypedFuture<Amount> {
        self.typed(&ZGetBalanceCmd::new(address, min_conf), decode_amount)
    }

    /// Balance of one address.
    pub async fn z_get_balance(&self, address: Option<String>, min_conf: Option<u32>) -> Result<Amount> {
        self.z_get_balance_async(address, min_conf).receive().await
    }

    /// Dispatch `z_gettotalbalance`.
    pub fn z_get_total_balance_async(
        &self,
        min_conf: Option<u32>,
        include_watch_only: Option<bool>,
    ) -> TypedFuture<ZGetTotalBalanceResult> {
        self.typed(&ZGetTotalBalanceCmd::new(min_conf, include_watch_only), decode_json)
    }

    /// Transparent, private and total wallet balances.
    pub async fn z_get_total_balance(
        &self,
        min_conf: Option<u32>,
        include_watch_only: Option<bool>,
    ) -> Result<ZGetTotalBalanceResult> {
        self.z_get_total_balance_async(min_conf, include_watch_only).receive().await
    }

    /// Dispatch `z_listreceivedbyaddress`.
    pub fn z_list_received_by_address_async(
        &self,
        address: &str,
        min_conf: Option<u32>,
    ) -> TypedFuture<Vec<ZListReceivedByAddressResult>> {
        self.typed(&ZListReceivedByAddressCmd::new(address, min_conf), decode_json)
    }

    /// Notes received by a shielded address.
    pub async fn z_list_received_by_address(
        &self,
        address: &str,
        min_conf: Option<u32>,
    ) -> Result<Vec<ZListReceivedByAddressResult>> {
        self.z_list_received_by_address_async(address, min_conf).receive().await
    }

    /// Dispatch `z_exportkey`.
    pub fn z_export_key_async(&self, address: &str) -> TypedFuture<String> {
        self.typed(&ZExportKeyCmd::new(address), decode_json)
    }

    /// Spending key of a shielded address.
    pub async fn z_export_key(&self, address: &str) -> Result<String> {
        self.z_export_key_async(address).receive().await
    }

    /// Dispatch `z_exportwallet`.
    pub fn z_export_wallet_async(&self, filename: &str) -> TypedFuture<()> {
        self.typed(&ZExportWalletCmd::new(filename), decode_nothing)
    }

    /// Export all wallet keys to `filename` in the daemon's export directory.
    pub async fn z_export_wallet(&self, filename: &str) -> Result<()> {
        self.z_export_wallet_async(filename).receive().await
    }

    /// Dispatch `z_importkey`.
    pub fn z_import_key_async(&self, zkey: &str, rescan: Option<bool>) -> TypedFuture<()> {
        self.typed(&ZImportKeyCmd::new(zkey, rescan), decode_nothing)
    }

    /// Import a spending key.
    pub async fn z_import_key(&self, zkey: &str, rescan: Option<bool>) -> Result<()> {
        self.z_import_key_async(zkey, rescan).receive().await
    }

    /// Dispatch `z_importwallet`.
    pub fn z_import_wallet_async(&self, filename: &str) -> TypedFuture<()> {
        self.typed(&ZImportWalletCmd::new(filename), decode_nothing)
    }

    /// Import keys from a file written by `z_exportwallet`.
    pub async fn z_import_wallet(&self, filename: &str) -> Result<()> {
        self.z_import_wallet_async(filename).receive().await
    }
}
