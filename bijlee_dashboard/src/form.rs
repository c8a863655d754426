use std::time::Duration;

use bijlee_chain::Address;
use bijlee_core::error::TransferError;
use bijlee_core::helpers::amount::validate_amount;
use bijlee_core::helpers::dto::{TransferRequest, TransferStatus};

/// Delay before the post-success balance refresh, giving external indexers
/// time to catch up.
pub const REFRESH_DELAY: Duration = Duration::from_secs(2);

type StatusCallback = Box<dyn Fn(&str) + Send>;

/// The transfer form state machine: mirrors orchestrator outcomes into the
/// four user-visible statuses and owns the form inputs.
///
/// Exactly one transfer is in flight at a time; submits while `processing`
/// are rejected. Switching the connected wallet resets the status to `idle`
/// regardless of prior state.
pub struct TransferForm {
    wallet: Option<Address>,
    recipient: String,
    amount: String,
    status: TransferStatus,
    signature: Option<String>,
    error_message: Option<String>,
    on_success: Option<StatusCallback>,
    on_error: Option<StatusCallback>,
}

impl TransferForm {
    pub fn new() -> Self {
        Self {
            wallet: None,
            recipient: String::new(),
            amount: String::new(),
            status: TransferStatus::Idle,
            signature: None,
            error_message: None,
            on_success: None,
            on_error: None,
        }
    }

    pub fn on_success(&mut self, callback: impl Fn(&str) + Send + 'static) {
        self.on_success = Some(Box::new(callback));
    }

    pub fn on_error(&mut self, callback: impl Fn(&str) + Send + 'static) {
        self.on_error = Some(Box::new(callback));
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == TransferStatus::Processing
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Tracks the active wallet identity. Any change, including
    /// disconnecting, resets the status to `idle`.
    pub fn connect_wallet(&mut self, wallet: Option<Address>) {
        if self.wallet != wallet {
            self.wallet = wallet;
            self.status = TransferStatus::Idle;
            self.signature = None;
            self.error_message = None;
        }
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        if !self.is_loading() {
            self.recipient = recipient.into();
        }
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        if !self.is_loading() {
            self.amount = amount.into();
        }
    }

    /// Validates the inputs and enters `processing`. Validation failures
    /// leave the form idle with a message set.
    pub fn begin_submit(&mut self) -> Result<TransferRequest, String> {
        if self.is_loading() {
            return Err("a transfer is already in progress".to_string());
        }
        if self.wallet.is_none() {
            return Err(self.reject("please connect your wallet first"));
        }
        let recipient = self.recipient.trim().to_string();
        if recipient.is_empty() {
            return Err(self.reject("recipient address is required"));
        }
        if Address::from_base58(&recipient).is_err() {
            return Err(self.reject("invalid recipient address"));
        }
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(amount) => amount,
            Err(_) => return Err(self.reject("please enter a valid amount")),
        };
        if validate_amount(amount).is_err() {
            return Err(self.reject("please enter a valid amount"));
        }

        self.error_message = None;
        self.signature = None;
        self.status = TransferStatus::Processing;
        Ok(TransferRequest { recipient, amount })
    }

    fn reject(&mut self, message: &str) -> String {
        self.error_message = Some(message.to_string());
        message.to_string()
    }

    /// Applies the orchestrator outcome. Success clears the inputs and fires
    /// `on_success`; the caller then waits [`REFRESH_DELAY`] before
    /// refreshing the displayed balance.
    pub fn complete(&mut self, result: Result<String, TransferError>) {
        match result {
            Ok(signature) => {
                self.status = TransferStatus::Success;
                self.recipient.clear();
                self.amount.clear();
                self.error_message = None;
                if let Some(callback) = &self.on_success {
                    callback(&signature);
                }
                self.signature = Some(signature);
            }
            Err(err) => {
                self.status = TransferStatus::Error;
                let message = err.to_string();
                if let Some(callback) = &self.on_error {
                    callback(&message);
                }
                self.error_message = Some(message);
            }
        }
    }
}

impl Default for TransferForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn wallet() -> Address {
        Address::new([1u8; 32])
    }

    fn recipient() -> String {
        Address::new([2u8; 32]).to_base58()
    }

    fn ready_form() -> TransferForm {
        let mut form = TransferForm::new();
        form.connect_wallet(Some(wallet()));
        form.set_recipient(recipient());
        form.set_amount("1.5");
        form
    }

    #[test]
    fn successful_transfer_clears_inputs_and_fires_callback() {
        let mut form = ready_form();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        form.on_success(move |signature| sink.lock().unwrap().push(signature.to_string()));

        let request = form.begin_submit().unwrap();
        assert_eq!(form.status(), TransferStatus::Processing);
        assert!(form.is_loading());
        assert_eq!(request.recipient, recipient());
        assert!((request.amount - 1.5).abs() < f64::EPSILON);

        form.complete(Ok("5Signature".to_string()));
        assert_eq!(form.status(), TransferStatus::Success);
        assert_eq!(form.recipient(), "");
        assert_eq!(form.amount(), "");
        assert_eq!(form.signature(), Some("5Signature"));
        assert_eq!(seen.lock().unwrap().as_slice(), ["5Signature".to_string()]);
    }

    #[test]
    fn failed_transfer_reports_error_and_keeps_inputs() {
        let mut form = ready_form();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        form.on_error(move |message| sink.lock().unwrap().push(message.to_string()));

        form.begin_submit().unwrap();
        form.complete(Err(TransferError::SigningRejected(
            "user declined".to_string(),
        )));

        assert_eq!(form.status(), TransferStatus::Error);
        assert_eq!(form.recipient(), recipient());
        assert!(form.error_message().unwrap().contains("user declined"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn validation_failures_leave_the_form_idle() {
        let mut form = TransferForm::new();
        assert!(form.begin_submit().is_err()); // no wallet
        assert_eq!(form.status(), TransferStatus::Idle);

        form.connect_wallet(Some(wallet()));
        assert!(form.begin_submit().is_err()); // no recipient
        form.set_recipient("not-an-address");
        form.set_amount("1.0");
        assert!(form.begin_submit().is_err());
        assert_eq!(form.error_message(), Some("invalid recipient address"));

        form.set_recipient(recipient());
        form.set_amount("zero");
        assert!(form.begin_submit().is_err());
        form.set_amount("-2");
        assert!(form.begin_submit().is_err());
        assert_eq!(form.status(), TransferStatus::Idle);
    }

    #[test]
    fn reentrant_submits_are_rejected_while_loading() {
        let mut form = ready_form();
        form.begin_submit().unwrap();
        assert!(form.begin_submit().is_err());
        assert_eq!(form.status(), TransferStatus::Processing);
    }

    #[test]
    fn inputs_are_frozen_while_loading() {
        let mut form = ready_form();
        form.begin_submit().unwrap();
        form.set_recipient("changed");
        form.set_amount("99");
        assert_eq!(form.recipient(), recipient());
        assert_eq!(form.amount(), "1.5");
    }

    #[test]
    fn wallet_switch_resets_status_from_any_state() {
        let mut form = ready_form();
        form.begin_submit().unwrap();
        form.complete(Ok("5Signature".to_string()));
        assert_eq!(form.status(), TransferStatus::Success);

        form.connect_wallet(Some(Address::new([9u8; 32])));
        assert_eq!(form.status(), TransferStatus::Idle);
        assert_eq!(form.signature(), None);

        // Mid-flight switch also resets.
        form.set_recipient(recipient());
        form.set_amount("1");
        form.begin_submit().unwrap();
        form.connect_wallet(None);
        assert_eq!(form.status(), TransferStatus::Idle);
    }

    #[test]
    fn reconnecting_the_same_wallet_keeps_state() {
        let mut form = ready_form();
        form.begin_submit().unwrap();
        form.complete(Ok("5Signature".to_string()));

        form.connect_wallet(Some(wallet()));
        assert_eq!(form.status(), TransferStatus::Success);
        assert_eq!(form.signature(), Some("5Signature"));
    }
}
