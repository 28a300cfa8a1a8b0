//! Phone sign-in
//!
//! Sign-in is delegated to an external identity provider. This module only
//! models the provider's interface and drives the number → code → user flow
//! on top of it. The promotion store never depends on identity state.

use mockall::automock;
use thiserror::Error;
use tracing::{error, info};

/// Country calling code prepended to locally entered phone numbers.
pub const COUNTRY_CODE: &str = "+62";

/// Identity provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The provider rejected the phone number.
    #[error("phone number rejected: {0}")]
    InvalidPhoneNumber(String),

    /// The confirmation code did not match.
    #[error("invalid confirmation code")]
    InvalidCode,

    /// The provider could not be reached.
    #[error("identity provider unavailable")]
    Unavailable,
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Provider-assigned user identifier.
    pub uid: String,
}

/// Handle for a sent one-time code, awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    /// Provider-assigned verification identifier.
    pub verification_id: String,
}

/// External identity provider.
#[automock]
pub trait IdentityProvider {
    /// Send a one-time code to `phone_number` (international format).
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the number or is unreachable.
    fn sign_in_with_phone(&mut self, phone_number: &str) -> Result<PendingConfirmation, IdentityError>;

    /// Exchange the code sent for `pending` for a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is wrong or the provider is unreachable.
    fn confirm(&mut self, pending: &PendingConfirmation, code: &str) -> Result<User, IdentityError>;

    /// Sign the current user out.
    fn sign_out(&mut self);

    /// The currently signed-in user, if any.
    fn current_user(&self) -> Option<User>;
}

/// Where the sign-in flow currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignInState {
    /// Waiting for a phone number.
    #[default]
    EnteringNumber,

    /// A code was sent; waiting for the user to type it.
    AwaitingCode(PendingConfirmation),

    /// Signed in.
    SignedIn(User),
}

/// Phone one-time-code sign-in flow.
///
/// Provider failures are logged and leave the flow where it was.
#[derive(Debug)]
pub struct PhoneSignIn<P> {
    provider: P,
    state: SignInState,
}

impl<P: IdentityProvider> PhoneSignIn<P> {
    /// Start the flow, resuming as signed in when the provider already has a
    /// user.
    pub fn new(provider: P) -> Self {
        let state = provider
            .current_user()
            .map_or(SignInState::EnteringNumber, SignInState::SignedIn);

        Self { provider, state }
    }

    /// Current flow state.
    pub fn state(&self) -> &SignInState {
        &self.state
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SignInState::SignedIn(user) => Some(user),
            SignInState::EnteringNumber | SignInState::AwaitingCode(_) => None,
        }
    }

    /// Request a code for a local number (without the country code).
    ///
    /// # Errors
    ///
    /// Returns the provider's error; the flow state is unchanged.
    pub fn request_code(&mut self, local_number: &str) -> Result<(), IdentityError> {
        let phone_number = format!("{COUNTRY_CODE}{}", local_number.trim());

        match self.provider.sign_in_with_phone(&phone_number) {
            Ok(pending) => {
                self.state = SignInState::AwaitingCode(pending);

                Ok(())
            }
            Err(source) => {
                error!(%source, "failed to request sign-in code");

                Err(source)
            }
        }
    }

    /// Confirm the code the user received.
    ///
    /// Does nothing unless a code is pending.
    ///
    /// # Errors
    ///
    /// Returns the provider's error; the flow keeps awaiting a code.
    pub fn confirm_code(&mut self, code: &str) -> Result<(), IdentityError> {
        let SignInState::AwaitingCode(pending) = &self.state else {
            return Ok(());
        };

        match self.provider.confirm(pending, code.trim()) {
            Ok(user) => {
                info!(uid = %user.uid, "signed in");

                self.state = SignInState::SignedIn(user);

                Ok(())
            }
            Err(source) => {
                error!(%source, "failed to confirm sign-in code");

                Err(source)
            }
        }
    }

    /// Sign out and reset the flow.
    pub fn sign_out(&mut self) {
        self.provider.sign_out();
        self.state = SignInState::EnteringNumber;
    }
}
