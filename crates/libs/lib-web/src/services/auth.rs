//! # Authentication Gateway
//!
//! Login and registration decision flow. The gateway validates the request,
//! delegates every account and credential operation to an
//! [`IdentityProvider`] / [`UserStore`], and issues a token on success.
//! It knows nothing about HTTP: delivering the token (cookie, body) is the
//! handler's job.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lib_auth::{PasswordPolicy, TokenConfig};
//! use lib_core::{dto::LoginRequest, MemoryIdentity};
//! use lib_web::services::AuthGateway;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let backend = Arc::new(MemoryIdentity::new(PasswordPolicy::default()));
//! let gateway = AuthGateway::with_backend(backend, TokenConfig {
//!     signing_key: "a-signing-key-that-is-at-least-32-chars".to_string(),
//!     issuer: "https://auth.example.com".to_string(),
//!     audience: "https://app.example.com".to_string(),
//! });
//!
//! let outcome = gateway
//!     .login(&LoginRequest { email: "a@b.com".into(), password: "Secret1!".into() })
//!     .await?;
//! println!("token for {}: {}", outcome.account.id, outcome.token);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use lib_auth::{issue_token, TokenConfig};
use lib_core::dto::{LoginRequest, RegisterRequest};
use lib_core::{AppError, IdentityProvider, Result, UserAccount, UserAccountForCreate, UserStore};
use tracing::{debug, info, instrument, warn};

/// A signed-in account and the token issued for it.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub account: UserAccount,
    pub token: String,
}

/// Login/registration service over an identity backend.
#[derive(Clone)]
pub struct AuthGateway {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserStore>,
    token_config: TokenConfig,
}

impl AuthGateway {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserStore>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            identity,
            users,
            token_config,
        }
    }

    /// Gateway over a backend that is both the identity provider and the user store.
    pub fn with_backend<B>(backend: Arc<B>, token_config: TokenConfig) -> Self
    where
        B: IdentityProvider + UserStore + 'static,
    {
        Self::new(backend.clone(), backend, token_config)
    }

    pub fn token_config(&self) -> &TokenConfig {
        &self.token_config
    }

    /// Authenticate an existing account.
    ///
    /// Unknown email and wrong password both fail with
    /// [`AppError::InvalidCredentials`].
    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthOutcome> {
        if let Err(e) = req.validate() {
            warn!("[LOGIN] Rejected malformed request: {}", e);
            return Err(e);
        }

        debug!("[LOGIN] Looking up account...");
        let Some(account) = self.identity.find_by_email(&req.email).await? else {
            warn!("[LOGIN] No account for email");
            return Err(AppError::InvalidCredentials);
        };

        debug!("[LOGIN] Verifying password...");
        if !self.identity.verify_password(&account, &req.password).await? {
            warn!("[LOGIN] Wrong password for account {}", account.id);
            return Err(AppError::InvalidCredentials);
        }

        self.identity.sign_in(&account).await?;
        let token = self.issue(&account)?;

        info!("[LOGIN] Account {} authenticated", account.id);
        Ok(AuthOutcome { account, token })
    }

    /// Create an account and sign it in.
    ///
    /// The uniqueness scan is advisory; the backend's create is what makes
    /// a concurrent duplicate fail with [`AppError::EmailAlreadyInUse`].
    ///
    /// Creation and sign-in are not atomic. If `sign_in` (or token issuing)
    /// fails after the account was created, the account stays stored and the
    /// caller gets [`AppError::Internal`]; a retry then fails with
    /// [`AppError::EmailAlreadyInUse`] while a login with the same
    /// credentials succeeds.
    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthOutcome> {
        if let Err(e) = req.validate() {
            warn!("[REGISTER] Rejected malformed request: {}", e);
            return Err(e);
        }

        debug!("[REGISTER] Checking email uniqueness...");
        let accounts = self.users.list_all_accounts().await?;
        if accounts.iter().any(|account| account.email == req.email) {
            warn!("[REGISTER] Email already registered");
            return Err(AppError::EmailAlreadyInUse);
        }

        debug!("[REGISTER] Creating account...");
        let account = self
            .identity
            .create_account(UserAccountForCreate::from(req), &req.password)
            .await
            .inspect_err(|e| warn!("[REGISTER] Account creation failed: {}", e))?;

        self.identity.sign_in(&account).await?;
        let token = self.issue(&account)?;

        info!("[REGISTER] Account {} created and authenticated", account.id);
        Ok(AuthOutcome { account, token })
    }

    fn issue(&self, account: &UserAccount) -> Result<String> {
        Ok(issue_token(&account.email, &self.token_config)?)
    }
}
