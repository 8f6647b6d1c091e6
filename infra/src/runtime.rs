//! Runtime wiring of the shared store, verification service and sweeper

use std::sync::Arc;

use otp_core::repositories::ExpiringStore;
use otp_core::services::sweeper::{CodeSweeper, SweeperHandle};
use otp_core::services::verification::{ConfigSource, VerificationService};
use tracing::info;

use crate::config::{load_config, EnvConfigSource, InfrastructureConfig};
use crate::delivery::SmsDeliveryChannel;
use crate::sms::{create_sms_service, SmsService};
use crate::InfrastructureError;

/// Verification service over SMS delivery and the in-memory store
pub type SmsVerificationService = VerificationService<SmsDeliveryChannel, ExpiringStore>;

/// A running verification stack
///
/// Owns the verification service, the store it shares with the sweeper, and
/// the sweeper handle. Must be created inside a tokio runtime.
pub struct OtpRuntime {
    service: SmsVerificationService,
    store: Arc<ExpiringStore>,
    sweeper: Option<SweeperHandle>,
}

impl OtpRuntime {
    /// The verification service
    pub fn service(&self) -> &SmsVerificationService {
        &self.service
    }

    /// The shared store
    pub fn store(&self) -> &Arc<ExpiringStore> {
        &self.store
    }

    /// Whether a background sweeper was started
    pub fn sweeper_running(&self) -> bool {
        self.sweeper
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stop the background sweeper and wait for it to exit
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.sweeper.take() {
            handle.shutdown().await;
        }
        info!("Verification runtime stopped");
    }
}

/// Build a runtime from a loaded configuration
///
/// Verification settings are fixed to `config.otp.verification`.
pub fn initialize(config: &InfrastructureConfig) -> Result<OtpRuntime, InfrastructureError> {
    config
        .otp
        .verification
        .validate()
        .map_err(InfrastructureError::Config)?;

    let source: Arc<dyn ConfigSource> = Arc::new(config.otp.verification.clone());
    Ok(assemble(config, source, create_sms_service(&config.sms)))
}

/// Build a runtime whose verification settings are re-read from the
/// environment on every send
pub fn initialize_from_env() -> Result<OtpRuntime, InfrastructureError> {
    let config = load_config()?;
    let source: Arc<dyn ConfigSource> = Arc::new(EnvConfigSource::new());
    Ok(assemble(&config, source, create_sms_service(&config.sms)))
}

/// Build a runtime around an existing SMS service
pub fn initialize_with_sms(
    config: &InfrastructureConfig,
    sms: Arc<dyn SmsService>,
) -> Result<OtpRuntime, InfrastructureError> {
    config
        .otp
        .verification
        .validate()
        .map_err(InfrastructureError::Config)?;

    let source: Arc<dyn ConfigSource> = Arc::new(config.otp.verification.clone());
    Ok(assemble(config, source, sms))
}

fn assemble(
    config: &InfrastructureConfig,
    source: Arc<dyn ConfigSource>,
    sms: Arc<dyn SmsService>,
) -> OtpRuntime {
    let store = Arc::new(ExpiringStore::new());
    let provider = sms.provider_name().to_string();
    let channel = Arc::new(SmsDeliveryChannel::new(sms));

    let service = VerificationService::new(channel, Arc::clone(&store), source);
    let sweeper =
        Arc::new(CodeSweeper::new(Arc::clone(&store), config.otp.sweeper.clone())).start_background_task();

    info!(
        environment = %config.otp.environment,
        provider = %provider,
        sweeper_enabled = sweeper.is_some(),
        "Verification runtime initialized"
    );

    OtpRuntime {
        service,
        store,
        sweeper,
    }
}
