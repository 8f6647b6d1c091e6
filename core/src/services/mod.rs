//! Business services containing domain logic and use cases.

pub mod clock;
pub mod code_generator;
pub mod sweeper;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use code_generator::{generate_code, CodeGenerator, RandomCodeGenerator};
pub use sweeper::{CodeSweeper, SweepResult, SweeperHandle};
pub use verification::{
    ConfigSource, DeliveryChannel, DeliveryFailure, DeliveryResponse, ProviderOptions,
    SendOptions, VerificationService,
};
