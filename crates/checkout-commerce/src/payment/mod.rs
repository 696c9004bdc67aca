//! Payment methods and the simulated payment processor.

mod method;
mod processor;

pub use method::{PaymentMethod, PaymentMethodInfo};
pub use processor::{PaymentProcessor, PaymentStatus, ProcessorConfig, SimulatedProcessor};
