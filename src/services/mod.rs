//! Business logic services module.

pub mod analytics;
pub mod guess;
pub mod notifier;

pub use analytics::{Analytics, TracingAnalytics};
pub use guess::GuessSubmitter;
pub use notifier::{MessageLog, Notifier};
