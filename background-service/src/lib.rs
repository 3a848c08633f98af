pub mod notify;
pub mod poll;
pub mod service;

pub use notify::{DesktopNotifier, Notifier};
pub use poll::{PollCycle, PollOutcome};
pub use service::PollService;
