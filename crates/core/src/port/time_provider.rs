// Time Provider Port (for testability)

use chrono::{DateTime, Local};

/// Time provider interface (allows fixed timestamps in tests)
pub trait TimeProvider: Send + Sync {
    /// Current wall-clock time in the operator's timezone
    fn now(&self) -> DateTime<Local>;

    /// Timestamp used in log file names, e.g. `20231010_142501`
    fn file_stamp(&self) -> String {
        self.now().format("%Y%m%d_%H%M%S").to_string()
    }
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub mod mocks {
    use super::*;

    /// Always returns the same instant
    pub struct FixedTimeProvider(pub DateTime<Local>);

    impl TimeProvider for FixedTimeProvider {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }
}
