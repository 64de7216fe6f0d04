//! External data providers and their fallbacks.

pub mod services {
    pub use crate::services::*;
}

pub mod fallback {
    pub use crate::fallback::*;
}
