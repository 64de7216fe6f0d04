// Domain-layer modules and shared errors/models
pub mod cnpj {
    pub use crate::cnpj::*;
}

pub mod aggregator {
    pub use crate::aggregator::*;
}

pub mod risk {
    pub use crate::risk::*;
}

pub mod dossier {
    pub use crate::dossier::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
