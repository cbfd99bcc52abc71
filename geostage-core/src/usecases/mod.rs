mod error;
mod precompute;
mod promote;


pub use self::{error::Error, precompute::*, promote::*};

pub type Result<T> = std::result::Result<T, Error>;

mod prelude {
    pub use super::{error::Error, Result};
    pub use crate::{
        entities::{cache::*, location::*},
        gateways::geocode::GeoCodingGateway,
        repositories::CacheRepo,
    };
}
