use thiserror::Error;

use crate::repositories;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No locations have been configured")]
    NoLocations,
    #[error("The staging cache is empty")]
    EmptyStaging,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
