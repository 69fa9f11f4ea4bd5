use futures::task::SpawnError;

use crate::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`max_entries` must be greater than zero")]
    ZeroCapacity,

    #[error("failed to spawn fetch for request `{request_id}`")]
    Spawn {
        request_id: RequestId,
        #[source]
        source: SpawnError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
