use crate::{Sid, SystemResult};

pub trait ProfileRemover: Send + Sync {
    /// Remove the OS profile registration (and its folder) for `identity`.
    fn delete_profile(&self, identity: &Sid) -> SystemResult<()>;
}
