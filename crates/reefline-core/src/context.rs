use crate::ids::UserId;

/// Identity of the caller, handed to every service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    user_id: UserId,
}

impl RequestContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
