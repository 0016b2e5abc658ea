//! Capability checks for account operations.

use uuid::Uuid;

/// Authenticated identity of the requester, decoded from its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub is_admin: bool,
}

pub fn can_list(caller: &Caller) -> bool {
    caller.is_admin
}

/// Owners see their own record; admins see every record.
pub fn can_view(caller: &Caller, target: Uuid) -> bool {
    caller.id == target || caller.is_admin
}

pub fn can_delete(caller: &Caller) -> bool {
    caller.is_admin
}
