use crate::types::db::Role;

/// The authenticated caller, resolved once at the API boundary and passed
/// explicitly into every workflow operation. Services never consult an
/// ambient security context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser {
    pub id: i64,
    pub role: Role,
}

impl ActingUser {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Owner-or-staff check used by edit and delete paths.
    pub fn can_modify(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.is_staff()
    }
}
