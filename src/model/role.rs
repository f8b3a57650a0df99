#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin = 1,
    Hr = 2,
    Guard = 3,
    Supervisor = 4,
    ApiUser = 5,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Guard),
            4 => Some(Role::Supervisor),
            5 => Some(Role::ApiUser),
            _ => None,
        }
    }
}
