#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: i64,
    pub username: String,
}

impl Admin {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Admin {
            id,
            username: username.into(),
        }
    }
}
