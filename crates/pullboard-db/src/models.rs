//! Row types that carry columns the shared models leave out.

pub struct UserRow {
    pub uid: String,
    pub name: String,
    /// Argon2 PHC string.
    pub password: String,
    pub icon: Option<String>,
}
