use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
pub(crate) struct User {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: OffsetDateTime,
}

impl From<User> for crate::domain::user::User {
    fn from(record: User) -> Self {
        Self {
            username: record.username,
            password_hash: record.password_hash,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            join_at: record.join_at,
        }
    }
}
