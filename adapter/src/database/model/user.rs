use kernel::model::id::UserId;
use kernel::model::user::User;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            user_id,
            user_name,
            email,
        } = value;
        User {
            user_id,
            user_name,
            email,
        }
    }
}
