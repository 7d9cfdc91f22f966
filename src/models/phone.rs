#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: i32,
    pub phone_number: i64,
    pub client_id: i32,
}
