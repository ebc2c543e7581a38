#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: i64,
    pub number_phone: i64,
    pub client_id: i64,
}
