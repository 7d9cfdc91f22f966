#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Fields to change on an existing client. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phones: Vec<PhoneUpdate>,
}

/// New number for the phone row with id `phone_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneUpdate {
    pub number: i64,
    pub phone_id: i32,
}

/// How `find_client` locates a row
#[derive(Debug, Clone)]
pub enum ClientLookup {
    /// Exact match on all three fields
    Identity {
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Reverse lookup through the phone table
    Phone(i64),
}
