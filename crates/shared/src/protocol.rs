use crate::domain::UserRecord;

/// Route serving the directory's user records.
pub const USER_DATA_ROUTE: &str = "/userData";

/// Body of a successful `GET /userData`.
pub type UserDataResponse = Vec<UserRecord>;

pub fn decode_user_data(body: &[u8]) -> Result<UserDataResponse, serde_json::Error> {
    serde_json::from_slice(body)
}
