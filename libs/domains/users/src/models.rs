use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Body of `POST /users`.
///
/// Missing and `null` fields bind as empty strings; a field of any other
/// non-string type is a binding error. There is no id: clients never choose one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// User record as stored in the `users` collection
///
/// `id` maps to `_id` and is left out of the document until the storage layer
/// assigns one. Empty `name`/`email` are left out as well and read back as
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "665f1c2e9b1e8a3d4c5b6a79")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl User {
    /// Build an unsaved record from the request, copying fields verbatim.
    pub fn new(input: UserRequest) -> Self {
        Self {
            id: None,
            name: input.name,
            email: input.email,
        }
    }
}

impl From<UserRequest> for User {
    fn from(input: UserRequest) -> Self {
        Self::new(input)
    }
}
