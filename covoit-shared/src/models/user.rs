use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered carpooling user. Drivers and passengers are both users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Body of `POST /users`. Only `email` is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    // Older clients still send the misspelled key.
    #[serde(default, alias = "adress")]
    pub address: String,
}

impl NewUser {
    pub fn into_user(self, user_id: Uuid) -> User {
        User {
            user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

/// Body of `PATCH /users`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "adress")]
    pub address: Option<String>,
}

impl UserPatch {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            user.address = address.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_missing_fields() {
        let json = r#"{"email":"a@test.com","first_name":"A"}"#;
        let new_user: NewUser = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(new_user.email, "a@test.com");
        assert_eq!(new_user.first_name, "A");
        assert!(new_user.last_name.is_empty());
        assert!(new_user.address.is_empty());
    }

    #[test]
    fn test_new_user_requires_email() {
        let json = r#"{"first_name":"A"}"#;
        assert!(serde_json::from_str::<NewUser>(json).is_err());
    }

    #[test]
    fn test_legacy_address_key_is_accepted() {
        let json = r#"{"email":"a@test.com","adress":"1 rue de la Paix"}"#;
        let new_user: NewUser = serde_json::from_str(json).unwrap();
        assert_eq!(new_user.address, "1 rue de la Paix");

        let user = new_user.into_user(Uuid::new_v4());
        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out["address"], "1 rue de la Paix");
        assert!(out.get("adress").is_none());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut user = NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@test.com".to_string(),
            phone: "0102030405".to_string(),
            address: "London".to_string(),
        }
        .into_user(Uuid::new_v4());

        let patch: UserPatch = serde_json::from_str(r#"{"phone":"0607080910"}"#).unwrap();
        patch.apply_to(&mut user);

        assert_eq!(user.phone, "0607080910");
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.email, "ada@test.com");
    }
}
