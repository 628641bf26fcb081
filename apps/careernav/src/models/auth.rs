use serde::{Deserialize, Serialize};

/// Token handed out by the local fallback for every successful sign-in.
pub const MOCK_TOKEN: &str = "mock-token";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The signed-in user as the backend describes it. Backends differ in which
/// fields they send, so every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserEcho {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Backends may omit the token; callers substitute `MOCK_TOKEN`.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserEcho>,
}

/// Informal record of the last account created on this device.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisteredUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Built-in account accepted by the local fallback.
#[derive(Debug, Clone)]
pub struct DemoUser {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

pub const DEMO_USERS: &[DemoUser] = &[DemoUser {
    email: "sai@gmail.com",
    password: "12345",
    name: "Sai Demo",
}];

impl DemoUser {
    pub fn authenticate(credentials: &Credentials) -> Option<&'static DemoUser> {
        DEMO_USERS
            .iter()
            .find(|u| u.email == credentials.email && u.password == credentials.password)
    }

    pub fn echo(&self) -> UserEcho {
        UserEcho {
            email: self.email.to_string(),
            name: self.name.to_string(),
        }
    }
}
