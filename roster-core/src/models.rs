use crate::errors::{RosterError, RosterResult};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A registered user as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Body of a `POST /register` request.
///
/// Decoding is lenient: unknown keys are ignored, keys match case-insensitively
/// when there is no exact match, a repeated key keeps its last value, and an
/// absent or `null` field leaves the empty string. Presence is checked
/// separately by [`RegisterRequest::into_user`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
}

impl RegisterRequest {
    /// Decode the first JSON value in `body`. Anything after it is ignored,
    /// and a top-level `null` decodes to an empty request.
    pub fn from_body(body: &[u8]) -> RosterResult<Self> {
        let mut values =
            serde_json::Deserializer::from_slice(body).into_iter::<Option<RegisterRequest>>();

        match values.next() {
            Some(Ok(request)) => Ok(request.unwrap_or_default()),
            Some(Err(e)) => Err(e.into()),
            None => Err(RosterError::InvalidBody("empty body".to_string())),
        }
    }

    pub fn into_user(self) -> RosterResult<User> {
        if self.username.is_empty() || self.email.is_empty() {
            return Err(RosterError::MissingFields);
        }

        Ok(User {
            username: self.username,
            email: self.email,
        })
    }
}

#[derive(Clone, Copy)]
enum Field {
    Username,
    Email,
}

impl Field {
    /// Exact key match first, then a case-insensitive one.
    fn for_key(key: &str) -> Option<Field> {
        let fields = [(Field::Username, "username"), (Field::Email, "email")];

        fields
            .iter()
            .find(|(_, name)| key == *name)
            .or_else(|| fields.iter().find(|(_, name)| fold_eq(key, name)))
            .map(|(field, _)| *field)
    }
}

/// Case-insensitive comparison against an ASCII field name. Besides ASCII
/// case, U+017F (long s) folds to `s` and U+212A (Kelvin sign) to `k`.
fn fold_eq(key: &str, name: &str) -> bool {
    let mut folded = key.chars().map(|c| match c {
        '\u{017F}' => 's',
        '\u{212A}' => 'k',
        c => c.to_ascii_lowercase(),
    });
    let matched = name.chars().all(|n| folded.next() == Some(n));
    matched && folded.next().is_none()
}

impl<'de> Deserialize<'de> for RegisterRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RegisterRequestVisitor)
    }
}

struct RegisterRequestVisitor;

impl<'de> Visitor<'de> for RegisterRequestVisitor {
    type Value = RegisterRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with username and email")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = RegisterRequest::default();

        while let Some(key) = map.next_key::<String>()? {
            let slot = match Field::for_key(&key) {
                Some(Field::Username) => &mut request.username,
                Some(Field::Email) => &mut request.email,
                None => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };

            // null keeps whatever an earlier key already set
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }

        Ok(request)
    }
}
