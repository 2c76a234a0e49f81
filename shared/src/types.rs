use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ========== USER ==========

/// User stored in the users table. Only `userid` is required; everything
/// the client sent besides it is carried through in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub userid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UserRecord {
    /// Build a record for writing, stamped with the server time
    pub fn stamped(userid: String, mut attributes: Map<String, Value>, now: DateTime<Utc>) -> Self {
        attributes.remove("userid");
        attributes.remove("timestamp");
        Self {
            userid,
            timestamp: Some(format_timestamp(now)),
            attributes,
        }
    }

    /// Lift a decoded store item. Returns None if the key is missing or not a string.
    pub fn from_map(mut map: Map<String, Value>) -> Option<Self> {
        let userid = match map.remove("userid") {
            Some(Value::String(id)) => id,
            _ => return None,
        };
        // a non-string timestamp written by someone else stays an ordinary attribute
        let timestamp = match map.remove("timestamp") {
            Some(Value::String(ts)) => Some(ts),
            Some(other) => {
                map.insert("timestamp".to_string(), other);
                None
            }
            None => None,
        };
        Some(Self {
            userid,
            timestamp,
            attributes: map,
        })
    }

    /// Flatten back into a plain JSON object
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.attributes;
        map.insert("userid".to_string(), Value::String(self.userid));
        if let Some(ts) = self.timestamp {
            map.insert("timestamp".to_string(), Value::String(ts));
        }
        map
    }
}

/// Request body for POST /users and PUT /users/{userid}
#[derive(Debug, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub userid: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UserInput {
    /// Keep a caller-supplied id, otherwise mint a fresh one
    pub fn into_created(self, now: DateTime<Utc>) -> UserRecord {
        let userid = self
            .userid
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        UserRecord::stamped(userid, self.attributes, now)
    }

    /// The path id always wins over whatever the body carried
    pub fn into_replacement(self, userid: &str, now: DateTime<Utc>) -> UserRecord {
        UserRecord::stamped(userid.to_string(), self.attributes, now)
    }
}

/// ISO-8601 UTC with microseconds, e.g. `2024-05-01T09:30:00.123456+00:00`
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

// ========== PAGINATION ==========

/// Resume position of a paged scan: the last evaluated key of the table.
/// Clients see it as a JSON string and hand it back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCursor {
    pub userid: String,
}

impl ScanCursor {
    pub fn new(userid: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
        }
    }

    /// Anything that is not a JSON object with a non-empty string `userid` yields None
    pub fn parse(token: &str) -> Option<Self> {
        serde_json::from_str::<Self>(token)
            .ok()
            .filter(|cursor| !cursor.userid.is_empty())
    }

    pub fn to_token(&self) -> String {
        serde_json::json!({ "userid": self.userid }).to_string()
    }
}

/// One page of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<UserRecord>,
    pub next: Option<ScanCursor>,
}
