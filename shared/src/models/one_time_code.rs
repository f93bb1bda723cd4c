//! One-time email verification code

use serde::{Deserialize, Serialize};

/// Short-lived email-verification challenge
///
/// Consumed (deleted) on the first successful or expired check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Challenge id handed back to the client: "{user_id}-{millis}".
    /// Doubles as the record key, so it is never written as content.
    #[serde(skip_serializing)]
    pub id: String,
    pub user_id: String,
    pub email: String,
    /// Six random decimal digits
    pub code: String,
    /// Unix milliseconds; codes are valid for ten minutes
    pub expires_at: i64,
    #[serde(default)]
    pub created_at: i64,
}

impl OneTimeCode {
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_exclusive_of_deadline() {
        let code = OneTimeCode {
            id: "u1-1000".into(),
            user_id: "u1".into(),
            email: "a@b.c".into(),
            code: "123456".into(),
            expires_at: 1000,
            created_at: 0,
        };
        assert!(!code.is_expired(1000));
        assert!(code.is_expired(1001));
    }
}
