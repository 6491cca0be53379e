use serde::{Deserialize, Serialize};

/// An OAuth access token for the spreadsheet service.
///
/// `expires_at` is milliseconds since the Unix epoch, the shape the web
/// client stores under `driveCredentials`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveCredentials {
    pub access_token: String,
    pub expires_at: i64,
}

impl DriveCredentials {
    /// Credentials valid for `expires_in_secs` from `now`.
    pub fn issued_at(
        access_token: impl Into<String>,
        expires_in_secs: i64,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: now
                .as_millisecond()
                .saturating_add(expires_in_secs.saturating_mul(1000)),
        }
    }

    pub fn is_valid_at(&self, now: jiff::Timestamp) -> bool {
        self.expires_at > now.as_millisecond()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(jiff::Timestamp::now())
    }
}
