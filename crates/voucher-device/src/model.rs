//! Hotspot Data Model

use serde::{Deserialize, Serialize};

/// A hotspot user entry to be written to the device
///
/// The device owns the authoritative record; this is a write-only issuance,
/// never read back or stored locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotUser {
    pub name: String,
    pub password: String,

    /// Service tier on the device (e.g. "1hour")
    pub profile: String,

    /// Descriptive tag shown in the device UI
    pub comment: String,
}

/// One row from `/ip/hotspot/active`
///
/// RouterOS reports everything as kebab-cased strings; fields the firmware
/// omits stay `None`. Round-trips to the same JSON shape the device sent,
/// since `/active-users` hands these straight back to callers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    /// Internal RouterOS row id (".id" on the wire)
    #[serde(rename = ".id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Hotspot username of the connected client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(
        rename = "mac-address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mac_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,

    #[serde(rename = "login-by", default, skip_serializing_if = "Option::is_none")]
    pub login_by: Option<String>,

    /// Hotspot server instance the client is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    #[serde(
        rename = "session-time-left",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_time_left: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_routeros_active_row() {
        let body = r#"{
            ".id": "*81",
            "user": "VCH1",
            "address": "10.5.50.17",
            "mac-address": "DC:2C:6E:12:34:56",
            "uptime": "42m11s",
            "login-by": "http-chap",
            "server": "hotspot1"
        }"#;

        let session: ActiveSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.id.as_deref(), Some("*81"));
        assert_eq!(session.user.as_deref(), Some("VCH1"));
        assert_eq!(session.mac_address.as_deref(), Some("DC:2C:6E:12:34:56"));

        let wire = serde_json::to_value(&session).unwrap();
        assert_eq!(wire[".id"], "*81");
        assert_eq!(wire["mac-address"], "DC:2C:6E:12:34:56");
        assert!(wire.get("session-time-left").is_none());
    }
}
