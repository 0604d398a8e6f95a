//! Structured content types and the payload strings they encode to.

use serde::{Deserialize, Serialize};

use crate::common::error::QRResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Content {
    Url(String),
    Text(String),
    Wifi(Wifi),
    Email(Email),
    Vcard(VCard),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wifi {
    pub ssid: String,
    pub encryption: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub email: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VCard {
    pub first_name: String,
    pub last_name: String,
    pub org: String,
    pub title: String,
    pub work_phone: String,
    pub mobile_phone: String,
    pub email: String,
}

impl Content {
    pub fn from_json(json: &str) -> QRResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Text handed to the QR encoder. Missing fields encode as empty strings.
    pub fn payload(&self) -> String {
        match self {
            Self::Url(s) | Self::Text(s) => s.clone(),
            Self::Wifi(w) => format!("WIFI:S:{};T:{};P:{};;", w.ssid, w.encryption, w.password),
            Self::Email(e) => format!("mailto:{}?subject={}&body={}", e.email, e.subject, e.body),
            Self::Vcard(v) => [
                "BEGIN:VCARD".to_string(),
                "VERSION:3.0".to_string(),
                format!("N:{};{}", v.last_name, v.first_name),
                format!("FN:{} {}", v.first_name, v.last_name),
                format!("ORG:{}", v.org),
                format!("TITLE:{}", v.title),
                format!("TEL;TYPE=WORK,VOICE:{}", v.work_phone),
                format!("TEL;TYPE=CELL,VOICE:{}", v.mobile_phone),
                format!("EMAIL:{}", v.email),
                "END:VCARD".to_string(),
            ]
            .join("\n"),
        }
    }
}

#[cfg(test)]
mod content_tests {
    use test_case::test_case;

    use super::Content;

    #[test_case(r#"{ "type": "url", "data": "https://example.com" }"#, "https://example.com")]
    #[test_case(r#"{ "type": "text", "data": "hello there" }"#, "hello there")]
    #[test_case(
        r#"{ "type": "wifi", "data": { "ssid": "home", "encryption": "WPA", "password": "s3cret" } }"#,
        "WIFI:S:home;T:WPA;P:s3cret;;"
    )]
    #[test_case(
        r#"{ "type": "email", "data": { "email": "a@b.c", "subject": "Hi", "body": "Yo" } }"#,
        "mailto:a@b.c?subject=Hi&body=Yo"
    )]
    #[test_case(r#"{ "type": "wifi", "data": { "ssid": "open" } }"#, "WIFI:S:open;T:;P:;;")]
    fn test_payload(json: &str, exp: &str) {
        assert_eq!(Content::from_json(json).unwrap().payload(), exp);
    }

    #[test]
    fn test_vcard_payload() {
        let content = Content::from_json(
            r#"{ "type": "vcard", "data": {
                "firstName": "Ada", "lastName": "Lovelace", "org": "Engines Ltd",
                "title": "Analyst", "workPhone": "+44 1", "mobilePhone": "+44 2",
                "email": "ada@example.com"
            } }"#,
        )
        .unwrap();
        assert_eq!(
            content.payload(),
            "BEGIN:VCARD\nVERSION:3.0\nN:Lovelace;Ada\nFN:Ada Lovelace\nORG:Engines Ltd\n\
             TITLE:Analyst\nTEL;TYPE=WORK,VOICE:+44 1\nTEL;TYPE=CELL,VOICE:+44 2\n\
             EMAIL:ada@example.com\nEND:VCARD"
        );
    }

    #[test]
    fn test_unknown_type_is_error() {
        assert!(Content::from_json(r#"{ "type": "menu", "data": {} }"#).is_err());
        assert!(Content::from_json(r#"{ "data": "x" }"#).is_err());
    }
}
