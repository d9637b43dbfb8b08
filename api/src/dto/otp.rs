use actix_web::web::{Either, Form, Json};
use serde::{Deserialize, Deserializer, Serialize};

/// A request body sent either as JSON or as an urlencoded form
pub type JsonOrForm<T> = Either<Json<T>, Form<T>>;

/// Unwrap whichever encoding the client used
pub fn payload<T>(body: Option<JsonOrForm<T>>) -> Option<T> {
    body.map(|body| match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Address to send the code to
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub email: Option<String>,

    /// The code the user received, sent as a string or a JSON number
    #[serde(default, deserialize_with = "string_or_number")]
    pub otp: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Integer(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

/// Read an optional field that clients send either quoted or as a number
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}

/// Body of every `POST /generate` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub message: String,
    pub success: bool,
}

impl GenerateResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_numeric_otp() {
        let request: VerifyRequest =
            serde_json::from_str(r#"{"email": "a@x.com", "otp": 4213}"#).unwrap();
        assert_eq!(request.otp.as_deref(), Some("4213"));

        let request: VerifyRequest = serde_json::from_str(r#"{"otp": 4213.0}"#).unwrap();
        assert_eq!(request.otp.as_deref(), Some("4213"));
    }

    #[test]
    fn test_verify_request_string_and_absent_otp() {
        let request: VerifyRequest = serde_json::from_str(r#"{"otp": "0421"}"#).unwrap();
        assert_eq!(request.otp.as_deref(), Some("0421"));

        let request: VerifyRequest = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert!(request.otp.is_none());

        let request: VerifyRequest = serde_json::from_str(r#"{"otp": null}"#).unwrap();
        assert!(request.otp.is_none());
    }
}
