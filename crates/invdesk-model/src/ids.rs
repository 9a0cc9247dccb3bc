use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ModelError;

/// Identifier of a server-side record.
///
/// Always carried as a string, even when the backend stores integers, so ids
/// survive JSON transport without precision loss. Deserialization accepts
/// both `"42"` and `42`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRecordId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        let raw = match Wire::deserialize(deserializer)? {
            Wire::Text(value) => value,
            Wire::Signed(value) => value.to_string(),
            Wire::Unsigned(value) => value.to_string(),
        };
        RecordId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Name of a paginated list view, e.g. `entrada_nf`.
///
/// Used to scope persisted selection state and to build endpoint paths, so
/// only ASCII alphanumerics, `_` and `-` are allowed.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ListViewKey(String);

impl ListViewKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ModelError::InvalidViewKey(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ListViewKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListViewKey> for String {
    fn from(value: ListViewKey) -> Self {
        value.0
    }
}

impl fmt::Display for ListViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_trims_and_rejects_blank() {
        assert_eq!(RecordId::new(" 7 ").unwrap().as_str(), "7");
        assert!(RecordId::new("   ").is_err());
    }

    #[test]
    fn record_id_accepts_numeric_json() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[5, "9", 12]"#).unwrap();
        let rendered: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
        assert_eq!(rendered, vec!["5", "9", "12"]);
    }

    #[test]
    fn view_key_rejects_separators() {
        assert!(ListViewKey::new("entrada_nf").is_ok());
        assert!(ListViewKey::new("saida-nf").is_ok());
        assert!(ListViewKey::new("a.b").is_err());
        assert!(ListViewKey::new("").is_err());
    }
}
