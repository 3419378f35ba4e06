use std::ops::Deref;

use serde::{Deserialize, Serialize};

pub mod contact;
pub mod email_address;

/// Wrapper for secrets (credentials, tokens) that must never show up in logs
/// or debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(pub T);

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[sensitive]")
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_debug_hides_value() {
        let secret = Sensitive::from("hunter2".to_owned());
        assert_eq!(format!("{secret:?}"), "[sensitive]");
        assert_eq!(*secret, "hunter2");
    }

    #[test]
    fn sensitive_deserializes_transparently() {
        let secret = serde_json::from_str::<Sensitive<String>>(r#""hunter2""#).unwrap();
        assert_eq!(secret.0, "hunter2");
    }
}
