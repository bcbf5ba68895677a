// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::CallGraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The receiver of a method. Pointer receivers render with a leading `*`,
/// which keeps `(*T).M` and `(T).M` distinct.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Receiver {
    Value(String),
    Pointer(String),
}

impl Receiver {
    pub fn type_name(&self) -> &str {
        match self {
            Receiver::Value(name) | Receiver::Pointer(name) => name,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Receiver::Pointer(_))
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Value(name) => f.write_str(name),
            Receiver::Pointer(name) => write!(f, "*{name}"),
        }
    }
}

impl FromStr for Receiver {
    type Err = CallGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pointer, name) = match s.strip_prefix('*') {
            Some(name) => (true, name),
            None => (false, s),
        };
        if name.is_empty() || name.starts_with('*') {
            return Err(CallGraphError::InvalidReceiver(s.to_string()));
        }
        Ok(if pointer {
            Receiver::Pointer(name.to_string())
        } else {
            Receiver::Value(name.to_string())
        })
    }
}

impl TryFrom<String> for Receiver {
    type Error = CallGraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Receiver> for String {
    fn from(receiver: Receiver) -> Self {
        receiver.to_string()
    }
}

/// One callable unit. Identity is by value: two identities with the same
/// path, receiver and name are the same function.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionIdentity {
    /// Package or module path, empty for builtins.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub receiver: Option<Receiver>,
    pub name: String,
}

impl FunctionIdentity {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            receiver: None,
            name: name.into(),
        }
    }

    pub fn method(path: impl Into<String>, receiver: Receiver, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            receiver: Some(receiver),
            name: name.into(),
        }
    }

    /// Runtime-generated initialization routines are not meaningful call
    /// targets. Only a receiver-less `init` qualifies, whatever its path.
    pub fn is_elided(&self) -> bool {
        self.receiver.is_none() && self.name == "init"
    }
}

/// Renders as `path.(receiver).name`, omitting empty segments.
impl fmt::Display for FunctionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.path.is_empty() {
            write!(f, "{}.", self.path)?;
        }
        if let Some(receiver) = &self.receiver {
            write!(f, "({receiver}).")?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_empty_segments() {
        assert_eq!(FunctionIdentity::new("", "len").to_string(), "len");
        assert_eq!(FunctionIdentity::new("main", "main").to_string(), "main.main");
        assert_eq!(
            FunctionIdentity::method("net/http", Receiver::Pointer("Server".into()), "Serve")
                .to_string(),
            "net/http.(*Server).Serve"
        );
        assert_eq!(
            FunctionIdentity::method("", Receiver::Value("calls".into()), "execution").to_string(),
            "(calls).execution"
        );
    }

    #[test]
    fn receiver_kind_is_part_of_identity() {
        let by_value = FunctionIdentity::method("p", Receiver::Value("T".into()), "M");
        let by_pointer = FunctionIdentity::method("p", Receiver::Pointer("T".into()), "M");
        assert_ne!(by_value, by_pointer);
        assert_ne!(by_value.to_string(), by_pointer.to_string());
    }

    #[test]
    fn receiver_parsing() {
        assert_eq!("*T".parse::<Receiver>().unwrap(), Receiver::Pointer("T".into()));
        assert_eq!("T".parse::<Receiver>().unwrap(), Receiver::Value("T".into()));
        assert!("".parse::<Receiver>().is_err());
        assert!("*".parse::<Receiver>().is_err());
        assert!("**T".parse::<Receiver>().is_err());
    }

    #[test]
    fn init_elision() {
        assert!(FunctionIdentity::new("main", "init").is_elided());
        assert!(FunctionIdentity::new("", "init").is_elided());
        assert!(!FunctionIdentity::method("p", Receiver::Value("T".into()), "init").is_elided());
        assert!(!FunctionIdentity::new("main", "init#1").is_elided());
    }

    #[test]
    fn serde_uses_textual_receiver() {
        let json = r#"{"path":"p","receiver":"*T","name":"M"}"#;
        let f: FunctionIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(f, FunctionIdentity::method("p", Receiver::Pointer("T".into()), "M"));
        assert_eq!(serde_json::to_string(&f).unwrap(), json);

        let f: FunctionIdentity = serde_json::from_str(r#"{"name":"len"}"#).unwrap();
        assert_eq!(f, FunctionIdentity::new("", "len"));

        assert!(serde_json::from_str::<FunctionIdentity>(r#"{"receiver":"","name":"x"}"#).is_err());
    }
}
