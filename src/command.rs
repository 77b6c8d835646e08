//! Commands delivered to the placement engine.
//!
//! [`Command`] is what every [`CommandSource`](crate::traits::CommandSource)
//! produces.  Feature names are resolved against the
//! [`registry`](crate::registry) while deserializing, so an unknown name is
//! rejected at the transport instead of reaching the engine.
//!
//! Wire format (one JSON value per line):
//!
//! ```json
//! {"Invoke":"moveToLeft"}
//! {"Invoke":"next-display"}
//! {"MoveToDisplay":2}
//! {"MoveToDisplay":"-1"}
//! ```

use crate::registry::{self, Operation};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A registered operation, referenced by feature name.
#[derive(Clone, Copy)]
pub struct Feature(&'static Operation);

impl Feature {
    /// Resolve `name` against the registry (case-insensitive; `-`, `_` and
    /// whitespace are ignored).
    pub fn parse(name: &str) -> Option<Self> {
        registry::lookup(name).map(Feature)
    }

    pub fn operation(&self) -> &'static Operation {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for Feature {}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Feature").field(&self.0.name).finish()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.name)
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Feature::parse(&s).ok_or_else(|| DeError::custom(format!("unknown feature: {:?}", s)))
    }
}

/// Wire format for MoveToDisplay: accepts a signed number or a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayOffset(pub i32);

impl<'de> Deserialize<'de> for DisplayOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = DisplayOffset;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "integer or string")
            }
            fn visit_i64<E>(self, n: i64) -> Result<DisplayOffset, E>
            where
                E: DeError,
            {
                i32::try_from(n)
                    .map(DisplayOffset)
                    .map_err(|_| DeError::custom(format!("MoveToDisplay: {} out of range", n)))
            }
            fn visit_u64<E>(self, n: u64) -> Result<DisplayOffset, E>
            where
                E: DeError,
            {
                i32::try_from(n)
                    .map(DisplayOffset)
                    .map_err(|_| DeError::custom(format!("MoveToDisplay: {} out of range", n)))
            }
            fn visit_str<E>(self, s: &str) -> Result<DisplayOffset, E>
            where
                E: DeError,
            {
                let n: i32 = s
                    .trim()
                    .parse()
                    .map_err(|_| DeError::custom("MoveToDisplay: expected an integer"))?;
                Ok(DisplayOffset(n))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// Every request the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Run a registered operation on the target window.
    Invoke(Feature),

    /// Centre the target window on the display `n` steps away in
    /// enumeration order (negative steps go backwards, wrapping).
    MoveToDisplay(DisplayOffset),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Invoke(feature) => write!(f, "{}", feature),
            Command::MoveToDisplay(DisplayOffset(n)) => write!(f, "move to display {:+}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feature() {
        let f = Feature::parse("move_to_left").unwrap();
        assert_eq!(f.name(), "moveToLeft");
        assert!(Feature::parse("nope").is_none());
    }

    #[test]
    fn feature_equality_by_name() {
        assert_eq!(
            Feature::parse("moveToLeft").unwrap(),
            Feature::parse("MoveToLeft").unwrap()
        );
        assert_ne!(
            Feature::parse("moveToLeft").unwrap(),
            Feature::parse("moveToRight").unwrap()
        );
        assert_eq!(
            Feature::parse("previousDisplay").unwrap(),
            Feature::parse("prevDisplay").unwrap()
        );
    }

    #[test]
    fn deserialize_invoke() {
        let cmd: Command = serde_json::from_str(r#"{"Invoke":"next-display"}"#).unwrap();
        assert_eq!(cmd, Command::Invoke(Feature::parse("nextDisplay").unwrap()));
    }

    #[test]
    fn deserialize_unknown_feature_fails() {
        let err = serde_json::from_str::<Command>(r#"{"Invoke":"fly"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown feature"), "{err}");
    }

    #[test]
    fn deserialize_display_offsets() {
        let cases = [
            (r#"{"MoveToDisplay":2}"#, 2),
            (r#"{"MoveToDisplay":-1}"#, -1),
            (r#"{"MoveToDisplay":" -3 "}"#, -3),
        ];
        for (json, want) in cases {
            let cmd: Command = serde_json::from_str(json).unwrap();
            assert_eq!(cmd, Command::MoveToDisplay(DisplayOffset(want)), "{json}");
        }
        assert!(serde_json::from_str::<Command>(r#"{"MoveToDisplay":"left"}"#).is_err());
        assert!(serde_json::from_str::<Command>(r#"{"MoveToDisplay":9999999999}"#).is_err());
    }

    #[test]
    fn serialize_uses_canonical_name() {
        let cmd = Command::Invoke(Feature::parse("push-to-top").unwrap());
        assert_eq!(serde_json::to_string(&cmd).unwrap(), r#"{"Invoke":"pushToTop"}"#);
    }

    #[test]
    fn command_display() {
        let cmd = Command::Invoke(Feature::parse("maximize").unwrap());
        assert_eq!(cmd.to_string(), "maximize");
        assert_eq!(
            Command::MoveToDisplay(DisplayOffset(-2)).to_string(),
            "move to display -2"
        );
    }
}
