//! Parameter types and the coercion of raw tokens into values.
//!
//! Every parameter a command declares carries a [`ParamType`]: a display name
//! used in signatures and a fallible conversion from a single token to a
//! [`Value`]. The four built-in types mirror the scalar types the shell
//! understands out of the box; anything else is supplied by the caller through
//! [`ParamType::custom`] or a [`CoercerRegistry`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::{json, Number, Value};

use crate::error::{Result, ShelfError};

/// Conversion from one token to a value, or a human-readable reason it failed.
pub type CoerceFn = dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync;

/// A named coercion target for a command parameter.
#[derive(Clone)]
pub struct ParamType {
    name: String,
    coerce: Arc<CoerceFn>,
}

impl ParamType {
    /// Build a parameter type from a name and a conversion function
    pub fn custom<F>(name: impl Into<String>, coerce: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            coerce: Arc::new(coerce),
        }
    }

    /// Tokens are passed through unchanged
    pub fn string() -> Self {
        Self::custom("str", |token| Ok(json!(token)))
    }

    /// Signed 64-bit integers
    pub fn int() -> Self {
        Self::custom("int", |token| {
            i64::from_str(token)
                .map(|n| json!(n))
                .map_err(|_| format!("Expected int, got: {}", token))
        })
    }

    /// Finite 64-bit floats
    pub fn float() -> Self {
        Self::custom("float", |token| {
            f64::from_str(token)
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| format!("Expected float, got: {}", token))
        })
    }

    pub fn boolean() -> Self {
        Self::custom("bool", |token| match token.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(json!(true)),
            "false" | "no" | "0" | "off" => Ok(json!(false)),
            _ => Err(format!("Expected bool, got: {}", token)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert a single token into a value of this type
    pub fn coerce(&self, token: &str) -> std::result::Result<Value, String> {
        (self.coerce)(token)
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamType").field("name", &self.name).finish()
    }
}

/// One positional parameter of a command.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// A parameter without a declared type takes the token as a string
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::string())
    }

    /// Render as `<name:type>` for signatures
    pub fn render(&self) -> String {
        format!("<{}:{}>", self.name, self.ty.name())
    }
}

/// Lookup table from type name to [`ParamType`].
///
/// Starts out with `str`, `int`, `float` and `bool`; callers may add their own
/// entries or replace the built-in ones.
#[derive(Debug, Clone)]
pub struct CoercerRegistry {
    types: HashMap<String, ParamType>,
}

impl CoercerRegistry {
    /// An empty registry with no types at all
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for ty in [
            ParamType::string(),
            ParamType::int(),
            ParamType::float(),
            ParamType::boolean(),
        ] {
            registry.insert(ty);
        }
        registry
    }

    /// Register a type under its own name, replacing any previous entry
    pub fn insert(&mut self, ty: ParamType) {
        self.types.insert(ty.name().to_string(), ty);
    }

    /// Register a conversion function under `name`
    pub fn register<F>(&mut self, name: &str, coerce: F)
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.insert(ParamType::custom(name, coerce));
    }

    pub fn get(&self, name: &str) -> Result<ParamType> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| ShelfError::UnknownType(name.to_string()))
    }

    /// Build a parameter whose type is looked up by name
    pub fn parameter(&self, name: &str, type_name: &str) -> Result<Parameter> {
        Ok(Parameter::new(name, self.get(type_name)?))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

impl Default for CoercerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_accepts_signed_integers_only() {
        let int = ParamType::int();
        assert_eq!(int.coerce("42").unwrap(), json!(42));
        assert_eq!(int.coerce("-7").unwrap(), json!(-7));
        assert_eq!(int.coerce("+3").unwrap(), json!(3));
        assert!(int.coerce("1.5").is_err());
        assert!(int.coerce("abc").is_err());
        assert!(int.coerce("").is_err());
    }

    #[test]
    fn test_float_rejects_non_finite() {
        let float = ParamType::float();
        assert_eq!(float.coerce("2.5").unwrap(), json!(2.5));
        assert_eq!(float.coerce("3").unwrap(), json!(3.0));
        assert_eq!(float.coerce("1e3").unwrap(), json!(1000.0));
        assert!(float.coerce("inf").is_err());
        assert!(float.coerce("NaN").is_err());
        assert!(float.coerce("two").is_err());
    }

    #[test]
    fn test_bool_words() {
        let boolean = ParamType::boolean();
        for word in ["true", "YES", "1", "On"] {
            assert_eq!(boolean.coerce(word).unwrap(), json!(true), "{}", word);
        }
        for word in ["false", "No", "0", "OFF"] {
            assert_eq!(boolean.coerce(word).unwrap(), json!(false), "{}", word);
        }
        let err = boolean.coerce("maybe").unwrap_err();
        assert!(err.contains("maybe"));
    }

    #[test]
    fn test_string_is_identity() {
        let string = ParamType::string();
        assert_eq!(string.coerce("\"new york\"").unwrap(), json!("\"new york\""));
    }

    #[test]
    fn test_registry_lookup_and_extension() {
        let mut registry = CoercerRegistry::with_builtins();
        assert!(registry.contains("int"));
        assert!(matches!(registry.get("color"), Err(ShelfError::UnknownType(name)) if name == "color"));

        registry.register("color", |token| match token {
            "red" | "green" | "blue" => Ok(json!(token)),
            _ => Err(format!("Unknown color: {}", token)),
        });

        let param = registry.parameter("fill", "color").unwrap();
        assert_eq!(param.render(), "<fill:color>");
        assert_eq!(param.ty.coerce("red").unwrap(), json!("red"));
        assert!(param.ty.coerce("mauve").is_err());
    }

    #[test]
    fn test_untyped_parameters_are_strings() {
        let param = Parameter::untyped("b");
        assert_eq!(param.ty.name(), "str");
        assert_eq!(param.render(), "<b:str>");
    }
}
