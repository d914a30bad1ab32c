//! Built-in command set for the `shelf` binary.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::bail;
use serde_json::json;
use shelf_core::{Command, CommandRegistry, ParamType, PrefixMatching, Result, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub height: i64,
    pub width: i64,
}

impl Rectangle {
    fn to_value(self) -> anyhow::Result<Value> {
        let area = self.height.checked_mul(self.width).ok_or_else(|| {
            anyhow::anyhow!("area of {} x {} overflows", self.height, self.width)
        })?;
        Ok(json!({
            "height": self.height,
            "width": self.width,
            "area": area,
        }))
    }
}

/// Registry with the demo commands, sharing one rectangle
pub fn demo_registry(matching: PrefixMatching) -> Result<CommandRegistry> {
    let rect = Rc::new(RefCell::new(Rectangle { height: 5, width: 10 }));
    let mut registry = CommandRegistry::new().with_matching(matching);

    registry.add(
        Command::builder("get")
            .param("a", ParamType::int())
            .untyped("b")
            .handler(|args| Ok(json!([args.i64("a")?, args.str("b")?])))?,
    );

    registry.add(
        Command::builder("add")
            .param("a", ParamType::float())
            .param("b", ParamType::float())
            .handler(|args| Ok(json!(args.f64("a")? + args.f64("b")?)))?,
    );

    registry.add(
        Command::builder("divide")
            .param("a", ParamType::int())
            .param("b", ParamType::int())
            .handler(|args| {
                let b = args.i64("b")?;
                if b == 0 {
                    bail!("division by zero");
                }
                let a = args.i64("a")?;
                a.checked_div(b)
                    .map(|q| json!(q))
                    .ok_or_else(|| anyhow::anyhow!("{} / {} overflows", a, b))
            })?,
    );

    registry.add(
        Command::builder("echo")
            .untyped("text")
            .handler(|args| Ok(json!(args.str("text")?)))?,
    );

    registry.add(
        Command::builder("move")
            .untyped("city")
            .handler(|args| Ok(json!(format!("Moving to {}", args.str("city")?))))?,
    );

    registry.add(
        Command::builder("toggle")
            .param("enabled", ParamType::boolean())
            .handler(|args| {
                let state = if args.bool("enabled")? { "on" } else { "off" };
                Ok(json!(format!("Switched {}", state)))
            })?,
    );

    let target = rect.clone();
    registry.add(
        Command::builder("rect set")
            .param("height", ParamType::int())
            .param("width", ParamType::int())
            .handler(move |args| {
                let mut rect = target.borrow_mut();
                rect.height = args.i64("height")?;
                rect.width = args.i64("width")?;
                Ok(Value::Null)
            })?,
    );

    registry.add(
        Command::builder("rect show")
            .handler(move |_| rect.borrow().to_value())?,
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::ShelfError;

    #[test]
    fn test_rectangle_state_is_shared() {
        let registry = demo_registry(PrefixMatching::Literal).unwrap();
        assert_eq!(
            registry.parse("rect show").unwrap(),
            json!({ "height": 5, "width": 10, "area": 50 })
        );
        assert_eq!(registry.parse("rect set 20 30").unwrap(), Value::Null);
        assert_eq!(
            registry.parse("rect show").unwrap(),
            json!({ "height": 20, "width": 30, "area": 600 })
        );
    }

    #[test]
    fn test_oversized_rectangle_fails_instead_of_panicking() {
        let registry = demo_registry(PrefixMatching::Literal).unwrap();
        registry.parse("rect set 9999999999 9999999999").unwrap();
        match registry.parse("rect show") {
            Err(ShelfError::Handler(err)) => assert!(err.to_string().contains("overflows")),
            other => panic!("expected handler error, got {:?}", other),
        }
    }

    #[test]
    fn test_divide_reports_handler_errors() {
        let registry = demo_registry(PrefixMatching::Literal).unwrap();
        assert_eq!(registry.parse("divide 7 2").unwrap(), json!(3));
        match registry.parse("divide 1 0") {
            Err(ShelfError::Handler(err)) => assert_eq!(err.to_string(), "division by zero"),
            other => panic!("expected handler error, got {:?}", other),
        }
    }

    #[test]
    fn test_help_lists_demo_commands() {
        let registry = demo_registry(PrefixMatching::Literal).unwrap();
        let help = registry.help();
        assert_eq!(help.lines().count(), registry.len());
        assert!(help.contains("rect set <height:int> <width:int>"));
        assert!(help.starts_with("get <a:int> <b:str>"));
    }
}
