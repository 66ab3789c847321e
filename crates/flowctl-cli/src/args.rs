//! # Free-Form Spec Arguments
//!
//! `create` accepts arbitrary spec fields as trailing arguments in the
//! shapes `--key value`, `--key=value`, and bare `--key` (a boolean
//! switch). Dotted keys nest: `--auth.token abc` produces
//! `{auth: {token: abc}}`. All values stay strings here — the schema
//! engine coerces them against the declared types.

use anyhow::{bail, Result};
use serde_yaml::{Mapping, Value};

/// Parse trailing CLI arguments into a raw spec mapping.
pub fn parse_spec_args(args: &[String]) -> Result<Value> {
    let mut root = Mapping::new();
    let mut i = 0;
    while i < args.len() {
        let token = &args[i];
        let Some(stripped) = token.strip_prefix("--") else {
            bail!("unexpected argument '{token}': spec arguments start with '--'");
        };
        if stripped.is_empty() {
            bail!("empty spec argument");
        }

        let (key, value) = if let Some((key, value)) = stripped.split_once('=') {
            (key, value.to_string())
        } else if i + 1 < args.len() && !args[i + 1].starts_with("--") {
            i += 1;
            (stripped, args[i].clone())
        } else {
            // Bare switch.
            (stripped, "true".to_string())
        };

        insert_path(&mut root, key, Value::String(value))?;
        i += 1;
    }
    Ok(Value::Mapping(root))
}

/// Insert `value` at the dotted `key` path, creating nested mappings.
fn insert_path(map: &mut Mapping, key: &str, value: Value) -> Result<()> {
    match key.split_once('.') {
        None => {
            map.insert(Value::String(key.to_string()), value);
            Ok(())
        }
        Some((head, rest)) => {
            let entry = map
                .entry(Value::String(head.to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            match entry {
                Value::Mapping(nested) => insert_path(nested, rest, value),
                _ => bail!("'{head}' is both a value and a nested mapping"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Value {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_spec_args(&owned).unwrap()
    }

    #[test]
    fn separate_and_equals_forms_agree() {
        let a = parse(&["--endpoint", "https://x"]);
        let b = parse(&["--endpoint=https://x"]);
        assert_eq!(a, b);
        assert_eq!(a["endpoint"], Value::String("https://x".to_string()));
    }

    #[test]
    fn bare_flag_becomes_true_string() {
        let v = parse(&["--insecure"]);
        assert_eq!(v["insecure"], Value::String("true".to_string()));
    }

    #[test]
    fn dotted_keys_nest() {
        let v = parse(&["--auth.token", "abc", "--auth.retries", "3"]);
        assert_eq!(v["auth"]["token"], Value::String("abc".to_string()));
        assert_eq!(v["auth"]["retries"], Value::String("3".to_string()));
    }

    #[test]
    fn trailing_bare_flag_before_next_key() {
        let v = parse(&["--insecure", "--endpoint", "https://x"]);
        assert_eq!(v["insecure"], Value::String("true".to_string()));
        assert_eq!(v["endpoint"], Value::String("https://x".to_string()));
    }

    #[test]
    fn rejects_positional_argument() {
        let owned = vec!["oops".to_string()];
        assert!(parse_spec_args(&owned).is_err());
    }

    #[test]
    fn rejects_scalar_and_mapping_conflict() {
        let owned: Vec<String> = ["--auth", "x", "--auth.token", "abc"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(parse_spec_args(&owned).is_err());
    }
}
