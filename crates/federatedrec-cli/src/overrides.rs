//! `--set key=value` overrides applied on top of a parameter file.
//!
//! Keys use dotted paths into nested mappings (`init_param.embed_dim=16`).
//! Values are parsed as JSON; anything that is not valid JSON is taken as a
//! bare string, so `--set optimizer=Adam` and `--set optimizer='{"optimizer":
//! "Adam"}'` both work.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use federatedrec_core::ParamValue;
use tracing::debug;

/// Splits `key=value` into its parts.
pub fn parse_override(arg: &str) -> Result<(String, ParamValue)> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid override {:?}, expected key=value", arg))?;
    let key = key.trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        bail!("Invalid override key in {:?}", arg);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| ParamValue::from(raw));
    Ok((key.to_string(), value))
}

/// Sets `value` at the dotted `path`, creating intermediate mappings.
pub fn set_path(root: &mut ParamValue, path: &str, value: ParamValue) -> Result<()> {
    let mut current = root;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        if matches!(current, ParamValue::None) {
            *current = ParamValue::Map(BTreeMap::new());
        }
        let map = match current {
            ParamValue::Map(map) => map,
            other => bail!(
                "Cannot set {:?}: {:?} is a {}, not a mapping",
                path,
                part,
                other.type_name()
            ),
        };
        if parts.peek().is_none() {
            map.insert(part.to_string(), value);
            return Ok(());
        }
        current = map.entry(part.to_string()).or_insert(ParamValue::None);
    }
    Ok(())
}

/// Applies each `key=value` override to `values` in order.
pub fn apply_overrides(values: &mut ParamValue, overrides: &[String]) -> Result<()> {
    for arg in overrides {
        let (key, value) = parse_override(arg)?;
        debug!(key = %key, value = %value, "Applying parameter override");
        set_path(values, &key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override_values() {
        let (k, v) = parse_override("max_iter=20").unwrap();
        assert_eq!(k, "max_iter");
        assert_eq!(v, ParamValue::Int(20));

        let (_, v) = parse_override("optimizer=Adam").unwrap();
        assert_eq!(v, ParamValue::from("Adam"));

        let (_, v) = parse_override(r#"early_stop={"early_stop": "abs", "eps": 0.01}"#).unwrap();
        assert_eq!(v.as_map().unwrap()["eps"], ParamValue::Float(0.01));

        let (_, v) = parse_override("metrics=[\"rmse\"]").unwrap();
        assert_eq!(v, ParamValue::from(vec!["rmse"]));
    }

    #[test]
    fn test_parse_override_rejects_bad_specs() {
        assert!(parse_override("max_iter").is_err());
        assert!(parse_override("=3").is_err());
        assert!(parse_override("init_param..embed_dim=3").is_err());
    }

    #[test]
    fn test_set_path_creates_nested_maps() {
        let mut root = ParamValue::Map(BTreeMap::new());
        set_path(&mut root, "init_param.embed_dim", ParamValue::Int(16)).unwrap();
        set_path(&mut root, "init_param.init_method", ParamValue::from("zeros")).unwrap();
        let init = root.as_map().unwrap()["init_param"].as_map().unwrap();
        assert_eq!(init["embed_dim"], ParamValue::Int(16));
        assert_eq!(init["init_method"], ParamValue::from("zeros"));
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut root = ParamValue::Map(BTreeMap::new());
        set_path(&mut root, "optimizer", ParamValue::from("sgd")).unwrap();
        let err = set_path(&mut root, "optimizer.learning_rate", ParamValue::Float(0.1))
            .unwrap_err();
        assert!(err.to_string().contains("not a mapping"));
    }

    #[test]
    fn test_apply_overrides_in_order() {
        let mut root = ParamValue::Map(BTreeMap::new());
        apply_overrides(
            &mut root,
            &["max_iter=5".to_string(), "max_iter=7".to_string()],
        )
        .unwrap();
        assert_eq!(root.as_map().unwrap()["max_iter"], ParamValue::Int(7));
    }
}
