//! Configuration merge logic
//!
//! Layers are merged with:
//! - Objects: deep-merge by key
//! - Scalars: override (last wins)
//! - Null: clears the key's value

use serde_json::Value;

/// Deep merge two JSON values, `overlay` taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge multiple config layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let result = deep_merge(json!({"threshold": 0.0}), json!({"threshold": 12.5}));
        assert_eq!(result["threshold"], 12.5);
    }

    #[test]
    fn test_export_section_deep_merge() {
        let base = json!({
            "export": {
                "output_path": "default_env_file.env",
                "process_env": true
            }
        });
        let overlay = json!({
            "export": {
                "output_path": "gate.env"
            }
        });
        let result = deep_merge(base, overlay);

        assert_eq!(result["export"]["output_path"], "gate.env");
        assert_eq!(result["export"]["process_env"], true);
    }

    #[test]
    fn test_add_new_key() {
        let result = deep_merge(json!({"pattern": "**/*.xml"}), json!({"count_mode": "individual"}));

        assert_eq!(result["pattern"], "**/*.xml");
        assert_eq!(result["count_mode"], "individual");
    }

    #[test]
    fn test_null_override() {
        let base = json!({"export": {"summary_path": "summary.json"}});
        let overlay = json!({"export": {"summary_path": null}});
        let result = deep_merge(base, overlay);

        assert!(result["export"]["summary_path"].is_null());
    }

    #[test]
    fn test_merge_layers_precedence() {
        let builtin = json!({"pattern": "**/*.xml", "threshold": 0.0, "debug": false});
        let file = json!({"pattern": "target/**/TEST-*.xml", "threshold": 5.0});
        let env = json!({"threshold": 10.0});
        let cli = json!({"debug": true});

        let result = merge_layers(vec![builtin, file, env, cli]);

        assert_eq!(result["pattern"], "target/**/TEST-*.xml");
        assert_eq!(result["threshold"], 10.0);
        assert_eq!(result["debug"], true);
    }
}
