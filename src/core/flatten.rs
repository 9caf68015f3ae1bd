use serde_json::{Map, Value};
use std::collections::HashMap;

/// 把巢狀 JSON 物件攤平成 dot-joined key 的扁平表。
/// 物件會往下展開，陣列與純量（含 null）視為葉節點原樣保留，
/// 所以任何葉值事後都能用它的 dotted path 直接查回來。
pub fn flatten_object(obj: &Map<String, Value>) -> HashMap<String, Value> {
    let mut flat = HashMap::new();
    flatten_into(obj, None, &mut flat);
    flat
}

fn flatten_into(obj: &Map<String, Value>, prefix: Option<&str>, out: &mut HashMap<String, Value>) {
    for (key, value) in obj {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(nested, Some(&path), out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}
