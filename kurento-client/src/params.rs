//! Parameter encoding.
//!
//! Operation arguments are only sent when supplied and non-empty: zero
//! values, empty strings and collections, absent references and objects that
//! were never created are left out.

use crate::object::IMediaObject;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Named parameters of a request.
pub type Params = Map<String, Value>;

/// A value that can be sent as a request parameter.
pub trait ParamValue {
    /// Encodes the value.
    fn to_value(&self) -> Value;

    /// Returns true if the value counts as not supplied.
    fn is_empty_param(&self) -> bool {
        false
    }
}

impl ParamValue for str {
    fn to_value(&self) -> Value {
        Value::from(self)
    }

    fn is_empty_param(&self) -> bool {
        self.is_empty()
    }
}

impl ParamValue for String {
    fn to_value(&self) -> Value {
        self.as_str().to_value()
    }

    fn is_empty_param(&self) -> bool {
        self.is_empty()
    }
}

impl ParamValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn is_empty_param(&self) -> bool {
        !*self
    }
}

impl ParamValue for f64 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn is_empty_param(&self) -> bool {
        *self == 0.0
    }
}

impl ParamValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn is_empty_param(&self) -> bool {
        self.is_null()
    }
}

impl<T: ParamValue> ParamValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ParamValue::to_value).collect())
    }

    fn is_empty_param(&self) -> bool {
        self.is_empty()
    }
}

impl<T: ParamValue> ParamValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }

    fn is_empty_param(&self) -> bool {
        self.is_empty()
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ParamValue::to_value)
    }

    fn is_empty_param(&self) -> bool {
        self.as_ref().is_none_or(ParamValue::is_empty_param)
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn is_empty_param(&self) -> bool {
        (**self).is_empty_param()
    }
}

impl<T: ParamValue + ?Sized> ParamValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn is_empty_param(&self) -> bool {
        (**self).is_empty_param()
    }
}

impl ParamValue for dyn IMediaObject + '_ {
    fn to_value(&self) -> Value {
        Value::from(self.handle())
    }

    fn is_empty_param(&self) -> bool {
        self.handle().is_empty()
    }
}

/// Inserts `value` under `key` unless it counts as not supplied.
pub fn set_if_not_empty<V: ParamValue + ?Sized>(params: &mut Params, key: &str, value: &V) {
    if !value.is_empty_param() {
        params.insert(key.to_string(), value.to_value());
    }
}

/// Overlays caller options on top of computed parameters. Caller values win,
/// and keys the computed set does not know are kept.
pub fn merge_options(params: &mut Params, options: Params) {
    for (key, value) in options {
        params.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectBase;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Stub {
        base: ObjectBase,
    }

    impl IMediaObject for Stub {
        fn object(&self) -> &ObjectBase {
            &self.base
        }

        fn object_mut(&mut self) -> &mut ObjectBase {
            &mut self.base
        }

        fn wire_type(&self) -> &'static str {
            "Stub"
        }

        fn constructor_params(&self, _from: &dyn IMediaObject, options: Params) -> Params {
            options
        }
    }

    #[test]
    fn test_set_if_not_empty_skips_zero_values() {
        let mut params = Params::new();
        set_if_not_empty(&mut params, "s", "");
        set_if_not_empty(&mut params, "b", &false);
        set_if_not_empty(&mut params, "f", &0.0);
        set_if_not_empty(&mut params, "v", &Vec::<String>::new());
        set_if_not_empty(&mut params, "o", &None::<&str>);
        assert!(params.is_empty());
    }

    #[test]
    fn test_set_if_not_empty_keeps_values() {
        let mut params = Params::new();
        set_if_not_empty(&mut params, "s", "v=0");
        set_if_not_empty(&mut params, "b", &true);
        set_if_not_empty(&mut params, "f", &1.5);
        set_if_not_empty(&mut params, "v", &vec!["a".to_string()]);
        set_if_not_empty(&mut params, "o", &Some("x"));

        assert_eq!(
            Value::Object(params),
            json!({"s": "v=0", "b": true, "f": 1.5, "v": ["a"], "o": "x"})
        );
    }

    #[test]
    fn test_object_params_use_handle() {
        let created = Stub {
            base: ObjectBase::detached("obj-1"),
        };
        let pending = Stub::default();

        let mut params = Params::new();
        let created_ref: Option<&dyn IMediaObject> = Some(&created);
        let pending_ref: Option<&dyn IMediaObject> = Some(&pending);
        set_if_not_empty(&mut params, "created", &created_ref);
        set_if_not_empty(&mut params, "pending", &pending_ref);

        let shared: Vec<Arc<dyn IMediaObject>> = vec![Arc::new(Stub {
            base: ObjectBase::detached("obj-2"),
        })];
        set_if_not_empty(&mut params, "list", shared.as_slice());

        assert_eq!(
            Value::Object(params),
            json!({"created": "obj-1", "list": ["obj-2"]})
        );
    }

    #[test]
    fn test_merge_options() {
        let mut params = Params::new();
        params.insert("mediaPipeline".into(), json!("pipe-1"));
        params.insert("recvonly".into(), json!(false));

        let mut options = Params::new();
        options.insert("recvonly".into(), json!(true));
        options.insert("test".into(), json!("val"));
        merge_options(&mut params, options);

        assert_eq!(
            Value::Object(params),
            json!({"mediaPipeline": "pipe-1", "recvonly": true, "test": "val"})
        );
    }
}
