// Fri Jan 16 2026 - Alex

use crate::config::BridgeConfig;
use crate::scripting::error::{BridgeError, BridgeResult};
use crate::scripting::variant::Variant;
use indexmap::IndexMap;
use rquickjs::convert::Coerced;
use rquickjs::object::Filter;
use rquickjs::{Ctx, FromJs, IntoAtom, Object, Value};

/// Result of asking the engine for a value's string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringForm {
    Text(String),
    Unavailable,
}

impl StringForm {
    /// Applies the engine's `ToString` to `value`.
    pub fn of(value: &Value<'_>) -> Self {
        match value.get::<Coerced<String>>() {
            Ok(Coerced(text)) => StringForm::Text(text),
            Err(err) => {
                discard_pending(value.ctx(), &err);
                StringForm::Unavailable
            }
        }
    }

    /// Decodes a value already known to be a script string.
    pub fn of_string(value: &Value<'_>) -> Self {
        let Some(text) = value.as_string() else {
            return StringForm::Unavailable;
        };
        match text.to_string() {
            Ok(text) => StringForm::Text(text),
            Err(err) => {
                discard_pending(value.ctx(), &err);
                StringForm::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, StringForm::Text(_))
    }

    pub fn or_fallback(self, fallback: &str) -> String {
        match self {
            StringForm::Text(text) => text,
            StringForm::Unavailable => {
                log::debug!("string form unavailable, substituting {:?}", fallback);
                fallback.to_string()
            }
        }
    }
}

/// Own enumerable string keys of an object, or the failure to list them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyListing {
    Keys(Vec<String>),
    Failed,
}

impl KeyListing {
    pub fn of(object: &Object<'_>) -> Self {
        let filter = Filter::new().string().enum_only();
        match object.own_keys::<String>(filter).collect::<rquickjs::Result<Vec<_>>>() {
            Ok(keys) => KeyListing::Keys(keys),
            Err(err) => {
                discard_pending(object.ctx(), &err);
                KeyListing::Failed
            }
        }
    }

    /// Keys to walk; a failed listing walks nothing.
    pub fn into_keys(self) -> Vec<String> {
        match self {
            KeyListing::Keys(keys) => keys,
            KeyListing::Failed => {
                log::debug!("property enumeration failed, producing an empty mapping");
                Vec::new()
            }
        }
    }
}

/// Converts script values into [`Variant`] trees.
#[derive(Debug, Clone, Default)]
pub struct ValueBridge {
    config: BridgeConfig,
}

impl ValueBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Converts `value` and everything reachable from it.
    ///
    /// Every engine handle read along the way is a scoped [`Value`] and is
    /// released as soon as its subtree has been converted, including when
    /// conversion stops early with an error. Revisiting an object that is
    /// still being converted is a [`BridgeError::CyclicReference`] when
    /// cycle detection is enabled; otherwise the depth limit ends the walk.
    pub fn convert<'js>(&self, value: &Value<'js>) -> BridgeResult<Variant> {
        let mut walk = Walk {
            config: &self.config,
            ancestors: Vec::new(),
        };
        walk.visit(value, 0)
    }
}

struct Walk<'a, 'js> {
    config: &'a BridgeConfig,
    ancestors: Vec<Value<'js>>,
}

impl<'a, 'js> Walk<'a, 'js> {
    fn visit(&mut self, value: &Value<'js>, depth: usize) -> BridgeResult<Variant> {
        if depth > self.config.max_depth {
            return Err(BridgeError::DepthExceeded { limit: self.config.max_depth });
        }

        log::trace!("converting {:?} at depth {}", value.type_of(), depth);

        if value.is_undefined() || value.is_null() {
            return Ok(Variant::Null);
        }
        if value.is_bool() {
            return coerce::<bool>(value).map(Variant::Bool);
        }
        if value.is_number() {
            return coerce::<f64>(value).map(Variant::Number);
        }
        if value.is_string() {
            return Ok(Variant::String(StringForm::of_string(value).or_fallback("")));
        }
        if let Some(object) = value.as_object() {
            if self.config.detect_cycles && self.ancestors.iter().any(|seen| seen == value) {
                return Err(BridgeError::CyclicReference { depth });
            }

            self.ancestors.push(value.clone());
            let converted = if value.is_array() {
                self.sequence(object, depth)
            } else {
                self.mapping(object, depth)
            };
            self.ancestors.pop();
            return converted;
        }

        // Symbols and other exotic values.
        Ok(Variant::String(StringForm::of(value).or_fallback("")))
    }

    fn sequence(&mut self, array: &Object<'js>, depth: usize) -> BridgeResult<Variant> {
        // An unreadable length walks no elements.
        let length = match read_slot(array, "length") {
            Some(length) => coerce::<i64>(&length)?,
            None => 0,
        };

        let mut items = Vec::new();
        for index in 0..length.max(0) {
            let index = u32::try_from(index)
                .map_err(|_| BridgeError::Engine(format!("array index {} out of range", index)))?;
            items.push(self.visit_slot(read_slot(array, index), depth + 1)?);
        }
        Ok(Variant::Sequence(items))
    }

    fn mapping(&mut self, object: &Object<'js>, depth: usize) -> BridgeResult<Variant> {
        let mut entries = IndexMap::new();
        for key in KeyListing::of(object).into_keys() {
            let converted = self.visit_slot(read_slot(object, key.as_str()), depth + 1)?;
            entries.insert(key, converted);
        }
        Ok(Variant::Mapping(entries))
    }

    /// A slot whose read threw converts to an empty string.
    fn visit_slot(&mut self, slot: Option<Value<'js>>, depth: usize) -> BridgeResult<Variant> {
        match slot {
            Some(value) => self.visit(&value, depth),
            None => Ok(Variant::String(String::new())),
        }
    }
}

/// Reads one property or element. A read that throws (a getter, a proxy
/// trap) discards the pending exception and yields `None`.
fn read_slot<'js, K: IntoAtom<'js>>(object: &Object<'js>, key: K) -> Option<Value<'js>> {
    match object.get::<K, Value<'js>>(key) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("property read failed ({}), substituting an empty string", err);
            discard_pending(object.ctx(), &err);
            None
        }
    }
}

fn coerce<'js, T>(value: &Value<'js>) -> BridgeResult<T>
where
    Coerced<T>: FromJs<'js>,
{
    value
        .get::<Coerced<T>>()
        .map(|Coerced(inner)| inner)
        .map_err(|e| engine_error(value.ctx(), e))
}

/// Turns an engine failure into a bridge error, taking the pending exception.
fn engine_error(ctx: &Ctx<'_>, err: rquickjs::Error) -> BridgeError {
    if matches!(err, rquickjs::Error::Exception) {
        let exception = ctx.catch();
        let message = StringForm::of(&exception).or_fallback(&err.to_string());
        BridgeError::Engine(message)
    } else {
        BridgeError::Engine(err.to_string())
    }
}

/// Drops an exception left pending by a failed fallback read.
fn discard_pending(ctx: &Ctx<'_>, err: &rquickjs::Error) {
    if matches!(err, rquickjs::Error::Exception) {
        let _ = ctx.catch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime};

    fn with_value<R>(code: &str, f: impl for<'js> FnOnce(&Value<'js>) -> R) -> R {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(|ctx| {
            let value: Value = ctx.eval(code).unwrap();
            f(&value)
        })
    }

    fn convert(code: &str, config: BridgeConfig) -> BridgeResult<Variant> {
        with_value(code, |value| ValueBridge::new(config).convert(value))
    }

    #[test]
    fn test_scalars() {
        let config = BridgeConfig::default();
        assert_eq!(convert("undefined", config.clone()), Ok(Variant::Null));
        assert_eq!(convert("null", config.clone()), Ok(Variant::Null));
        assert_eq!(convert("false", config.clone()), Ok(Variant::Bool(false)));
        assert_eq!(convert("0.1 + 0.2", config.clone()), Ok(Variant::Number(0.1 + 0.2)));
        assert_eq!(convert("'h\u{e9}llo'", config), Ok(Variant::from("h\u{e9}llo")));
    }

    #[test]
    fn test_symbol_falls_back_to_empty_string() {
        assert_eq!(convert("Symbol('tag')", BridgeConfig::default()), Ok(Variant::from("")));
    }

    #[test]
    fn test_function_is_empty_mapping() {
        let result = convert("(function named() {})", BridgeConfig::default()).unwrap();
        assert_eq!(result, Variant::Mapping(IndexMap::new()));
    }

    #[test]
    fn test_array_holes_and_extra_props() {
        let result = convert("var a = [1, , 3]; a.extra = true; a", BridgeConfig::default()).unwrap();
        assert_eq!(
            result,
            Variant::sequence(vec![Variant::from(1), Variant::Null, Variant::from(3)])
        );
    }

    #[test]
    fn test_array_like_object_is_mapping() {
        let result = convert("({length: 2, 0: 'a'})", BridgeConfig::default()).unwrap();
        let entries = result.as_mapping().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("0"), Some(&Variant::from("a")));
        assert_eq!(entries.get("length"), Some(&Variant::from(2)));
    }

    #[test]
    fn test_non_enumerable_and_inherited_keys_skipped() {
        let code = "var o = Object.create({inherited: 1}); \
                    Object.defineProperty(o, 'hidden', {value: 2, enumerable: false}); \
                    o.shown = 3; o[Symbol('s')] = 4; o";
        let result = convert(code, BridgeConfig::default()).unwrap();
        let entries = result.as_mapping().unwrap();
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["shown"]);
    }

    #[test]
    fn test_enumeration_failure_yields_empty_mapping() {
        let code = "new Proxy({a: 1}, { ownKeys() { throw new Error('no keys'); } })";
        with_value(code, |value| {
            let object = value.as_object().unwrap();
            assert_eq!(KeyListing::of(object), KeyListing::Failed);
            let result = ValueBridge::default().convert(value);
            assert_eq!(result, Ok(Variant::Mapping(IndexMap::new())));
        });
    }

    #[test]
    fn test_string_form_of_symbol_unavailable() {
        with_value("Symbol()", |value| {
            assert_eq!(StringForm::of(value), StringForm::Unavailable);
            assert!(!StringForm::of(value).is_available());
        });
        with_value("[1, 2]", |value| {
            assert_eq!(StringForm::of(value), StringForm::Text("1,2".to_string()));
        });
    }

    #[test]
    fn test_cycle_detected() {
        let result = convert("var a = {}; a.self = a; a", BridgeConfig::default());
        assert_eq!(result, Err(BridgeError::CyclicReference { depth: 1 }));

        let result = convert("var a = [1]; a.push(a); a", BridgeConfig::default());
        assert_eq!(result, Err(BridgeError::CyclicReference { depth: 1 }));
    }

    #[test]
    fn test_cycle_without_detection_hits_depth_limit() {
        let config = BridgeConfig::new().with_max_depth(16).with_cycle_detection(false);
        let result = convert("var a = {}; a.self = a; a", config);
        assert_eq!(result, Err(BridgeError::DepthExceeded { limit: 16 }));
    }

    #[test]
    fn test_shared_reference_is_not_a_cycle() {
        let result = convert("var s = {v: 1}; [s, {inner: s}]", BridgeConfig::default()).unwrap();
        let items = result.as_sequence().unwrap();
        assert_eq!(items[0].get("v"), Some(&Variant::from(1)));
        assert_eq!(items[1].get("inner").and_then(|i| i.get("v")), Some(&Variant::from(1)));
    }

    #[test]
    fn test_depth_limit() {
        let config = BridgeConfig::new().with_max_depth(3);
        assert!(convert("[[[1]]]", config.clone()).is_ok());
        assert_eq!(
            convert("[[[[1]]]]", config),
            Err(BridgeError::DepthExceeded { limit: 3 })
        );
    }

    #[test]
    fn test_throwing_getter_becomes_empty_string() {
        let result = convert("({ok: 1, get bad() { throw new Error('getter'); }})", BridgeConfig::default());
        let result = result.unwrap();
        assert_eq!(result.get("ok"), Some(&Variant::from(1)));
        assert_eq!(result.get("bad"), Some(&Variant::from("")));
    }

    #[test]
    fn test_throwing_element_read_becomes_empty_string() {
        let code = "new Proxy([1, 2, 3], { get(t, k) { if (k === '1') throw new Error('x'); return t[k]; } })";
        let result = convert(code, BridgeConfig::default()).unwrap();
        assert_eq!(
            result,
            Variant::sequence(vec![Variant::from(1), Variant::from(""), Variant::from(3)])
        );
    }

    #[test]
    fn test_unreadable_length_is_empty_sequence() {
        let code = "new Proxy([1, 2], { get(t, k) { if (k === 'length') throw new Error('x'); return t[k]; } })";
        assert_eq!(convert(code, BridgeConfig::default()), Ok(Variant::sequence(vec![])));
    }
}
