// Fri Jan 16 2026 - Alex

use crate::config::SessionConfig;
use crate::scripting::bridge::{StringForm, ValueBridge};
use crate::scripting::error::{SessionError, SessionResult, UNKNOWN_ERROR};
use crate::scripting::variant::Variant;
use rquickjs::{qjs, Context, Ctx, Runtime, Type, Value};
use std::ffi::CString;
use std::fs;
use std::path::Path;

/// Source name reported for inline code.
pub const EVAL_SOURCE_NAME: &str = "<eval>";

/// One script runtime and context plus the last failure message.
///
/// Not `Send`: a session is driven from the thread that created it.
pub struct Session {
    // Field order is drop order: the context goes before the runtime.
    context: Context,
    #[allow(dead_code)]
    runtime: Runtime,
    bridge: ValueBridge,
    last_error: String,
}

impl Session {
    pub fn new() -> SessionResult<Self> {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;
        log::debug!("script session created (max depth {})", config.bridge.max_depth);

        Ok(Self {
            context,
            runtime,
            bridge: ValueBridge::new(config.bridge),
            last_error: String::new(),
        })
    }

    /// Runs a file as a top-level program. Returns `false` and records the
    /// message on failure; the program's result value is discarded.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let outcome = self.try_load_file(path);
        self.record(outcome).is_some()
    }

    /// Evaluates inline code and converts its result. Failures yield
    /// [`Variant::Null`] and are available through [`Session::get_error`].
    pub fn eval(&mut self, code: &str) -> Variant {
        let outcome = self.try_eval(code);
        self.record(outcome).unwrap_or_default()
    }

    /// Message of the most recent failure. Reading it does not clear it.
    pub fn get_error(&self) -> &str {
        &self.last_error
    }

    pub fn try_load_file<P: AsRef<Path>>(&self, path: P) -> SessionResult<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);
        let source_name = path.display().to_string();

        self.context.with(|ctx| {
            // The result handle is released when it goes out of scope here.
            evaluate(&ctx, &source, &source_name).map(|_| ())
        })
    }

    pub fn try_eval(&self, code: &str) -> SessionResult<Variant> {
        self.context.with(|ctx| {
            let result = evaluate(&ctx, code, EVAL_SOURCE_NAME)?;
            let converted = self.bridge.convert(&result)?;
            log::debug!("{} converted to a {}", EVAL_SOURCE_NAME, converted.type_name());
            Ok(converted)
        })
    }

    pub fn bridge(&self) -> &ValueBridge {
        &self.bridge
    }

    fn record<T>(&mut self, outcome: SessionResult<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("script evaluation failed: {}", err);
                self.last_error = err.to_string();
                None
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log::debug!("script session released");
    }
}

/// Evaluates `source` in global mode under `source_name`, which the engine
/// reports in stack traces. A thrown value becomes
/// [`SessionError::Exception`] holding its string form.
fn evaluate<'js>(ctx: &Ctx<'js>, source: &str, source_name: &str) -> SessionResult<Value<'js>> {
    log::debug!("evaluating {} ({} bytes)", source_name, source.len());

    let mut input = Vec::with_capacity(source.len() + 1);
    input.extend_from_slice(source.as_bytes());
    input.push(0);
    let file_name = CString::new(source_name.replace('\0', "")).unwrap_or_default();

    // SAFETY: `input` is NUL-terminated one past `source.len()` and both buffers
    // outlive the call. The returned value is owned and moved straight into a guard.
    let result = unsafe {
        let raw = qjs::JS_Eval(
            ctx.as_raw().as_ptr(),
            input.as_ptr().cast(),
            source.len() as _,
            file_name.as_ptr(),
            qjs::JS_EVAL_TYPE_GLOBAL as _,
        );
        Value::from_raw(ctx.clone(), raw)
    };

    if result.type_of() != Type::Exception {
        return Ok(result);
    }
    drop(result);

    let exception = ctx.catch();
    let message = StringForm::of(&exception).or_fallback(UNKNOWN_ERROR);
    Err(SessionError::Exception(message))
}
