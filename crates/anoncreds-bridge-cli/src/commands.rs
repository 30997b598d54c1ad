use crate::AppContext;
use anoncreds_bridge::{Bridge, BridgeConfig, DynamicLibrary, NativeLibrary, Operation, Outcome};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

fn load_config(ctx: &AppContext) -> std::result::Result<BridgeConfig, Box<dyn std::error::Error>> {
    let mut config = match &ctx.config {
        Some(path) => BridgeConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => BridgeConfig::default(),
    };
    if ctx.permissive_lists {
        config = config.permissive();
    }
    if ctx.native_logger {
        config.install_native_logger = true;
    }
    Ok(config)
}

fn open_bridge(
    ctx: &AppContext,
) -> std::result::Result<Bridge<DynamicLibrary>, Box<dyn std::error::Error>> {
    let library = match &ctx.library {
        Some(path) => DynamicLibrary::open(path)?,
        None => DynamicLibrary::open_default()?,
    };
    let config = load_config(ctx)?;
    log::debug!("bridge config: {:?}", config);
    Ok(Bridge::with_config(library, config))
}

fn print_outcome(outcome: &Outcome) -> Result {
    println!("{}", serde_json::to_string(outcome)?);
    Ok(())
}

// ─── call ───────────────────────────────────────────────────────────────────

pub fn call(
    ctx: &AppContext,
    operation: &str,
    args: Option<String>,
    args_file: Option<std::path::PathBuf>,
) -> Result {
    let text = match (args, args_file) {
        (Some(inline), _) => inline,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => "{}".to_string(),
    };
    let args: Value = serde_json::from_str(&text)?;
    let bridge = open_bridge(ctx)?;
    print_outcome(&bridge.invoke_named(operation, &args))
}

// ─── run ────────────────────────────────────────────────────────────────────

/// Values bound by earlier script lines.
#[derive(Default)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    pub fn bind(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    fn lookup(&self, reference: &str) -> Option<Value> {
        let (name, field) = match reference.split_once('.') {
            Some((name, field)) => (name, Some(field)),
            None => (reference, None),
        };
        let value = self.values.get(name)?;
        match field {
            Some(field) => value.get(field).cloned(),
            None => Some(value.clone()),
        }
    }

    /// Replace every `"$name"` / `"$name.field"` string with its binding.
    pub fn substitute(&self, value: Value) -> std::result::Result<Value, String> {
        match value {
            Value::String(s) => match s.strip_prefix('$') {
                Some(reference) => self
                    .lookup(reference)
                    .ok_or_else(|| format!("unbound reference: {}", s)),
                None => Ok(Value::String(s)),
            },
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.substitute(item))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| self.substitute(v).map(|v| (k, v)))
                .collect::<std::result::Result<Map<_, _>, _>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }
}

/// Run one script line; returns the envelope to print.
pub fn run_line<L: NativeLibrary>(
    bridge: &Bridge<L>,
    bindings: &mut Bindings,
    line: &str,
) -> std::result::Result<Outcome, Box<dyn std::error::Error>> {
    let step: Value = serde_json::from_str(line)?;
    let operation = step
        .get("op")
        .and_then(Value::as_str)
        .ok_or("script line has no \"op\"")?;
    let args = bindings.substitute(step.get("args").cloned().unwrap_or(Value::Null))?;

    let outcome = bridge.invoke_named(operation, &args);
    if let (Some(name), Some(value)) = (step.get("bind").and_then(Value::as_str), outcome.value()) {
        bindings.bind(name, value.clone());
    }
    Ok(outcome)
}

pub fn run_script(ctx: &AppContext, script: &Path) -> Result {
    let text = std::fs::read_to_string(script)?;
    let bridge = open_bridge(ctx)?;
    let mut bindings = Bindings::default();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let outcome = run_line(&bridge, &mut bindings, line)
            .map_err(|e| format!("line {}: {}", number + 1, e))?;
        print_outcome(&outcome)?;
    }
    Ok(())
}

// ─── ops ────────────────────────────────────────────────────────────────────

pub fn list_operations() -> Result {
    for operation in Operation::all() {
        let params: Vec<String> = operation
            .params()
            .iter()
            .map(|p| {
                let kind = serde_json::to_value(p.kind)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_owned))
                    .unwrap_or_default();
                if p.optional {
                    format!("{}?: {}", p.name, kind)
                } else {
                    format!("{}: {}", p.name, kind)
                }
            })
            .collect();
        println!("{}({})", operation, params.join(", "));
    }
    Ok(())
}
