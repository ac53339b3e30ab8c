//! A process-wide registry of named dialects.
//!
//! `spec.md` §5 allows "an optional process-wide registry of named
//! dialects ... mutation of this registry is not required to be
//! thread-safe, matching typical configuration-at-startup use." We still
//! reach for `dashmap` (already a dependency of the teacher's
//! `faxc-util` crate, for the same "shared, occasionally-mutated map"
//! shape) rather than a bare `Mutex<HashMap<..>>`, since it costs nothing
//! and gives the registry real thread safety for free.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::dialect::{default_dialect, Dialect};
use crate::error::ExpressionError;

static DIALECTS: Lazy<DashMap<String, Arc<Dialect>>> = Lazy::new(|| {
    let map = DashMap::new();
    map.insert("default".to_string(), Arc::new(default_dialect()));
    map
});

/// Registers `dialect` under `name`.
///
/// Fails with [`ExpressionError::Config`] if `name` is already
/// registered — re-registering requires an explicit
/// [`unregister_dialect`] first, matching the reference implementation's
/// `register_dialect`.
pub fn register_dialect(name: impl Into<String>, dialect: Dialect) -> Result<(), ExpressionError> {
    let name = name.into();
    if DIALECTS.contains_key(&name) {
        return Err(ExpressionError::config(format!(
            "dialect '{name}' is already registered"
        )));
    }
    DIALECTS.insert(name, Arc::new(dialect));
    Ok(())
}

/// Looks up a dialect by name, or passes an already-constructed dialect
/// through unchanged (as an `Arc` clone is needed either way to give the
/// caller a shareable handle).
///
/// Mirrors the reference implementation's `get_dialect`, which accepts
/// either a registered name or a dialect value directly.
pub fn get_dialect(reference: DialectRef<'_>) -> Result<Arc<Dialect>, ExpressionError> {
    match reference {
        DialectRef::Named(name) => DIALECTS
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ExpressionError::config(format!("unknown dialect '{name}'"))),
        DialectRef::Inline(dialect) => Ok(Arc::new(dialect.clone())),
    }
}

/// Removes a previously registered dialect. Does nothing if `name` isn't
/// registered.
pub fn unregister_dialect(name: &str) {
    DIALECTS.remove(name);
}

/// Either a dialect registered by name, or an inline dialect value — the
/// two ways `spec.md` §6's `dialect="default"`-style parameter can be
/// satisfied in a statically typed API.
pub enum DialectRef<'a> {
    Named(&'a str),
    Inline(&'a Dialect),
}

impl<'a> From<&'a str> for DialectRef<'a> {
    fn from(name: &'a str) -> Self {
        DialectRef::Named(name)
    }
}

impl<'a> From<&'a Dialect> for DialectRef<'a> {
    fn from(dialect: &'a Dialect) -> Self {
        DialectRef::Inline(dialect)
    }
}
