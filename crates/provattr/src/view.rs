//! # Attribute View
//!
//! [`AttributeView`] is the generic accessor engine: a typed window onto one
//! entry's attributes in an [`AttributeStore`]. Every named accessor in the
//! crate (typed handles, the [`Server`](crate::server::Server) facade, the
//! CLI's name-based path) bottoms out here.
//!
//! ## Reads never fail
//!
//! A read resolves in this order:
//!
//! 1. the stored value, coerced to the requested type;
//! 2. the caller-supplied default, when nothing is stored, when the stored
//!    value cannot be coerced, or when the store itself cannot be read.
//!
//! The last two cases are logged at `warn`. This is the only place the
//! fallback policy lives; coercion functions just report `None`.
//!
//! ## Two write forms
//!
//! Every write comes in two shapes:
//!
//! - direct (`set`, `unset`, `add_multi`, ...): stage exactly one attribute in
//!   a fresh [`ChangeSet`] and commit it. Store failures propagate unchanged.
//! - staged (`set_in`, `unset_in`, `add_multi_in`, ...): populate the
//!   caller's change set, allocating one when `None` is passed, and hand it
//!   back. These never touch the store and cannot fail.
//!
//! The view holds no cache. Every read goes to the store.

use crate::attributes::coerce::{self, ToAttrValue};
use crate::attributes::{AttrEnum, AttrValue, AttributeDescriptor};
use crate::changes::ChangeSet;
use crate::entry::EntryRef;
use crate::error::Result;
use crate::store::AttributeStore;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub struct AttributeView<'s, S: AttributeStore + ?Sized> {
    store: &'s S,
    entry: EntryRef,
}

impl<'s, S: AttributeStore + ?Sized> AttributeView<'s, S> {
    pub fn new(store: &'s S, entry: EntryRef) -> Self {
        Self { store, entry }
    }

    pub fn entry(&self) -> &EntryRef {
        &self.entry
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    // --- Reads ---

    /// Stored values, or `None` when absent or unreadable.
    pub fn stored(&self, name: &str) -> Option<Vec<String>> {
        match self.store.lookup(&self.entry, name) {
            Ok(Some(values)) if !values.is_empty() => Some(values),
            Ok(_) => None,
            Err(e) => {
                warn!(entry = %self.entry, attr = name, error = %e, "attribute lookup failed, treating as unset");
                None
            }
        }
    }

    /// First stored value, or `default`.
    pub fn get(&self, name: &str, default: Option<&str>) -> Option<String> {
        self.stored(name)
            .and_then(|values| values.into_iter().next())
            .or_else(|| default.map(str::to_string))
    }

    /// Every stored value. Empty when unset, never absent.
    pub fn get_multi(&self, name: &str) -> Vec<String> {
        self.stored(name).unwrap_or_default()
    }

    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.coerce_or(name, "bool", default, |raw| Some(coerce::decode_bool(raw)))
    }

    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.coerce_or(name, "int", default, coerce::decode_int)
    }

    pub fn get_long(&self, name: &str, default: i64) -> i64 {
        self.coerce_or(name, "long", default, coerce::decode_long)
    }

    /// Duration in milliseconds.
    pub fn get_duration(&self, name: &str, default_millis: i64) -> i64 {
        self.coerce_or(name, "duration", default_millis, coerce::decode_duration)
    }

    /// Duration in whole seconds.
    pub fn get_duration_secs(&self, name: &str, default_secs: i64) -> i64 {
        self.coerce_or(name, "duration", default_secs, |raw| {
            coerce::decode_duration(raw).map(|ms| ms / 1000)
        })
    }

    pub fn get_timestamp(
        &self,
        name: &str,
        default: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        self.coerce_or(name, "timestamp", default, |raw| {
            coerce::decode_timestamp(raw).map(Some)
        })
    }

    /// Stored token parsed as `E`; `default` when absent or not a valid token.
    pub fn get_enum<E: AttrEnum>(&self, name: &str, default: Option<E>) -> Option<E> {
        self.coerce_or(name, "enum", default, |raw| E::from_token(raw).map(Some))
    }

    /// Resolve a descriptor to a dynamically typed value, applying its
    /// declared default (or the kind's implicit default).
    pub fn resolve(&self, desc: &AttributeDescriptor) -> AttrValue {
        if desc.multi {
            let values = match self.stored(desc.name) {
                Some(values) => values,
                None => desc.default.map(|d| vec![d.to_string()]).unwrap_or_default(),
            };
            return AttrValue::Multi(values);
        }

        let default = desc
            .default
            .and_then(|raw| AttrValue::decode(desc, raw))
            .unwrap_or_else(|| AttrValue::implicit_default(desc));
        let kind = desc.kind.as_str();
        self.coerce_or(desc.name, kind, default, |raw| AttrValue::decode(desc, raw))
    }

    fn coerce_or<T>(
        &self,
        name: &str,
        kind: &str,
        default: T,
        decode: impl FnOnce(&str) -> Option<T>,
    ) -> T {
        let Some(raw) = self.get(name, None) else {
            return default;
        };
        match decode(&raw) {
            Some(value) => value,
            None => {
                warn!(entry = %self.entry, attr = name, value = %raw, kind, "stored value does not parse, using default");
                default
            }
        }
    }

    // --- Direct writes ---

    /// Commit a change set against this view's entry.
    pub fn commit(&self, changes: &ChangeSet) -> Result<()> {
        debug!(entry = %self.entry, modifications = changes.len(), "committing change set");
        self.store.commit(&self.entry, changes)
    }

    fn commit_one(&self, stage: impl FnOnce(&mut ChangeSet)) -> Result<()> {
        let mut changes = ChangeSet::new();
        stage(&mut changes);
        self.commit(&changes)
    }

    pub fn set(&self, name: &str, value: impl ToAttrValue) -> Result<()> {
        self.commit_one(|cs| {
            cs.put(name, value.to_attr_value());
        })
    }

    /// Replace every value of a multi-valued attribute. An empty slice clears it.
    pub fn set_multi<V: ToAttrValue>(&self, name: &str, values: &[V]) -> Result<()> {
        self.commit_one(|cs| {
            cs.replace(name, values.iter().map(ToAttrValue::to_attr_value).collect());
        })
    }

    pub fn add_multi(&self, name: &str, value: impl ToAttrValue) -> Result<()> {
        self.commit_one(|cs| {
            cs.add(name, value.to_attr_value());
        })
    }

    pub fn remove_multi(&self, name: &str, value: impl ToAttrValue) -> Result<()> {
        self.commit_one(|cs| {
            cs.remove(name, value.to_attr_value());
        })
    }

    pub fn unset(&self, name: &str) -> Result<()> {
        self.commit_one(|cs| {
            cs.clear(name);
        })
    }

    // --- Staged writes ---

    pub fn set_in(
        &self,
        name: &str,
        value: impl ToAttrValue,
        changes: Option<ChangeSet>,
    ) -> ChangeSet {
        let mut changes = ChangeSet::ensure(changes);
        changes.put(name, value.to_attr_value());
        changes
    }

    pub fn set_multi_in<V: ToAttrValue>(
        &self,
        name: &str,
        values: &[V],
        changes: Option<ChangeSet>,
    ) -> ChangeSet {
        let mut changes = ChangeSet::ensure(changes);
        changes.replace(name, values.iter().map(ToAttrValue::to_attr_value).collect());
        changes
    }

    pub fn add_multi_in(
        &self,
        name: &str,
        value: impl ToAttrValue,
        changes: Option<ChangeSet>,
    ) -> ChangeSet {
        let mut changes = ChangeSet::ensure(changes);
        changes.add(name, value.to_attr_value());
        changes
    }

    pub fn remove_multi_in(
        &self,
        name: &str,
        value: impl ToAttrValue,
        changes: Option<ChangeSet>,
    ) -> ChangeSet {
        let mut changes = ChangeSet::ensure(changes);
        changes.remove(name, value.to_attr_value());
        changes
    }

    /// Stage a clear. Additions staged for `name` in the same change set
    /// still apply after it.
    pub fn unset_in(&self, name: &str, changes: Option<ChangeSet>) -> ChangeSet {
        let mut changes = ChangeSet::ensure(changes);
        changes.clear(name);
        changes
    }
}
