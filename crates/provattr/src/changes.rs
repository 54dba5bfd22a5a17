//! Pending attribute modifications.
//!
//! A [`ChangeSet`] is keyed the way the directory's modify call expects:
//! `name` replaces, `+name` adds values to a multi-valued attribute and
//! `-name` removes them. A replacement with the single value `""` clears the
//! attribute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stored values keyed by attribute name, as held by a store for one entry.
pub type AttrMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModOp {
    Replace,
    Add,
    Remove,
}

impl ModOp {
    pub fn prefix(&self) -> &'static str {
        match self {
            ModOp::Replace => "",
            ModOp::Add => "+",
            ModOp::Remove => "-",
        }
    }

    pub fn split(key: &str) -> (ModOp, &str) {
        if let Some(name) = key.strip_prefix('+') {
            (ModOp::Add, name)
        } else if let Some(name) = key.strip_prefix('-') {
            (ModOp::Remove, name)
        } else {
            (ModOp::Replace, key)
        }
    }
}

/// One staged modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modification<'a> {
    pub op: ModOp,
    pub name: &'a str,
    pub values: &'a [String],
}

impl Modification<'_> {
    /// Replacement with nothing but empty strings.
    pub fn is_clear(&self) -> bool {
        self.op == ModOp::Replace && self.values.iter().all(String::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    mods: BTreeMap<String, Vec<String>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The caller's change set, or a fresh one when none was passed.
    pub fn ensure(changes: Option<ChangeSet>) -> Self {
        changes.unwrap_or_default()
    }

    fn key(op: ModOp, name: &str) -> String {
        format!("{}{}", op.prefix(), name)
    }

    /// Stage a full replacement. Staging the same attribute again overwrites.
    pub fn replace(&mut self, name: &str, values: Vec<String>) -> &mut Self {
        self.mods.insert(Self::key(ModOp::Replace, name), values);
        self
    }

    pub fn put(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.replace(name, vec![value.into()])
    }

    /// Stage the clear sentinel.
    pub fn clear(&mut self, name: &str) -> &mut Self {
        self.put(name, "")
    }

    /// Stage a value to add. Repeated calls accumulate.
    pub fn add(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.mods
            .entry(Self::key(ModOp::Add, name))
            .or_default()
            .push(value.into());
        self
    }

    /// Stage a value to remove. Repeated calls accumulate.
    pub fn remove(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.mods
            .entry(Self::key(ModOp::Remove, name))
            .or_default()
            .push(value.into());
        self
    }

    /// Values staged under the raw key (`name`, `+name` or `-name`).
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.mods.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modification<'_>> {
        self.mods.iter().map(|(key, values)| {
            let (op, name) = ModOp::split(key);
            Modification {
                op,
                name,
                values: values.as_slice(),
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    /// Apply to an entry's stored attributes.
    ///
    /// Replacements (and clears) go first, then additions, then removals.
    /// Additions skip values already present; an attribute left without
    /// values is dropped. A staged clear therefore does not cancel additions
    /// staged for the same attribute: `+name` still lands after the clear.
    pub fn apply(&self, attrs: &mut AttrMap) {
        for op in [ModOp::Replace, ModOp::Add, ModOp::Remove] {
            for m in self.iter().filter(|m| m.op == op) {
                match op {
                    ModOp::Replace => {
                        let values: Vec<String> =
                            m.values.iter().filter(|v| !v.is_empty()).cloned().collect();
                        if values.is_empty() {
                            attrs.remove(m.name);
                        } else {
                            attrs.insert(m.name.to_string(), values);
                        }
                    }
                    ModOp::Add => {
                        let current = attrs.entry(m.name.to_string()).or_default();
                        for value in m.values.iter().filter(|v| !v.is_empty()) {
                            if !current.contains(value) {
                                current.push(value.clone());
                            }
                        }
                        if current.is_empty() {
                            attrs.remove(m.name);
                        }
                    }
                    ModOp::Remove => {
                        if let Some(current) = attrs.get_mut(m.name) {
                            current.retain(|v| !m.values.contains(v));
                            if current.is_empty() {
                                attrs.remove(m.name);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One `key: values` line per staged modification.
impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in &self.mods {
            writeln!(f, "{}: {}", key, values.join(", "))?;
        }
        Ok(())
    }
}
