//! Terminal and JSON output.
//!
//! Human output uses `console` styles, which switch themselves off when
//! stdout is not a terminal. `--json` output is pretty-printed with
//! `serde_json` and never styled.

use anyhow::Result;
use console::Style;
use provattr::changes::AttrMap;
use provattr::{AttrValue, AttributeDescriptor, ChangeSet, EntryRef};
use serde::Serialize;
use std::collections::BTreeMap;

struct Styles {
    name: Style,
    muted: Style,
    success: Style,
    kind: Style,
}

fn styles() -> Styles {
    Styles {
        name: Style::new().bold(),
        muted: Style::new().dim(),
        success: Style::new().green(),
        kind: Style::new().cyan(),
    }
}

/// One attribute as shown by `get`.
#[derive(Debug)]
pub struct ResolvedRow {
    pub name: &'static str,
    pub value: AttrValue,
    /// False when the value comes from a default.
    pub is_set: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0)
}

pub fn resolved(rows: &[ResolvedRow], json: bool) -> Result<()> {
    if json {
        let map: BTreeMap<&str, &AttrValue> = rows.iter().map(|r| (r.name, &r.value)).collect();
        return print_json(&map);
    }

    let s = styles();
    let width = name_width(rows.iter().map(|r| r.name));
    for row in rows {
        let rendered = row.value.to_string();
        let value = if row.is_set {
            rendered
        } else if rendered.is_empty() {
            s.muted.apply_to("(unset)").to_string()
        } else {
            format!("{} {}", rendered, s.muted.apply_to("(default)"))
        };
        let name = format!("{:width$}", row.name, width = width);
        println!("{}  {}", s.name.apply_to(name), value);
    }
    Ok(())
}

pub fn stored(attrs: &AttrMap, json: bool) -> Result<()> {
    if json {
        return print_json(attrs);
    }

    let s = styles();
    let width = name_width(attrs.keys().map(String::as_str));
    for (name, values) in attrs {
        let name = format!("{:width$}", name, width = width);
        println!("{}  {}", s.name.apply_to(name), values.join(", "));
    }
    Ok(())
}

pub fn change_set(changes: &ChangeSet, json: bool) -> Result<()> {
    if json {
        return print_json(changes);
    }
    print!("{}", changes);
    Ok(())
}

pub fn descriptors(descs: &[&AttributeDescriptor], json: bool) -> Result<()> {
    if json {
        return print_json(descs);
    }

    let s = styles();
    for desc in descs {
        let mut shape = desc.kind.to_string();
        if desc.multi {
            shape.push_str(", multi");
        }
        println!(
            "{} {} {}",
            s.name.apply_to(desc.name),
            s.kind.apply_to(format!("({})", shape)),
            s.muted.apply_to(format!("#{}", desc.id))
        );
        if let Some(default) = desc.default {
            println!("  default: {}", default);
        }
        if !desc.values.is_empty() {
            println!("  values:  {}", desc.values.join(", "));
        }
        if !desc.description.is_empty() {
            println!("  {}", s.muted.apply_to(desc.description));
        }
    }
    Ok(())
}

pub fn entries(entries: &[EntryRef], json: bool) -> Result<()> {
    if json {
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        return print_json(&names);
    }
    for entry in entries {
        println!("{}", entry.name);
    }
    Ok(())
}

pub fn success(message: &str) {
    println!("{}", styles().success.apply_to(message));
}
