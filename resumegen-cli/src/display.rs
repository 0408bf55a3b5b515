use resumegen_core::fields::{FORM_FIELDS, find_field};
use resumegen_core::types::FormData;

pub fn format_fields() -> String {
    let mut out = String::new();
    for f in FORM_FIELDS {
        let kind = if f.is_multiline() {
            format!("multiline, {} rows", f.rows)
        } else {
            "single line".to_string()
        };
        out.push_str(&format!("{:<16} {:<20} ({kind})\n", f.name, f.label));
    }
    out
}

/// Current form values, catalog fields first, then any extra keys.
pub fn format_form(form: &FormData) -> String {
    let mut out = String::new();
    for f in FORM_FIELDS {
        push_value(&mut out, f.label, form.get(f.name));
    }
    for (name, value) in form.iter().filter(|(k, _)| find_field(k).is_none()) {
        push_value(&mut out, name, value);
    }
    out
}

fn push_value(out: &mut String, label: &str, value: &str) {
    let mut lines = value.lines();
    out.push_str(&format!("{label}: {}\n", lines.next().unwrap_or("")));
    for line in lines {
        out.push_str(&format!("    {line}\n"));
    }
}

/// Turn `\n`, `\t` and `\\` escapes into the characters they stand for.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
