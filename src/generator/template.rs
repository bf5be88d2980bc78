//! Alias and URL template rendering
//!
//! Templates use `$` placeholders:
//!
//! - `${name}` or `$name` is replaced by the value of `name`
//! - `$$` is a literal `$`
//!
//! Only four names exist: `hostname`, `query_port`, `setname` and
//! `hostshortname`. Any other name, or a `$` not followed by one of the
//! forms above, is an error.

use crate::error::TemplateError;

/// Values available to alias and URL templates
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub hostname: &'a str,
    pub query_port: &'a str,
    pub setname: &'a str,
    pub hostshortname: &'a str,
}

impl<'a> TemplateVars<'a> {
    fn lookup(&self, name: &str) -> Option<&'a str> {
        match name {
            "hostname" => Some(self.hostname),
            "query_port" => Some(self.query_port),
            "setname" => Some(self.setname),
            "hostshortname" => Some(self.hostshortname),
            _ => None,
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Substitute every placeholder in `template`
///
/// # Errors
/// Returns `TemplateError` for unknown names and malformed placeholders
pub fn render(template: &str, vars: &TemplateVars<'_>) -> Result<String, TemplateError> {
    let invalid = |position: usize| TemplateError::InvalidPlaceholder {
        template: template.to_string(),
        position,
    };

    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let name = match chars.peek() {
            Some(&(_, '$')) => {
                chars.next();
                result.push('$');
                continue;
            }
            Some(&(_, '{')) => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, next)) if name.is_empty() && is_ident_start(next) => {
                            name.push(next)
                        }
                        Some((_, next)) if !name.is_empty() && is_ident_char(next) => {
                            name.push(next)
                        }
                        _ => return Err(invalid(position)),
                    }
                }
                if name.is_empty() {
                    return Err(invalid(position));
                }
                name
            }
            Some(&(_, first)) if is_ident_start(first) => {
                let mut name = String::new();
                while let Some(&(_, next)) = chars.peek() {
                    if is_ident_char(next) {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                name
            }
            _ => return Err(invalid(position)),
        };

        let value = vars
            .lookup(&name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder {
                template: template.to_string(),
                name: name.clone(),
            })?;
        result.push_str(value);
    }

    Ok(result)
}
