//! Attribute list parsing: `[style#id.role%option, positional, key=value]`.
//!
//! Values may be wrapped in single or double quotes so they can carry
//! commas. The first positional entry doubles as the block style and may
//! carry `#id`, `.role` and `%option` shorthand.

use super::BlockMeta;

#[derive(Debug, Default)]
pub(super) struct AttrList {
    pub positionals: Vec<String>,
    pub named: Vec<(String, String)>,
    pub style: Option<String>,
    pub id: Option<String>,
    pub roles: Vec<String>,
    pub options: Vec<String>,
}

pub(super) fn parse_attrlist(input: &str) -> AttrList {
    let mut list = AttrList::default();
    for (index, token) in split_tokens(input).into_iter().enumerate() {
        if let Some((key, value)) = named_pair(&token) {
            match key.as_str() {
                "options" | "opts" => {
                    list.options
                        .extend(value.split(',').map(|o| o.trim().to_string()));
                }
                "role" => list.roles.extend(value.split(' ').map(String::from)),
                "id" => list.id = Some(value),
                _ => list.named.push((key, value)),
            }
            continue;
        }
        if index == 0 {
            parse_shorthand(&token, &mut list);
        }
        list.positionals.push(unquote(&token));
    }
    list
}

/// Merge a parsed attribute list into pending block metadata.
pub(super) fn merge_into_meta(input: &str, meta: &mut BlockMeta) {
    let parsed = parse_attrlist(input);
    if let Some(style) = parsed.style {
        meta.style = Some(style);
    }
    if let Some(id) = parsed.id {
        meta.id = Some(id);
    }
    if !parsed.roles.is_empty() {
        meta.attributes.set("role", parsed.roles.join(" "));
    }
    if !parsed.options.is_empty() {
        let mut options = meta
            .attributes
            .get("options")
            .map(|existing| {
                existing
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        for option in parsed.options {
            if !options.contains(&option) {
                options.push(option);
            }
        }
        meta.attributes.set("options", options.join(","));
    }
    for (key, value) in parsed.named {
        meta.attributes.set(key, value);
    }
    meta.positionals = parsed.positionals;
}

/// Split on commas that sit outside quoted values.
fn split_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in input.chars() {
        match quote {
            Some(open) => {
                current.push(c);
                if c == open {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                ',' => {
                    tokens.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }
    tokens.push(current.trim().to_string());
    tokens
}

fn named_pair(token: &str) -> Option<(String, String)> {
    let (key, value) = token.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) || key.contains('"') {
        return None;
    }
    Some((key.to_string(), unquote(value.trim())))
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            let inner = &value[1..value.len() - 1];
            return inner.replace(&format!("\\{quote}"), &quote.to_string());
        }
    }
    value.to_string()
}

fn parse_shorthand(token: &str, list: &mut AttrList) {
    let mut marker = ' ';
    let mut current = String::new();
    let flush = |marker: char, value: &str, list: &mut AttrList| {
        if value.is_empty() {
            return;
        }
        match marker {
            '#' => list.id = Some(value.to_string()),
            '.' => list.roles.push(value.to_string()),
            '%' => list.options.push(value.to_string()),
            _ => list.style = Some(value.to_string()),
        }
    };
    for c in token.chars() {
        if matches!(c, '#' | '.' | '%') {
            flush(marker, &current, list);
            marker = c;
            current.clear();
        } else {
            current.push(c);
        }
    }
    flush(marker, &current, list);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_named() {
        let list = parse_attrlist("quote, Abraham Lincoln, The Address");
        assert_eq!(list.style.as_deref(), Some("quote"));
        assert_eq!(
            list.positionals,
            vec!["quote", "Abraham Lincoln", "The Address"]
        );
        assert!(list.named.is_empty());
    }

    #[test]
    fn empty_first_positional_has_no_style() {
        let list = parse_attrlist(", Richard M. Nixon");
        assert_eq!(list.style, None);
        assert_eq!(list.positionals, vec!["", "Richard M. Nixon"]);
    }

    #[test]
    fn quoted_values_keep_commas() {
        let list = parse_attrlist("cols=\"2*\", options='header,footer'");
        assert_eq!(list.named, vec![("cols".to_string(), "2*".to_string())]);
        assert_eq!(list.options, vec!["header", "footer"]);
    }

    #[test]
    fn shorthand_id_role_and_option() {
        let list = parse_attrlist("source#main.wide%collapsible,js");
        assert_eq!(list.style.as_deref(), Some("source"));
        assert_eq!(list.id.as_deref(), Some("main"));
        assert_eq!(list.roles, vec!["wide"]);
        assert_eq!(list.options, vec!["collapsible"]);
        assert_eq!(list.positionals[1], "js");
    }

    #[test]
    fn named_values_are_unquoted() {
        let list = parse_attrlist("caption=\"Table A. \"");
        assert_eq!(
            list.named,
            vec![("caption".to_string(), "Table A. ".to_string())]
        );
    }

    #[test]
    fn escaped_quotes_inside_values() {
        let list = parse_attrlist(r#"citetitle="He said \"no\"""#);
        assert_eq!(
            list.named,
            vec![("citetitle".to_string(), "He said \"no\"".to_string())]
        );
    }
}
