//! Minimal doc-comment tag parsing: `@param`, `@return`, `@var`,
//! `@property`/`@property-read`/`@property-write`, `@method`.
//!
//! The doc-comment parser proper is out of scope (§1); this is just enough
//! line scanning to resolve the tags the extractor consumes.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTags {
    pub params: Vec<(String, String)>,
    pub return_type: Option<String>,
    pub var_type: Option<String>,
    pub magic_properties: Vec<MagicProperty>,
    pub magic_methods: Vec<MagicMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicProperty {
    pub name: String,
    pub type_expr: Option<String>,
    pub write_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicMethod {
    pub name: String,
    pub return_type: Option<String>,
}

pub fn parse_doc_tags(doc: &str) -> DocTags {
    let mut tags = DocTags::default();
    for line in doc.lines() {
        let trimmed = strip_comment_decoration(line);
        let Some(rest) = trimmed.strip_prefix('@') else { continue };
        let mut words = rest.split_whitespace();
        let Some(tag) = words.next() else { continue };
        let remainder: Vec<&str> = words.collect();
        match tag {
            "param" => {
                if let [type_expr, name, ..] = remainder[..] {
                    tags.params.push((name.trim_start_matches('$').to_string(), type_expr.to_string()));
                }
            }
            "return" => {
                if let Some(type_expr) = remainder.first() {
                    tags.return_type = Some((*type_expr).to_string());
                }
            }
            "var" => {
                if let Some(type_expr) = remainder.first() {
                    tags.var_type = Some((*type_expr).to_string());
                }
            }
            "property" | "property-read" | "property-write" => {
                if let [type_expr, name, ..] = remainder[..] {
                    tags.magic_properties.push(MagicProperty {
                        name: name.trim_start_matches('$').to_string(),
                        type_expr: Some(type_expr.to_string()),
                        write_only: tag == "property-write",
                    });
                }
            }
            "method" => {
                // `@method ReturnType name(...)` or `@method name(...)`.
                if remainder.len() >= 2 {
                    let (return_type, sig) = (Some(remainder[0].to_string()), remainder[1]);
                    if let Some(name) = sig.split('(').next() {
                        tags.magic_methods.push(MagicMethod { name: name.to_string(), return_type });
                    }
                } else if let Some(sig) = remainder.first() {
                    if let Some(name) = sig.split('(').next() {
                        tags.magic_methods.push(MagicMethod { name: name.to_string(), return_type: None });
                    }
                }
            }
            _ => {}
        }
    }
    tags
}

fn strip_comment_decoration(line: &str) -> &str {
    line.trim().trim_start_matches('/').trim_start_matches('*').trim()
}
