use crate::pager::Controls;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Could not read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad mount pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Page used when no template is given: every mount point and both arrow groups.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="uk">
<head>
<meta charset="utf-8">
<title>Tabletop club</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<section class="catalog">
<h2>Board games</h2>
<div id="boardgames-list" class="games-list"></div>
<h2>RPG</h2>
<div id="rpg-list" class="games-list"></div>
<h2>Wargames</h2>
<div id="wargames-list" class="games-list"></div>
</section>
<section class="masters">
<h2>Masters</h2>
<div id="masters-list" class="masters-list"></div>
<div class="masters-arrows">
<button id="masters-prev" class="arrow">&lsaquo;</button>
<button id="masters-next" class="arrow">&rsaquo;</button>
</div>
</section>
<section class="gallery">
<h2>Gallery</h2>
<div id="gallery-list" class="gallery-list"></div>
<div class="gallery-arrows">
<button id="gallery-prev" class="arrow">&lsaquo;</button>
<button id="gallery-next" class="arrow">&rsaquo;</button>
</div>
</section>
</body>
</html>
"#;

/// Opening tag of the element with the given id; group 1 is the tag name.
fn id_tag_pattern(id: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"<([a-zA-Z][a-zA-Z0-9-]*)(?:\s[^>]*)?\sid\s*=\s*"{}"[^>]*>"#,
        regex::escape(id)
    ))
}

/// Opening tag of the element whose class list contains `class`.
fn class_tag_pattern(class: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"<[a-zA-Z][a-zA-Z0-9-]*\s[^>]*\bclass\s*=\s*"(?:[^"]*\s)?{}(?:\s[^"]*)?"[^>]*>"#,
        regex::escape(class)
    ))
}

/// Byte range of the content of element `id`, up to its matching close tag.
fn container_span(html: &str, id: &str) -> Result<Option<Range<usize>>, regex::Error> {
    let Some(open) = id_tag_pattern(id)?.captures(html) else {
        return Ok(None);
    };
    let (Some(whole), Some(name)) = (open.get(0), open.get(1)) else {
        return Ok(None);
    };
    if whole.as_str().ends_with("/>") {
        return Ok(None);
    }

    let same_name = Regex::new(&format!(
        r#"(?i)<(/?){}(?:\s[^>]*)?>"#,
        regex::escape(name.as_str())
    ))?;
    let mut depth = 1usize;
    for tag in same_name.captures_iter(&html[whole.end()..]) {
        let Some(m) = tag.get(0) else { continue };
        if !tag[1].is_empty() {
            depth -= 1;
            if depth == 0 {
                return Ok(Some(whole.end()..whole.end() + m.start()));
            }
        } else if !m.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    Ok(None)
}

/// One attribute of an opening tag. Quoted values are consumed whole, so
/// nothing inside them is taken for an attribute.
fn attr_pattern() -> Result<Regex, regex::Error> {
    Regex::new(r#"\s+([^\s"'=/>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
}

#[derive(Debug)]
struct Attr {
    name: String,
    value: Option<String>,
    raw: String,
}

impl Attr {
    fn new(name: &str, value: Option<String>) -> Self {
        let raw = match &value {
            Some(value) => format!(" {}=\"{}\"", name, value),
            None => format!(" {}", name),
        };
        Self {
            name: name.to_string(),
            value,
            raw,
        }
    }

    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Parse an opening tag, let `edit` change its attributes, and write it back.
/// Untouched attributes keep their original text.
fn rewrite_open_tag(tag: &str, attrs: &Regex, edit: impl FnOnce(&mut Vec<Attr>)) -> String {
    let (inner, close) = match tag.strip_suffix("/>") {
        Some(inner) => (inner, "/>"),
        None => (tag.strip_suffix('>').unwrap_or(tag), ">"),
    };
    let name_end = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    let (head, body) = inner.split_at(name_end);

    let mut list: Vec<Attr> = attrs
        .captures_iter(body)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());
            Attr {
                name: caps[1].to_string(),
                value,
                raw: caps[0].to_string(),
            }
        })
        .collect();
    edit(&mut list);

    let mut out = head.to_string();
    for attr in &list {
        out.push_str(&attr.raw);
    }
    out.push_str(close);
    out
}

/// Set the `display` declaration of the tag's inline style, keeping the rest.
fn set_display(attrs: &mut Vec<Attr>, display: &str) {
    let declaration = format!("display:{}", display);
    let Some(pos) = attrs.iter().position(|a| a.is("style")) else {
        attrs.push(Attr::new("style", Some(declaration)));
        return;
    };
    let existing = attrs[pos].value.clone().unwrap_or_default();
    let mut declarations: Vec<String> = existing
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| {
            let property = d.split(':').next().unwrap_or_default().trim();
            !property.eq_ignore_ascii_case("display")
        })
        .map(str::to_string)
        .collect();
    declarations.push(declaration);
    attrs[pos] = Attr::new("style", Some(declarations.join("; ")));
}

fn set_flag(attrs: &mut Vec<Attr>, name: &str, on: bool) {
    let present = attrs.iter().any(|a| a.is(name));
    if on && !present {
        attrs.push(Attr::new(name, None));
    } else if !on && present {
        attrs.retain(|a| !a.is(name));
    }
}

/// An HTML page with mount points. Lists are mounted by id and the result is
/// produced from the pristine template, so mounting again fully replaces the
/// previous content.
#[derive(Debug, Clone)]
pub struct Page {
    template: String,
    mounts: BTreeMap<String, String>,
    controls: BTreeMap<String, Controls>,
}

impl Page {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            mounts: BTreeMap::new(),
            controls: BTreeMap::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, PageError> {
        let template = std::fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(template))
    }

    pub fn has_container(&self, id: &str) -> Result<bool, PageError> {
        Ok(container_span(&self.template, id)?.is_some())
    }

    /// Replace the whole content of container `id` with `nodes`.
    ///
    /// Returns `false` without touching anything if the page has no such container.
    pub fn mount(&mut self, id: &str, nodes: &[String]) -> Result<bool, PageError> {
        if !self.has_container(id)? {
            debug!(mount = id, "no container on page, skipping");
            return Ok(false);
        }
        self.mounts.insert(id.to_string(), nodes.concat());
        Ok(true)
    }

    /// Record the state of the `<prefix>-arrows` control group.
    ///
    /// Returns `false` if the page has no such group.
    pub fn set_controls(&mut self, prefix: &str, controls: Controls) -> Result<bool, PageError> {
        let wrapper = class_tag_pattern(&format!("{}-arrows", prefix))?;
        if !wrapper.is_match(&self.template) {
            debug!(controls = prefix, "no arrow controls on page, skipping");
            return Ok(false);
        }
        self.controls.insert(prefix.to_string(), controls);
        Ok(true)
    }

    pub fn render(&self) -> Result<String, PageError> {
        let mut out = self.template.clone();

        for (id, content) in &self.mounts {
            if let Some(span) = container_span(&out, id)? {
                out.replace_range(span, content);
            }
        }

        let attrs = attr_pattern()?;
        for (prefix, controls) in &self.controls {
            let (display, prev_disabled, next_disabled) = match controls {
                Controls::Hidden => ("none", false, false),
                Controls::Shown {
                    prev_enabled,
                    next_enabled,
                } => ("flex", !prev_enabled, !next_enabled),
            };
            let wrapper = class_tag_pattern(&format!("{}-arrows", prefix))?;
            out = wrapper
                .replacen(&out, 1, |caps: &Captures| {
                    rewrite_open_tag(&caps[0], &attrs, |list| set_display(list, display))
                })
                .into_owned();

            if controls.is_hidden() {
                continue;
            }
            for (suffix, disabled) in [("prev", prev_disabled), ("next", next_disabled)] {
                let button = id_tag_pattern(&format!("{}-{}", prefix, suffix))?;
                out = button
                    .replacen(&out, 1, |caps: &Captures| {
                        rewrite_open_tag(&caps[0], &attrs, |list| set_flag(list, "disabled", disabled))
                    })
                    .into_owned();
            }
        }
        Ok(out)
    }
}
