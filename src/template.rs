use std::path::Path;

use indexmap::IndexMap;

use crate::error::RenderError;
use crate::model::Character;
use crate::procgen::stats::format_half;

pub const PUBLIC_TEMPLATE: &str = "public_info.txt";
pub const PRIVATE_TEMPLATE: &str = "private_info.txt";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (PUBLIC_TEMPLATE, include_str!("../templates/public_info.txt")),
    (PRIVATE_TEMPLATE, include_str!("../templates/private_info.txt")),
];

/// Named text templates with `{field}` placeholders.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: IndexMap<String, String>,
}

impl TemplateSet {
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN_TEMPLATES
                .iter()
                .map(|&(name, source)| (name.to_string(), source.to_string()))
                .collect(),
        }
    }

    /// Built-in templates overridden by every `*.txt` file in `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let io_err = |source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut set = Self::builtin();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
            set.insert(name, source);
        }
        Ok(set)
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }

    pub fn source(&self, name: &str) -> Result<&str, RenderError> {
        self.templates
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))
    }

    pub fn render(&self, name: &str, context: &RenderContext) -> Result<String, RenderError> {
        render_source(name, self.source(name)?, context)
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Every value a template may reference, as display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    fields: IndexMap<String, String>,
}

impl RenderContext {
    pub fn from_character(character: &Character) -> Self {
        let mut ctx = Self::default();
        ctx.insert("id", &character.id);
        ctx.insert_displayed("archetype", &character.archetype);
        ctx.insert("personal_name", &character.personal_name);
        ctx.insert("name_meaning", &character.name_meaning);
        ctx.insert("full_name", &character.full_name);
        ctx.insert_displayed("gender", character.gender.as_str());

        let h = &character.hierarchy;
        ctx.insert_displayed("clan", &h.clan);
        ctx.insert_displayed("family", &h.family);
        ctx.insert_displayed("house", &h.house);
        ctx.insert_displayed("lineage", &h.lineage);
        ctx.insert_displayed("school", &h.school);

        ctx.insert("base_rank", character.base_rank.to_string());
        ctx.insert("rank", format_half(character.rank));
        ctx.insert("recognition", format_half(character.recognition));
        ctx.insert("xp", character.xp.to_string());
        ctx.insert("honor", format_half(character.honor));

        ctx.insert_list("traits", &character.traits);
        ctx.insert_list("tags", &character.tags);

        for (key, value) in &character.details {
            ctx.insert_displayed(key, value);
        }
        ctx
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// `field` plus a title-cased `field_display`.
    pub fn insert_displayed(&mut self, field: &str, value: &str) {
        self.insert(format!("{field}_display"), title_case(value));
        self.insert(field, value);
    }

    /// `field` comma-joined plus a newline-joined `field_string`.
    pub fn insert_list(&mut self, field: &str, values: &[String]) {
        self.insert(format!("{field}_string"), values.join("\n"));
        self.insert(field, values.join(", "));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Substitute `{field}` placeholders in `source`, collapse long blank runs
/// and trim. `{{` and `}}` produce literal braces.
pub fn render_source(
    name: &str,
    source: &str,
    context: &RenderContext,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        let end = tail.find('}').ok_or_else(|| RenderError::Unterminated {
            template: name.to_string(),
        })?;
        let field = tail[1..end].trim();
        let value = context.get(field).ok_or_else(|| RenderError::MissingField {
            template: name.to_string(),
            field: field.to_string(),
        })?;
        out.push_str(value);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);

    Ok(collapse_blank_lines(&out).trim().to_string())
}

/// Replace every run of three or more blank lines with a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        push_blanks(&mut lines, blank_run);
        blank_run = 0;
        lines.push(line);
    }
    push_blanks(&mut lines, blank_run);
    lines.join("\n")
}

fn push_blanks(lines: &mut Vec<&str>, run: usize) {
    let keep = if run >= 3 { 1 } else { run };
    lines.extend(std::iter::repeat_n("", keep));
}

/// Drop every line that starts with `prefix`.
pub fn without_lines(source: &str, prefix: &str) -> String {
    source
        .lines()
        .filter(|line| !line.trim_start().starts_with(prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite the leading `from` label of matching lines to `to`, keeping
/// any indentation.
pub fn relabel_lines(source: &str, from: &str, to: &str) -> String {
    source
        .lines()
        .map(|line| {
            let body = line.trim_start();
            let indent = &line[..line.len() - body.len()];
            match body.strip_prefix(from) {
                Some(rest) => format!("{indent}{to}{rest}"),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Uppercase the first letter of every word and lowercase the rest.
/// Any non-letter starts a new word, so "soft-spoken" becomes "Soft-Spoken".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(fields: &[(&str, &str)]) -> RenderContext {
        let mut ctx = RenderContext::default();
        for &(k, v) in fields {
            ctx.insert(k, v);
        }
        ctx
    }

    #[test]
    fn substitutes_fields() {
        let ctx = context(&[("full_name", "Matsu Gohei"), ("rank", "3.5")]);
        let out = render_source("t", "{full_name}\nRank: { rank }", &ctx).unwrap();
        assert_eq!(out, "Matsu Gohei\nRank: 3.5");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let ctx = context(&[("x", "1")]);
        let out = render_source("t", "{{x}} is {x}", &ctx).unwrap();
        assert_eq!(out, "{x} is 1");
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = render_source("public_info.txt", "{nope}", &RenderContext::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingField { ref template, ref field }
                if template == "public_info.txt" && field == "nope"
        ));
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let err = render_source("t", "Rank: {rank", &RenderContext::default()).unwrap_err();
        assert!(matches!(err, RenderError::Unterminated { .. }));
    }

    #[test]
    fn collapses_three_or_more_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\n \nb"), "a\n\nb");
    }

    #[test]
    fn output_is_trimmed() {
        let out = render_source("t", "\n\n  hello  \n\n", &RenderContext::default()).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn strips_and_relabels_lines() {
        let source = "Name\nRank: {rank}\nRecognition: 2";
        assert_eq!(without_lines(source, "Rank:"), "Name\nRecognition: 2");
        assert_eq!(
            relabel_lines(source, "Rank:", "Seat:"),
            "Name\nSeat: {rank}\nRecognition: 2"
        );
    }

    #[test]
    fn indented_labels_are_relabelled_and_dropped() {
        let source = "Name\n  Rank: {rank}\n\tRank: again";
        assert_eq!(
            relabel_lines(source, "Rank:", "Seat:"),
            "Name\n  Seat: {rank}\n\tSeat: again"
        );
        assert_eq!(without_lines(source, "Rank:"), "Name");
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("hida bushi"), "Hida Bushi");
        assert_eq!(title_case("soft-spoken"), "Soft-Spoken");
        assert_eq!(title_case("MALE"), "Male");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn list_fields_have_joined_variants() {
        let mut ctx = RenderContext::default();
        ctx.insert_list("traits", &["Contrary".to_string(), "tall".to_string()]);
        assert_eq!(ctx.get("traits"), Some("Contrary, tall"));
        assert_eq!(ctx.get("traits_string"), Some("Contrary\ntall"));
    }

    #[test]
    fn builtin_templates_present() {
        let set = TemplateSet::builtin();
        assert!(set.source(PUBLIC_TEMPLATE).unwrap().contains("Rank:"));
        assert!(set.source(PRIVATE_TEMPLATE).is_ok());
        assert!(matches!(
            set.source("missing.txt"),
            Err(RenderError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn directory_templates_override_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PUBLIC_TEMPLATE), "Just {full_name}").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        let set = TemplateSet::from_dir(dir.path()).unwrap();
        assert_eq!(set.source(PUBLIC_TEMPLATE).unwrap(), "Just {full_name}");
        assert!(set.source(PRIVATE_TEMPLATE).unwrap().contains("XP:"));
        assert!(set.source("notes.md").is_err());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateSet::from_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
