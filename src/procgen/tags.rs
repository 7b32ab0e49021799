use crate::model::Hierarchy;
use crate::setting::{Setting, WeightTable};

/// Append `tag` unless it is empty or already present.
pub fn push_unique(tags: &mut Vec<String>, tag: impl Into<String>) {
    let tag = tag.into();
    if !tag.is_empty() && !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Display tags for a hierarchy, outermost level first.
///
/// Family and house tags are only emitted when the parent level has more
/// than one configured child; otherwise the tag says nothing the clan or
/// family tag doesn't already.
pub fn hierarchy_tags(setting: &Setting, hierarchy: &Hierarchy) -> Vec<String> {
    let mut tags = Vec::new();

    if !hierarchy.clan.is_empty() {
        if setting.is_imperial(&hierarchy.clan) {
            push_unique(&mut tags, hierarchy.clan.clone());
        } else {
            push_unique(&mut tags, format!("{} Clan", hierarchy.clan));
        }
    }
    if !hierarchy.family.is_empty() && has_siblings(setting.families_of(&hierarchy.clan)) {
        push_unique(&mut tags, format!("{} Family", hierarchy.family));
    }
    if !hierarchy.house.is_empty() && has_siblings(setting.houses_of(&hierarchy.family)) {
        push_unique(&mut tags, format!("{} House", hierarchy.house));
    }
    if !hierarchy.lineage.is_empty() {
        push_unique(&mut tags, format!("{} Lineage", hierarchy.lineage));
    }

    tags
}

fn has_siblings(children: Option<&WeightTable>) -> bool {
    children.is_some_and(|table| table.len() > 1)
}
