//! Heading anchors and navigation extracted from a rendered fragment.

use markup5ever_rcdom::Handle;

use crate::domain::{
    headings::{AnchorPolicy, HeadingTags},
    navigation::{NavigationEntry, insert_at_depth},
    slug::AnchorSlugger,
};

use super::fragment::{HtmlFragment, attribute, set_id, tag_name, text_content};

fn heading_level(node: &Handle, tags: HeadingTags) -> Option<u8> {
    tags.level_of(tag_name(node)?)
}

/// Set `id = slug(text)` on every recognised heading, at any depth.
///
/// Existing ids are overwritten. The fragment is handed back so pipeline
/// stages can be chained.
pub fn assign_heading_ids(fragment: HtmlFragment, policy: &AnchorPolicy) -> HtmlFragment {
    let mut slugger = AnchorSlugger::new(policy.unique);

    for node in fragment.descendants() {
        if heading_level(&node, policy.tags).is_none() {
            continue;
        }

        let anchor = slugger.anchor_for(&text_content(&node));
        set_id(&node, &anchor);
    }

    fragment
}

/// Build the navigation forest from the fragment's top-level `h2`..`h6`.
///
/// `h1` is the page title and never produces an entry. Only direct children
/// of the fragment are considered; headings nested in other blocks are not.
pub fn build_heading_tree(fragment: &HtmlFragment, tags: HeadingTags) -> Vec<NavigationEntry> {
    let mut forest = Vec::new();

    for node in fragment.children() {
        let Some(level) = heading_level(&node, tags) else {
            continue;
        };
        if level == 1 {
            continue;
        }

        let anchor = attribute(&node, "id").unwrap_or_default();
        let entry = NavigationEntry::new(text_content(&node), &anchor);

        insert_at_depth(&mut forest, usize::from(level - 1), entry);
    }

    forest
}
