use std::cmp::Ordering;

use super::{kinds::ListItem, types::ContentBlock};

/// Groups the flat items of one list run into a nested tree by indentation.
///
/// The first item's indent is the base level. Items at the base indent are
/// siblings; the items that follow each sibling with a strictly greater
/// indent become its children, built by the same procedure with their own
/// first item as the new base. An item indented less than the base ends
/// the slice and is not consumed.
pub fn build_list_tree(items: &[ListItem]) -> Vec<ContentBlock> {
    let Some(base) = items.first().map(|item| item.indent) else {
        return Vec::new();
    };

    let mut roots = Vec::new();
    let mut i = 0;
    while let Some(item) = items.get(i) {
        match item.indent.cmp(&base) {
            Ordering::Less => break,
            Ordering::Equal => {
                i += 1;
                let child_start = i;
                while items.get(i).is_some_and(|child| child.indent > base) {
                    i += 1;
                }
                roots.push(ContentBlock::with_children(
                    item.content.clone(),
                    build_list_tree(&items[child_start..i]),
                ));
            }
            // Unreachable after a sibling has swallowed its deeper items; skip to stay total.
            Ordering::Greater => i += 1,
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(rows: &[(usize, &str)]) -> Vec<ListItem> {
        rows.iter()
            .map(|(indent, content)| ListItem::new(*indent, *content))
            .collect()
    }

    #[test]
    fn empty_run_builds_nothing() {
        assert_eq!(build_list_tree(&[]), vec![]);
    }

    #[test]
    fn flat_siblings_have_no_children() {
        assert_eq!(
            build_list_tree(&items(&[(0, "a"), (0, "b")])),
            vec![ContentBlock::leaf("a"), ContentBlock::leaf("b")]
        );
    }

    #[test]
    fn children_group_under_nearest_shallower_item() {
        assert_eq!(
            build_list_tree(&items(&[(0, "a"), (2, "b"), (2, "c"), (0, "d")])),
            vec![
                ContentBlock::with_children(
                    "a",
                    vec![ContentBlock::leaf("b"), ContentBlock::leaf("c")]
                ),
                ContentBlock::leaf("d"),
            ]
        );
    }

    #[test]
    fn strictly_increasing_indent_nests_each_level() {
        assert_eq!(
            build_list_tree(&items(&[(0, "a"), (4, "b"), (8, "c")])),
            vec![ContentBlock::with_children(
                "a",
                vec![ContentBlock::with_children(
                    "b",
                    vec![ContentBlock::leaf("c")]
                )]
            )]
        );
    }

    #[test]
    fn indented_first_item_sets_the_base() {
        assert_eq!(
            build_list_tree(&items(&[(3, "a"), (5, "b"), (3, "c")])),
            vec![
                ContentBlock::with_children("a", vec![ContentBlock::leaf("b")]),
                ContentBlock::leaf("c"),
            ]
        );
    }

    #[test]
    fn shallower_item_ends_the_slice() {
        // "c" sits between the base of the child slice (4) and the parent (0),
        // so the child slice stops before it and it is dropped.
        assert_eq!(
            build_list_tree(&items(&[(0, "a"), (4, "b"), (2, "c"), (0, "d")])),
            vec![
                ContentBlock::with_children("a", vec![ContentBlock::leaf("b")]),
                ContentBlock::leaf("d"),
            ]
        );
    }

    #[test]
    fn item_below_top_level_base_stops_the_run() {
        assert_eq!(
            build_list_tree(&items(&[(2, "a"), (0, "b")])),
            vec![ContentBlock::leaf("a")]
        );
    }
}
