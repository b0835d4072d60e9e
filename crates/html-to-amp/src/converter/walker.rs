//! Post-order tree walk.

use crate::dom::Element;
use crate::environment::Environment;
use crate::error::Result;

enum Visit {
    Enter(Element),
    Leave(Element),
}

/// Dispatch every element reachable from `root`, children before parents.
///
/// Uses an explicit stack so nesting depth is bounded by memory, not by the
/// native call stack. An element's children are snapshotted when the element
/// is entered; siblings visited earlier may already have rewritten the tree,
/// and an element removed before its turn is still dispatched exactly once.
/// The tag is read at dispatch time.
///
/// Returns the number of dispatched elements. The first converter error
/// aborts the walk.
pub(crate) fn walk(root: &Element, environment: &Environment) -> Result<usize> {
    let mut stack = vec![Visit::Enter(root.clone())];
    let mut dispatched = 0;

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(element) => {
                let children = element.children();
                stack.push(Visit::Leave(element));
                stack.extend(children.into_iter().rev().map(Visit::Enter));
            }
            Visit::Leave(element) => {
                let tag = element.tag_name();
                environment.dispatch(&tag, &element)?;
                dispatched += 1;
            }
        }
    }

    Ok(dispatched)
}
