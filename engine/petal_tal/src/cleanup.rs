//! Post-processing removal of the directive vocabulary.
//!
//! After a successful render the tree still carries directive attributes
//! (a `define` or a true `condition` leaves its element in place) and may
//! carry directive-namespace elements introduced by substituted content.
//! This pass strips both so the output is plain markup.

use petal_dom::Document;

use crate::specs::AttributeSpecs;

/// Strip directive attributes, directive-namespace prefix declarations,
/// and leftover directive-namespace elements (flattened into their
/// children). Iterative; depth-independent.
pub(crate) fn strip_directives(doc: &mut Document, specs: &AttributeSpecs) {
    let prefix = specs.prefix();
    let mut work = vec![doc.root()];

    while let Some(node) = work.pop() {
        if doc.is_element_in_namespace(node, prefix) && doc.parent(node).is_some() {
            let children = doc.flatten(node);
            work.extend(children);
            continue;
        }
        if let Some(element) = doc.element_mut(node) {
            element.attributes.retain(|attr| {
                !(attr.name.is_in_namespace(prefix)
                    || (attr.name.prefix() == Some("xmlns") && attr.name.local_name() == prefix))
            });
        }
        work.extend(doc.children(node).iter().copied());
    }
}
