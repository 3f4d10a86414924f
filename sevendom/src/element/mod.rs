mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Mutable variant of [`find_element`].
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect the ids of all elements carrying a class, in document order.
pub fn collect_by_class(root: &Element, class: &str) -> Vec<String> {
    let mut result = Vec::new();
    collect_by_class_recursive(root, class, &mut result);
    result
}

fn collect_by_class_recursive(element: &Element, class: &str, result: &mut Vec<String>) {
    if element.has_class(class) {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_by_class_recursive(child, class, result);
        }
    }
}

/// First immediate child carrying a class.
pub fn child_with_class<'a>(element: &'a Element, class: &str) -> Option<&'a Element> {
    element.child_elements().iter().find(|c| c.has_class(class))
}

/// First descendant (excluding the element itself) carrying a class.
pub fn descendant_with_class<'a>(element: &'a Element, class: &str) -> Option<&'a Element> {
    for child in element.child_elements() {
        if child.has_class(class) {
            return Some(child);
        }
        if let Some(found) = descendant_with_class(child, class) {
            return Some(found);
        }
    }
    None
}

/// Detach an element from the tree by id, returning it.
pub fn remove_child_by_id(root: &mut Element, id: &str) -> Option<Element> {
    let Content::Children(children) = &mut root.content else {
        return None;
    };

    if let Some(pos) = children.iter().position(|c| c.id == id) {
        return Some(children.remove(pos));
    }

    for child in children {
        if let Some(removed) = remove_child_by_id(child, id) {
            return Some(removed);
        }
    }

    None
}
