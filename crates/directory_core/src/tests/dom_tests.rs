use super::*;

#[test]
fn elt_builds_classed_element_with_text() {
    let mut document = Document::new();
    let node = document.elt("div", "hello", &["user-list", "component"]);
    assert_eq!(document.tag(node), Some("div"));
    assert!(document.has_class(node, "user-list"));
    assert!(document.has_class(node, "component"));
    assert_eq!(document.text_content(node), "hello");
    assert_eq!(
        document.to_html(node),
        "<div class=\"user-list component\">hello</div>"
    );
}

#[test]
fn closest_walks_from_target_through_ancestors() {
    let mut document = Document::new();
    let row = document.elt("div", "", &["user"]);
    document.set_attribute(row, "data-user-id", "2");
    let name = document.elt("div", "Ann", &["user__name"]);
    document.append(row, name);
    document.append(document.root(), row);

    assert_eq!(document.closest_with_attribute(name, "data-user-id"), Some(row));
    assert_eq!(document.closest_with_attribute(row, "data-user-id"), Some(row));
    assert_eq!(
        document.closest_with_attribute(document.root(), "data-user-id"),
        None
    );
    assert!(document.contains(document.root(), name));
    assert!(!document.contains(name, row));
}

#[test]
fn clear_children_frees_previous_subtree() {
    let mut document = Document::new();
    let list = document.elt("ul", "", &[]);
    let first = document.elt("li", "one", &[]);
    let second = document.elt("li", "two", &[]);
    document.append_all(list, [first, second]);
    assert_eq!(document.node_count(), 6);

    document.clear_children(list);

    assert!(document.children(list).is_empty());
    assert_eq!(document.text_content(list), "");
    assert!(!document.is_live(first));
    assert_eq!(document.parent(first), None);
    assert_eq!(document.node_count(), 2);
}

#[test]
fn freed_slots_are_reused_and_stale_handles_stay_inert() {
    let mut document = Document::new();
    let list = document.elt("ul", "", &[]);
    let old = document.elt("li", "old", &["row"]);
    document.append(list, old);
    let slots = document.slot_count();

    document.clear_children(list);
    let fresh = document.elt("li", "new", &["row"]);
    document.append(list, fresh);

    assert_eq!(document.slot_count(), slots);
    assert_ne!(old, fresh);
    document.set_attribute(old, "data-user-id", "1");
    assert_eq!(document.attribute(fresh, "data-user-id"), None);
    assert_eq!(document.text_content(old), "");
    assert_eq!(document.to_html(list), "<ul><li class=\"row\">new</li></ul>");
}

#[test]
fn remove_detaches_and_frees_a_subtree() {
    let mut document = Document::new();
    let wrapper = document.elt("div", "", &[]);
    let inner = document.elt("span", "x", &[]);
    document.append(wrapper, inner);
    document.append(document.root(), wrapper);

    document.remove(wrapper);

    assert!(document.children(document.root()).is_empty());
    assert!(!document.is_live(inner));
    assert_eq!(document.node_count(), 1);

    document.remove(document.root());
    assert!(document.is_live(document.root()));
}

#[test]
fn append_refuses_to_create_a_cycle() {
    let mut document = Document::new();
    let outer = document.elt("div", "", &[]);
    let inner = document.elt("div", "", &[]);
    document.append(outer, inner);
    document.append(inner, outer);
    assert_eq!(document.parent(outer), None);
    assert_eq!(document.children(inner), &[] as &[NodeId]);
}

#[test]
fn append_moves_node_between_parents() {
    let mut document = Document::new();
    let left = document.elt("div", "", &[]);
    let right = document.elt("div", "", &[]);
    let child = document.elt("span", "x", &[]);
    document.append(left, child);
    document.append(right, child);
    assert!(document.children(left).is_empty());
    assert_eq!(document.children(right), &[child]);
}

#[test]
fn html_escapes_text_and_attributes_and_skips_void_close() {
    let mut document = Document::new();
    let wrapper = document.elt("div", "<b>&</b>", &[]);
    let input = document.create_element("input");
    document.set_attribute(input, "placeholder", "say \"hi\"");
    document.append(wrapper, input);
    assert_eq!(
        document.to_html(wrapper),
        "<div>&lt;b&gt;&amp;&lt;/b&gt;<input placeholder=\"say &quot;hi&quot;\"></div>"
    );
}

#[test]
fn input_value_is_separate_from_attributes() {
    let mut document = Document::new();
    let input = document.create_element("input");
    document.set_value(input, "Ann");
    assert_eq!(document.value(input), "Ann");
    assert_eq!(document.attribute(input, "value"), None);
}
