//! Bindings index builder
//!
//! The index is one routine that builds a tree of tables mirroring the C++
//! namespace hierarchy, attaches every generated loader at its namespace
//! path and finally installs the tree into the runtime state.
//!
//! Table creation is derived from the namespaces that produced objects, so a
//! namespace that only has bound descendants would never get a table of its
//! own. [`repair_tables`] synthesises those missing ancestors.

use crate::codegen::binding::loader_name;
use crate::codegen::Flavour;
use std::collections::BTreeMap;

/// Prefix tree of namespace paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTrie {
    children: BTreeMap<String, PathTrie>,
}

impl PathTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, creating intermediate nodes as needed.
    ///
    /// Returns `true` if the node at the full path did not exist before.
    pub fn insert(&mut self, path: &[String]) -> bool {
        let mut node = self;
        let mut created = false;
        for segment in path {
            created = !node.children.contains_key(segment);
            node = node.children.entry(segment.clone()).or_default();
        }
        created
    }

    /// Whether a node exists at `path`
    pub fn contains(&self, path: &[String]) -> bool {
        let mut node = self;
        for segment in path {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return false,
            }
        }
        true
    }
}

/// Complete a list of table paths so that every table's parent is created
/// before it.
///
/// The result is sorted by depth (stable, so equal-depth tables keep their
/// relative order), contains each path once and includes every missing
/// ancestor. Applying it to its own output returns the same list.
pub fn repair_tables(tables: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut pending: Vec<&Vec<String>> = tables.iter().collect();
    pending.sort_by_key(|table| table.len());

    let mut declared = PathTrie::new();
    let mut repaired: Vec<Vec<String>> = Vec::with_capacity(pending.len());

    for table in pending {
        for depth in 1..table.len() {
            let ancestor = &table[..depth];
            if declared.insert(ancestor) {
                tracing::warn!(
                    "Adding missing intermediate table {} (needed by {})",
                    ancestor.join("."),
                    table.join(".")
                );
                repaired.push(ancestor.to_vec());
            }
        }
        if declared.insert(table) {
            repaired.push(table.clone());
        }
    }

    repaired.sort_by_key(|table| table.len());
    repaired
}

/// Registrations of every generated namespace, ready to be rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingsIndex {
    /// Headers declaring the loaders
    pub includes: Vec<String>,
    /// Namespaces with objects, as (segments, objects)
    pub namespaces: Vec<(Vec<String>, Vec<String>)>,
}

impl BindingsIndex {
    /// Create an index over the given headers
    pub fn new(includes: Vec<String>) -> Self {
        Self {
            includes,
            namespaces: Vec::new(),
        }
    }

    /// Register the objects of one namespace
    pub fn add_namespace(&mut self, segments: Vec<String>, objects: Vec<String>) {
        if !objects.is_empty() {
            self.namespaces.push((segments, objects));
        }
    }

    /// Table creation order, ancestors included
    pub fn tables(&self) -> Vec<Vec<String>> {
        let tables: Vec<Vec<String>> = self
            .namespaces
            .iter()
            .map(|(segments, _)| segments.clone())
            .collect();
        repair_tables(&tables)
    }

    /// Render the index source.
    ///
    /// `index_namespace` is the C++ namespace holding `IndexAllBindings`,
    /// `tree_name` the name of the root table.
    pub fn render(&self, flavour: &dyn Flavour, index_namespace: &str, tree_name: &str) -> String {
        let mut body: Vec<String> = self
            .includes
            .iter()
            .map(|include| format!("#include <{}>", include))
            .collect();
        body.push(format!("#include <{}>", flavour.include_file()));
        body.push(format!("namespace {} {{", index_namespace));
        body.push(format!(
            "void IndexAllBindings({} state)\n{{",
            flavour.state_view()
        ));
        body.push(flavour.index_tree(tree_name));

        for table in self.tables() {
            body.push(flavour.index_new_table(&table));
        }

        for (segments, objects) in &self.namespaces {
            let namespace = segments.join("::");
            let mut chain = vec![flavour.index_register_head(segments)];
            for object in objects {
                chain.push(flavour.index_register_link(
                    object,
                    &format!("{}::Bindings::{}", namespace, loader_name(object)),
                ));
            }
            body.push(format!("{};\n", chain.join("\n")));
        }

        body.push(flavour.index_install());
        body.push("}\n}\n".to_string());
        body.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Sol3Flavour;
    use pretty_assertions::assert_eq;

    fn path(dotted: &str) -> Vec<String> {
        dotted.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_trie_insert_reports_new_paths() {
        let mut trie = PathTrie::new();
        assert!(trie.insert(&path("a.b")));
        assert!(trie.contains(&path("a")));
        assert!(!trie.insert(&path("a")));
        assert!(!trie.insert(&path("a.b")));
        assert!(trie.insert(&path("a.c")));
        assert!(!trie.contains(&path("b")));
    }

    #[test]
    fn test_repair_adds_missing_ancestors() {
        let repaired = repair_tables(&[path("a.b.c")]);
        assert_eq!(repaired, vec![path("a"), path("a.b"), path("a.b.c")]);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let once = repair_tables(&[path("x.y.z"), path("a.b.c"), path("a")]);
        let twice = repair_tables(&once);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            vec![
                path("a"),
                path("x"),
                path("x.y"),
                path("a.b"),
                path("x.y.z"),
                path("a.b.c"),
            ]
        );
    }

    #[test]
    fn test_repair_drops_duplicates() {
        let repaired = repair_tables(&[path("a"), path("a"), path("a.b")]);
        assert_eq!(repaired, vec![path("a"), path("a.b")]);
    }

    #[test]
    fn test_parents_precede_children() {
        let repaired = repair_tables(&[path("a.b.c.d"), path("a.e"), path("f.g")]);
        for (index, table) in repaired.iter().enumerate() {
            for depth in 1..table.len() {
                let parent = &table[..depth];
                let position = repaired.iter().position(|t| t.as_slice() == parent).unwrap();
                assert!(position < index);
            }
        }
    }

    #[test]
    fn test_render_index() {
        let mut index = BindingsIndex::new(vec!["Bindings/obe/Graphics/Graphics.hpp".into()]);
        index.add_namespace(
            path("obe.Graphics"),
            vec!["ClassSprite".into(), "FunctionDraw".into()],
        );
        index.add_namespace(path("obe.Audio"), vec![]);

        let output = index.render(&Sol3Flavour, "obe::Bindings", "ObEngine");
        assert_eq!(
            output,
            "#include <Bindings/obe/Graphics/Graphics.hpp>\n\
             #include <sol/sol.hpp>\n\
             namespace obe::Bindings {\n\
             void IndexAllBindings(sol::state_view state)\n{\n\
             BindingTree BindTree(\"ObEngine\");\n\
             BindTree.add(\"obe\", InitTreeNodeAsTable(\"obe\"));\n\
             BindTree[\"obe\"].add(\"Graphics\", InitTreeNodeAsTable(\"obe.Graphics\"));\n\
             BindTree[\"obe\"][\"Graphics\"]\n\
             .add(\"ClassSprite\", &obe::Graphics::Bindings::LoadClassSprite)\n\
             .add(\"FunctionDraw\", &obe::Graphics::Bindings::LoadFunctionDraw);\n\n\
             BindTree(state);\n\
             }\n}\n"
        );
    }
}
