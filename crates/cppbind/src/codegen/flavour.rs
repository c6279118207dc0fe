//! Runtime adapters ("flavours")
//!
//! A flavour owns every piece of syntax that belongs to one scripting-binding
//! library. Emitters, the unit assembler and the index builder only call
//! into this trait, so retargeting the generator means writing a new
//! implementation and nothing else.

/// Syntax of one scripting-binding library
pub trait Flavour {
    /// Type of the state handle passed to every loader (`sol::state_view`)
    fn state_view(&self) -> &str;

    /// Header of the binding library itself
    fn include_file(&self) -> &str;

    /// Name of the local variable holding the table of a namespace
    fn table_variable(&self, segments: &[String]) -> String {
        let last = segments.last().map(String::as_str).unwrap_or("Global");
        format!("{}Namespace", last)
    }

    /// Statement fetching the table of a namespace into [`Self::table_variable`]
    fn fetch_table(&self, segments: &[String]) -> String;

    /// Expression merging several callables into one overloaded value
    fn overload(&self, candidates: &[String]) -> String;

    /// Statement binding a callable under `name` in a table
    fn bind_function(&self, table: &str, name: &str, callable: &str) -> String;

    /// Statement binding a global variable under `name` in a table
    fn bind_global(&self, table: &str, name: &str, qualified_name: &str, read_only: bool)
        -> String;

    /// Statement registering an enum and its values
    fn bind_enum(
        &self,
        table: &str,
        name: &str,
        qualified_name: &str,
        values: &[String],
    ) -> String;

    /// Name of the local variable holding a user type
    fn usertype_variable(&self, class_name: &str) -> String {
        format!("bind{}", class_name)
    }

    /// Statement declaring a user type in a table.
    ///
    /// `constructors` holds constructor signatures such as `ns::C(int)`.
    fn new_usertype(
        &self,
        table: &str,
        usertype: &str,
        name: &str,
        qualified_name: &str,
        constructors: &[String],
        bases: &[String],
    ) -> String;

    /// Statement binding a member (method or attribute) of a user type
    fn bind_member(&self, usertype: &str, name: &str, value: &str) -> String;

    /// Runtime meta-function key of an operator, by its canonical identifier
    fn meta_function(&self, operator_identifier: &str) -> Option<String>;

    /// Whether the runtime provides an operator on its own (`!=` from `==`),
    /// so a member operator without a meta-function can be left unbound
    fn derives_operator(&self, _operator_identifier: &str) -> bool {
        false
    }

    /// Statement binding a meta-function of a user type
    fn bind_meta_function(&self, usertype: &str, meta_function: &str, value: &str) -> String;

    /// Forward declaration of the state type used in generated headers
    fn state_forward_declaration(&self) -> String {
        let state = self.state_view();
        match state.rsplit_once("::") {
            Some((namespace, class)) => {
                format!("namespace {} {{ class {}; }};", namespace, class)
            }
            None => format!("class {};", state),
        }
    }

    /// Statement declaring the bindings tree of the index
    fn index_tree(&self, tree_name: &str) -> String;

    /// Statement creating the table `segments` inside the bindings tree
    fn index_new_table(&self, segments: &[String]) -> String;

    /// Start of the chained registration of a namespace's loaders
    fn index_register_head(&self, segments: &[String]) -> String;

    /// One link of a registration chain
    fn index_register_link(&self, object: &str, loader: &str) -> String;

    /// Statement installing the bindings tree into the state
    fn index_install(&self) -> String;
}

/// Adapter for the sol3 Lua binding library
#[derive(Debug, Clone, Copy, Default)]
pub struct Sol3Flavour;

impl Sol3Flavour {
    pub fn new() -> Self {
        Self
    }
}

fn tree_access(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| format!("[\"{}\"]", segment))
        .collect()
}

impl Flavour for Sol3Flavour {
    fn state_view(&self) -> &str {
        "sol::state_view"
    }

    fn include_file(&self) -> &str {
        "sol/sol.hpp"
    }

    fn fetch_table(&self, segments: &[String]) -> String {
        format!(
            "sol::table {} = state{}.get<sol::table>();",
            self.table_variable(segments),
            tree_access(segments)
        )
    }

    fn overload(&self, candidates: &[String]) -> String {
        format!("sol::overload({})", candidates.join(", "))
    }

    fn bind_function(&self, table: &str, name: &str, callable: &str) -> String {
        format!("{}.set_function(\"{}\", {});", table, name, callable)
    }

    fn bind_global(
        &self,
        table: &str,
        name: &str,
        qualified_name: &str,
        read_only: bool,
    ) -> String {
        if read_only {
            format!("{}[\"{}\"] = {};", table, name, qualified_name)
        } else {
            format!("{}[\"{}\"] = std::ref({});", table, name, qualified_name)
        }
    }

    fn bind_enum(
        &self,
        table: &str,
        name: &str,
        qualified_name: &str,
        values: &[String],
    ) -> String {
        let pairs: Vec<String> = values
            .iter()
            .map(|value| format!("{{ \"{}\", {}::{} }}", value, qualified_name, value))
            .collect();
        format!(
            "{}.new_enum<{}>(\"{}\", {{ {} }});",
            table,
            qualified_name,
            name,
            pairs.join(", ")
        )
    }

    fn new_usertype(
        &self,
        table: &str,
        usertype: &str,
        name: &str,
        qualified_name: &str,
        constructors: &[String],
        bases: &[String],
    ) -> String {
        let mut args = vec![format!("\"{}\"", name)];
        if !constructors.is_empty() {
            args.push("sol::call_constructor".to_string());
            args.push(format!("sol::constructors<{}>()", constructors.join(", ")));
        }
        if !bases.is_empty() {
            args.push("sol::base_classes".to_string());
            args.push(format!("sol::bases<{}>()", bases.join(", ")));
        }
        format!(
            "sol::usertype<{q}> {var} = {table}.new_usertype<{q}>({args});",
            q = qualified_name,
            var = usertype,
            table = table,
            args = args.join(", ")
        )
    }

    fn bind_member(&self, usertype: &str, name: &str, value: &str) -> String {
        format!("{}[\"{}\"] = {};", usertype, name, value)
    }

    fn meta_function(&self, operator_identifier: &str) -> Option<String> {
        let meta = match operator_identifier {
            "add" => "addition",
            "subtract" => "subtraction",
            "unary_minus" => "unary_minus",
            "multiply" => "multiplication",
            "divide" => "division",
            "modulus" => "modulus",
            "equal" => "equal_to",
            "less" => "less_than",
            "less_equal" => "less_than_or_equal_to",
            "bitwise_and" => "bitwise_and",
            "bitwise_or" => "bitwise_or",
            "bitwise_xor" => "bitwise_xor",
            "left_shift" => "bitwise_left_shift",
            "right_shift" => "bitwise_right_shift",
            "complement" => "bitwise_not",
            "subscript" => "index",
            "call" => "call_function",
            _ => return None,
        };
        Some(format!("sol::meta_function::{}", meta))
    }

    fn derives_operator(&self, operator_identifier: &str) -> bool {
        // Lua derives ~= and the mirrored comparisons; assignment has no meaning
        matches!(
            operator_identifier,
            "assign" | "not_equal" | "greater" | "greater_equal"
        )
    }

    fn bind_meta_function(&self, usertype: &str, meta_function: &str, value: &str) -> String {
        format!("{}[{}] = {};", usertype, meta_function, value)
    }

    fn index_tree(&self, tree_name: &str) -> String {
        format!("BindingTree BindTree(\"{}\");", tree_name)
    }

    fn index_new_table(&self, segments: &[String]) -> String {
        let (last, parent) = match segments.split_last() {
            Some((last, parent)) => (last.as_str(), parent),
            None => ("", segments),
        };
        format!(
            "BindTree{}.add(\"{}\", InitTreeNodeAsTable(\"{}\"));",
            tree_access(parent),
            last,
            segments.join(".")
        )
    }

    fn index_register_head(&self, segments: &[String]) -> String {
        format!("BindTree{}", tree_access(segments))
    }

    fn index_register_link(&self, object: &str, loader: &str) -> String {
        format!(".add(\"{}\", &{})", object, loader)
    }

    fn index_install(&self) -> String {
        "BindTree(state);".to_string()
    }
}
