//! Module assembly
//!
//! Collects a module's top-level imports, classes, and functions in source
//! order, renders each, and joins them into the four tagged sections of the
//! raw LOIR document. The tags are always present, values empty or not, so
//! the document always splits into exactly four top-level fields.

use loir_parser::{collapse_ws, Module};

use super::decl::{encode_class, encode_function, encode_imports};

/// Assemble the raw (pre-compression) LOIR document.
pub fn assemble(module: &Module) -> String {
    let imports = encode_imports(module).join(",");
    let classes = module
        .classes()
        .map(encode_class)
        .collect::<Vec<_>>()
        .join(",");
    let functions = module
        .functions()
        .map(encode_function)
        .collect::<Vec<_>>()
        .join(";");
    let doc = format!(
        "M={};I={};C={};F={}",
        module.name, imports, classes, functions
    );
    collapse_ws(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loir_parser::parse_module;

    #[test]
    fn test_empty_module_keeps_all_tags() {
        let module = parse_module("pass\n", "empty").expect("parse failed");
        assert_eq!(assemble(&module), "M=empty;I=;C=;F=");
    }

    #[test]
    fn test_simple_function_lands_in_f_section() {
        let module = parse_module("def f(x):\n    return x\n", "m").expect("parse failed");
        assert_eq!(assemble(&module), "M=m;I=;C=;F=f(x){Rx}");
    }

    #[test]
    fn test_functions_join_with_semicolon() {
        let module = parse_module("def f():\n    pass\ndef g():\n    pass\n", "m")
            .expect("parse failed");
        assert_eq!(assemble(&module), "M=m;I=;C=;F=f(){pass};g(){pass}");
    }

    #[test]
    fn test_assembled_document_has_no_whitespace() {
        let module = parse_module(
            "import os\n\ndef f(a, b):\n    return a + b\n",
            "spacing",
        )
        .expect("parse failed");
        let doc = assemble(&module);
        assert!(!doc.contains(char::is_whitespace));
    }
}
