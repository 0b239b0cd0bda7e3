//! Fixed-string cleanup of raw rendered source
//!
//! Applied once per generated file, in order:
//!
//! 1. drop everything up to and including the last [`SEPARATOR`] (the banner),
//! 2. prepend the standard imports plus any extra ones,
//! 3. collapse empty constructors and empty accessor pairs.
//!
//! Every replacement is an exact string match over the whole file, done in a
//! single non-recursive pass; running the stage on its own output changes
//! nothing.

use super::syntax::Language;

/// Marker closing the generated-code banner
pub const SEPARATOR: &str = "----------";

/// Collection types from this library need its namespace imported
const IESI_COLLECTIONS: &str = "Iesi.Collections";

const CSHARP_EMPTY_CONSTRUCTOR: &str = "{\n        }";
const CSHARP_EMPTY_ACCESSORS: &str =
    "{\n            get {\n            }\n            set {\n            }\n        }";

const VB_EMPTY_ACCESSORS: &str =
    "\n            Get\n            End Get\n            Set\n            End Set\n        End Property";

/// Remove the banner: everything through the last separator.
///
/// Text without a separator is returned unchanged.
pub fn strip_banner(text: &str) -> &str {
    match text.rfind(SEPARATOR) {
        Some(pos) => &text[pos + SEPARATOR.len()..],
        None => text,
    }
}

/// Namespaces every generated source file imports
pub fn standard_imports(collection_type: &str) -> Vec<String> {
    let mut imports = vec![
        "System".to_string(),
        "System.Text".to_string(),
        "System.Collections.Generic".to_string(),
    ];
    if collection_type.contains(IESI_COLLECTIONS) {
        imports.push("Iesi.Collections.Generic".to_string());
    }
    imports
}

/// Prepend import statements, leaving one blank line before the body
pub fn prepend_imports(body: &str, imports: &[String], language: Language) -> String {
    let mut out = String::new();
    for import in imports {
        match language {
            Language::CSharp => out.push_str(&format!("using {};\n", import)),
            Language::VisualBasic => out.push_str(&format!("Imports {}\n", import)),
        }
    }
    out.push('\n');
    out.push_str(body.trim_start_matches(['\r', '\n']));
    out
}

/// Collapse the long forms of empty constructors and auto properties
pub fn collapse_empty_members(text: &str, language: Language) -> String {
    match language {
        Language::CSharp => text
            .replace(CSHARP_EMPTY_CONSTRUCTOR, "{ }")
            .replace(CSHARP_EMPTY_ACCESSORS, "{ get; set; }"),
        Language::VisualBasic => text.replace(VB_EMPTY_ACCESSORS, ""),
    }
}

/// Run the whole cleanup stage on a raw rendered file
pub fn post_process(
    raw: &str,
    language: Language,
    collection_type: &str,
    extra_imports: &[String],
) -> String {
    let body = strip_banner(raw);
    let mut imports = standard_imports(collection_type);
    for import in extra_imports {
        if !imports.contains(import) {
            imports.push(import.clone());
        }
    }
    let with_imports = prepend_imports(body, &imports, language);
    collapse_empty_members(&with_imports, language)
}
