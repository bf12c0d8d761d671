//! Extension-to-language classification
//!
//! Static lookup tables split into primary languages (counted toward
//! percentages) and secondary "other" categories for markup, data, and docs,
//! which count in totals only. Extensions are matched lowercased with their
//! leading dot. Files whose extension appears in neither table are invisible
//! to the report.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Primary language table: extension (with leading dot) to display name.
static LANGUAGE_EXTENSIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (".1c", "1C Enterprise"),
        (".4th", "Forth"),
        (".abap", "ABAP"),
        (".ada", "Ada"),
        (".adb", "Ada"),
        (".ads", "Ada"),
        (".ahk", "AutoHotkey"),
        (".asm", "Assembly"),
        (".asp", "ASP"),
        (".aspx", "ASP.NET"),
        (".awk", "Awk"),
        (".bas", "BASIC"),
        (".bat", "Batch"),
        (".bf", "Brainfuck"),
        (".bsh", "BeanShell"),
        (".c", "C"),
        (".cbl", "COBOL"),
        (".cc", "C++"),
        (".clj", "Clojure"),
        (".cljs", "ClojureScript"),
        (".cls", "Apex"),
        (".cmake", "CMake"),
        (".coffee", "CoffeeScript"),
        (".cpp", "C++"),
        (".cs", "C#"),
        (".csh", "C Shell"),
        (".css", "CSS"),
        (".cu", "CUDA"),
        (".d", "D"),
        (".dart", "Dart"),
        (".dfy", "Dafny"),
        (".el", "Emacs Lisp"),
        (".elm", "Elm"),
        (".erb", "ERB"),
        (".erl", "Erlang"),
        (".ex", "Elixir"),
        (".exs", "Elixir"),
        (".f", "Fortran"),
        (".f90", "Fortran"),
        (".fish", "Fish"),
        (".fs", "F#"),
        (".fsi", "F#"),
        (".fsscript", "F#"),
        (".gml", "GameMaker"),
        (".go", "Go"),
        (".gradle", "Gradle"),
        (".groovy", "Groovy"),
        (".h", "C Header"),
        (".haml", "Haml"),
        (".handlebars", "Handlebars"),
        (".haskell", "Haskell"),
        (".hbs", "Handlebars"),
        (".hh", "C++"),
        (".hlsl", "HLSL"),
        (".hs", "Haskell"),
        (".html", "HTML"),
        (".hx", "Haxe"),
        (".idl", "IDL"),
        (".ipynb", "Jupyter Notebook"),
        (".java", "Java"),
        (".jl", "Julia"),
        (".js", "JavaScript"),
        (".jsx", "JavaScript"),
        (".jsp", "Java Server Pages"),
        (".kt", "Kotlin"),
        (".kts", "Kotlin Script"),
        (".l", "Lex"),
        (".less", "Less"),
        (".lhs", "Literate Haskell"),
        (".lisp", "Lisp"),
        (".logtalk", "Logtalk"),
        (".lua", "Lua"),
        (".m", "Objective-C"),
        (".mak", "Makefile"),
        (".mat", "MATLAB"),
        (".mjs", "JavaScript"),
        (".ml", "OCaml"),
        (".mli", "OCaml Interface"),
        (".mm", "Objective-C++"),
        (".mustache", "Mustache"),
        (".nim", "Nim"),
        (".nix", "Nix"),
        (".nu", "Nu"),
        (".p6", "Raku"),
        (".pas", "Pascal"),
        (".php", "PHP"),
        (".pl", "Perl"),
        (".pm", "Perl Module"),
        (".pony", "Pony"),
        (".ps1", "PowerShell"),
        (".py", "Python"),
        (".pyw", "Python"),
        (".qml", "QML"),
        (".r", "R"),
        (".rake", "Ruby"),
        (".rb", "Ruby"),
        (".re", "ReasonML"),
        (".res", "ReScript"),
        (".rkt", "Racket"),
        (".rs", "Rust"),
        (".sass", "Sass"),
        (".scala", "Scala"),
        (".scm", "Scheme"),
        (".scss", "SCSS"),
        (".sh", "Shell"),
        (".sml", "Standard ML"),
        (".sol", "Solidity"),
        (".sql", "SQL"),
        (".ss", "Scheme"),
        (".styl", "Stylus"),
        (".swift", "Swift"),
        (".tcl", "Tcl"),
        (".ts", "TypeScript"),
        (".tsx", "TypeScript"),
        (".vala", "Vala"),
        (".vb", "VB.NET"),
        (".vbs", "VBScript"),
        (".vue", "Vue"),
        (".wasm", "WebAssembly"),
        (".wat", "WebAssembly Text"),
        (".zig", "Zig"),
    ])
});

/// Secondary table: markup, data, and documentation formats.
static OTHER_EXTENSIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (".bib", "BibTeX"),
        (".csv", "CSV"),
        (".ini", "INI"),
        (".json", "JSON"),
        (".markdown", "Markdown"),
        (".md", "Markdown"),
        (".rst", "reStructuredText"),
        (".svg", "SVG"),
        (".tex", "LaTeX"),
        (".toml", "TOML"),
        (".tsv", "TSV"),
        (".txt", "Text"),
        (".xml", "XML"),
        (".xsl", "XSLT"),
        (".yaml", "YAML"),
        (".yml", "YAML"),
    ])
});

/// Outcome of classifying a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Counted toward the percentage-bearing languages mapping
    Language(&'static str),
    /// Counted in totals only
    Other(&'static str),
}

/// Primary language for an extension, if any.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    LANGUAGE_EXTENSIONS
        .get(extension.to_lowercase().as_str())
        .copied()
}

/// Secondary category for an extension, if any.
pub fn other_for_extension(extension: &str) -> Option<&'static str> {
    OTHER_EXTENSIONS
        .get(extension.to_lowercase().as_str())
        .copied()
}

/// Classify a file by basename and extension.
///
/// `Dockerfile` is special-cased by exact lowercased basename match and is
/// always a primary language.
pub fn classify(basename: &str, extension: &str) -> Option<Classification> {
    if basename.eq_ignore_ascii_case("dockerfile") {
        return Some(Classification::Language("Dockerfile"));
    }
    if let Some(lang) = language_for_extension(extension) {
        return Some(Classification::Language(lang));
    }
    if let Some(other) = other_for_extension(extension) {
        return Some(Classification::Other(other));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dockerfile_matches_any_case() {
        assert_eq!(
            classify("Dockerfile", ""),
            Some(Classification::Language("Dockerfile"))
        );
        assert_eq!(
            classify("dockerfile", ""),
            Some(Classification::Language("Dockerfile"))
        );
        assert_eq!(
            classify("DOCKERFILE", ""),
            Some(Classification::Language("Dockerfile"))
        );
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(language_for_extension(".RS"), Some("Rust"));
        assert_eq!(language_for_extension(".Py"), Some("Python"));
        assert_eq!(other_for_extension(".MD"), Some("Markdown"));
    }

    #[test]
    fn primary_and_other_tables_are_disjoint() {
        for ext in [
            ".md", ".json", ".yaml", ".yml", ".toml", ".xml", ".ini", ".tex", ".bib",
        ] {
            assert!(language_for_extension(ext).is_none(), "{ext} leaked into primary");
            assert!(other_for_extension(ext).is_some());
        }
        for ext in [".rs", ".py", ".js", ".html", ".css"] {
            assert!(language_for_extension(ext).is_some());
            assert!(other_for_extension(ext).is_none(), "{ext} leaked into other");
        }
    }

    #[test]
    fn unknown_extensions_are_invisible() {
        assert_eq!(classify("photo.png", ".png"), None);
        assert_eq!(classify("archive.zip", ".zip"), None);
        assert_eq!(classify("noext", ""), None);
    }

    #[test]
    fn shared_language_names() {
        // Several extensions map to the same display name
        assert_eq!(language_for_extension(".cc"), Some("C++"));
        assert_eq!(language_for_extension(".cpp"), Some("C++"));
        assert_eq!(language_for_extension(".jsx"), Some("JavaScript"));
        assert_eq!(language_for_extension(".js"), Some("JavaScript"));
    }
}
