//! Pattern-based analyzer for TypeScript and JavaScript.
//!
//! No grammar is loaded for these languages. Four independent passes run over
//! the raw text: function signatures, class bodies (with their method
//! signatures), import declarations and variable declarations. A block comment
//! directly above a declaration becomes its docstring.
//!
//! Signatures are found in two steps: a pattern locates `name(`, then the
//! parameter list is closed by paren depth, so callback types and default
//! calls inside it survive. Known limitation: declarations inside strings or
//! comments are still matched.

use regex::Regex;

use super::braces::{self, DepthCursor};
use crate::analysis::{
    ClassInfo, ClassMember, FunctionInfo, ImportInfo, Imports, Parameter, SourceAnalyzer,
    StructuralSummary,
};
use crate::config::HeuristicConfig;

/// Type reported for parameters declared without an annotation.
pub const DEFAULT_PARAM_TYPE: &str = "any";

/// Return type reported for signatures without an annotation.
pub const IMPLICIT_RETURN_TYPE: &str = "void";

/// Words that look like `name(...) {` but open a statement, not a function.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "with", "function", "return", "do", "else",
    "try", "new", "typeof", "await", "yield", "super", "import", "export",
];

/// Modifiers allowed between a doc comment and the declaration it documents.
const DECLARATION_MODIFIERS: &[&str] = &[
    "export", "default", "declare", "abstract", "public", "private", "protected", "static",
    "readonly", "override", "async", "get", "set",
];

/// Access modifiers allowed on constructor parameters.
const PARAMETER_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

lazy_static::lazy_static! {
    static ref FUNCTION_RE: Regex = Regex::new(
        r"(?P<async>\basync\s+)?(?:\bfunction\b\s*\*?\s*)?(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>(]*>)?\s*\("
    ).unwrap();

    static ref CLASS_RE: Regex = Regex::new(
        r"\bclass\s+(?P<name>[A-Za-z_$][\w$]*)(?:\s*<[^>{]*>)?(?:\s+extends\s+(?P<base>[A-Za-z_$][\w$.]*))?[^{;]*\{"
    ).unwrap();

    static ref METHOD_RE: Regex = Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|static|readonly|abstract|override|async|get|set)\s+)*(?P<name>[A-Za-z_$#][\w$]*)\s*\??\s*(?:<[^>(]*>)?\s*\("
    ).unwrap();

    // Anchored at the `)` closing a parameter list.
    static ref BODY_OPEN_RE: Regex = Regex::new(
        r"^\s*(?::\s*(?P<returns>[^{;=]+?))?\s*\{"
    ).unwrap();

    static ref IMPORT_RE: Regex = Regex::new(
        r#"\bimport\s+(?:type\s+)?(?:(?P<default>[A-Za-z_$][\w$]*)\s*,?\s*)?(?:\*\s*as\s+(?P<namespace>[A-Za-z_$][\w$]*)\s*)?(?:\{(?P<named>[^}]*)\}\s*)?from\s+['"](?P<module>[^'"]+)['"]"#
    ).unwrap();

    static ref VARIABLE_RE: Regex = Regex::new(
        r"\b(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)"
    ).unwrap();
}

pub struct TypeScriptAnalyzer {
    max_doc_gap_lines: usize,
}

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&HeuristicConfig::default())
    }

    pub fn with_config(config: &HeuristicConfig) -> Self {
        Self {
            max_doc_gap_lines: config.max_doc_gap_lines,
        }
    }

    /// Module-scope function declarations.
    fn extract_functions(&self, text: &str, index: &SourceIndex) -> Vec<FunctionInfo> {
        let mut depth = DepthCursor::new(text);
        let mut functions = Vec::new();
        let mut resume = 0;

        for caps in FUNCTION_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            if whole.start() < resume || CONTROL_KEYWORDS.contains(&name.as_str()) {
                continue;
            }
            // Methods and nested functions
            if depth.depth_at(whole.start()) != 0 {
                continue;
            }
            let Some((mut info, body_open)) =
                self.signature(text, name.as_str(), whole.end() - 1, whole.start(), index)
            else {
                continue;
            };
            info.is_async = Some(caps.name("async").is_some());
            resume = body_open;
            functions.push(info);
        }
        functions
    }

    fn extract_classes(&self, text: &str, index: &SourceIndex) -> Vec<ClassInfo> {
        CLASS_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.name("name")?.as_str().to_string();
                let open = whole.end() - 1;
                let close = braces::matching_brace(text, open).unwrap_or(text.len());
                let body_start = open + 1;

                Some(ClassInfo {
                    name,
                    line: index.lines.line_at(whole.start()),
                    docstring: self.preceding_doc(text, whole.start(), index),
                    bases: caps
                        .name("base")
                        .map(|b| vec![b.as_str().to_string()])
                        .unwrap_or_default(),
                    members: self.extract_methods(text, body_start, close, index),
                })
            })
            .collect()
    }

    /// Methods declared directly in the class body `text[start..end]`.
    fn extract_methods(
        &self,
        text: &str,
        start: usize,
        end: usize,
        index: &SourceIndex,
    ) -> Vec<ClassMember> {
        let body = &text[start..end];
        let mut depth = DepthCursor::new(body);
        let mut members = Vec::new();
        let mut resume = 0;

        for caps in METHOD_RE.captures_iter(body) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            if whole.start() < resume || CONTROL_KEYWORDS.contains(&name.as_str()) {
                continue;
            }
            // Object-literal methods and the like inside method bodies
            if depth.depth_at(name.start()) != 0 {
                continue;
            }
            let open = start + whole.end() - 1;
            let Some((mut info, body_open)) =
                self.signature(text, name.as_str(), open, start + name.start(), index)
            else {
                continue;
            };
            if body_open > end {
                continue;
            }
            info.is_async = Some(false);
            resume = body_open - start;
            members.push(ClassMember::Method(info));
        }
        members
    }

    /// Complete a declaration whose parameter list opens at `open`. `at` is
    /// the absolute offset used for the line number and doc comment lookup.
    ///
    /// Returns the record and the offset just past the body's `{`, or `None`
    /// when the parameter list is unclosed or not followed by a body.
    fn signature(
        &self,
        text: &str,
        name: &str,
        open: usize,
        at: usize,
        index: &SourceIndex,
    ) -> Option<(FunctionInfo, usize)> {
        let close = braces::matching_paren(text, open)?;
        let tail = BODY_OPEN_RE.captures(&text[close + 1..])?;
        let body_open = close + 1 + tail.get(0)?.end();

        let returns = tail
            .name("returns")
            .map(|r| r.as_str().trim())
            .filter(|r| !r.is_empty())
            .unwrap_or(IMPLICIT_RETURN_TYPE)
            .to_string();

        let info = FunctionInfo {
            name: name.to_string(),
            line: index.lines.line_at(at),
            docstring: self.preceding_doc(text, at, index),
            args: parse_parameters(&text[open + 1..close]),
            returns: Some(returns),
            is_async: None,
        };
        Some((info, body_open))
    }

    /// The block comment ending just before `start`, with markers stripped.
    ///
    /// Only whitespace and declaration modifiers may separate the comment
    /// from the declaration, spanning at most `max_doc_gap_lines` blank lines.
    fn preceding_doc(&self, text: &str, start: usize, index: &SourceIndex) -> String {
        let before = &text[..start];
        let mut end = before.trim_end().len();
        while let Some(word_start) = trailing_modifier(&before[..end]) {
            end = before[..word_start].trim_end().len();
        }

        let Some(open) = index.comment_ending_at(end) else {
            return String::new();
        };
        // Unterminated comments run to end of input and never end here.
        if !before[..end].ends_with("*/") || end < open + 4 {
            return String::new();
        }

        if blank_lines(&text[end..start]) > self.max_doc_gap_lines {
            return String::new();
        }

        clean_block_comment(&text[open + 2..end - 2])
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAnalyzer for TypeScriptAnalyzer {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
    }

    fn analyze(&self, source: &str, file: &str) -> StructuralSummary {
        let index = SourceIndex::new(source);

        let summary = StructuralSummary {
            functions: self.extract_functions(source, &index),
            classes: self.extract_classes(source, &index),
            imports: Imports::Statements(extract_imports(source, &index.lines)),
            variables: extract_variables(source),
        };

        tracing::debug!(file, %summary, "extracted typescript structure");
        summary
    }
}

/// Lookup tables built once per analyzed text.
struct SourceIndex {
    lines: LineIndex,
    /// Block comment spans in source order.
    comments: Vec<(usize, usize)>,
}

impl SourceIndex {
    fn new(text: &str) -> Self {
        Self {
            lines: LineIndex::new(text),
            comments: braces::block_comments(text),
        }
    }

    /// Start of the block comment whose `*/` ends at `end`.
    fn comment_ending_at(&self, end: usize) -> Option<usize> {
        self.comments
            .binary_search_by_key(&end, |&(_, e)| e)
            .ok()
            .map(|i| self.comments[i].0)
    }
}

fn extract_imports(text: &str, lines: &LineIndex) -> Vec<ImportInfo> {
    IMPORT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let module = caps.name("module")?.as_str().to_string();
            let named_imports = caps
                .name("named")
                .map(|named| {
                    named
                        .as_str()
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();

            Some(ImportInfo {
                module,
                default_import: caps.name("default").map(|m| m.as_str().to_string()),
                namespace_import: caps.name("namespace").map(|m| m.as_str().to_string()),
                named_imports,
                line: lines.line_at(whole.start()),
            })
        })
        .collect()
}

/// Names bound by `const`/`let`/`var` anywhere in the text, duplicates kept.
fn extract_variables(text: &str) -> Vec<String> {
    VARIABLE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.name("name").map(|m| m.as_str().to_string()))
        .collect()
}

/// Parse a parameter list like `a: number, b?: string = "x", ...rest`.
fn parse_parameters(params: &str) -> Vec<Parameter> {
    split_top_level(params, ',')
        .into_iter()
        .filter_map(|param| {
            let mut param = param.trim();
            for modifier in PARAMETER_MODIFIERS {
                if let Some(rest) = strip_word(param, modifier) {
                    param = rest;
                }
            }
            let param = top_level_position(param, |rest| {
                rest.starts_with('=') && !rest.starts_with("=>")
            })
            .map_or(param, |eq| &param[..eq])
            .trim();
            if param.is_empty() {
                return None;
            }

            let (name, ty) = match top_level_position(param, |rest| rest.starts_with(':')) {
                Some(colon) => (&param[..colon], param[colon + 1..].trim()),
                None => (param, ""),
            };
            let name = name.trim().trim_end_matches('?').trim_end();
            let ty = if ty.is_empty() { DEFAULT_PARAM_TYPE } else { ty };
            Some(Parameter::new(name, Some(ty.to_string())))
        })
        .collect()
}

/// Split on `sep` where it is not nested in brackets or quotes.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut last = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            // `=>` is not a closing angle bracket
            '>' if !text[..i].ends_with('=') => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => {
                parts.push(&text[last..i]);
                last = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[last..]);
    parts
}

/// First byte offset at nesting depth zero where `at` matches the remainder.
fn top_level_position(text: &str, at: impl Fn(&str) -> bool) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '>' if !text[..i].ends_with('=') => depth = depth.saturating_sub(1),
            _ if depth == 0 && at(&text[i..]) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Strip a leading whole word followed by whitespace.
fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

/// Start of a declaration modifier ending `text`, if one does.
fn trailing_modifier(text: &str) -> Option<usize> {
    DECLARATION_MODIFIERS.iter().find_map(|modifier| {
        let start = text.strip_suffix(modifier)?.len();
        let boundary = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'));
        boundary.then_some(start)
    })
}

/// Number of whitespace-only lines strictly between the first and last line
/// of `gap`.
fn blank_lines(gap: &str) -> usize {
    let segments: Vec<&str> = gap.split('\n').collect();
    if segments.len() <= 2 {
        return 0;
    }
    segments[1..segments.len() - 1]
        .iter()
        .filter(|s| s.trim().is_empty())
        .count()
}

/// Strip leading `*` decoration from each line of a block comment interior.
fn clean_block_comment(inner: &str) -> String {
    let inner = inner.trim_start_matches('*');
    inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').map_or(line, str::trim_start)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Maps byte offsets to 1-indexed line numbers.
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        Self {
            newlines: text.match_indices('\n').map(|(i, _)| i).collect(),
        }
    }

    fn line_at(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> StructuralSummary {
        TypeScriptAnalyzer::new().analyze(source, "test.ts")
    }

    fn args(f: &FunctionInfo) -> Vec<(&str, &str)> {
        f.args
            .iter()
            .map(|p| (p.name.as_str(), p.annotation.as_deref().unwrap_or("")))
            .collect()
    }

    #[test]
    fn test_documented_function() {
        let summary = analyze(
            r#"
/**
 * Adds two numbers.
 */
function add(a: number, b: number): number {
    return a + b;
}
"#,
        );
        assert_eq!(summary.functions.len(), 1);
        let add = &summary.functions[0];
        assert_eq!(add.name, "add");
        assert_eq!(add.line, 5);
        assert_eq!(add.docstring, "Adds two numbers.");
        assert_eq!(args(add), vec![("a", "number"), ("b", "number")]);
        assert_eq!(add.returns.as_deref(), Some("number"));
        assert_eq!(add.is_async, Some(false));
    }

    #[test]
    fn test_async_and_untyped_functions() {
        let summary = analyze(
            r#"
export async function load(url, opts = {}) {
    if (url) {
        return fetch(url);
    }
    for (const x of opts) {}
}
"#,
        );
        assert_eq!(summary.functions.len(), 1, "{:?}", summary.functions);
        let load = &summary.functions[0];
        assert_eq!(load.name, "load");
        assert_eq!(load.is_async, Some(true));
        assert_eq!(load.returns.as_deref(), Some(IMPLICIT_RETURN_TYPE));
        assert_eq!(args(load), vec![("url", "any"), ("opts", "any")]);
    }

    #[test]
    fn test_generic_return_and_parameter_types() {
        let summary = analyze(
            "function pick<T>(items: Map<string, T>, key?: string): Promise<T | null> {\n}\n",
        );
        let pick = &summary.functions[0];
        assert_eq!(
            args(pick),
            vec![("items", "Map<string, T>"), ("key", "string")]
        );
        assert_eq!(pick.returns.as_deref(), Some("Promise<T | null>"));
    }

    #[test]
    fn test_doc_comment_adjacency() {
        let summary = analyze(
            r#"
/** Unrelated header. */

import { a } from "a";

function far() {}

/** Near. */

export default function near() {}

/** Too far. */


function gapped() {}

/** Interrupted. */
// line comment
function interrupted() {}
"#,
        );
        let doc = |name: &str| summary.find_function(name).unwrap().docstring.clone();
        assert_eq!(doc("far"), "");
        assert_eq!(doc("near"), "Near.");
        assert_eq!(doc("gapped"), "");
        assert_eq!(doc("interrupted"), "");
    }

    #[test]
    fn test_doc_gap_is_configurable() {
        let analyzer = TypeScriptAnalyzer::with_config(&HeuristicConfig {
            max_doc_gap_lines: 0,
        });
        let summary = analyzer.analyze("/* Doc. */\n\nfunction f() {}\n", "t.ts");
        assert_eq!(summary.functions[0].docstring, "");

        let summary = analyzer.analyze("/* Doc. */\nfunction f() {}\n", "t.ts");
        assert_eq!(summary.functions[0].docstring, "Doc.");
    }

    #[test]
    fn test_class_with_methods() {
        let summary = analyze(
            r#"
/** A user store. */
export class UserStore extends BaseStore<User> implements Store {
    private cache = { size: 0 };

    /** Look up a user. */
    public async find(id: string): Promise<User> {
        const opts = {
            parse(raw) {
                return raw;
            },
        };
        if (id) {
            return this.cache[id];
        }
    }

    static create(name: string, age?: number) {
        return new UserStore();
    }

    constructor(private readonly db: Database) {
        super();
    }
}

function after() {}
"#,
        );

        assert_eq!(summary.classes.len(), 1);
        let store = &summary.classes[0];
        assert_eq!(store.name, "UserStore");
        assert_eq!(store.line, 3);
        assert_eq!(store.docstring, "A user store.");
        assert_eq!(store.bases, vec!["BaseStore"]);

        let names: Vec<&str> = store.methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["find", "create", "constructor"]);

        let find = store.find_method("find").unwrap();
        assert_eq!(find.docstring, "Look up a user.");
        assert_eq!(find.returns.as_deref(), Some("Promise<User>"));
        assert_eq!(find.is_async, Some(false));
        assert_eq!(find.line, 7);

        let create = store.find_method("create").unwrap();
        assert_eq!(args(create), vec![("name", "string"), ("age", "number")]);
        assert_eq!(create.returns.as_deref(), Some(IMPLICIT_RETURN_TYPE));

        let ctor = store.find_method("constructor").unwrap();
        assert_eq!(args(ctor), vec![("db", "Database")]);

        assert!(summary.find_function("after").is_some());
        assert!(summary.find_function("find").is_none());
        assert!(summary.find_function("parse").is_none());
    }

    #[test]
    fn test_methods_are_not_module_functions() {
        let summary = analyze("class A { run(x: number): void {} }
");
        assert!(summary.functions.is_empty(), "{:?}", summary.functions);
        let run = summary.classes[0].find_method("run").unwrap();
        assert_eq!(args(run), vec![("x", "number")]);

        let summary = analyze("function outer() {\n    function inner() {}\n}\n");
        let names: Vec<&str> = summary.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["outer"]);
    }

    #[test]
    fn test_parentheses_inside_parameter_lists() {
        let summary = analyze(
            "function on(cb: () => void): void {}\nfunction def(x = make()) {}\n",
        );
        let on = summary.find_function("on").unwrap();
        assert_eq!(args(on), vec![("cb", "() => void")]);
        assert_eq!(on.returns.as_deref(), Some("void"));

        let def = summary.find_function("def").unwrap();
        assert_eq!(args(def), vec![("x", "any")]);
        assert_eq!(def.line, 2);
        assert_eq!(summary.functions.len(), 2);

        let summary = analyze("class A { sub(fn: (v: number) => void): number {} }\n");
        let sub = summary.classes[0].find_method("sub").unwrap();
        assert_eq!(args(sub), vec![("fn", "(v: number) => void")]);
        assert_eq!(sub.returns.as_deref(), Some("number"));
    }

    #[test]
    fn test_calls_are_not_declarations() {
        let summary = analyze("setup(config);\nrun(() => 1);\nfunction real() {}\n");
        let names: Vec<&str> = summary.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["real"]);
    }

    #[test]
    fn test_doc_comment_containing_comment_opener() {
        let summary = analyze("/** Loads src/*.ts files. */ function load() {}\n");
        assert_eq!(summary.functions[0].docstring, "Loads src/*.ts files.");

        let summary = analyze("/* a */ const x = \"/*\";\n/** Real. */\nfunction f() {}\n");
        assert_eq!(summary.find_function("f").unwrap().docstring, "Real.");
    }

    #[test]
    fn test_accessor_doc_comments() {
        let summary = analyze(
            "class A {\n  /** Getter doc. */\n  get size() { return 1; }\n\n  /** Setter doc. */\n  set size(v: number) {}\n}\n",
        );
        let methods: Vec<(&str, &str)> = summary.classes[0]
            .methods()
            .map(|m| (m.name.as_str(), m.docstring.as_str()))
            .collect();
        assert_eq!(methods, vec![("size", "Getter doc."), ("size", "Setter doc.")]);
    }

    #[test]
    fn test_class_body_ignores_braces_in_strings() {
        let summary = analyze(
            r#"
class Template {
    render() {
        return "}" + '{' + `}`;
    }

    close() {
        // }
    }
}

class Next {
    run() {}
}
"#,
        );
        assert_eq!(summary.classes.len(), 2);
        let names: Vec<&str> = summary.classes[0].methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["render", "close"]);
        assert_eq!(summary.classes[1].members.len(), 1);
    }

    #[test]
    fn test_unterminated_class_extends_to_end() {
        let summary = analyze("class Open {\n    a() {\n    }\n    b() {\n");
        assert_eq!(summary.classes.len(), 1);
        assert_eq!(summary.classes[0].members.len(), 2);
    }

    #[test]
    fn test_imports() {
        let summary = analyze(
            r#"
import React, { useState, useEffect as effect, } from "react";
import { join } from 'path';
import fs from "fs";
import * as util from "./util";
import type { Props } from "./types";
import "./side-effect.css";
"#,
        );
        let imports = summary.imports.statements().unwrap();
        assert_eq!(imports.len(), 5);

        assert_eq!(imports[0].module, "react");
        assert_eq!(imports[0].default_import.as_deref(), Some("React"));
        assert_eq!(imports[0].named_imports, vec!["useState", "useEffect as effect"]);
        assert_eq!(imports[0].line, 2);

        assert_eq!(imports[1].module, "path");
        assert_eq!(imports[1].default_import, None);
        assert_eq!(imports[1].named_imports, vec!["join"]);

        assert_eq!(imports[2].default_import.as_deref(), Some("fs"));
        assert!(imports[2].named_imports.is_empty());

        assert_eq!(imports[3].namespace_import.as_deref(), Some("util"));
        assert_eq!(imports[4].named_imports, vec!["Props"]);
    }

    #[test]
    fn test_variables() {
        let summary = analyze("const a = 1; let b: number; var c;\n");
        assert_eq!(summary.variables, vec!["a", "b", "c"]);

        let summary = analyze(
            "let $el = null;\nfunction f() {\n    const a = 2;\n    for (let i = 0; ;) {}\n}\nconst a = 3;\n",
        );
        assert_eq!(summary.variables, vec!["$el", "a", "i", "a"]);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        let summary = analyze("");
        assert!(summary.is_empty());
        assert!(summary.imports.statements().is_some());

        let summary = analyze("{{{ ))) /* \u{0} \u{fffd} class function ( {");
        assert!(summary.functions.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let source = "import a from 'a';\nclass A { }\nfunction f() {}\nconst x = 1;\n";
        let analyzer = TypeScriptAnalyzer::new();
        assert_eq!(analyzer.analyze(source, "a.ts"), analyzer.analyze(source, "a.ts"));
    }

    #[test]
    fn test_parse_parameters() {
        let params = parse_parameters(" a , { x, y }: Point, cb: (v: number) => void ");
        let pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|p| (p.name.as_str(), p.annotation.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a", "any"),
                ("{ x, y }", "Point"),
                ("cb", "(v: number) => void"),
            ]
        );
        assert!(parse_parameters("").is_empty());
        assert_eq!(parse_parameters("...rest: string[]")[0].name, "...rest");
    }

    #[test]
    fn test_clean_block_comment() {
        assert_eq!(clean_block_comment("* Adds.\n * More.\n "), "Adds.\nMore.");
        assert_eq!(clean_block_comment(" plain "), "plain");
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nb\n\nc");
        assert_eq!(index.line_at(0), 1);
        assert_eq!(index.line_at(2), 2);
        assert_eq!(index.line_at(5), 4);
    }
}
