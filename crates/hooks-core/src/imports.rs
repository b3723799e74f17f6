use crate::types::Severity;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Import extraction
// ---------------------------------------------------------------------------

static ES6_IMPORT_RE: OnceLock<Regex> = OnceLock::new();
static REQUIRE_RE: OnceLock<Regex> = OnceLock::new();

fn es6_import_re() -> &'static Regex {
    ES6_IMPORT_RE
        .get_or_init(|| Regex::new(r#"import\s+.*?\s+from\s+["']([^"']+)["']"#).unwrap())
}

fn require_re() -> &'static Regex {
    REQUIRE_RE.get_or_init(|| Regex::new(r#"require\(["']([^"']+)["']\)"#).unwrap())
}

/// All import specifiers in the file, ES6 `import ... from` first, then
/// CommonJS `require(...)`.
pub fn extract_imports(content: &str) -> Vec<String> {
    let mut imports: Vec<String> = Vec::new();
    for re in [es6_import_re(), require_re()] {
        imports.extend(
            re.captures_iter(content)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string())),
        );
    }
    imports
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ImportFinding {
    pub severity: Severity,
    pub message: String,
}

const CHECKABLE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs"];
const SKIP_FRAGMENTS: &[&str] = &["node_modules", "dist", "_generated", ".next", ".git"];

/// Only TypeScript/JavaScript sources outside generated trees are validated.
pub fn is_checkable(path: &str) -> bool {
    CHECKABLE_EXTENSIONS.iter().any(|e| path.ends_with(e))
        && !SKIP_FRAGMENTS.iter().any(|f| path.contains(f))
}

/// Validate import statements against the architecture boundaries: the
/// frontend talks to the backend through the generated client only, the
/// backend stays headless, services stay UI-agnostic.
pub fn validate(file_path: &str, content: &str) -> Vec<ImportFinding> {
    let mut findings = Vec::new();
    let imports = extract_imports(content);

    let is_frontend = file_path.contains("/web/src/") || file_path.contains("/apps/");
    let is_backend = file_path.contains("/backend/convex/");
    let is_web_convex = file_path.contains("/web/convex/");
    let is_service = file_path.contains("/services/");

    for imp in &imports {
        if is_frontend && !is_web_convex {
            if (imp.contains("../backend/") || imp.contains("backend/convex"))
                && !imp.ends_with("/_generated/api")
            {
                findings.push(error(format!(
                    "Frontend importing backend code directly: '{imp}'. \
                     Use the generated client (useQuery/useMutation) instead"
                )));
            }
            if imp.starts_with("convex/server") {
                findings.push(error(format!(
                    "Frontend importing server-only code: '{imp}'. \
                     Use 'convex/react' or 'convex/browser' instead"
                )));
            }
        }

        if is_backend || is_web_convex {
            if imp.contains("/web/src/components") || imp.contains("/web/src/pages") {
                findings.push(error(format!(
                    "Backend importing frontend code: '{imp}'. Backend must remain headless"
                )));
            }
            if imp == "react" || imp.starts_with("react/") {
                findings.push(error(format!(
                    "Backend importing React: '{imp}'. Backend must be framework-agnostic"
                )));
            }
            if imp.starts_with("convex/")
                && !imp.starts_with("convex/values")
                && !imp.contains("_generated")
            {
                findings.push(warning(format!(
                    "Using absolute 'convex/' import: '{imp}'. \
                     Consider relative imports for local modules"
                )));
            }
            if imp.contains("_generated")
                && !(imp.ends_with("/api") || imp.ends_with("/server") || imp.ends_with("/dataModel"))
            {
                findings.push(warning(format!(
                    "Unusual _generated import: '{imp}'. Typically use /api, /server, or /dataModel"
                )));
            }
        }

        let up_levels = imp.matches("../").count();
        if up_levels > 3 {
            findings.push(warning(format!(
                "Deep relative import (../{up_levels} levels): '{imp}'. \
                 May indicate architectural issues"
            )));
        }

        if is_service && (imp.contains("/components/") || imp.contains("/pages/")) {
            findings.push(error(format!(
                "Service importing UI code: '{imp}'. Services must be UI-agnostic"
            )));
        }
    }

    findings
}

pub fn has_errors(findings: &[ImportFinding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

fn error(message: String) -> ImportFinding {
    ImportFinding {
        severity: Severity::Error,
        message,
    }
}

fn warning(message: String) -> ImportFinding {
    ImportFinding {
        severity: Severity::Warning,
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_import_styles() {
        let content = r#"
            import { useQuery } from "convex/react";
            import Button from '../components/Button';
            const fs = require('fs');
        "#;
        let imports = extract_imports(content);
        assert_eq!(
            imports,
            vec!["convex/react", "../components/Button", "fs"]
        );
    }

    #[test]
    fn checkable_paths() {
        assert!(is_checkable("web/src/pages/index.ts"));
        assert!(is_checkable("backend/convex/things.ts"));
        assert!(!is_checkable("one/things/doc.md"));
        assert!(!is_checkable("web/node_modules/lib/index.ts"));
        assert!(!is_checkable("backend/convex/_generated/api.ts"));
    }

    #[test]
    fn frontend_direct_backend_import_is_error() {
        let findings = validate(
            "/proj/web/src/pages/dashboard.tsx",
            r#"import { listThings } from "../../../backend/convex/things";"#,
        );
        assert!(has_errors(&findings));
    }

    #[test]
    fn frontend_generated_api_import_is_allowed() {
        let findings = validate(
            "/proj/web/src/pages/dashboard.tsx",
            r#"import { api } from "../../../backend/convex/_generated/api";"#,
        );
        assert!(!has_errors(&findings));
    }

    #[test]
    fn frontend_server_import_is_error() {
        let findings = validate(
            "/proj/web/src/components/List.tsx",
            r#"import { query } from "convex/server";"#,
        );
        assert!(has_errors(&findings));
    }

    #[test]
    fn backend_react_import_is_error() {
        let findings = validate(
            "/proj/backend/convex/things.ts",
            r#"import React from "react";"#,
        );
        assert!(has_errors(&findings));
    }

    #[test]
    fn deep_relative_import_is_warning_only() {
        let findings = validate(
            "/proj/web/src/components/deep/nested/Widget.tsx",
            r#"import util from "../../../../shared/util";"#,
        );
        assert!(!has_errors(&findings));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn service_importing_ui_is_error() {
        let findings = validate(
            "/proj/web/src/services/things.ts",
            r#"import { Button } from "../components/Button";"#,
        );
        assert!(has_errors(&findings));
    }

    #[test]
    fn clean_file_passes() {
        let findings = validate(
            "/proj/web/src/pages/index.tsx",
            r#"import { useQuery } from "convex/react";"#,
        );
        assert!(findings.is_empty());
    }
}
