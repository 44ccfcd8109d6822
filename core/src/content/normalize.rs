use crate::content::icon_imports::rewrite_icon_imports;

const CODE_LIKE_EXTENSIONS: [&str; 7] = [".ts", ".tsx", ".js", ".jsx", ".css", ".html", ".md"];

pub fn is_code_like(rel_path: &str) -> bool {
    CODE_LIKE_EXTENSIONS
        .iter()
        .any(|ext| rel_path.ends_with(ext))
}

/// Clean up generated source text before it is written.
///
/// Only code-like files are touched: over-escaped quotes left behind by the
/// model's JSON escaping are collapsed, then icon imports are rewritten.
pub fn normalize_code_content(content: &str, rel_path: &str) -> String {
    if !is_code_like(rel_path) {
        return content.to_string();
    }
    let unescaped = content.replace("\\\"", "\"").replace("\\'", "'");
    rewrite_icon_imports(&unescaped)
}
