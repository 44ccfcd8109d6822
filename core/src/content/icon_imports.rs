use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const ICON_ROOT: &str = "@mui/icons-material";

// Named imports from the package root, e.g.
//   import { Home, Search as Find } from '@mui/icons-material';
fn barrel_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?mR)^[ \t]*import\s*\{([^}]+)\}\s*from\s*['"]@mui/icons-material['"];?[ \t]*$"#,
        )
        .expect("barrel import pattern")
    })
}

// A single named import from an icon's own module, e.g.
//   import { Delete } from '@mui/icons-material/Delete';
fn scoped_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?mR)^[ \t]*import\s*\{\s*([A-Za-z0-9_]+)\s*\}\s*from\s*['"]@mui/icons-material/([A-Za-z0-9_]+)['"];?[ \t]*$"#,
        )
        .expect("scoped import pattern")
    })
}

fn default_import(local: &str, icon: &str) -> String {
    format!("import {} from '{}/{}';", local, ICON_ROOT, icon)
}

// "Name" -> (Name, Name); "Name as Alias" -> (Name, Alias)
fn split_specifier(spec: &str) -> (&str, &str) {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    match tokens.as_slice() {
        [icon, "as", local] => (*icon, *local),
        _ => (spec, spec),
    }
}

/// Rewrite named icon imports into one default import per icon module.
///
/// Lines that are not one of the two recognised shapes are left alone, and
/// the output contains neither shape, so running this twice is a no-op.
pub fn rewrite_icon_imports(source: &str) -> String {
    let expanded = barrel_import_re().replace_all(source, |caps: &Captures<'_>| {
        caps[1]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|spec| {
                let (icon, local) = split_specifier(spec);
                default_import(local, icon)
            })
            .collect::<Vec<_>>()
            .join("\n")
    });

    scoped_import_re()
        .replace_all(&expanded, |caps: &Captures<'_>| default_import(&caps[1], &caps[2]))
        .into_owned()
}
