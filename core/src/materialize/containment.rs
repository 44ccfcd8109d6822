use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

const MAX_SYMLINK_HOPS: usize = 40;

/// Make `path` absolute, drop `.`/`..` segments and follow every symlink
/// along the way.
///
/// Components that do not exist yet are kept as written, so this also works
/// for files that are about to be created. Dangling links are followed to
/// their textual target, since writing through one would land there.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut hops = 0;
    resolve_components(&absolute, &mut hops)
}

fn resolve_components(path: &Path, hops: &mut usize) -> io::Result<PathBuf> {
    let mut resolved = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => resolved.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                let meta = match fs::symlink_metadata(&resolved) {
                    Ok(m) => m,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(e),
                };
                if !meta.file_type().is_symlink() {
                    continue;
                }
                *hops += 1;
                if *hops > MAX_SYMLINK_HOPS {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("too many levels of symbolic links at {}", resolved.display()),
                    ));
                }
                let target = fs::read_link(&resolved)?;
                resolved.pop();
                // An absolute link target replaces what has been built so far.
                let next = resolved.join(target);
                resolved = resolve_components(&next, hops)?;
            }
        }
    }
    Ok(resolved)
}

/// True when `target` resolves to `base` itself or somewhere below it.
/// Anything that cannot be resolved counts as outside.
pub fn is_within(base: &Path, target: &Path) -> bool {
    match (resolve_path(base), resolve_path(target)) {
        (Ok(base), Ok(target)) => target.starts_with(&base),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_segments_are_collapsed() {
        let dir = tempfile::tempdir().unwrap();
        let root = resolve_path(dir.path()).unwrap();
        let p = resolve_path(&dir.path().join("src/./a/../b.ts")).unwrap();
        assert_eq!(p, root.join("src").join("b.ts"));
    }

    #[test]
    fn test_parent_escape_is_outside() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_within(dir.path(), &dir.path().join("src/../../etc/passwd")));
        assert!(is_within(dir.path(), &dir.path().join("src/../src/x.ts")));
        assert!(is_within(dir.path(), dir.path()));
    }

    #[test]
    fn test_sibling_with_common_prefix_is_outside() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("app");
        assert!(!is_within(&root, &dir.path().join("app-evil/src/x.ts")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_followed() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("src").join("link")).unwrap();
        assert!(!is_within(dir.path(), &dir.path().join("src/link/x.ts")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_followed() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("not-yet.ts"),
            dir.path().join("src").join("a.ts"),
        )
        .unwrap();
        assert!(!is_within(dir.path(), &dir.path().join("src/a.ts")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_outside() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::os::unix::fs::symlink("b", dir.path().join("src").join("a")).unwrap();
        std::os::unix::fs::symlink("a", dir.path().join("src").join("b")).unwrap();
        assert!(!is_within(dir.path(), &dir.path().join("src/a/x.ts")));
    }
}
