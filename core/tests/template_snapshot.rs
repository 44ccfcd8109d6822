use appgen_core::error::CoreError;
use appgen_core::snapshot::copy::copy_template_to;
use std::fs;
use std::path::Path;

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn copies_tree_without_build_or_dependency_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let template = tmp.path().join("template");
    write(&template.join("package.json"), "{}");
    write(&template.join("src/main.tsx"), "main");
    write(&template.join("src/components/build.ts"), "a file named build is fine");
    write(&template.join("node_modules/react/index.js"), "x");
    write(&template.join("dist/assets/app.js"), "x");
    write(&template.join("packages/ui/node_modules/dep/index.js"), "x");
    write(&template.join("packages/ui/.vite/deps.json"), "x");
    write(&template.join("packages/ui/src/index.ts"), "ui");

    let target = tmp.path().join("out").join("20250101-000000-00000000");
    copy_template_to(&template, &target).unwrap();

    assert_eq!(fs::read_to_string(target.join("package.json")).unwrap(), "{}");
    assert_eq!(fs::read_to_string(target.join("src/main.tsx")).unwrap(), "main");
    assert!(target.join("src/components/build.ts").is_file());
    assert_eq!(
        fs::read_to_string(target.join("packages/ui/src/index.ts")).unwrap(),
        "ui"
    );
    assert!(!target.join("node_modules").exists());
    assert!(!target.join("dist").exists());
    assert!(!target.join("packages/ui/node_modules").exists());
    assert!(!target.join("packages/ui/.vite").exists());
    assert!(template.join("node_modules/react/index.js").exists());
}

#[test]
fn existing_target_is_replaced_wholesale() {
    let tmp = tempfile::tempdir().unwrap();
    let template = tmp.path().join("template");
    write(&template.join("src/main.tsx"), "fresh");

    let target = tmp.path().join("target");
    write(&target.join("stale.txt"), "old");
    write(&target.join("src/main.tsx"), "old");

    copy_template_to(&template, &target).unwrap();
    assert!(!target.join("stale.txt").exists());
    assert_eq!(fs::read_to_string(target.join("src/main.tsx")).unwrap(), "fresh");
}

#[test]
fn missing_template_is_a_copy_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = copy_template_to(&tmp.path().join("nope"), &tmp.path().join("target")).unwrap_err();
    assert!(matches!(err, CoreError::Copy { .. }));
}
