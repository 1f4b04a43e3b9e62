//! End-to-end runs over a real directory tree.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use omni::commands::{build, BuildOptions};
use omni::{plugin_fn, Config, Event, EventBus, Omni, OmniError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_for(root: &Path) -> Config {
    Config {
        input: "src".into(),
        output: "dist".into(),
        ..Config::default()
    }
    .resolve_paths(root)
}

#[test]
fn test_build_tree() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "src/index.md",
        r#"# Site

```yaml config
_shared:
  greeting: hello
```

```js export
console.log(_shared.greeting);
```

```css export=styles/site.css
body { margin: 0; }
```
"#,
    );
    write(
        dir.path(),
        "src/posts/first.omni",
        "```json run\n{\"_shared\": {\"post\": 1}}\n```\n\n```es6 export\nrender(_shared)\n```\n",
    );
    write(dir.path(), "src/notes.txt", "```js export\nignored()\n```\n");

    let omni = Omni::new(config_for(dir.path())).unwrap();
    let processed = omni.process_directory(None).unwrap();
    assert_eq!(processed, 2);

    let dist = dir.path().join("dist");
    assert_eq!(
        fs::read_to_string(dist.join("index.js")).unwrap(),
        r#";!function(_shared){console.log(_shared.greeting);}({"greeting":"hello"});"#
    );
    assert_eq!(
        fs::read_to_string(dist.join("styles/site.css")).unwrap(),
        "body { margin: 0; }"
    );
    assert_eq!(
        fs::read_to_string(dist.join("posts/first.js")).unwrap(),
        r#";!function(_shared){render(_shared)}({"post":1});"#
    );
    assert!(!dist.join("notes.js").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "src/a.md", "```js export\na()\n```\n");

    let config = Config {
        dry_run: true,
        ..config_for(dir.path())
    };
    let omni = Omni::new(config).unwrap();
    let report = build(&omni, &BuildOptions::default()).unwrap();

    assert_eq!(report.processed, 1);
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn test_user_plugin_sees_resolved_blocks() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "src/a.md",
        "```toml config\n[_shared]\nmode = \"prod\"\n```\n\n```js export\nx()\n```\n",
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let spy = plugin_fn("spy", move |bus: &mut EventBus| {
        let log = Arc::clone(&log);
        bus.on_fn(Event::ParseBlock, move |payload| {
            let language = payload.block().map(|b| b.language.clone());
            let shared = payload.data().map_or(0, |d| d.shared.len());
            if let Some(language) = language {
                log.lock().unwrap().push((language, shared));
            }
            Ok(None)
        });
    });

    let config = config_for(dir.path());
    let omni = Omni::with_plugins(config, Arc::new(omni::io::RealFs::new()), vec![Box::new(spy)])
        .unwrap();
    omni.process_file("a.md").unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![("json".to_string(), 1), ("js".to_string(), 1)]
    );
}

#[test]
fn test_unclosed_fence_reports_location() {
    let dir = tempdir().unwrap();
    write(dir.path(), "src/bad.md", "intro\n\n```js export\nnever closed\n");

    let omni = Omni::new(config_for(dir.path())).unwrap();
    let err = omni.process_file("bad.md").unwrap_err();

    match err {
        OmniError::Parse { location, .. } => assert_eq!(location.line, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_config_file_discovery() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "omni.toml",
        "input = \"pages\"\nfile_types = [\"md\"]\nplugins = []\n",
    );
    write(dir.path(), "pages/a.md", "```js export\na()\n```\n");

    let nested = dir.path().join("pages");
    let config = omni::config::read_config(&nested)
        .unwrap()
        .resolve_paths(dir.path());
    let omni = Omni::new(config).unwrap();
    omni.process_directory(None).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("dist/a.js")).unwrap(),
        "a()"
    );
}
