//! End-to-end tests for the build hooks against vaults on disk

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tera::Context;
use vaultdocs::prelude::*;
use vaultdocs::FILTER_NAMES;

fn write_note(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn two_note_vault() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_note(temp.path(), "Alpha.md", "# Alpha\n\nSee [[Beta]] for details.\n");
    write_note(temp.path(), "Beta.md", "# Beta\n\nNo links here.\n");
    temp
}

#[test]
fn test_graph_page_for_two_linked_notes() {
    let vault = two_note_vault();
    fs::create_dir_all(vault.path().join("docs").join("assets")).unwrap();

    let config = HooksConfig::builder(vault.path()).build().unwrap();
    let report = GraphBuilder::new(&config).build_graph().unwrap();

    assert_eq!(report.nodes, 2);
    assert_eq!(report.edges, 1);
    assert_eq!(report.phantom_notes, 0);
    assert!(report.written);
    assert!(report.transient_dir_removed);

    let html = fs::read_to_string(vault.path().join("docs/assets/graph.html")).unwrap();
    assert!(!html.is_empty());
    assert!(html.contains("Alpha"));
    assert!(html.contains("Beta"));
    assert!(!vault.path().join("lib").exists());
}

#[test]
fn test_missing_assets_dir_is_not_fatal() {
    let vault = two_note_vault();

    let config = HooksConfig::builder(vault.path()).build().unwrap();
    let report = GraphBuilder::new(&config).build_graph().unwrap();

    assert!(!report.written);
    assert!(!vault.path().join("docs/assets/graph.html").exists());
    assert!(!vault.path().join("lib").exists());
}

#[test]
fn test_unresolved_links_become_phantom_notes() {
    let vault = TempDir::new().unwrap();
    write_note(vault.path(), "Index.md", "[[Someday]] and [[Index]]\n");
    fs::create_dir_all(vault.path().join("docs/assets")).unwrap();

    let config = HooksConfig::builder(vault.path()).build().unwrap();
    let report = GraphBuilder::new(&config).build_graph().unwrap();

    assert_eq!(report.phantom_notes, 1);
    let html = fs::read_to_string(report.output_path).unwrap();
    assert!(html.contains("Someday"));
}

#[test]
fn test_excluded_and_hidden_directories_are_skipped() {
    let vault = two_note_vault();
    write_note(vault.path(), ".obsidian/Hidden.md", "[[Alpha]]");
    write_note(vault.path(), "site/Built.md", "[[Alpha]]");
    fs::create_dir_all(vault.path().join("docs/assets")).unwrap();

    let config = HooksConfig::builder(vault.path()).build().unwrap();
    let report = GraphBuilder::new(&config).build_graph().unwrap();

    assert_eq!(report.nodes, 2);
    let html = fs::read_to_string(report.output_path).unwrap();
    assert!(!html.contains("Hidden"));
    assert!(!html.contains("Built"));
}

#[test]
fn test_custom_output_and_staging_paths() {
    let vault = two_note_vault();
    fs::create_dir_all(vault.path().join("out")).unwrap();

    let config = HooksConfig::builder(vault.path())
        .output_path("out/links.html")
        .transient_dir("staging")
        .build()
        .unwrap();
    let report = GraphBuilder::new(&config).build_graph().unwrap();

    assert!(report.written);
    assert!(vault.path().join("out/links.html").exists());
    assert!(!vault.path().join("staging").exists());
    assert!(!vault.path().join("lib").exists());
}

#[test]
fn test_lifecycle_runs_graph_then_filters() {
    let vault = two_note_vault();
    fs::create_dir_all(vault.path().join("docs/assets")).unwrap();
    write_note(vault.path(), "docs/index.md", "# Home\n");

    let config = HooksConfig::builder(vault.path()).build().unwrap();
    let site = SiteConfig::new(vault.path());
    let files = Files::collect(&site.docs_dir).unwrap();
    assert_eq!(files.len(), 1);

    let mut lifecycle = BuildLifecycle::new(site, files).with_hook(ObsidianHooks::new(config));
    lifecycle.pre_build().unwrap();
    assert!(vault.path().join("docs/assets/graph.html").exists());
    assert!(!vault.path().join("lib").exists());

    // A second pre_build on the same build is skipped, so the missing lib is
    // never looked at again.
    lifecycle.pre_build().unwrap();

    let graph_page = vault.path().join("docs/assets/graph.html");
    let mut context = Context::new();
    context.insert("updated", "2023-05-01");
    context.insert("graph", &graph_page.to_string_lossy());

    let page = lifecycle
        .render_str(
            "{{ updated | convert_time }}|{{ updated | to_local_time(locale='fr') }}|{{ graph | page_exists }}",
            &context,
        )
        .unwrap();
    assert_eq!(page, "01 May 2023|1 mai 2023|true");
}

#[test]
fn test_render_file_with_all_filters() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("page.html");
    fs::write(
        &template,
        "{{ date | iso_time }} {{ name | url_decode }}{{ name | log }}",
    )
    .unwrap();

    let lifecycle = BuildLifecycle::new(SiteConfig::new(temp.path()), Files::default())
        .with_hook(ObsidianHooks::new(
            HooksConfig::builder(temp.path()).build().unwrap(),
        ));

    let mut context = Context::new();
    context.insert("date", "2023/05/01");
    context.insert("name", "My%20Note");
    let out = lifecycle.render_file(&template, &context).unwrap();
    assert_eq!(out, "2023-05-01T00:00:00 My Note");

    let missing = lifecycle.render_file(&temp.path().join("absent.html"), &context);
    assert!(matches!(missing, Err(Error::FileNotFound { .. })));
}

#[test]
fn test_environment_has_exactly_the_filters() {
    let temp = TempDir::new().unwrap();
    let hooks = ObsidianHooks::new(HooksConfig::builder(temp.path()).build().unwrap());
    let lifecycle =
        BuildLifecycle::new(SiteConfig::new(temp.path()), Files::default()).with_hook(hooks);

    let mut context = Context::new();
    context.insert("value", "2023-05-01");
    for name in FILTER_NAMES {
        let template = format!("{{{{ value | {} }}}}", name);
        assert!(lifecycle.render_str(&template, &context).is_ok(), "{}", name);
    }
    assert!(lifecycle.render_str("{{ value | not_a_filter }}", &context).is_err());
}

#[test]
fn test_config_file_sets_policy() {
    let vault = two_note_vault();
    fs::write(
        vault.path().join("vaultdocs.yaml"),
        "graph:\n  transient_dir_policy: ignore_missing\n  width: 900px\n",
    )
    .unwrap();

    let config = HooksConfig::load(None, vault.path()).unwrap();
    assert_eq!(
        config.graph.transient_dir_policy,
        TransientDirPolicy::IgnoreMissing
    );
    assert_eq!(config.graph.width, "900px");
    assert_eq!(config.graph.height, "750px");

    let builder = GraphBuilder::new(&config);
    assert!(!builder.remove_transient_dir().unwrap());
}
