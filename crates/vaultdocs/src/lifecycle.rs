//! Minimal host build lifecycle.
//!
//! Drives registered hooks in order: `pre_build` once, then the template
//! environment, then page rendering.

use std::path::Path;

use tera::{Context, Tera};
use vaultdocs_core::prelude::*;

use crate::hooks::{BuildHook, Files, SiteConfig};

pub struct BuildLifecycle {
    site: SiteConfig,
    files: Files,
    hooks: Vec<Box<dyn BuildHook>>,
    pre_build_done: bool,
}

impl BuildLifecycle {
    pub fn new(site: SiteConfig, files: Files) -> Self {
        Self {
            site,
            files,
            hooks: Vec::new(),
            pre_build_done: false,
        }
    }

    pub fn with_hook(mut self, hook: impl BuildHook + 'static) -> Self {
        self.register(hook);
        self
    }

    pub fn register(&mut self, hook: impl BuildHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    /// Run every `on_pre_build` hook. Later calls on the same build are no-ops.
    pub fn pre_build(&mut self) -> Result<()> {
        if self.pre_build_done {
            log::debug!("pre_build already ran for this build");
            return Ok(());
        }
        for hook in &self.hooks {
            hook.on_pre_build(&self.site)?;
        }
        self.pre_build_done = true;
        Ok(())
    }

    /// Fresh template environment passed through every `on_env` hook
    pub fn build_env(&self) -> Result<Tera> {
        self.hooks.iter().try_fold(Tera::default(), |env, hook| {
            hook.on_env(env, &self.site, &self.files)
        })
    }

    /// Render template source with the hook-extended environment
    pub fn render_str(&self, template: &str, context: &Context) -> Result<String> {
        let mut env = self.build_env()?;
        env.render_str(template, context)
            .map_err(|e| Error::template(render_error_chain(&e)))
    }

    /// Render a template file
    pub fn render_file(&self, path: &Path, context: &Context) -> Result<String> {
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path),
            _ => Error::io(e),
        })?;
        self.render_str(&source, context)
    }

    /// `pre_build` followed by rendering `template`
    pub fn run(&mut self, template: &str, context: &Context) -> Result<String> {
        self.pre_build()?;
        self.render_str(template, context)
    }
}

/// Tera nests the useful message in the error source chain
fn render_error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl BuildHook for Counting {
        fn on_pre_build(&self, _config: &SiteConfig) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    struct Shout;

    impl BuildHook for Shout {
        fn on_env(&self, mut env: Tera, _config: &SiteConfig, _files: &Files) -> Result<Tera> {
            env.register_filter(
                "shout",
                |value: &tera::Value, _: &std::collections::HashMap<String, tera::Value>| {
                    Ok(tera::Value::from(
                        value.as_str().unwrap_or_default().to_uppercase(),
                    ))
                },
            );
            Ok(env)
        }
    }

    #[test]
    fn test_pre_build_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let mut lifecycle = BuildLifecycle::new(SiteConfig::default(), Files::default())
            .with_hook(Counting {
                calls: Rc::clone(&calls),
            });

        lifecycle.pre_build().unwrap();
        lifecycle.pre_build().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_env_hooks_apply() {
        let lifecycle =
            BuildLifecycle::new(SiteConfig::default(), Files::default()).with_hook(Shout);
        let out = lifecycle
            .render_str("{{ 'hi' | shout }}", &Context::new())
            .unwrap();
        assert_eq!(out, "HI");
    }

    #[test]
    fn test_render_error_is_template_error() {
        let lifecycle = BuildLifecycle::new(SiteConfig::default(), Files::default());
        let err = lifecycle
            .render_str("{{ 'hi' | shout }}", &Context::new())
            .unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }
}
