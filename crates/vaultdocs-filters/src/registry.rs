//! Filter registration into a Tera environment

use tera::Tera;

use crate::filters;

/// Names registered by [`setup_environment`]
pub const FILTER_NAMES: [&str; 7] = [
    "convert_time",
    "iso_time",
    "time_todatetime",
    "page_exists",
    "url_decode",
    "log",
    "to_local_time",
];

/// Register every vaultdocs filter, replacing any filter with the same name.
///
/// Returns the same environment so calls can be chained.
pub fn setup_environment(env: &mut Tera) -> &mut Tera {
    env.register_filter("convert_time", filters::convert_time_filter);
    env.register_filter("iso_time", filters::iso_time_filter);
    env.register_filter("time_todatetime", filters::time_todatetime_filter);
    env.register_filter("page_exists", filters::page_exists_filter);
    env.register_filter("url_decode", filters::url_decode_filter);
    env.register_filter("log", filters::log_filter);
    env.register_filter("to_local_time", filters::to_local_time_filter);

    log::debug!("Registered {} template filters", FILTER_NAMES.len());
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    fn render(env: &mut Tera, template: &str, context: &Context) -> String {
        env.render_str(template, context).unwrap()
    }

    #[test]
    fn test_every_registered_name_is_callable() {
        let mut env = Tera::default();
        setup_environment(&mut env);

        let mut context = Context::new();
        context.insert("value", "2023-05-01");
        for name in FILTER_NAMES {
            let template = format!("{{{{ value | {} }}}}", name);
            assert!(
                env.render_str(&template, &context).is_ok(),
                "filter {} failed to render",
                name
            );
        }
    }

    #[test]
    fn test_unregistered_environment_rejects_filters() {
        let mut env = Tera::default();
        let context = Context::new();
        assert!(env.render_str("{{ 'x' | convert_time }}", &context).is_err());
    }

    #[test]
    fn test_setup_overrides_existing_binding() {
        let mut env = Tera::default();
        env.register_filter(
            "url_decode",
            |_: &tera::Value, _: &std::collections::HashMap<String, tera::Value>| {
                Ok(tera::Value::from("stale"))
            },
        );

        let context = Context::new();
        let out = render(
            setup_environment(&mut env),
            "{{ 'a%20b' | url_decode }}",
            &context,
        );
        assert_eq!(out, "a b");
    }

    #[test]
    fn test_filters_in_templates() {
        let mut env = Tera::default();
        setup_environment(&mut env);

        let mut context = Context::new();
        context.insert("date", "2023-05-01");
        context.insert("missing", "/nonexistent/path");

        assert_eq!(render(&mut env, "{{ date | convert_time }}", &context), "01 May 2023");
        assert_eq!(
            render(&mut env, "{{ date | iso_time }}", &context),
            "2023-05-01T00:00:00"
        );
        assert_eq!(
            render(&mut env, "{{ date | to_local_time(locale=\"fr\") }}", &context),
            "1 mai 2023"
        );
        assert_eq!(
            render(
                &mut env,
                "{% set dt = date | time_todatetime %}{{ dt.year }}-{{ dt.weekday_name }}",
                &context
            ),
            "2023-Monday"
        );
        assert_eq!(
            render(
                &mut env,
                "{% if missing | page_exists %}yes{% else %}no{% endif %}",
                &context
            ),
            "no"
        );
        assert_eq!(render(&mut env, "[{{ date | log }}]", &context), "[]");
    }
}
