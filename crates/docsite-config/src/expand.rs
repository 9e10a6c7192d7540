//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references.
///
/// A reference without a default must name a set variable. Bare `$VAR` is
/// left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(name) = required_vars(value).find(|name| std::env::var_os(name).is_none()) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok());
    Ok(expanded.into_owned())
}

/// Variable names referenced as `${NAME}` with no default.
fn required_vars(value: &str) -> impl Iterator<Item = &str> {
    value.split("${").skip(1).filter_map(|rest| {
        let body = &rest[..rest.find('}')?];
        (!body.contains(":-")).then_some(body)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_no_pattern() {
        let result = expand_env("127.0.0.1", "server.host").unwrap();
        assert_eq!(result, "127.0.0.1");
    }

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("DOCSITE_TEST_HOST", "0.0.0.0");
        }
        let result = expand_env("${DOCSITE_TEST_HOST}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
        unsafe {
            std::env::remove_var("DOCSITE_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("DOCSITE_TEST_DOCS_DIR", "handbook");
        }
        let result = expand_env("${DOCSITE_TEST_DOCS_DIR}/main.md", "docs.source_file").unwrap();
        assert_eq!(result, "handbook/main.md");
        unsafe {
            std::env::remove_var("DOCSITE_TEST_DOCS_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        let result =
            expand_env("${DOCSITE_TEST_UNSET_DIR:-docs}/main.md", "docs.source_file").unwrap();
        assert_eq!(result, "docs/main.md");
    }

    #[test]
    fn test_required_vars_skips_defaults() {
        let names: Vec<_> = required_vars("${A}/${B:-x}/${C}").collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_expand_unset_var_errors() {
        let err = expand_env("${DOCSITE_TEST_MISSING}", "server.host").unwrap_err();
        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "server.host");
                assert_eq!(message, "${DOCSITE_TEST_MISSING} not set");
            }
            other => panic!("expected EnvVar error, got {other:?}"),
        }
    }
}
