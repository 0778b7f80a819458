//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left alone so paths and URLs containing `$` survive.
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("templates", "f").unwrap(), "templates");
        assert_eq!(expand_env("$HOME/x", "f").unwrap(), "$HOME/x");
    }

    #[test]
    fn test_set_var_expands() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("UD_EXPAND_TEST_DIR", "/srv/tpl");
        }
        assert_eq!(
            expand_env("${UD_EXPAND_TEST_DIR}/docs", "templates.dir").unwrap(),
            "/srv/tpl/docs"
        );
        unsafe {
            std::env::remove_var("UD_EXPAND_TEST_DIR");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("UD_EXPAND_TEST_UNSET");
        }
        assert_eq!(
            expand_env("${UD_EXPAND_TEST_UNSET:-templates}", "templates.dir").unwrap(),
            "templates"
        );
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("UD_EXPAND_TEST_MISSING");
        }
        let err = expand_env("${UD_EXPAND_TEST_MISSING}", "templates.dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("UD_EXPAND_TEST_MISSING"));
        assert!(msg.contains("templates.dir"));
    }
}
