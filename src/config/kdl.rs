use crate::config::Settings;
use crate::error::{PkgbarError, Result};
use kdl::{KdlDocument, KdlNode};

/// Parse a `pkgbar.kdl` document.
///
/// ```kdl
/// managers "brew" "npm"
/// exclude "pip"
/// all-managers #false
/// include-inactive #false
/// options {
///     dry_run #true
/// }
/// ```
pub fn parse_kdl_content(content: &str) -> Result<Settings> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let err_msg = e.to_string();
        let hint = if err_msg.contains("unexpected end of file") {
            "\nHint: You might be missing a closing brace '}'."
        } else if err_msg.contains("expected") {
            "\nHint: Check that your KDL syntax follows the format: node-name \"value\" { ... }"
        } else {
            ""
        };

        PkgbarError::ConfigError(format!("KDL parsing error: {}{}", err_msg, hint))
    })?;

    let mut settings = Settings::default();

    for node in doc.nodes() {
        match node.name().value() {
            "managers" | "manager" | "keep" => {
                extract_strings(node, &mut settings.managers)?;
            }
            "exclude" | "excludes" | "drop" => {
                extract_strings(node, &mut settings.exclude)?;
            }
            "all-managers" => {
                settings.all_managers = Some(extract_bool(node)?);
            }
            "include-inactive" => {
                settings.include_inactive = Some(extract_bool(node)?);
            }
            "options" => {
                parse_options_node(node, &mut settings)?;
            }
            other => {
                return Err(PkgbarError::ConfigError(format!(
                    "Unknown setting '{}'",
                    other
                )));
            }
        }
    }

    Ok(settings)
}

/// Option keys are kept as written so the selector reports unknown ones
fn parse_options_node(node: &KdlNode, settings: &mut Settings) -> Result<()> {
    if let Some(children) = node.children() {
        for child in children.nodes() {
            let key = child.name().value().replace('-', "_");
            settings.options.push((key, extract_bool(child)?));
        }
    }
    Ok(())
}

fn extract_strings(node: &KdlNode, target: &mut Vec<String>) -> Result<()> {
    for entry in node.entries() {
        let value = entry.value().as_string().ok_or_else(|| {
            PkgbarError::ConfigError(format!(
                "'{}' expects string values, got {:?}",
                node.name().value(),
                entry.value()
            ))
        })?;
        target.push(value.to_string());
    }
    Ok(())
}

fn extract_bool(node: &KdlNode) -> Result<bool> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_bool())
        .ok_or_else(|| {
            PkgbarError::ConfigError(format!(
                "'{}' expects a boolean (#true or #false)",
                node.name().value()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let content = r#"
managers "brew" "npm"
exclude "pip"
all-managers #true
include-inactive #false
options {
    dry_run #true
    stop-on-error #false
}
"#;

        let settings = parse_kdl_content(content).unwrap();

        assert_eq!(settings.managers, vec!["brew", "npm"]);
        assert_eq!(settings.exclude, vec!["pip"]);
        assert_eq!(settings.all_managers, Some(true));
        assert_eq!(settings.include_inactive, Some(false));
        assert_eq!(
            settings.options,
            vec![
                ("dry_run".to_string(), true),
                ("stop_on_error".to_string(), false)
            ]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_kdl_content("").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_options_are_kept() {
        let settings = parse_kdl_content("options {\n    bogus #true\n}\n").unwrap();

        assert_eq!(settings.options, vec![("bogus".to_string(), true)]);
    }

    #[test]
    fn test_unknown_setting_is_rejected() {
        let err = parse_kdl_content("colour \"red\"\n").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_non_boolean_flag_is_rejected() {
        assert!(parse_kdl_content("all-managers \"yes\"\n").is_err());
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_kdl_content("options {\n").unwrap_err();
        assert!(matches!(err, PkgbarError::ConfigError(_)));
    }
}
