/// Converts a camelCase identifier into its UPPER_SNAKE constant name.
///
/// Every upper-case letter after the first character starts a new segment.
/// Digits and other characters are copied unchanged.
///
/// ```
/// assert_eq!(
///     scoped_actions::to_constant_name("valueRequestSucceeded"),
///     "VALUE_REQUEST_SUCCEEDED"
/// );
/// ```
#[must_use]
pub fn to_constant_name(identifier: &str) -> String {
    let mut name = String::with_capacity(identifier.len() + 4);
    for (index, letter) in identifier.chars().enumerate() {
        if index > 0 && letter.is_uppercase() {
            name.push('_');
        }
        name.push(letter);
    }
    name.to_uppercase()
}

/// Lower-cases the first character only.
#[must_use]
pub fn uncapitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Returns the remainder after `prefix`, if anything remains.
pub(crate) fn strip_nonempty_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_upper_snake_names() {
        assert_eq!(to_constant_name("setValue"), "SET_VALUE");
        assert_eq!(
            to_constant_name("valueRequestSucceeded"),
            "VALUE_REQUEST_SUCCEEDED"
        );
        assert_eq!(to_constant_name("syncValue"), "SYNC_VALUE");
        assert_eq!(to_constant_name("reset"), "RESET");
        assert_eq!(to_constant_name(""), "");
    }

    #[test]
    fn leading_capital_gets_no_separator() {
        assert_eq!(to_constant_name("SetValue"), "SET_VALUE");
    }

    #[test]
    fn digits_and_underscores_pass_through() {
        assert_eq!(to_constant_name("page2Loaded"), "PAGE2_LOADED");
        assert_eq!(to_constant_name("set_value"), "SET_VALUE");
    }

    #[test]
    fn rederiving_keeps_upper_case() {
        let derived = to_constant_name(&to_constant_name("setValue"));
        assert!(derived
            .chars()
            .all(|c| c == '_' || c.is_uppercase()));
    }

    #[test]
    fn uncapitalize_touches_first_character_only() {
        assert_eq!(uncapitalize("Value"), "value");
        assert_eq!(uncapitalize("ValueList"), "valueList");
        assert_eq!(uncapitalize("URL"), "uRL");
        assert_eq!(uncapitalize("value"), "value");
        assert_eq!(uncapitalize(""), "");
    }

    #[test]
    fn nonempty_prefix_requires_a_remainder() {
        assert_eq!(strip_nonempty_prefix("requestValue", "request"), Some("Value"));
        assert_eq!(strip_nonempty_prefix("request", "request"), None);
        assert_eq!(strip_nonempty_prefix("setValue", "request"), None);
    }
}
