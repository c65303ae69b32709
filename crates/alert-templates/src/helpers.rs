//! Template helpers.
//!
//! Both helpers treat a missing or non-string argument as its JSON text
//! (or the empty string for null), so a label that is absent from one
//! alert does not abort rendering.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value;

fn param_str(h: &Helper, index: usize) -> String {
    match h.param(index).map(|p| p.value()) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// `{{replace value "old" "new"}}`
pub(crate) fn replace_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = param_str(h, 0);
    let old = param_str(h, 1);
    let new = param_str(h, 2);

    // str::replace with an empty pattern inserts between every character.
    let result = if old.is_empty() {
        value
    } else {
        value.replace(&old, &new)
    };
    out.write(&result)?;
    Ok(())
}

/// `{{upper value}}`
pub(crate) fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&param_str(h, 0).to_uppercase())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("replace", Box::new(replace_helper));
        handlebars.register_helper("upper", Box::new(upper_helper));
        handlebars
    }

    #[test]
    fn test_replace_helper() {
        let result = registry()
            .render_template(r#"{{replace instance ":9100" ""}}"#, &json!({"instance": "host1:9100"}))
            .unwrap();
        assert_eq!(result, "host1");
    }

    #[test]
    fn test_replace_with_empty_pattern_is_identity() {
        let result = registry()
            .render_template(r#"{{replace name "" "-"}}"#, &json!({"name": "abc"}))
            .unwrap();
        assert_eq!(result, "abc");
    }

    #[test]
    fn test_upper_helper() {
        let result = registry()
            .render_template("{{upper severity}}", &json!({"severity": "critical"}))
            .unwrap();
        assert_eq!(result, "CRITICAL");
    }

    #[test]
    fn test_missing_value_renders_empty() {
        let result = registry()
            .render_template("[{{upper missing}}]", &json!({}))
            .unwrap();
        assert_eq!(result, "[]");
    }
}
