//! Text insertion: append a rendered tool result to the chat input and raise
//! the notifications the page's framework listens for.
//!
//! Dispatch order is fixed (`input` then `change`, both bubbling) to match
//! native browser ordering, then focus moves to the input so the user sees
//! the caret where the content landed.

use chatbridge_core::BridgeError;
use serde_json::Value;

use crate::driver::{PageDriver, SyntheticEvent};
use crate::locator::locate_chat_input;

/// Render a tool result for the chat input: strings go in verbatim, anything
/// else is pretty-printed structured text.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Append `value` to the chat input, separated from existing content by
/// exactly one blank line (none when the input is empty), then notify and
/// focus. The adapter boundary reduces any error here to a logged `false`.
pub(crate) async fn insert_value(driver: &dyn PageDriver, value: &Value) -> Result<(), BridgeError> {
    let strategy = locate_chat_input(driver)
        .await?
        .ok_or_else(|| BridgeError::ElementNotFound("chat input".to_string()))?;
    let selector = strategy.selector;

    let rendered = render_value(value);
    let existing = driver.value(selector).await?;
    let combined = if existing.is_empty() {
        rendered
    } else {
        format!("{existing}\n\n{rendered}")
    };

    driver.set_value(selector, &combined).await?;
    driver.dispatch(selector, SyntheticEvent::Input).await?;
    driver.dispatch(selector, SyntheticEvent::Change).await?;
    driver.focus(selector).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, MockPage};
    use serde_json::json;

    #[tokio::test]
    async fn empty_input_gets_no_leading_separator() {
        let page = MockPage::new();
        page.add_textarea(&["textarea"], "");
        insert_value(&page, &json!("hello")).await.unwrap();
        assert_eq!(page.value_of("textarea").unwrap(), "hello");
    }

    #[tokio::test]
    async fn existing_content_is_separated_by_one_blank_line() {
        let page = MockPage::new();
        page.add_textarea(&["textarea"], "draft");
        insert_value(&page, &json!("result")).await.unwrap();
        assert_eq!(page.value_of("textarea").unwrap(), "draft\n\nresult");
    }

    #[tokio::test]
    async fn object_value_is_pretty_printed() {
        let page = MockPage::new();
        page.add_textarea(&["textarea"], "draft");
        insert_value(&page, &json!({"a": 1})).await.unwrap();
        assert_eq!(
            page.value_of("textarea").unwrap(),
            "draft\n\n{\n  \"a\": 1\n}"
        );
    }

    #[tokio::test]
    async fn object_path_matches_equivalent_string_path() {
        let rendered = render_value(&json!({"a": 1}));
        let page_obj = MockPage::new();
        page_obj.add_textarea(&["textarea"], "");
        insert_value(&page_obj, &json!({"a": 1})).await.unwrap();

        let page_str = MockPage::new();
        page_str.add_textarea(&["textarea"], "");
        insert_value(&page_str, &Value::String(rendered)).await.unwrap();

        assert_eq!(
            page_obj.value_of("textarea").unwrap(),
            page_str.value_of("textarea").unwrap()
        );
    }

    #[tokio::test]
    async fn dispatches_input_then_change_then_focus() {
        let page = MockPage::new();
        page.add_textarea(&["textarea"], "");
        insert_value(&page, &json!("x")).await.unwrap();
        let calls = page.calls();
        assert_eq!(
            calls,
            vec![
                Call::SetValue {
                    selector: "textarea".to_string(),
                    value: "x".to_string(),
                },
                Call::Dispatch {
                    selector: "textarea".to_string(),
                    event: SyntheticEvent::Input,
                },
                Call::Dispatch {
                    selector: "textarea".to_string(),
                    event: SyntheticEvent::Change,
                },
                Call::Focus {
                    selector: "textarea".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn missing_input_is_element_not_found() {
        let page = MockPage::new();
        let err = insert_value(&page, &json!("x")).await.unwrap_err();
        assert!(matches!(err, BridgeError::ElementNotFound(_)));
        assert!(page.calls().is_empty());
    }
}
