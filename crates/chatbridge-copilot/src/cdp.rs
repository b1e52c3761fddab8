//! CdpDriver: `PageDriver` over a live `chromiumoxide` page.
//!
//! Every operation is one evaluated JS expression. Snippets re-query their
//! selector inside the page, report `{ ok, reason }` instead of throwing, and
//! embed all dynamic strings through JSON escaping so selectors and file
//! names can never break out of the script.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chatbridge_core::{BridgeError, FilePayload};
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::driver::{PageDriver, SyntheticEvent};

/// What a mutation snippet reports back from the page.
#[derive(Debug, Deserialize)]
struct JsOutcome {
    ok: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    form: Option<bool>,
}

pub struct CdpDriver {
    page: Page,
}

impl CdpDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn eval<T: DeserializeOwned>(&self, js: String) -> Result<T, BridgeError> {
        self.page
            .evaluate(js)
            .await
            .map_err(|e| BridgeError::Page(e.to_string()))?
            .into_value::<T>()
            .map_err(|e| BridgeError::Page(e.to_string()))
    }

    /// Run a mutation snippet and map its `{ ok, reason }` report onto the
    /// error taxonomy: a vanished selector is `ElementNotFound`, anything the
    /// page's event machinery threw is `Dispatch`.
    async fn eval_outcome(&self, selector: &str, js: String) -> Result<JsOutcome, BridgeError> {
        let outcome: JsOutcome = self.eval(js).await?;
        if outcome.ok {
            return Ok(outcome);
        }
        match outcome.reason.as_deref() {
            Some("missing") | None => Err(BridgeError::ElementNotFound(selector.to_string())),
            Some(reason) => Err(BridgeError::Dispatch(reason.to_string())),
        }
    }
}

/// JSON-escape a string for embedding in a JS expression.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Constructor expression for each synthetic event. Key events carry Enter
/// with the legacy keyCode 13 some frameworks still switch on.
fn event_constructor(event: SyntheticEvent) -> &'static str {
    match event {
        SyntheticEvent::Input => "new Event('input', { bubbles: true })",
        SyntheticEvent::Change => "new Event('change', { bubbles: true })",
        SyntheticEvent::KeyDown => {
            "new KeyboardEvent('keydown', { key: 'Enter', code: 'Enter', keyCode: 13, which: 13, bubbles: true, cancelable: true })"
        }
        SyntheticEvent::KeyPress => {
            "new KeyboardEvent('keypress', { key: 'Enter', code: 'Enter', keyCode: 13, which: 13, bubbles: true, cancelable: true })"
        }
        SyntheticEvent::KeyUp => {
            "new KeyboardEvent('keyup', { key: 'Enter', code: 'Enter', keyCode: 13, which: 13, bubbles: true, cancelable: true })"
        }
    }
}

/// Snippet fragment turning a base64 payload into a page-side `File`.
fn file_from_base64(file: &FilePayload) -> String {
    format!(
        r#"const raw = atob({b64});
        const bytes = new Uint8Array(raw.length);
        for (let i = 0; i < raw.length; i++) bytes[i] = raw.charCodeAt(i);
        const blob = new File([bytes], {name}, {{ type: {mime} }});"#,
        b64 = js_string(&BASE64.encode(&file.bytes)),
        name = js_string(&file.name),
        mime = js_string(&file.mime_type),
    )
}

#[async_trait]
impl PageDriver for CdpDriver {
    async fn exists(&self, selector: &str) -> Result<bool, BridgeError> {
        self.eval(format!(
            "!!document.querySelector({})",
            js_string(selector)
        ))
        .await
    }

    async fn value(&self, selector: &str) -> Result<String, BridgeError> {
        let value: Option<String> = self
            .eval(format!(
                r#"(() => {{
                    const el = document.querySelector({sel});
                    return el ? (el.value ?? '') : null;
                }})()"#,
                sel = js_string(selector)
            ))
            .await?;
        value.ok_or_else(|| BridgeError::ElementNotFound(selector.to_string()))
    }

    async fn set_value(&self, selector: &str, value: &str) -> Result<(), BridgeError> {
        self.eval_outcome(
            selector,
            format!(
                r#"(() => {{
                    const el = document.querySelector({sel});
                    if (!el) return {{ ok: false, reason: 'missing' }};
                    try {{
                        el.value = {val};
                        return {{ ok: true }};
                    }} catch (err) {{
                        return {{ ok: false, reason: String(err) }};
                    }}
                }})()"#,
                sel = js_string(selector),
                val = js_string(value),
            ),
        )
        .await
        .map(|_| ())
    }

    async fn dispatch(&self, selector: &str, event: SyntheticEvent) -> Result<(), BridgeError> {
        self.eval_outcome(
            selector,
            format!(
                r#"(() => {{
                    const el = document.querySelector({sel});
                    if (!el) return {{ ok: false, reason: 'missing' }};
                    try {{
                        el.dispatchEvent({ctor});
                        return {{ ok: true }};
                    }} catch (err) {{
                        return {{ ok: false, reason: String(err) }};
                    }}
                }})()"#,
                sel = js_string(selector),
                ctor = event_constructor(event),
            ),
        )
        .await
        .map(|_| ())
    }

    async fn focus(&self, selector: &str) -> Result<(), BridgeError> {
        self.eval_outcome(
            selector,
            format!(
                r#"(() => {{
                    const el = document.querySelector({sel});
                    if (!el) return {{ ok: false, reason: 'missing' }};
                    try {{
                        el.focus();
                        return {{ ok: true }};
                    }} catch (err) {{
                        return {{ ok: false, reason: String(err) }};
                    }}
                }})()"#,
                sel = js_string(selector),
            ),
        )
        .await
        .map(|_| ())
    }

    async fn click(&self, selector: &str) -> Result<(), BridgeError> {
        self.eval_outcome(
            selector,
            format!(
                r#"(() => {{
                    const el = document.querySelector({sel});
                    if (!el) return {{ ok: false, reason: 'missing' }};
                    try {{
                        el.click();
                        return {{ ok: true }};
                    }} catch (err) {{
                        return {{ ok: false, reason: String(err) }};
                    }}
                }})()"#,
                sel = js_string(selector),
            ),
        )
        .await
        .map(|_| ())
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool, BridgeError> {
        self.eval(format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                if (el.disabled) return false;
                if (el.getAttribute('aria-disabled') === 'true') return false;
                if (el.classList.contains('disabled')) return false;
                return true;
            }})()"#,
            sel = js_string(selector),
        ))
        .await
    }

    async fn assign_files(&self, selector: &str, file: &FilePayload) -> Result<(), BridgeError> {
        self.eval_outcome(
            selector,
            format!(
                r#"(() => {{
                    const input = document.querySelector({sel});
                    if (!input) return {{ ok: false, reason: 'missing' }};
                    try {{
                        {file_decl}
                        const dt = new DataTransfer();
                        dt.items.add(blob);
                        input.files = dt.files;
                        input.dispatchEvent(new Event('change', {{ bubbles: true }}));
                        return {{ ok: true }};
                    }} catch (err) {{
                        return {{ ok: false, reason: String(err) }};
                    }}
                }})()"#,
                sel = js_string(selector),
                file_decl = file_from_base64(file),
            ),
        )
        .await
        .map(|_| ())
    }

    async fn dispatch_drag_drop(
        &self,
        selector: &str,
        file: &FilePayload,
    ) -> Result<(), BridgeError> {
        self.eval_outcome(
            selector,
            format!(
                r#"(() => {{
                    const el = document.querySelector({sel});
                    if (!el) return {{ ok: false, reason: 'missing' }};
                    try {{
                        {file_decl}
                        const dt = new DataTransfer();
                        dt.items.add(blob);
                        el.addEventListener('dragover', (e) => e.preventDefault(), {{ once: true }});
                        el.dispatchEvent(new DragEvent('dragover', {{ bubbles: true, cancelable: true, dataTransfer: dt }}));
                        el.dispatchEvent(new DragEvent('drop', {{ bubbles: true, cancelable: true, dataTransfer: dt }}));
                        return {{ ok: true }};
                    }} catch (err) {{
                        return {{ ok: false, reason: String(err) }};
                    }}
                }})()"#,
                sel = js_string(selector),
                file_decl = file_from_base64(file),
            ),
        )
        .await
        .map(|_| ())
    }

    async fn submit_ancestor_form(&self, selector: &str) -> Result<bool, BridgeError> {
        let outcome = self
            .eval_outcome(
                selector,
                format!(
                    r#"(() => {{
                        const el = document.querySelector({sel});
                        if (!el) return {{ ok: false, reason: 'missing' }};
                        const form = el.closest('form');
                        if (!form) return {{ ok: true, form: false }};
                        try {{
                            form.dispatchEvent(new Event('submit', {{ bubbles: true, cancelable: true }}));
                            return {{ ok: true, form: true }};
                        }} catch (err) {{
                            return {{ ok: false, reason: String(err) }};
                        }}
                    }})()"#,
                    sel = js_string(selector),
                ),
            )
            .await?;
        Ok(outcome.form.unwrap_or(false))
    }
}
