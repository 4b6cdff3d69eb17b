//! Typed wrappers around JS interop.
//!
//! Plotly is loaded from its CDN at startup and driven through
//! `js_sys::eval()`. Indicator requests go through the browser `fetch` API.

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wbd_api::{FetchError, HttpResponse, Transport};
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Plotly bundle with geo support for the choropleth.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('WBD JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Append the Plotly script tag once. Call at app startup.
pub fn load_plotly() {
    info!("loading Plotly from {}", PLOTLY_CDN);
    call_js(&format!(
        r#"
        if (!document.getElementById('wbd-plotly')) {{
            var s = document.createElement('script');
            s.id = 'wbd-plotly';
            s.src = '{PLOTLY_CDN}';
            s.async = true;
            document.head.appendChild(s);
        }}
        "#,
    ));
}

/// Poll attempts, 100 ms apart, before a render gives up waiting for Plotly
/// and its container.
pub const RENDER_POLL_LIMIT: u32 = 100;

/// Render a Plotly figure (`{"data": [...], "layout": {...}}`) into the
/// element with id `container_id`.
///
/// Polls until Plotly has loaded and the container exists, then calls
/// `Plotly.react`, which replaces any previous figure in place. A newer
/// render for the same container cancels a poll that is still waiting.
pub fn render_plot(container_id: &str, figure_json: &str) {
    debug!("rendering figure into #{}", container_id);
    let escaped = figure_json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var polls = window.__wbdPolls = window.__wbdPolls || {{}};
            if (polls['{container_id}']) clearInterval(polls['{container_id}']);
            var tries = 0;
            var poll = setInterval(function() {{
                var el = document.getElementById('{container_id}');
                if (typeof window.Plotly !== 'undefined' && el) {{
                    clearInterval(poll);
                    delete polls['{container_id}'];
                    try {{
                        var fig = JSON.parse('{escaped}');
                        window.Plotly.react(el, fig.data, fig.layout, {{ responsive: true, displayModeBar: false }});
                    }} catch(e) {{ console.error('[WBD] Plotly.react error:', e); }}
                }} else if (++tries >= {RENDER_POLL_LIMIT}) {{
                    clearInterval(poll);
                    delete polls['{container_id}'];
                    console.warn('[WBD] gave up rendering #{container_id}');
                }}
            }}, 100);
            polls['{container_id}'] = poll;
        }})();
        "#,
    ));
}

/// Cancel any pending render for the container and remove its figure.
pub fn destroy_chart(container_id: &str) {
    debug!("clearing #{}", container_id);
    call_js(&format!(
        r#"
        var polls = window.__wbdPolls || {{}};
        if (polls['{0}']) {{ clearInterval(polls['{0}']); delete polls['{0}']; }}
        var el = document.getElementById('{0}');
        if (el) {{ if (window.Plotly) window.Plotly.purge(el); el.innerHTML = ''; }}
        "#,
        container_id
    ));
}

/// [`Transport`] backed by `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebTransport;

impl Transport for WebTransport {
    async fn request(&self, url: &str) -> wbd_api::Result<HttpResponse> {
        let window = web_sys::window().ok_or_else(|| FetchError::network("no window"))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| FetchError::network(format!("invalid request: {:?}", e)))?;

        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| FetchError::network(format!("fetch failed: {:?}", e)))?;
        let response: Response = response_value
            .dyn_into()
            .map_err(|_| FetchError::network("fetch did not return a Response"))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|e| FetchError::network(format!("failed to read body: {:?}", e)))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {:?}", e)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
