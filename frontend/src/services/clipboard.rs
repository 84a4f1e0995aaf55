use anyhow::{anyhow, Result};
use wasm_bindgen_futures::JsFuture;

/// Write text to the system clipboard
pub async fn copy_text(text: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("No browser window available"))?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("Clipboard write failed: {:?}", e))?;
    Ok(())
}
