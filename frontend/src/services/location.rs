/// Current location fragment, e.g. `"#/view/<token>"`
pub fn current_hash() -> Option<String> {
    web_sys::window()?.location().hash().ok()
}

/// Origin and path of the current page, the base of every share link
pub fn current_base() -> Option<(String, String)> {
    let location = web_sys::window()?.location();
    let origin = location.origin().ok()?;
    let path = location.pathname().ok()?;
    Some((origin, path))
}
