use web_sys::UrlSearchParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ViewKind {
    Operator,
    Display,
}

/// `?view=display` (or `#display`) selects the audience projection;
/// everything else is the operator console.
pub(crate) fn load_view_config() -> ViewKind {
    if is_display_requested() {
        ViewKind::Display
    } else {
        ViewKind::Operator
    }
}

fn is_display_requested() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let location = window.location();
    if let Ok(hash) = location.hash() {
        if hash.trim_start_matches('#').trim().eq_ignore_ascii_case("display") {
            return true;
        }
    }
    if let Ok(search) = location.search() {
        if let Ok(params) = UrlSearchParams::new_with_str(&search) {
            if let Some(view) = params.get("view") {
                return view.trim().eq_ignore_ascii_case("display");
            }
        }
    }
    false
}

pub(crate) fn open_display_window() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let _ = window.open_with_url_and_target("?view=display", "_blank");
}

pub(crate) fn request_fullscreen() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if let Some(element) = document.document_element() {
        let _ = element.request_fullscreen();
    }
}
