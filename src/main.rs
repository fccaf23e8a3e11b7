mod app_router;
mod dashboard;
mod display;
mod display_sync;
mod local_state;
mod session_store;
mod sync_channel;

use yew::prelude::*;

use app_router::ViewKind;
use dashboard::OperatorView;
use display::DisplayView;

#[function_component(App)]
fn app() -> Html {
    match app_router::load_view_config() {
        ViewKind::Display => html! { <DisplayView /> },
        ViewKind::Operator => html! { <OperatorView /> },
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
