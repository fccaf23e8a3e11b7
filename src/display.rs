use std::rc::Rc;

use yew::prelude::*;

use loto_regie_core::{display_mode, DisplayMode, GameSession, WHEEL_SPIN_MS};

use crate::app_router;
use crate::display_sync::{DisplayHooks, DisplaySyncAdapter};

/// Color banding of the balls, by 15s, matching the physical loto cages.
fn number_color_class(number: u8) -> &'static str {
    match number {
        1..=15 => "ball-blue",
        16..=30 => "ball-red",
        31..=45 => "ball-grey",
        46..=60 => "ball-green",
        61..=75 => "ball-yellow",
        _ => "ball-pink",
    }
}

fn render_image(session: &GameSession) -> Html {
    let Some(image) = session.selected_image() else {
        return html! {};
    };
    html! {
        <div class="display-image">
            <img src={image.data_url.clone()} alt={image.name.clone()} />
        </div>
    }
}

fn render_wheel(session: &GameSession) -> Html {
    let count = session.wheel_number_count.max(1);
    let segment_angle = 360.0 / count as f64;
    let rotation = if session.is_wheel_spinning {
        session.wheel_target_rotation
    } else {
        session.wheel_current_rotation
    };
    let transition_ms = if session.is_wheel_spinning { WHEEL_SPIN_MS } else { 0 };
    let wheel_style = format!(
        "transform: rotate({rotation}deg); transition: transform {transition_ms}ms cubic-bezier(0.15, 0.6, 0.35, 1);"
    );
    let labels: Html = (1..=count)
        .map(|number| {
            let angle = (number - 1) as f64 * segment_angle + segment_angle / 2.0;
            let style = format!("transform: rotate({angle}deg) translateY(-42%);");
            html! { <div class="wheel-label" {style}>{number}</div> }
        })
        .collect();
    let result = match session.wheel_winning_number {
        Some(number) if !session.is_wheel_spinning => html! {
            <div class="wheel-result">
                <span class="wheel-number">{number}</span>
                if !session.wheel_active_prize.is_empty() {
                    <span class="wheel-prize">{session.wheel_active_prize.clone()}</span>
                }
            </div>
        },
        _ => html! {},
    };
    html! {
        <div class="display-wheel">
            <div class="wheel-pointer"></div>
            <div class="wheel" style={wheel_style}>{labels}</div>
            {result}
        </div>
    }
}

fn render_grid(session: &GameSession) -> Html {
    let latest = session.drawn_numbers.last().copied();
    let cells: Html = (1..=session.max_pool())
        .map(|number| {
            let drawn = session.drawn_numbers.contains(&number);
            let class = if drawn {
                classes!("display-cell", number_color_class(number))
            } else {
                classes!("display-cell")
            };
            html! { <div class={class}>{number}</div> }
        })
        .collect();
    let header = match session.current_game {
        Some(tier) => {
            let prize = session.prize_descriptions.for_tier(tier);
            if prize.is_empty() {
                tier.label().to_string()
            } else {
                format!("{} — {}", tier.label(), prize)
            }
        }
        None => session.prize_description.clone(),
    };
    let latest_ball = match latest {
        Some(number) => {
            let class = classes!(
                "display-latest",
                number_color_class(number),
                session.is_drawing.then_some("ball-dropping")
            );
            html! { <div class={class}>{number}</div> }
        }
        None => html! {},
    };
    html! {
        <div class="display-grid-view">
            <header class="display-header">
                <h1>{header}</h1>
                {latest_ball}
            </header>
            <div class="display-grid">{cells}</div>
            if session.is_winning {
                <div class="win-banner">
                    {match session.current_game {
                        Some(tier) => format!("{} !", tier.label().to_uppercase()),
                        None => "GAGNÉ !".to_string(),
                    }}
                </div>
            }
        </div>
    }
}

#[function_component(DisplayView)]
pub(crate) fn display_view() -> Html {
    let session = use_state(GameSession::default);
    let adapter = use_mut_ref(|| None::<DisplaySyncAdapter>);
    {
        let session = session.clone();
        let adapter = adapter.clone();
        use_effect_with((), move |_| {
            let hooks = DisplayHooks {
                on_state: Rc::new(move |next| session.set(next)),
            };
            *adapter.borrow_mut() = Some(DisplaySyncAdapter::start(hooks));
            move || {
                adapter.borrow_mut().take();
            }
        });
    }
    let session = (*session).clone();
    let on_fullscreen = Callback::from(|_: MouseEvent| app_router::request_fullscreen());
    let content = match display_mode(&session) {
        DisplayMode::ImageSlide => render_image(&session),
        DisplayMode::Wheel => render_wheel(&session),
        DisplayMode::NumberGrid => render_grid(&session),
    };
    html! {
        <div class="display">
            {content}
            <button class="fullscreen" onclick={on_fullscreen}>{"⛶"}</button>
        </div>
    }
}
