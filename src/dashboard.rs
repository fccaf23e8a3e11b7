use std::rc::Rc;

use gloo::console;
use js_sys::{Date, Math};
use web_sys::{Event, HtmlInputElement};
use yew::prelude::*;

use loto_regie_core::{GameSession, GameTier, SessionAction};

use crate::app_router;
use crate::session_store::SessionStore;

fn action_button(store: &Rc<SessionStore>, action: SessionAction, label: &str) -> Html {
    let onclick = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(action.clone()))
    };
    html! { <button {onclick}>{label.to_string()}</button> }
}

fn toggle_row(store: &Rc<SessionStore>, action: SessionAction, label: &str, checked: bool) -> Html {
    let onchange = {
        let store = store.clone();
        Callback::from(move |_: Event| store.dispatch(action.clone()))
    };
    html! {
        <label class="toggle-row">
            <input type="checkbox" checked={checked} {onchange} />
            {label.to_string()}
        </label>
    }
}

fn prize_input(store: &Rc<SessionStore>, tier: GameTier, session: &GameSession) -> Html {
    let onchange = {
        let store = store.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut prizes = store.session().prize_descriptions;
            match tier {
                GameTier::Quine => prizes.quine = input.value(),
                GameTier::DoubleQuine => prizes.double_quine = input.value(),
                GameTier::CartonPlein => prizes.carton_plein = input.value(),
            }
            store.dispatch(SessionAction::SetPrizeDescriptions {
                quine: prizes.quine,
                double_quine: prizes.double_quine,
                carton_plein: prizes.carton_plein,
            });
        })
    };
    html! {
        <label class="prize-row">
            {tier.label()}
            <input
                type="text"
                value={session.prize_descriptions.for_tier(tier).to_string()}
                placeholder="Lot"
                {onchange}
            />
        </label>
    }
}

fn manual_grid(store: &Rc<SessionStore>, session: &GameSession) -> Html {
    let cells: Html = (1..=session.max_pool())
        .map(|number| {
            let drawn = session.drawn_numbers.contains(&number);
            let onclick = {
                let store = store.clone();
                Callback::from(move |_: MouseEvent| {
                    store.dispatch(SessionAction::DrawManualNumber(number));
                })
            };
            let class = if drawn { "cell cell-drawn" } else { "cell" };
            html! { <button class={class} {onclick}>{number}</button> }
        })
        .collect();
    html! { <div class="manual-grid">{cells}</div> }
}

fn drawn_strip(session: &GameSession) -> Html {
    let balls: Html = session
        .drawn_numbers
        .iter()
        .map(|number| html! { <span class="ball-small">{*number}</span> })
        .collect();
    html! { <div class="drawn-strip">{balls}</div> }
}

fn game_section(store: &Rc<SessionStore>, session: &GameSession) -> Html {
    let starts: Html = GameTier::ALL
        .iter()
        .map(|tier| action_button(store, SessionAction::StartGame(*tier), tier.label()))
        .collect();
    let status = match session.current_game {
        Some(tier) => format!("Partie en cours : {}", tier.label()),
        None => "Aucune partie en cours".to_string(),
    };
    let pool_exhausted = session.drawn_numbers.len() >= session.max_pool() as usize;
    let draw_disabled =
        session.current_game.is_none() || session.is_drawing || pool_exhausted;
    let on_draw = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(SessionAction::DrawNumber))
    };
    let win_controls = if session.is_winning {
        action_button(store, SessionAction::ResumeGame, "Reprendre la partie")
    } else {
        action_button(store, SessionAction::SetWinning(true), "Quine annoncée !")
    };
    html! {
        <section class="panel">
            <h2>{"Partie"}</h2>
            <div class="button-row">{starts}</div>
            <p>{status}</p>
            <div class="button-row">
                if !session.is_manual_mode {
                    <button onclick={on_draw} disabled={draw_disabled}>{"Tirer un numéro"}</button>
                }
                {win_controls}
                {action_button(store, SessionAction::EndGame, "Terminer la partie")}
            </div>
            if session.is_manual_mode {
                {manual_grid(store, session)}
            }
            {drawn_strip(session)}
        </section>
    }
}

fn config_section(store: &Rc<SessionStore>, session: &GameSession) -> Html {
    let on_banner_prize = {
        let store = store.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            store.dispatch(SessionAction::SetPrizeDescription(input.value()));
        })
    };
    html! {
        <section class="panel">
            <h2>{"Configuration"}</h2>
            {toggle_row(store, SessionAction::ToggleManualMode, "Saisie manuelle (boulier physique)", session.is_manual_mode)}
            {toggle_row(store, SessionAction::ToggleBingoMode, "Mode Bingo (75 numéros)", session.is_bingo_mode)}
            {toggle_row(store, SessionAction::ToggleDemarque, "Avec démarque", session.with_demarque)}
            {toggle_row(store, SessionAction::ToggleQuinesDuSud, "Mode Quines du Sud", session.is_quines_du_sud_mode)}
            <label class="prize-row">
                {"Lot affiché"}
                <input type="text" value={session.prize_description.clone()} onchange={on_banner_prize} />
            </label>
            {prize_input(store, GameTier::Quine, session)}
            {prize_input(store, GameTier::DoubleQuine, session)}
            {prize_input(store, GameTier::CartonPlein, session)}
        </section>
    }
}

fn wheel_section(store: &Rc<SessionStore>, session: &GameSession) -> Html {
    let on_count = {
        let store = store.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            if let Ok(count) = input.value().parse::<u32>() {
                store.dispatch(SessionAction::SetWheelNumberCount(count));
            }
        })
    };
    let on_prize = {
        let store = store.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            store.dispatch(SessionAction::SetWheelPrize(input.value()));
        })
    };
    let on_spin = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(SessionAction::SpinWheel))
    };
    let result = match session.wheel_winning_number {
        Some(number) if !session.is_wheel_spinning => {
            format!("Résultat : {number} — {}", session.wheel_active_prize)
        }
        Some(_) => "La roue tourne...".to_string(),
        None => String::new(),
    };
    let history: Html = session
        .wheel_draw_history
        .iter()
        .map(|record| html! { <li>{format!("{} — {}", record.number, record.prize)}</li> })
        .collect();
    html! {
        <section class="panel">
            <h2>{"Roue de la fortune"}</h2>
            {toggle_row(store, SessionAction::ToggleWheelMode, "Projeter la roue", session.is_wheel_mode)}
            <label class="prize-row">
                {"Nombre de cases"}
                <input type="number" min="1" value={session.wheel_number_count.to_string()} onchange={on_count} />
            </label>
            <label class="prize-row">
                {"Lot en jeu"}
                <input type="text" value={session.wheel_prize.clone()} onchange={on_prize} />
            </label>
            <div class="button-row">
                <button onclick={on_spin} disabled={session.is_wheel_spinning}>{"Lancer la roue"}</button>
            </div>
            <p>{result}</p>
            <ul class="history">{history}</ul>
        </section>
    }
}

fn images_section(
    store: &Rc<SessionStore>,
    session: &GameSession,
    readers: Rc<std::cell::RefCell<Vec<gloo::file::callbacks::FileReader>>>,
) -> Html {
    let on_pick = {
        let store = store.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(files) = input.files() else {
                return;
            };
            for index in 0..files.length() {
                let Some(file) = files.item(index) else {
                    continue;
                };
                let name = file.name();
                let id = format!(
                    "img-{}-{}",
                    Date::now() as u64,
                    (Math::random() * 1e9) as u64
                );
                let store = store.clone();
                let reader = gloo::file::callbacks::read_as_data_url(
                    &gloo::file::File::from(file),
                    move |result| match result {
                        Ok(data_url) => {
                            store.dispatch(SessionAction::AddImage { id, name, data_url });
                        }
                        Err(_) => console::warn!("image read failed"),
                    },
                );
                readers.borrow_mut().push(reader);
            }
            input.set_value("");
        })
    };
    let entries: Html = session
        .local_images
        .iter()
        .map(|image| {
            let selected = session.selected_image_id.as_deref() == Some(image.id.as_str());
            let onclick = {
                let store = store.clone();
                let id = image.id.clone();
                Callback::from(move |_: MouseEvent| {
                    store.dispatch(SessionAction::SelectImage(Some(id.clone())));
                })
            };
            let class = if selected { "image-entry image-selected" } else { "image-entry" };
            html! { <button class={class} {onclick}>{image.name.clone()}</button> }
        })
        .collect();
    html! {
        <section class="panel">
            <h2>{"Annonces"}</h2>
            <input type="file" accept="image/*" multiple={true} onchange={on_pick} />
            <div class="image-list">{entries}</div>
            <div class="button-row">
                {toggle_row(store, SessionAction::ToggleImageDisplay, "Projeter l'annonce", session.is_image_display_mode)}
                {action_button(store, SessionAction::DeleteAllImages, "Supprimer les annonces")}
            </div>
        </section>
    }
}

fn history_section(session: &GameSession) -> Html {
    let entries: Html = session
        .game_history
        .iter()
        .map(|record| {
            html! {
                <li>{format!("{} — {} numéros", record.tier.label(), record.numbers.len())}</li>
            }
        })
        .collect();
    html! {
        <section class="panel">
            <h2>{"Parties jouées"}</h2>
            <ul class="history">{entries}</ul>
        </section>
    }
}

#[function_component(OperatorView)]
pub(crate) fn operator_view() -> Html {
    let store = use_mut_ref(SessionStore::bootstrap);
    let readers = use_mut_ref(Vec::<gloo::file::callbacks::FileReader>::new);
    let update = use_force_update();
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            let subscription = {
                let store = store.borrow();
                store.subscribe(Rc::new(move || update.force_update()))
            };
            move || drop(subscription)
        });
    }
    let store = store.borrow().clone();
    let session = store.session();

    let on_open_display = Callback::from(|_: MouseEvent| app_router::open_display_window());
    let on_reset = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(SessionAction::ResetAll))
    };

    html! {
        <div class="operator">
            <header class="operator-header">
                <h1>{"Loto Régie"}</h1>
                <div class="button-row">
                    <button onclick={on_open_display}>{"Ouvrir l'affichage"}</button>
                    <button class="danger" onclick={on_reset}>{"Réinitialiser"}</button>
                </div>
            </header>
            {game_section(&store, &session)}
            {config_section(&store, &session)}
            {wheel_section(&store, &session)}
            {images_section(&store, &session, readers)}
            {history_section(&session)}
        </div>
    }
}
